//! Core types and trait definitions for the Roster employee-records backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend implements [`repository::EmployeeRepository`]; the
//! HTTP layer talks to [`service::EmployeeService`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod dto;
pub mod employee;
pub mod error;
pub mod repository;
pub mod service;

pub use error::{Error, Result};
