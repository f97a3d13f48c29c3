//! The `EmployeeRepository` trait and the source that hands repositories out.
//!
//! A repository is a unit of work: reads go straight to the store, writes are
//! staged with [`EmployeeRepository::add`] / [`EmployeeRepository::update`]
//! and applied together by [`EmployeeRepository::save`]. Nothing tracks
//! in-place edits of loaded entities, so every mutation must be staged.

use std::future::Future;

use uuid::Uuid;

use crate::employee::Employee;

/// Abstraction over an employee storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EmployeeRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Retrieve the employee row only; nested records are left as `None`.
  fn get_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Retrieve the employee with its contact and employee info eager-loaded.
  fn get_by_id_with_children(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Every stored employee, nested records included. Soft-deleted rows are
  /// returned too.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  // ── Staged writes ─────────────────────────────────────────────────────────

  /// Stage the insert of a new employee and any nested records it carries.
  fn add(&mut self, employee: Employee);

  /// Stage an update of an existing employee. Nested records that are
  /// `Some` are written (inserted if they have no row yet); `None` leaves
  /// the stored record untouched.
  fn update(&mut self, employee: Employee);

  /// Apply all staged changes atomically and return the number of rows
  /// written. The stage is empty afterwards.
  fn save(
    &mut self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

/// Hands out a fresh repository per operation, so staged changes never leak
/// between concurrent requests.
pub trait RepositorySource: Send + Sync {
  type Repository: EmployeeRepository;

  fn repository(&self) -> Self::Repository;
}
