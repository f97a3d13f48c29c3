//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Rows are soft-deleted via is_deleted/deleted_by; no DELETE is ever issued.
CREATE TABLE IF NOT EXISTS employees (
    id                TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    email             TEXT,
    phone             TEXT,
    salary            TEXT,            -- decimal rendered as text
    created_by        INTEGER NOT NULL,
    created_date_time TEXT NOT NULL,   -- RFC 3339 UTC
    is_deleted        INTEGER NOT NULL DEFAULT 0,
    deleted_by        INTEGER
);

-- At most one row per employee, never shared.
CREATE TABLE IF NOT EXISTS contact_infos (
    id           TEXT PRIMARY KEY,
    employee_id  TEXT NOT NULL REFERENCES employees(id),
    address      TEXT,
    phone_number TEXT,
    email        TEXT,
    UNIQUE (employee_id)
);

CREATE TABLE IF NOT EXISTS employee_infos (
    id          TEXT PRIMARY KEY,
    employee_id TEXT NOT NULL REFERENCES employees(id),
    department  TEXT,
    position    TEXT,
    gender      TEXT,
    address     TEXT,
    file_name   TEXT,
    UNIQUE (employee_id)
);

CREATE INDEX IF NOT EXISTS employees_created_idx ON employees(created_date_time);

PRAGMA user_version = 1;
";
