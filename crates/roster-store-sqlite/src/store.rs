//! [`SqliteStore`] and its request-scoped [`SqliteEmployeeRepository`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use roster_core::{
  employee::Employee,
  repository::{EmployeeRepository, RepositorySource},
};

use crate::{
  Error, Result,
  encode::{EmployeeGraphRow, RawEmployee, encode_uuid},
  schema::SCHEMA,
};

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Employee row only; the nine child columns are selected as `NULL` so rows
/// share one decoder with [`SELECT_WITH_CHILDREN`].
const SELECT_EMPLOYEE: &str = "
  SELECT e.id, e.name, e.email, e.phone, e.salary,
         e.created_by, e.created_date_time, e.is_deleted, e.deleted_by,
         NULL, NULL, NULL, NULL,
         NULL, NULL, NULL, NULL, NULL, NULL
  FROM employees e";

const SELECT_WITH_CHILDREN: &str = "
  SELECT e.id, e.name, e.email, e.phone, e.salary,
         e.created_by, e.created_date_time, e.is_deleted, e.deleted_by,
         c.id, c.address, c.phone_number, c.email,
         i.id, i.department, i.position, i.gender, i.address, i.file_name
  FROM employees e
  LEFT JOIN contact_infos  c ON c.employee_id = e.id
  LEFT JOIN employee_infos i ON i.employee_id = e.id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// An employee store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl RepositorySource for SqliteStore {
  type Repository = SqliteEmployeeRepository;

  fn repository(&self) -> SqliteEmployeeRepository {
    SqliteEmployeeRepository {
      conn:   self.conn.clone(),
      staged: Vec::new(),
    }
  }
}

// ─── Repository ──────────────────────────────────────────────────────────────

enum Staged {
  Insert(EmployeeGraphRow),
  Update(EmployeeGraphRow),
}

/// A unit of work over a [`SqliteStore`] connection. Staged writes are held
/// here until [`EmployeeRepository::save`] applies them in one transaction.
pub struct SqliteEmployeeRepository {
  conn:   tokio_rusqlite::Connection,
  staged: Vec<Staged>,
}

impl SqliteEmployeeRepository {
  async fn query_one(&self, sql: &'static str, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{sql} WHERE e.id = ?1"),
            rusqlite::params![id_str],
            RawEmployee::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }
}

impl EmployeeRepository for SqliteEmployeeRepository {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
    self.query_one(SELECT_EMPLOYEE, id).await
  }

  async fn get_by_id_with_children(&self, id: Uuid) -> Result<Option<Employee>> {
    self.query_one(SELECT_WITH_CHILDREN, id).await
  }

  async fn get_all(&self) -> Result<Vec<Employee>> {
    let raws: Vec<RawEmployee> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "{SELECT_WITH_CHILDREN} ORDER BY e.created_date_time, e.id"
        ))?;
        let rows = stmt
          .query_map([], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  // ── Staged writes ─────────────────────────────────────────────────────────

  fn add(&mut self, employee: Employee) {
    self.staged.push(Staged::Insert(employee.into()));
  }

  fn update(&mut self, employee: Employee) {
    self.staged.push(Staged::Update(employee.into()));
  }

  async fn save(&mut self) -> Result<usize> {
    let staged = std::mem::take(&mut self.staged);
    let changes = staged.len();

    // `Err(id)` names an update whose target row is missing; the
    // transaction is dropped (rolled back) before anything is committed.
    let outcome: std::result::Result<usize, Uuid> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut written = 0;
        for change in &staged {
          match change {
            Staged::Insert(row) => written += insert_graph(&tx, row)?,
            Staged::Update(row) => match update_graph(&tx, row)? {
              Some(n) => written += n,
              None => return Ok(Err(row.id)),
            },
          }
        }
        tx.commit()?;
        Ok(Ok(written))
      })
      .await?;

    let written = outcome.map_err(Error::EmployeeNotFound)?;
    debug!(changes, written, "saved staged employee changes");
    Ok(written)
  }
}

// ─── Write helpers (database thread) ─────────────────────────────────────────

fn insert_graph(
  conn: &rusqlite::Connection,
  row: &EmployeeGraphRow,
) -> rusqlite::Result<usize> {
  let mut written = conn.execute(
    "INSERT INTO employees (
       id, name, email, phone, salary,
       created_by, created_date_time, is_deleted, deleted_by
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    rusqlite::params![
      row.id_str,
      row.name,
      row.email,
      row.phone,
      row.salary,
      row.created_by,
      row.created_date_time,
      row.is_deleted,
      row.deleted_by,
    ],
  )?;
  written += upsert_children(conn, row)?;
  Ok(written)
}

/// Returns `None` if no employee row matched.
fn update_graph(
  conn: &rusqlite::Connection,
  row: &EmployeeGraphRow,
) -> rusqlite::Result<Option<usize>> {
  let updated = conn.execute(
    "UPDATE employees SET
       name = ?2, email = ?3, phone = ?4, salary = ?5,
       created_by = ?6, is_deleted = ?7, deleted_by = ?8
     WHERE id = ?1",
    rusqlite::params![
      row.id_str,
      row.name,
      row.email,
      row.phone,
      row.salary,
      row.created_by,
      row.is_deleted,
      row.deleted_by,
    ],
  )?;
  if updated == 0 {
    return Ok(None);
  }
  Ok(Some(updated + upsert_children(conn, row)?))
}

/// Write whichever nested records the graph carries. An existing row for the
/// same employee keeps its id; only its value columns change.
fn upsert_children(
  conn: &rusqlite::Connection,
  row: &EmployeeGraphRow,
) -> rusqlite::Result<usize> {
  let mut written = 0;

  if let Some(c) = &row.contact_info {
    written += conn.execute(
      "INSERT INTO contact_infos (id, employee_id, address, phone_number, email)
       VALUES (?1, ?2, ?3, ?4, ?5)
       ON CONFLICT (employee_id) DO UPDATE SET
         address      = excluded.address,
         phone_number = excluded.phone_number,
         email        = excluded.email",
      rusqlite::params![c.id, row.id_str, c.address, c.phone_number, c.email],
    )?;
  }

  if let Some(i) = &row.employee_info {
    written += conn.execute(
      "INSERT INTO employee_infos (
         id, employee_id, department, position, gender, address, file_name
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
       ON CONFLICT (employee_id) DO UPDATE SET
         department = excluded.department,
         position   = excluded.position,
         gender     = excluded.gender,
         address    = excluded.address,
         file_name  = excluded.file_name",
      rusqlite::params![
        i.id,
        row.id_str,
        i.department,
        i.position,
        i.gender,
        i.address,
        i.file_name,
      ],
    )?;
  }

  Ok(written)
}
