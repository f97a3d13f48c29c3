//! The `EmployeeService` trait and its repository-backed implementation.
//!
//! The HTTP layer depends on the trait; [`EmployeeManager`] is the only
//! production implementation. Each operation opens its own repository from
//! the [`RepositorySource`] and commits with at most one `save`.

use std::future::Future;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  Error, Result,
  dto::AddEmployeeDto,
  employee::Employee,
  repository::{EmployeeRepository, RepositorySource},
};

/// Returned by a successful add-or-update, whichever branch ran.
pub const SAVED_MESSAGE: &str = "Employee record created/updated successfully";

// ─── Trait ───────────────────────────────────────────────────────────────────

pub trait EmployeeService: Send + Sync {
  /// Every employee, soft-deleted ones included.
  fn get_all_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>>> + Send + '_;

  /// The employee with nested records, or `None` if unknown.
  fn get_employee_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + '_;

  /// Insert the employee if `dto.id` is unknown (or absent), otherwise update
  /// it in place. Returns [`SAVED_MESSAGE`].
  fn add_or_update_employee(
    &self,
    dto: AddEmployeeDto,
  ) -> impl Future<Output = Result<String>> + Send + '_;

  /// Flag the employee as deleted by `deleted_by` and return it with its
  /// nested records. `None` if unknown.
  fn soft_delete_employee(
    &self,
    id: Uuid,
    deleted_by: i64,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + '_;

  /// Record `file_name` on the employee's info record. `None` if the
  /// employee is unknown; [`Error::MissingEmployeeInfo`] if it has no info
  /// record to attach to.
  fn save_file_record(
    &self,
    id: Uuid,
    file_name: String,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + '_;
}

// ─── Implementation ──────────────────────────────────────────────────────────

pub struct EmployeeManager<P> {
  source: P,
}

impl<P: RepositorySource> EmployeeManager<P> {
  pub fn new(source: P) -> Self { Self { source } }
}

impl<P: RepositorySource> EmployeeService for EmployeeManager<P> {
  async fn get_all_employees(&self) -> Result<Vec<Employee>> {
    let repo = self.source.repository();
    let employees = repo.get_all().await.map_err(Error::store)?;
    debug!(count = employees.len(), "listed employees");
    Ok(employees)
  }

  async fn get_employee_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
    let repo = self.source.repository();
    let employee = repo
      .get_by_id_with_children(id)
      .await
      .map_err(Error::store)?;
    debug!(employee_id = %id, found = employee.is_some(), "looked up employee");
    Ok(employee)
  }

  async fn add_or_update_employee(&self, dto: AddEmployeeDto) -> Result<String> {
    dto.validate()?;

    let mut repo = self.source.repository();
    let existing = match dto.id {
      Some(id) => repo
        .get_by_id_with_children(id)
        .await
        .map_err(Error::store)?,
      None => None,
    };

    match existing {
      Some(mut employee) => {
        dto.apply_to(&mut employee);
        info!(employee_id = %employee.id, "updating employee");
        repo.update(employee);
      }
      None => {
        let id = dto.id.unwrap_or_else(Uuid::new_v4);
        info!(employee_id = %id, "creating employee");
        repo.add(dto.into_employee(id, Utc::now()));
      }
    }

    repo.save().await.map_err(Error::store)?;
    Ok(SAVED_MESSAGE.to_owned())
  }

  async fn soft_delete_employee(
    &self,
    id: Uuid,
    deleted_by: i64,
  ) -> Result<Option<Employee>> {
    let mut repo = self.source.repository();
    let Some(mut employee) = repo
      .get_by_id_with_children(id)
      .await
      .map_err(Error::store)?
    else {
      return Ok(None);
    };

    employee.soft_delete(deleted_by);
    repo.update(employee.clone());
    repo.save().await.map_err(Error::store)?;

    info!(employee_id = %id, deleted_by, "soft-deleted employee");
    Ok(Some(employee))
  }

  async fn save_file_record(
    &self,
    id: Uuid,
    file_name: String,
  ) -> Result<Option<Employee>> {
    let mut repo = self.source.repository();
    let Some(mut employee) = repo
      .get_by_id_with_children(id)
      .await
      .map_err(Error::store)?
    else {
      return Ok(None);
    };

    let info = employee
      .employee_info
      .as_mut()
      .ok_or(Error::MissingEmployeeInfo(id))?;
    info.file_name = Some(file_name);

    repo.update(employee.clone());
    repo.save().await.map_err(Error::store)?;

    info!(employee_id = %id, "attached file record");
    Ok(Some(employee))
  }
}
