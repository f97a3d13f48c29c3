//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Every employee, soft-deleted ones included |
//! | `GET`    | `/employees/:id` | 404 if not found |
//! | `POST`   | `/employees` | Body: [`AddEmployeeDto`]; insert or update by `id` |
//! | `DELETE` | `/employees/:id` | `?deleted_by=<user id>` required; soft delete |
//! | `PUT`    | `/employees/:id/file` | Body: `{"file_name":"..."}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
};
use roster_core::{
  dto::{AddEmployeeDto, FileRecordDto},
  employee::Employee,
  service::EmployeeService,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

fn not_found(id: Uuid) -> ApiError {
  ApiError::NotFound(format!("employee {id} not found"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /employees`
pub async fn list<S>(
  State(service): State<Arc<S>>,
) -> Result<Json<Vec<Employee>>, ApiError>
where
  S: EmployeeService,
{
  Ok(Json(service.get_all_employees().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(service): State<Arc<S>>,
  path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeService,
{
  let Path(id) = path?;
  let employee = service
    .get_employee_by_id(id)
    .await?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── Add or update ────────────────────────────────────────────────────────────

/// `POST /employees`: returns the service's confirmation message.
///
/// A missing, `null` or malformed body is rejected before the service runs.
pub async fn add_or_update<S>(
  State(service): State<Arc<S>>,
  payload: Result<Json<AddEmployeeDto>, JsonRejection>,
) -> Result<Json<String>, ApiError>
where
  S: EmployeeService,
{
  let Json(dto) = payload?;
  Ok(Json(service.add_or_update_employee(dto).await?))
}

// ─── Soft delete ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SoftDeleteParams {
  /// Id of the user performing the delete.
  pub deleted_by: i64,
}

/// `DELETE /employees/:id?deleted_by=<user id>`: returns the flagged record.
pub async fn soft_delete<S>(
  State(service): State<Arc<S>>,
  path: Result<Path<Uuid>, PathRejection>,
  params: Result<Query<SoftDeleteParams>, QueryRejection>,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeService,
{
  let Path(id) = path?;
  let Query(params) = params?;
  let employee = service
    .soft_delete_employee(id, params.deleted_by)
    .await?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── File record ──────────────────────────────────────────────────────────────

/// `PUT /employees/:id/file`, body: `{"file_name":"..."}`.
pub async fn save_file<S>(
  State(service): State<Arc<S>>,
  path: Result<Path<Uuid>, PathRejection>,
  payload: Result<Json<FileRecordDto>, JsonRejection>,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeService,
{
  let Path(id) = path?;
  let Json(body) = payload?;
  body.validate()?;
  let employee = service
    .save_file_record(id, body.file_name)
    .await?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}
