//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::service::EmployeeService`]. Auth and TLS are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(service.clone()))
//! ```

pub mod employees;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, put},
};
use roster_core::service::EmployeeService;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<S>) -> Router<()>
where
  S: EmployeeService + 'static,
{
  Router::new()
    .route(
      "/employees",
      get(employees::list::<S>).post(employees::add_or_update::<S>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>).delete(employees::soft_delete::<S>),
    )
    .route("/employees/{id}/file", put(employees::save_file::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use roster_core::{
    Error,
    dto::AddEmployeeDto,
    employee::Employee,
    service::{EmployeeManager, SAVED_MESSAGE},
  };
  use roster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  // ── Stub service ───────────────────────────────────────────────────────────

  /// Answers every lookup with `employee`; never touches a store. With
  /// `fail` set, every call reports a store failure instead.
  #[derive(Default)]
  struct StubService {
    employee: Option<Employee>,
    fail:     bool,
  }

  impl StubService {
    fn check(&self) -> roster_core::Result<()> {
      if self.fail {
        return Err(Error::store(std::io::Error::other("disk I/O error")));
      }
      Ok(())
    }
  }

  impl EmployeeService for StubService {
    async fn get_all_employees(&self) -> roster_core::Result<Vec<Employee>> {
      self.check()?;
      Ok(self.employee.clone().into_iter().collect())
    }

    async fn get_employee_by_id(
      &self,
      _id: Uuid,
    ) -> roster_core::Result<Option<Employee>> {
      self.check()?;
      Ok(self.employee.clone())
    }

    async fn add_or_update_employee(
      &self,
      _dto: AddEmployeeDto,
    ) -> roster_core::Result<String> {
      self.check()?;
      Ok("Saved".to_string())
    }

    async fn soft_delete_employee(
      &self,
      _id: Uuid,
      deleted_by: i64,
    ) -> roster_core::Result<Option<Employee>> {
      self.check()?;
      Ok(self.employee.clone().map(|mut e| {
        e.soft_delete(deleted_by);
        e
      }))
    }

    async fn save_file_record(
      &self,
      id: Uuid,
      file_name: String,
    ) -> roster_core::Result<Option<Employee>> {
      self.check()?;
      let Some(mut e) = self.employee.clone() else {
        return Ok(None);
      };
      let info = e
        .employee_info
        .as_mut()
        .ok_or(Error::MissingEmployeeInfo(id))?;
      info.file_name = Some(file_name);
      Ok(Some(e))
    }
  }

  fn stub(employee: Option<Employee>) -> Router {
    api_router(Arc::new(StubService { employee, fail: false }))
  }

  fn failing() -> Router {
    api_router(Arc::new(StubService { employee: None, fail: true }))
  }

  async fn call(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
      .body(Body::from(body.unwrap_or_default().to_string()))
      .unwrap();
    router.oneshot(req).await.unwrap()
  }

  async fn json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Controller behaviour (stub service) ────────────────────────────────────

  #[tokio::test]
  async fn list_returns_200_with_array() {
    let resp = call(stub(None), "GET", "/employees", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(json(resp).await.is_array());
  }

  #[tokio::test]
  async fn get_unknown_returns_404() {
    let uri = format!("/employees/{}", Uuid::new_v4());
    let resp = call(stub(None), "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn get_malformed_id_returns_400() {
    let resp = call(stub(None), "GET", "/employees/not-a-uuid", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn add_or_update_null_body_returns_400() {
    let resp = call(stub(None), "POST", "/employees", Some("null")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn add_or_update_missing_body_returns_400() {
    let resp = call(stub(None), "POST", "/employees", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn add_or_update_valid_returns_service_message() {
    let resp =
      call(stub(None), "POST", "/employees", Some(r#"{"name":"Ali"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await, serde_json::json!("Saved"));
  }

  #[tokio::test]
  async fn soft_delete_unknown_returns_404() {
    let uri = format!("/employees/{}?deleted_by=1", Uuid::new_v4());
    let resp = call(stub(None), "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn soft_delete_found_returns_employee() {
    let id = Uuid::new_v4();
    let uri = format!("/employees/{id}?deleted_by=1");
    let resp = call(
      stub(Some(Employee::new(id, "Test", 1))),
      "DELETE",
      &uri,
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body["id"], serde_json::json!(id));
    assert_eq!(body["is_deleted"], serde_json::json!(true));
  }

  #[tokio::test]
  async fn soft_delete_without_actor_returns_400() {
    let uri = format!("/employees/{}", Uuid::new_v4());
    let resp = call(stub(None), "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn save_file_without_employee_info_returns_409() {
    let id = Uuid::new_v4();
    let uri = format!("/employees/{id}/file");
    let resp = call(
      stub(Some(Employee::new(id, "No Info", 1))),
      "PUT",
      &uri,
      Some(r#"{"file_name":"cv.pdf"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn store_failure_returns_500_with_error_body() {
    let resp = call(failing(), "GET", "/employees", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("disk I/O error"));

    let resp =
      call(failing(), "POST", "/employees", Some(r#"{"name":"Ali"}"#)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn save_file_blank_name_returns_400() {
    let uri = format!("/employees/{}/file", Uuid::new_v4());
    let resp =
      call(stub(None), "PUT", &uri, Some(r#"{"file_name":""}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── End to end (in-memory store) ───────────────────────────────────────────

  async fn live() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(EmployeeManager::new(store)))
  }

  #[tokio::test]
  async fn add_or_update_blank_name_returns_400() {
    let app = live().await;
    let resp =
      call(app.clone(), "POST", "/employees", Some(r#"{"name":" "}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json(resp).await["error"].is_string());

    let list = json(call(app, "GET", "/employees", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn upsert_then_update_keeps_single_record() {
    let app = live().await;
    let id = Uuid::new_v4();

    let create = format!(
      r#"{{"id":"{id}","name":"Ali","email":"ali@gmail.com","created_by":1,
          "salary":"60000",
          "contact_info":{{"address":"Lahore"}},
          "employee_info":{{"department":"IT"}}}}"#
    );
    let resp = call(app.clone(), "POST", "/employees", Some(&create)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await, serde_json::json!(SAVED_MESSAGE));

    let update = format!(
      r#"{{"id":"{id}","name":"Updated Ali","created_by":1,
          "contact_info":{{"address":"Karachi"}}}}"#
    );
    let resp = call(app.clone(), "POST", "/employees", Some(&update)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let list = json(call(app.clone(), "GET", "/employees", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let one = json(
      call(app, "GET", &format!("/employees/{id}"), None).await,
    )
    .await;
    assert_eq!(one["name"], "Updated Ali");
    assert_eq!(one["contact_info"]["address"], "Karachi");
    assert_eq!(one["employee_info"]["department"], "IT");
  }

  #[tokio::test]
  async fn soft_delete_and_attach_file_end_to_end() {
    let app = live().await;
    let id = Uuid::new_v4();

    let create = format!(
      r#"{{"id":"{id}","name":"File Test","employee_info":{{"position":"Dev"}}}}"#
    );
    call(app.clone(), "POST", "/employees", Some(&create)).await;

    let resp = call(
      app.clone(),
      "PUT",
      &format!("/employees/{id}/file"),
      Some(r#"{"file_name":"testfile.pdf"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body["employee_info"]["file_name"], "testfile.pdf");
    assert_eq!(body["employee_info"]["position"], "Dev");

    let resp = call(
      app.clone(),
      "DELETE",
      &format!("/employees/{id}?deleted_by=2"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let one = json(
      call(app, "GET", &format!("/employees/{id}"), None).await,
    )
    .await;
    assert_eq!(one["is_deleted"], true);
    assert_eq!(one["deleted_by"], 2);
  }

  #[tokio::test]
  async fn attach_file_to_employee_without_info_end_to_end() {
    let app = live().await;
    let id = Uuid::new_v4();
    call(
      app.clone(),
      "POST",
      "/employees",
      Some(&format!(r#"{{"id":"{id}","name":"Bare"}}"#)),
    )
    .await;

    let resp = call(
      app,
      "PUT",
      &format!("/employees/{id}/file"),
      Some(r#"{"file_name":"cv.pdf"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }
}
