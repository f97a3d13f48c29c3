//! Persisted entity graph: an [`Employee`] and the two records it owns.
//!
//! [`ContactInfo`] and [`EmployeeInfo`] have no lifecycle of their own. They
//! are created alongside (or later attached to) exactly one employee and
//! always carry that employee's id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
  pub id:                Uuid,
  pub name:              String,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub salary:            Option<Decimal>,
  /// Id of the user who created the record.
  pub created_by:        i64,
  pub created_date_time: DateTime<Utc>,
  pub is_deleted:        bool,
  /// Id of the user who soft-deleted the record, if any.
  pub deleted_by:        Option<i64>,
  pub contact_info:      Option<ContactInfo>,
  pub employee_info:     Option<EmployeeInfo>,
}

impl Employee {
  /// A bare, live employee with no optional fields or nested records.
  pub fn new(id: Uuid, name: impl Into<String>, created_by: i64) -> Self {
    Self {
      id,
      name: name.into(),
      email: None,
      phone: None,
      salary: None,
      created_by,
      created_date_time: Utc::now(),
      is_deleted: false,
      deleted_by: None,
      contact_info: None,
      employee_info: None,
    }
  }

  /// Flag the record as deleted by `actor`. The row itself stays.
  pub fn soft_delete(&mut self, actor: i64) {
    self.is_deleted = true;
    self.deleted_by = Some(actor);
  }
}

// ─── Owned records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub id:           Uuid,
  pub employee_id:  Uuid,
  pub address:      Option<String>,
  pub phone_number: Option<String>,
  pub email:        Option<String>,
}

impl ContactInfo {
  pub fn empty(employee_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      employee_id,
      address: None,
      phone_number: None,
      email: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
  pub id:          Uuid,
  pub employee_id: Uuid,
  pub department:  Option<String>,
  pub position:    Option<String>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
  /// Name of an attached document (CV, contract, ...). Only the name is
  /// stored; file contents live elsewhere.
  pub file_name:   Option<String>,
}

impl EmployeeInfo {
  pub fn empty(employee_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      employee_id,
      department: None,
      position: None,
      gender: None,
      address: None,
      file_name: None,
    }
  }
}
