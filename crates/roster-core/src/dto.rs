//! Request payloads and their explicit conversion into entities.
//!
//! Each DTO has two directions into the entity graph: `into_*` builds a fresh
//! entity, `apply_to` overwrites an existing one in place so that its id and
//! owner edge survive an update.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  employee::{ContactInfo, Employee, EmployeeInfo},
};

// ─── AddEmployeeDto ──────────────────────────────────────────────────────────

/// Body of an add-or-update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddEmployeeDto {
  /// Omitted for a brand-new employee; the service then assigns one.
  #[serde(default)]
  pub id:            Option<Uuid>,
  pub name:          String,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub phone:         Option<String>,
  #[serde(default)]
  pub salary:        Option<Decimal>,
  #[serde(default)]
  pub created_by:    i64,
  #[serde(default)]
  pub contact_info:  Option<ContactInfoDto>,
  #[serde(default)]
  pub employee_info: Option<EmployeeInfoDto>,
}

impl AddEmployeeDto {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::InvalidPayload("name must not be blank".into()));
    }
    Ok(())
  }

  /// Build a new, live employee with id `id`. Nested records are created
  /// only for the payloads that are present.
  pub fn into_employee(self, id: Uuid, created_at: DateTime<Utc>) -> Employee {
    Employee {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      salary: self.salary,
      created_by: self.created_by,
      created_date_time: created_at,
      is_deleted: false,
      deleted_by: None,
      contact_info: self.contact_info.map(|c| c.into_contact_info(id)),
      employee_info: self.employee_info.map(|e| e.into_employee_info(id)),
    }
  }

  /// Overwrite `employee`'s scalar fields and, for each nested payload
  /// present, the matching nested record. Absent payloads leave the stored
  /// records alone; a missing record is created for a present payload.
  ///
  /// Identity, creation time and soft-delete state are never touched.
  pub fn apply_to(self, employee: &mut Employee) {
    employee.name = self.name;
    employee.email = self.email;
    employee.phone = self.phone;
    employee.salary = self.salary;
    employee.created_by = self.created_by;

    let owner = employee.id;
    if let Some(contact) = self.contact_info {
      contact.apply_to(
        employee
          .contact_info
          .get_or_insert_with(|| ContactInfo::empty(owner)),
      );
    }
    if let Some(info) = self.employee_info {
      info.apply_to(
        employee
          .employee_info
          .get_or_insert_with(|| EmployeeInfo::empty(owner)),
      );
    }
  }
}

// ─── ContactInfoDto ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfoDto {
  #[serde(default)]
  pub address:      Option<String>,
  #[serde(default)]
  pub phone_number: Option<String>,
  #[serde(default)]
  pub email:        Option<String>,
}

impl ContactInfoDto {
  pub fn into_contact_info(self, employee_id: Uuid) -> ContactInfo {
    let mut contact = ContactInfo::empty(employee_id);
    self.apply_to(&mut contact);
    contact
  }

  pub fn apply_to(self, contact: &mut ContactInfo) {
    contact.address = self.address;
    contact.phone_number = self.phone_number;
    contact.email = self.email;
  }
}

// ─── EmployeeInfoDto ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfoDto {
  #[serde(default)]
  pub department: Option<String>,
  #[serde(default)]
  pub position:   Option<String>,
  #[serde(default)]
  pub gender:     Option<String>,
  #[serde(default)]
  pub address:    Option<String>,
  #[serde(default)]
  pub file_name:  Option<String>,
}

impl EmployeeInfoDto {
  pub fn into_employee_info(self, employee_id: Uuid) -> EmployeeInfo {
    let mut info = EmployeeInfo::empty(employee_id);
    self.apply_to(&mut info);
    info
  }

  pub fn apply_to(self, info: &mut EmployeeInfo) {
    info.department = self.department;
    info.position = self.position;
    info.gender = self.gender;
    info.address = self.address;
    info.file_name = self.file_name;
  }
}

// ─── FileRecordDto ───────────────────────────────────────────────────────────

/// Body of an attach-file request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecordDto {
  pub file_name: String,
}

impl FileRecordDto {
  pub fn validate(&self) -> Result<()> {
    if self.file_name.trim().is_empty() {
      return Err(Error::InvalidPayload("file_name must not be blank".into()));
    }
    Ok(())
  }
}
