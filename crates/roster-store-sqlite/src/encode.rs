//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, salaries as decimal strings and
//! UUIDs as hyphenated lowercase strings.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use roster_core::employee::{ContactInfo, Employee, EmployeeInfo};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Decimal ──────────────────────────────────────────────────────────────────

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> { Ok(Decimal::from_str(s)?) }

// ─── Write rows ───────────────────────────────────────────────────────────────

/// An employee graph flattened into column values, ready to be moved onto
/// the database thread.
pub struct EmployeeGraphRow {
  pub id:                Uuid,
  pub id_str:            String,
  pub name:              String,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub salary:            Option<String>,
  pub created_by:        i64,
  pub created_date_time: String,
  pub is_deleted:        bool,
  pub deleted_by:        Option<i64>,
  pub contact_info:      Option<ContactInfoRow>,
  pub employee_info:     Option<EmployeeInfoRow>,
}

pub struct ContactInfoRow {
  pub id:           String,
  pub address:      Option<String>,
  pub phone_number: Option<String>,
  pub email:        Option<String>,
}

pub struct EmployeeInfoRow {
  pub id:         String,
  pub department: Option<String>,
  pub position:   Option<String>,
  pub gender:     Option<String>,
  pub address:    Option<String>,
  pub file_name:  Option<String>,
}

impl From<Employee> for EmployeeGraphRow {
  fn from(e: Employee) -> Self {
    Self {
      id:                e.id,
      id_str:            encode_uuid(e.id),
      name:              e.name,
      email:             e.email,
      phone:             e.phone,
      salary:            e.salary.map(encode_decimal),
      created_by:        e.created_by,
      created_date_time: encode_dt(e.created_date_time),
      is_deleted:        e.is_deleted,
      deleted_by:        e.deleted_by,
      contact_info:      e.contact_info.map(ContactInfoRow::from),
      employee_info:     e.employee_info.map(EmployeeInfoRow::from),
    }
  }
}

// The owner column is always written from the parent row, so a nested record
// can never be attached to a different employee.

impl From<ContactInfo> for ContactInfoRow {
  fn from(c: ContactInfo) -> Self {
    Self {
      id:           encode_uuid(c.id),
      address:      c.address,
      phone_number: c.phone_number,
      email:        c.email,
    }
  }
}

impl From<EmployeeInfo> for EmployeeInfoRow {
  fn from(i: EmployeeInfo) -> Self {
    Self {
      id:         encode_uuid(i.id),
      department: i.department,
      position:   i.position,
      gender:     i.gender,
      address:    i.address,
      file_name:  i.file_name,
    }
  }
}

// ─── Read rows ────────────────────────────────────────────────────────────────

/// Raw values read from an `employees` row left-joined with its nested
/// records. Child columns are all `NULL` when the child is absent or was not
/// selected.
pub struct RawEmployee {
  pub id:                String,
  pub name:              String,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub salary:            Option<String>,
  pub created_by:        i64,
  pub created_date_time: String,
  pub is_deleted:        bool,
  pub deleted_by:        Option<i64>,
  // contact_infos join
  pub contact_id:        Option<String>,
  pub contact_address:   Option<String>,
  pub contact_phone:     Option<String>,
  pub contact_email:     Option<String>,
  // employee_infos join
  pub info_id:           Option<String>,
  pub info_department:   Option<String>,
  pub info_position:     Option<String>,
  pub info_gender:       Option<String>,
  pub info_address:      Option<String>,
  pub info_file_name:    Option<String>,
}

impl RawEmployee {
  /// Column order must match [`crate::store`]'s `SELECT_*` statements.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      email:             row.get(2)?,
      phone:             row.get(3)?,
      salary:            row.get(4)?,
      created_by:        row.get(5)?,
      created_date_time: row.get(6)?,
      is_deleted:        row.get(7)?,
      deleted_by:        row.get(8)?,
      contact_id:        row.get(9)?,
      contact_address:   row.get(10)?,
      contact_phone:     row.get(11)?,
      contact_email:     row.get(12)?,
      info_id:           row.get(13)?,
      info_department:   row.get(14)?,
      info_position:     row.get(15)?,
      info_gender:       row.get(16)?,
      info_address:      row.get(17)?,
      info_file_name:    row.get(18)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    let id = decode_uuid(&self.id)?;

    let contact_info = self
      .contact_id
      .as_deref()
      .map(decode_uuid)
      .transpose()?
      .map(|contact_id| ContactInfo {
        id:           contact_id,
        employee_id:  id,
        address:      self.contact_address,
        phone_number: self.contact_phone,
        email:        self.contact_email,
      });

    let employee_info = self
      .info_id
      .as_deref()
      .map(decode_uuid)
      .transpose()?
      .map(|info_id| EmployeeInfo {
        id:          info_id,
        employee_id: id,
        department:  self.info_department,
        position:    self.info_position,
        gender:      self.info_gender,
        address:     self.info_address,
        file_name:   self.info_file_name,
      });

    Ok(Employee {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      salary: self.salary.as_deref().map(decode_decimal).transpose()?,
      created_by: self.created_by,
      created_date_time: decode_dt(&self.created_date_time)?,
      is_deleted: self.is_deleted,
      deleted_by: self.deleted_by,
      contact_info,
      employee_info,
    })
  }
}
