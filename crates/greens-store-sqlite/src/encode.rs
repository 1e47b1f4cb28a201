//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Booleans are stored as 0/1.

use chrono::{DateTime, Utc};
use greens_core::identity::{AccountKind, Identity, Organization, Person};

use crate::{Error, Result};

// ─── Tables ───────────────────────────────────────────────────────────────────

pub fn table(kind: AccountKind) -> &'static str {
  match kind {
    AccountKind::Person => "users",
    AccountKind::Organization => "companies",
  }
}

/// Column list shared by every SELECT. Companies have no admin flag, so the
/// slot is filled with a constant.
pub fn select_columns(kind: AccountKind) -> &'static str {
  match kind {
    AccountKind::Person => {
      "id, name, email, password_hash, remember_token, is_admin, created_at, updated_at"
    }
    AccountKind::Organization => {
      "id, name, email, password_hash, remember_token, 0, created_at, updated_at"
    }
  }
}

/// Map a predicate attribute onto a filterable column.
pub fn filter_column(attribute: &str) -> Result<&'static str> {
  match attribute {
    "id" => Ok("id"),
    "name" => Ok("name"),
    "email" => Ok("email"),
    "remember_token" => Ok("remember_token"),
    other => Err(Error::UnknownAttribute(other.to_owned())),
  }
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// One row as read from either table.
pub struct RawAccount {
  pub id:             i64,
  pub name:           String,
  pub email:          String,
  pub password_hash:  String,
  pub remember_token: Option<String>,
  pub is_admin:       bool,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawAccount {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawAccount {
      id:             row.get(0)?,
      name:           row.get(1)?,
      email:          row.get(2)?,
      password_hash:  row.get(3)?,
      remember_token: row.get(4)?,
      is_admin:       row.get(5)?,
      created_at:     row.get(6)?,
      updated_at:     row.get(7)?,
    })
  }

  pub fn into_identity(self, kind: AccountKind) -> Result<Identity> {
    let created_at = decode_dt(&self.created_at)?;
    let updated_at = decode_dt(&self.updated_at)?;
    Ok(match kind {
      AccountKind::Person => Identity::Person(Person {
        id: self.id,
        name: self.name,
        email: self.email,
        password_hash: self.password_hash,
        remember_token: self.remember_token,
        is_admin: self.is_admin,
        created_at,
        updated_at,
      }),
      AccountKind::Organization => Identity::Organization(Organization {
        id: self.id,
        name: self.name,
        email: self.email,
        password_hash: self.password_hash,
        remember_token: self.remember_token,
        created_at,
        updated_at,
      }),
    })
  }
}
