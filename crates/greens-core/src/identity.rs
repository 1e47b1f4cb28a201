//! Identity — an authenticatable account, either a person or an
//! organization.
//!
//! The two variants live in separate collections with no shared base table.
//! Ids are only unique within one collection, so `(Person, 7)` and
//! `(Organization, 7)` are different accounts.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Tags ────────────────────────────────────────────────────────────────────

/// Which collection an identity is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
  Person,
  Organization,
}

impl AccountKind {
  /// Resolution order. People are searched before organizations.
  pub const PRECEDENCE: [AccountKind; 2] =
    [AccountKind::Person, AccountKind::Organization];
}

/// The single authorization tag an identity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
  Client,
  Admin,
  Contractor,
}

impl RoleClaim {
  pub fn as_str(self) -> &'static str {
    match self {
      RoleClaim::Client => "client",
      RoleClaim::Admin => "admin",
      RoleClaim::Contractor => "contractor",
    }
  }
}

impl fmt::Display for RoleClaim {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleClaim {
  type Err = UnknownRole;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "client" => Ok(RoleClaim::Client),
      "admin" => Ok(RoleClaim::Admin),
      "contractor" => Ok(RoleClaim::Contractor),
      other => Err(UnknownRole(other.to_owned())),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// An individual end-user account: a client, or staff when `is_admin` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub id:             i64,
  pub name:           String,
  pub email:          String,
  /// argon2 PHC string.
  pub password_hash:  String,
  pub remember_token: Option<String>,
  pub is_admin:       bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// A business account. Every organization is a contractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
  pub id:             i64,
  pub name:           String,
  pub email:          String,
  /// argon2 PHC string.
  pub password_hash:  String,
  pub remember_token: Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Any authenticatable account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
  Person(Person),
  Organization(Organization),
}

impl Identity {
  pub fn kind(&self) -> AccountKind {
    match self {
      Identity::Person(_) => AccountKind::Person,
      Identity::Organization(_) => AccountKind::Organization,
    }
  }

  pub fn id(&self) -> i64 {
    match self {
      Identity::Person(p) => p.id,
      Identity::Organization(o) => o.id,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Identity::Person(p) => &p.name,
      Identity::Organization(o) => &o.name,
    }
  }

  pub fn email(&self) -> &str {
    match self {
      Identity::Person(p) => &p.email,
      Identity::Organization(o) => &o.email,
    }
  }

  pub fn password_hash(&self) -> &str {
    match self {
      Identity::Person(p) => &p.password_hash,
      Identity::Organization(o) => &o.password_hash,
    }
  }

  pub fn remember_token(&self) -> Option<&str> {
    match self {
      Identity::Person(p) => p.remember_token.as_deref(),
      Identity::Organization(o) => o.remember_token.as_deref(),
    }
  }

  /// The normalised role: the admin flag for people, `Contractor` for
  /// organizations.
  pub fn role(&self) -> RoleClaim {
    match self {
      Identity::Person(p) if p.is_admin => RoleClaim::Admin,
      Identity::Person(_) => RoleClaim::Client,
      Identity::Organization(_) => RoleClaim::Contractor,
    }
  }

  /// Replace the stored remember token. The previous value is discarded.
  pub fn set_remember_token(&mut self, token: Option<String>) {
    match self {
      Identity::Person(p) => p.remember_token = token,
      Identity::Organization(o) => o.remember_token = token,
    }
  }

  pub fn set_password_hash(&mut self, hash: String) {
    match self {
      Identity::Person(p) => p.password_hash = hash,
      Identity::Organization(o) => o.password_hash = hash,
    }
  }

  pub fn updated_at(&self) -> DateTime<Utc> {
    match self {
      Identity::Person(p) => p.updated_at,
      Identity::Organization(o) => o.updated_at,
    }
  }

  /// Bump `updated_at` to now.
  pub fn touch(&mut self) {
    let now = Utc::now();
    match self {
      Identity::Person(p) => p.updated_at = now,
      Identity::Organization(o) => o.updated_at = now,
    }
  }

  pub fn profile(&self) -> Profile {
    Profile {
      kind:  self.kind(),
      id:    self.id(),
      name:  self.name().to_owned(),
      email: self.email().to_owned(),
      role:  self.role(),
    }
  }
}

impl From<Person> for Identity {
  fn from(p: Person) -> Self { Identity::Person(p) }
}

impl From<Organization> for Identity {
  fn from(o: Organization) -> Self { Identity::Organization(o) }
}

/// Public view of an identity. Never carries secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub kind:  AccountKind,
  pub id:    i64,
  pub name:  String,
  pub email: String,
  pub role:  RoleClaim,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{organization, person};

  #[test]
  fn person_role_follows_admin_flag() {
    let mut p = person(1, "a@x.com");
    assert_eq!(Identity::from(p.clone()).role(), RoleClaim::Client);
    p.is_admin = true;
    assert_eq!(Identity::from(p).role(), RoleClaim::Admin);
  }

  #[test]
  fn organization_is_always_contractor() {
    let o = Identity::from(organization(1, "biz@x.com"));
    assert_eq!(o.role(), RoleClaim::Contractor);
    assert_eq!(o.kind(), AccountKind::Organization);
  }

  #[test]
  fn role_parses_lowercase_names() {
    assert_eq!("contractor".parse::<RoleClaim>(), Ok(RoleClaim::Contractor));
    assert_eq!("admin".parse::<RoleClaim>(), Ok(RoleClaim::Admin));
    assert!("Admin".parse::<RoleClaim>().is_err());
    assert_eq!(RoleClaim::Client.to_string(), "client");
  }

  #[test]
  fn profile_omits_secrets() {
    let mut id = Identity::from(person(4, "a@x.com"));
    id.set_remember_token(Some("tok".into()));
    let json = serde_json::to_value(id.profile()).unwrap();
    assert_eq!(json["kind"], "person");
    assert_eq!(json["role"], "client");
    assert!(json.get("password_hash").is_none());
    assert!(json.get("remember_token").is_none());
  }

  #[test]
  fn set_remember_token_replaces_previous() {
    let mut id = Identity::from(organization(2, "biz@x.com"));
    id.set_remember_token(Some("old".into()));
    id.set_remember_token(Some("new".into()));
    assert_eq!(id.remember_token(), Some("new"));
  }
}
