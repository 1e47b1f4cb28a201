//! Shared fixtures for unit tests.

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, Utc};

use crate::{
  credentials::Predicates,
  identity::{AccountKind, Identity, Organization, Person},
  store::CredentialStore,
  validator::hash_password,
};

pub fn person(id: i64, email: &str) -> Person {
  Person {
    id,
    name: format!("person {id}"),
    email: email.to_owned(),
    password_hash: String::new(),
    remember_token: None,
    is_admin: false,
    created_at: Utc::now(),
    updated_at: Utc::now(),
  }
}

pub fn organization(id: i64, email: &str) -> Organization {
  Organization {
    id,
    name: format!("org {id}"),
    email: email.to_owned(),
    password_hash: String::new(),
    remember_token: None,
    created_at: Utc::now(),
    updated_at: Utc::now(),
  }
}

pub fn person_with_password(id: i64, email: &str, password: &str) -> Identity {
  let mut identity = Identity::from(person(id, email));
  identity.set_password_hash(hash_password(password).unwrap());
  identity
}

/// Vector-backed store that counts every read.
#[derive(Clone, Default)]
pub struct MemoryStore {
  records: Arc<Mutex<Vec<Identity>>>,
  queries: Arc<AtomicUsize>,
}

impl MemoryStore {
  pub fn insert(&self, identity: impl Into<Identity>) {
    let identity = identity.into();
    let mut records = self.records.lock().unwrap();
    records.retain(|r| (r.kind(), r.id()) != (identity.kind(), identity.id()));
    records.push(identity);
    records.sort_by_key(Identity::id);
  }

  pub fn queries(&self) -> usize { self.queries.load(Ordering::SeqCst) }

  fn attribute(identity: &Identity, name: &str) -> Option<String> {
    match name {
      "id" => Some(identity.id().to_string()),
      "name" => Some(identity.name().to_owned()),
      "email" => Some(identity.email().to_owned()),
      "remember_token" => identity.remember_token().map(str::to_owned),
      _ => None,
    }
  }
}

impl CredentialStore for MemoryStore {
  type Error = std::convert::Infallible;

  async fn find_by_id(&self, kind: AccountKind, id: i64) -> Result<Option<Identity>, Self::Error> {
    self.queries.fetch_add(1, Ordering::SeqCst);
    let records = self.records.lock().unwrap();
    Ok(records.iter().find(|r| r.kind() == kind && r.id() == id).cloned())
  }

  async fn find_by(
    &self,
    kind: AccountKind,
    predicates: &Predicates,
  ) -> Result<Option<Identity>, Self::Error> {
    self.queries.fetch_add(1, Ordering::SeqCst);
    let records = self.records.lock().unwrap();
    Ok(
      records
        .iter()
        .filter(|r| r.kind() == kind)
        .find(|r| {
          predicates
            .iter()
            .all(|(k, v)| Self::attribute(r, k).as_deref() == Some(v.as_str()))
        })
        .cloned(),
    )
  }

  async fn save(&self, identity: &Identity) -> Result<(), Self::Error> {
    self.insert(identity.clone());
    Ok(())
  }

  async fn update_remember_token(
    &self,
    kind: AccountKind,
    id: i64,
    token: Option<&str>,
  ) -> Result<(), Self::Error> {
    let mut records = self.records.lock().unwrap();
    if let Some(r) = records.iter_mut().find(|r| r.kind() == kind && r.id() == id) {
      r.set_remember_token(token.map(str::to_owned));
    }
    Ok(())
  }

  async fn update_password_hash(
    &self,
    kind: AccountKind,
    id: i64,
    hash: &str,
    updated_at: DateTime<Utc>,
  ) -> Result<(), Self::Error> {
    let mut records = self.records.lock().unwrap();
    if let Some(r) = records.iter_mut().find(|r| r.kind() == kind && r.id() == id) {
      r.set_password_hash(hash.to_owned());
      match r {
        Identity::Person(p) => p.updated_at = updated_at,
        Identity::Organization(o) => o.updated_at = updated_at,
      }
    }
    Ok(())
  }
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct Unreachable;

/// A store whose every call fails.
#[derive(Clone)]
pub struct UnreachableStore;

impl CredentialStore for UnreachableStore {
  type Error = Unreachable;

  async fn find_by_id(&self, _: AccountKind, _: i64) -> Result<Option<Identity>, Self::Error> {
    Err(Unreachable)
  }

  async fn find_by(&self, _: AccountKind, _: &Predicates) -> Result<Option<Identity>, Self::Error> {
    Err(Unreachable)
  }

  async fn save(&self, _: &Identity) -> Result<(), Self::Error> { Err(Unreachable) }

  async fn update_remember_token(
    &self,
    _: AccountKind,
    _: i64,
    _: Option<&str>,
  ) -> Result<(), Self::Error> {
    Err(Unreachable)
  }

  async fn update_password_hash(
    &self,
    _: AccountKind,
    _: i64,
    _: &str,
    _: DateTime<Utc>,
  ) -> Result<(), Self::Error> {
    Err(Unreachable)
  }
}
