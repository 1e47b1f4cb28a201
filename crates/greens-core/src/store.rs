//! The `CredentialStore` trait.
//!
//! Implemented by storage backends (e.g. `greens-store-sqlite`). The
//! resolution logic in [`crate::provider`] depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  credentials::Predicates,
  identity::{AccountKind, Identity},
};

/// Abstraction over the two account collections.
///
/// Reads return at most one record; `Ok(None)` means "not found". Any `Err`
/// is treated by callers as the store being unavailable.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a record by id within one collection.
  fn find_by_id(
    &self,
    kind: AccountKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  /// Return the first record (lowest id) of `kind` whose attributes equal
  /// every entry of `predicates`.
  fn find_by<'a>(
    &'a self,
    kind: AccountKind,
    predicates: &'a Predicates,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + 'a;

  /// Insert or overwrite the record in the collection matching its variant.
  /// The write is durable once the future resolves.
  fn save<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite only the remember token of one record. Every other column,
  /// `updated_at` included, is left as stored.
  fn update_remember_token<'a>(
    &'a self,
    kind: AccountKind,
    id: i64,
    token: Option<&'a str>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite only the password hash (and `updated_at`) of one record.
  fn update_password_hash<'a>(
    &'a self,
    kind: AccountKind,
    id: i64,
    hash: &'a str,
    updated_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
