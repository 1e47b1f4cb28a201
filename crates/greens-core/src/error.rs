//! Error types for `greens-core`.
//!
//! A failed lookup is not an error: resolution returns `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The backing store could not be reached or rejected the query.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// An internal caller broke an API precondition.
  #[error("contract violation: {0}")]
  ContractViolation(&'static str),

  #[error("password hashing failed: {0}")]
  Hash(String),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::StoreUnavailable(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
