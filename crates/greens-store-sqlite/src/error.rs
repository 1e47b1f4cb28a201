//! Error type for `greens-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A lookup filtered on a column the collection does not have.
  #[error("unknown attribute: {0:?}")]
  UnknownAttribute(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
