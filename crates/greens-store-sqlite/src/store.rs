//! [`SqliteStore`] — the SQLite implementation of [`CredentialStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use greens_core::{
  credentials::Predicates,
  identity::{AccountKind, Identity},
  store::CredentialStore,
};

use crate::{
  Result,
  encode::{RawAccount, encode_dt, filter_column, select_columns, table},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Greens account storage backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row SELECT against the table for `kind`.
  async fn select_one(
    &self,
    kind: AccountKind,
    sql: String,
    params: Vec<String>,
  ) -> Result<Option<Identity>> {
    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params_from_iter(params.iter()),
              RawAccount::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|r| r.into_identity(kind)).transpose()
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = crate::Error;

  async fn find_by_id(&self, kind: AccountKind, id: i64) -> Result<Option<Identity>> {
    let sql = format!(
      "SELECT {} FROM {} WHERE id = ?1",
      select_columns(kind),
      table(kind),
    );
    self.select_one(kind, sql, vec![id.to_string()]).await
  }

  async fn find_by(
    &self,
    kind: AccountKind,
    predicates: &Predicates,
  ) -> Result<Option<Identity>> {
    // No predicates would match every row.
    if predicates.is_empty() {
      return Ok(None);
    }

    // Build WHERE clause from the whitelisted columns.
    let mut conds  = Vec::with_capacity(predicates.len());
    let mut params = Vec::with_capacity(predicates.len());
    for (i, (attribute, value)) in predicates.iter().enumerate() {
      conds.push(format!("{} = ?{}", filter_column(attribute)?, i + 1));
      params.push(value.clone());
    }

    let sql = format!(
      "SELECT {} FROM {} WHERE {} ORDER BY id LIMIT 1",
      select_columns(kind),
      table(kind),
      conds.join(" AND "),
    );
    self.select_one(kind, sql, params).await
  }

  async fn save(&self, identity: &Identity) -> Result<()> {
    let identity = identity.clone();

    self
      .conn
      .call(move |conn| {
        match identity {
          Identity::Person(p) => {
            conn.execute(
              "INSERT INTO users (
                 id, name, email, password_hash, remember_token,
                 is_admin, created_at, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
               ON CONFLICT(id) DO UPDATE SET
                 name           = excluded.name,
                 email          = excluded.email,
                 password_hash  = excluded.password_hash,
                 remember_token = excluded.remember_token,
                 is_admin       = excluded.is_admin,
                 updated_at     = excluded.updated_at",
              rusqlite::params![
                p.id,
                p.name,
                p.email,
                p.password_hash,
                p.remember_token,
                p.is_admin,
                encode_dt(p.created_at),
                encode_dt(p.updated_at),
              ],
            )?;
          }
          Identity::Organization(o) => {
            conn.execute(
              "INSERT INTO companies (
                 id, name, email, password_hash, remember_token,
                 created_at, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT(id) DO UPDATE SET
                 name           = excluded.name,
                 email          = excluded.email,
                 password_hash  = excluded.password_hash,
                 remember_token = excluded.remember_token,
                 updated_at     = excluded.updated_at",
              rusqlite::params![
                o.id,
                o.name,
                o.email,
                o.password_hash,
                o.remember_token,
                encode_dt(o.created_at),
                encode_dt(o.updated_at),
              ],
            )?;
          }
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_remember_token(
    &self,
    kind: AccountKind,
    id: i64,
    token: Option<&str>,
  ) -> Result<()> {
    let sql = format!("UPDATE {} SET remember_token = ?1 WHERE id = ?2", table(kind));
    let token = token.map(str::to_owned);

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![token, id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_password_hash(
    &self,
    kind: AccountKind,
    id: i64,
    hash: &str,
    updated_at: DateTime<Utc>,
  ) -> Result<()> {
    let sql = format!(
      "UPDATE {} SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
      table(kind),
    );
    let hash = hash.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![hash, encode_dt(updated_at), id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
