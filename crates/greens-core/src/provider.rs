//! [`IdentityProvider`] — resolves ids, credentials and remember tokens into
//! an [`Identity`] across both account collections, and maintains the
//! remember token stored on each record.
//!
//! People are always searched before organizations. When the same id (or
//! the same email) exists in both collections, the person wins.

use crate::{
  Error, Result,
  credentials::{Credentials, Predicates},
  identity::{AccountKind, Identity},
  store::CredentialStore,
  token::{Recaller, RememberToken},
  validator,
};

/// Attribute names used for token lookups.
const ID: &str = "id";
const REMEMBER_TOKEN: &str = "remember_token";

/// Authentication provider over a [`CredentialStore`].
///
/// Cheap to construct; holds no state besides the store handle.
#[derive(Debug, Clone)]
pub struct IdentityProvider<S> {
  store: S,
}

impl<S: CredentialStore> IdentityProvider<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Resolution ────────────────────────────────────────────────────────

  /// Person with `id`, else organization with `id`.
  pub async fn resolve_by_id(&self, id: i64) -> Result<Option<Identity>> {
    for kind in AccountKind::PRECEDENCE {
      if let Some(found) =
        self.store.find_by_id(kind, id).await.map_err(Error::store)?
      {
        return Ok(Some(found));
      }
    }
    tracing::debug!(id, "no identity with id");
    Ok(None)
  }

  /// Locate an account from login credentials, ignoring the password.
  ///
  /// Empty credentials, or a lone password, never reach the store.
  pub async fn resolve_by_credentials(
    &self,
    credentials: &Credentials,
  ) -> Result<Option<Identity>> {
    if !credentials.is_locatable() {
      tracing::debug!("credentials carry no lookup attribute");
      return Ok(None);
    }
    self.first_match(&credentials.predicates()).await
  }

  /// Account with `id` whose stored remember token equals `token`.
  pub async fn resolve_by_token(
    &self,
    id: i64,
    token: &RememberToken,
  ) -> Result<Option<Identity>> {
    if token.as_str().is_empty() {
      return Ok(None);
    }
    let predicates = Predicates::from([
      (ID.to_owned(), id.to_string()),
      (REMEMBER_TOKEN.to_owned(), token.as_str().to_owned()),
    ]);
    self.first_match(&predicates).await
  }

  pub async fn resolve_recaller(
    &self,
    recaller: &Recaller,
  ) -> Result<Option<Identity>> {
    self.resolve_by_token(recaller.id, &recaller.token).await
  }

  async fn first_match(&self, predicates: &Predicates) -> Result<Option<Identity>> {
    for kind in AccountKind::PRECEDENCE {
      if let Some(found) =
        self.store.find_by(kind, predicates).await.map_err(Error::store)?
      {
        return Ok(Some(found));
      }
    }
    tracing::debug!(attributes = ?predicates.keys().collect::<Vec<_>>(), "no identity matched");
    Ok(None)
  }

  // ── Credentials ───────────────────────────────────────────────────────

  /// See [`validator::validate`].
  pub fn validate(&self, identity: &Identity, credentials: &Credentials) -> Result<bool> {
    validator::validate(identity, credentials)
  }

  /// Re-hash and persist the password when the stored hash uses outdated
  /// parameters. Only call after a successful [`Self::validate`].
  pub async fn rehash_password_if_required(
    &self,
    identity: &mut Identity,
    credentials: &Credentials,
  ) -> Result<bool> {
    if !validator::needs_rehash(identity.password_hash()) {
      return Ok(false);
    }
    let password = credentials
      .password()
      .ok_or(Error::ContractViolation("rehash called without a password"))?;

    identity.set_password_hash(validator::hash_password(password)?);
    identity.touch();
    self
      .store
      .update_password_hash(
        identity.kind(),
        identity.id(),
        identity.password_hash(),
        identity.updated_at(),
      )
      .await
      .map_err(Error::store)?;

    tracing::info!(kind = ?identity.kind(), id = identity.id(), "password rehashed");
    Ok(true)
  }

  // ── Remember tokens ───────────────────────────────────────────────────

  /// Overwrite the identity's remember token and persist it. The previous
  /// token stops resolving as soon as this returns.
  ///
  /// Only the token column is written, so concurrent changes to the rest of
  /// the record survive. `updated_at` is left alone.
  pub async fn update_remember_token(
    &self,
    identity: &mut Identity,
    token: RememberToken,
  ) -> Result<()> {
    self
      .store
      .update_remember_token(identity.kind(), identity.id(), Some(token.as_str()))
      .await
      .map_err(Error::store)?;
    identity.set_remember_token(Some(token.into_string()));
    Ok(())
  }

  /// Return the identity's remember token, creating one if it has none.
  ///
  /// An existing token is reused so that other devices holding it stay
  /// signed in until the next logout cycles it.
  pub async fn ensure_remember_token(
    &self,
    identity: &mut Identity,
  ) -> Result<RememberToken> {
    if let Some(existing) = identity.remember_token().filter(|t| !t.is_empty()) {
      return Ok(RememberToken::from(existing));
    }
    self.cycle_remember_token(identity).await
  }

  /// Generate, store and return a fresh remember token.
  pub async fn cycle_remember_token(
    &self,
    identity: &mut Identity,
  ) -> Result<RememberToken> {
    let token = RememberToken::generate();
    self.update_remember_token(identity, token.clone()).await?;
    Ok(token)
  }
}
