//! `POST /logout` — invalidate outstanding recallers.

use axum::{extract::State, http::StatusCode};
use greens_core::store::CredentialStore;

use crate::{AppState, auth::CurrentIdentity, error::Error};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(mut identity): CurrentIdentity,
) -> Result<StatusCode, Error>
where
  S: CredentialStore + Clone + 'static,
{
  if identity.remember_token().is_some() {
    state.provider.cycle_remember_token(&mut identity).await?;
  }
  tracing::info!(kind = ?identity.kind(), id = identity.id(), "logout");
  Ok(StatusCode::NO_CONTENT)
}
