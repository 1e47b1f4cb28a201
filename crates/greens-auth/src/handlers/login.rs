//! `POST /login` — interactive login.

use axum::{Json, extract::State};
use greens_core::{
  credentials::{Credentials, PASSWORD},
  identity::Profile,
  store::CredentialStore,
  token::Recaller,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::Error};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    Option<String>,
  pub password: Option<String>,
  #[serde(default)]
  pub remember: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub identity: Profile,
  /// Present when `remember` was requested; send back as
  /// `Authorization: Remember <recaller>`.
  pub recaller: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, Error>
where
  S: CredentialStore + Clone + 'static,
{
  // The validator must never see credentials without a password.
  let password = body
    .password
    .filter(|p| !p.is_empty())
    .ok_or_else(|| Error::Unprocessable("password is required".to_string()))?;

  let mut credentials = Credentials::new().with(PASSWORD, password);
  if let Some(email) = body.email {
    credentials.insert("email", email);
  }

  let provider = &state.provider;
  let Some(mut identity) = provider.resolve_by_credentials(&credentials).await? else {
    return Err(Error::InvalidCredentials);
  };
  if !provider.validate(&identity, &credentials)? {
    tracing::debug!(kind = ?identity.kind(), id = identity.id(), "password mismatch");
    return Err(Error::InvalidCredentials);
  }

  provider
    .rehash_password_if_required(&mut identity, &credentials)
    .await?;

  let recaller = if body.remember {
    let token = provider.ensure_remember_token(&mut identity).await?;
    Some(Recaller::new(identity.id(), token).encode())
  } else {
    None
  };

  tracing::info!(kind = ?identity.kind(), id = identity.id(), "login");
  Ok(Json(LoginResponse { identity: identity.profile(), recaller }))
}
