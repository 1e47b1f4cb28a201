//! HTTP surface for Greens account authentication.
//!
//! Exposes an axum [`Router`] backed by any [`CredentialStore`]: login,
//! logout, the current identity, and role-gated mount points for the
//! marketplace operations that live elsewhere.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::Request,
  middleware::{self, Next},
  routing::{get, post},
};
use greens_core::{identity::RoleClaim, provider::IdentityProvider, store::CredentialStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{attach_identity, require_role};
use handlers::{login, logout, me};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CredentialStore> {
  pub provider: Arc<IdentityProvider<S>>,
}

impl<S: CredentialStore> AppState<S> {
  pub fn new(store: S) -> Self {
    Self { provider: Arc::new(IdentityProvider::new(store)) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the auth server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CredentialStore + Clone + 'static,
{
  Router::new()
    .route("/login",  post(login::handler::<S>))
    .route("/logout", post(logout::handler::<S>))
    .route("/me",     get(me::handler))
    .nest("/admin",      gated(RoleClaim::Admin))
    .nest("/contractor", gated(RoleClaim::Contractor))
    .nest("/client",     gated(RoleClaim::Client))
    .layer(middleware::from_fn_with_state(state.clone(), attach_identity::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Routes that only identities holding `role` may reach.
fn gated<T>(role: RoleClaim) -> Router<T>
where
  T: Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/whoami", get(me::handler))
    .route_layer(middleware::from_fn(move |req: Request, next: Next| {
      require_role(role, req, next)
    }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
