//! Error types and axum `IntoResponse` implementation.
//!
//! Messages are deliberately generic: a failed login never says whether the
//! account or the password was wrong.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use greens_core::{gate::Denial, identity::RoleClaim};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthenticated")]
  Unauthenticated,
  #[error("this action requires the {0} role")]
  Forbidden(RoleClaim),
  #[error("invalid credentials")]
  InvalidCredentials,
  #[error("{0}")]
  Unprocessable(String),
  #[error("core error: {0}")]
  Core(#[from] greens_core::Error),
}

impl From<Denial> for Error {
  fn from(denial: Denial) -> Self {
    match denial {
      Denial::Unauthenticated => Error::Unauthenticated,
      Denial::Forbidden { required } => Error::Forbidden(required),
    }
  }
}

fn body(status: StatusCode, message: String) -> Response {
  (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthenticated | Error::InvalidCredentials => {
        let mut res = body(StatusCode::UNAUTHORIZED, self.to_string());
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Remember realm=\"greens\""),
        );
        res
      }
      Error::Forbidden(_) => body(StatusCode::FORBIDDEN, self.to_string()),
      Error::Unprocessable(msg) => body(StatusCode::UNPROCESSABLE_ENTITY, msg),
      Error::Core(e) => {
        tracing::error!("request failed: {e}");
        body(StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    }
  }
}
