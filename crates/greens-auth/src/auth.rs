//! Identity attachment, the role-gate middleware and the identity extractor.
//!
//! Resolution happens once per request in [`attach_identity`]; everything
//! downstream reads the attached [`Identity`] from request extensions and is
//! handed it explicitly.

use axum::{
  extract::{FromRequestParts, Request, State},
  http::{HeaderMap, header, request::Parts},
  middleware::Next,
  response::{IntoResponse, Response},
};
use greens_core::{
  gate::{Decision, gate},
  identity::{Identity, RoleClaim},
  store::CredentialStore,
  token::Recaller,
};

use crate::{AppState, error::Error};

/// Authorization scheme carrying an encoded [`Recaller`].
pub const SCHEME: &str = "Remember ";

/// Parse `Authorization: Remember <recaller>`. Anything else is `None`.
pub fn recaller_from_headers(headers: &HeaderMap) -> Option<Recaller> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix(SCHEME))
    .and_then(Recaller::decode)
}

/// Resolve the request's recaller, if any, and attach the identity.
///
/// A missing or stale recaller leaves the request anonymous; the gate makes
/// the call. A store failure aborts the request.
pub async fn attach_identity<S>(
  State(state): State<AppState<S>>,
  mut req: Request,
  next: Next,
) -> Response
where
  S: CredentialStore + Clone + 'static,
{
  if let Some(recaller) = recaller_from_headers(req.headers()) {
    match state.provider.resolve_recaller(&recaller).await {
      Ok(Some(identity)) => {
        req.extensions_mut().insert(identity);
      }
      Ok(None) => tracing::debug!(id = recaller.id, "recaller did not resolve"),
      Err(e) => return Error::from(e).into_response(),
    }
  }
  next.run(req).await
}

/// Run the access gate for `required` before the wrapped route.
pub async fn require_role(required: RoleClaim, req: Request, next: Next) -> Response {
  match gate(req.extensions().get::<Identity>(), required) {
    Decision::Allowed => next.run(req).await,
    Decision::Denied(denial) => Error::from(denial).into_response(),
  }
}

/// The identity attached to this request. Rejects with 401 when there is
/// none.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<Identity>()
      .cloned()
      .map(CurrentIdentity)
      .ok_or(Error::Unauthenticated)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;
  use greens_core::token::RememberToken;

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn parses_remember_scheme() {
    let r = Recaller::new(3, RememberToken::from("abc"));
    let parsed = recaller_from_headers(&headers(&format!("Remember {}", r.encode())));
    assert_eq!(parsed, Some(r));
  }

  #[test]
  fn ignores_other_schemes_and_garbage() {
    assert_eq!(recaller_from_headers(&HeaderMap::new()), None);
    assert_eq!(recaller_from_headers(&headers("Bearer abc")), None);
    assert_eq!(recaller_from_headers(&headers("Remember !!!")), None);
  }
}
