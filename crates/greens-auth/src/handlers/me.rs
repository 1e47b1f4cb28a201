//! `GET /me` and the gated `whoami` routes.

use axum::Json;
use greens_core::identity::Profile;

use crate::auth::CurrentIdentity;

pub async fn handler(CurrentIdentity(identity): CurrentIdentity) -> Json<Profile> {
  Json(identity.profile())
}
