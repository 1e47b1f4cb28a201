//! Route handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/login` | Body: `{"email":…,"password":…,"remember":bool}` |
//! | `POST` | `/logout` | Requires an identity; cycles its remember token |
//! | `GET`  | `/me` | Requires an identity |
//! | `GET`  | `/{role}/whoami` | Gated on `admin`, `contractor` or `client` |

pub mod login;
pub mod logout;
pub mod me;
