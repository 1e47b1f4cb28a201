//! Remember tokens and the client-held recaller.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::{OsRng, RngCore as _};

/// Random bytes per token; hex-encoded this yields 60 characters.
const TOKEN_BYTES: usize = 30;

/// An opaque persistent-login credential stored on exactly one identity.
///
/// There is no expiry: a token is valid until rotated or cleared.
#[derive(Clone, PartialEq, Eq)]
pub struct RememberToken(String);

impl RememberToken {
  /// Draw a fresh token from the OS RNG.
  pub fn generate() -> Self {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    Self(hex::encode(buf))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }
}

impl From<String> for RememberToken {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for RememberToken {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for RememberToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("RememberToken(..)")
  }
}

/// The `(id, token)` pair a client presents to be re-authenticated.
///
/// Transported as base64 of `"{id}|{token}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recaller {
  pub id:    i64,
  pub token: RememberToken,
}

impl Recaller {
  pub fn new(id: i64, token: RememberToken) -> Self { Self { id, token } }

  pub fn encode(&self) -> String {
    B64.encode(format!("{}|{}", self.id, self.token.as_str()))
  }

  /// Parse an encoded recaller. Any malformation yields `None`.
  pub fn decode(encoded: &str) -> Option<Self> {
    let decoded = B64.decode(encoded.trim()).ok()?;
    let text = std::str::from_utf8(&decoded).ok()?;
    let (id, token) = text.split_once('|')?;
    let id = id.parse().ok()?;
    if token.is_empty() {
      return None;
    }
    Some(Self { id, token: RememberToken::from(token) })
  }
}
