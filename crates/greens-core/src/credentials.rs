//! Login credentials: attribute name → submitted value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The key holding the plaintext secret. Never used as a lookup filter.
pub const PASSWORD: &str = "password";

/// Equality filter handed to the store, e.g. `{"email": "a@x.com"}`.
pub type Predicates = BTreeMap<String, String>;

/// Credentials as submitted at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.0.insert(key.into(), value.into());
    self
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.0.insert(key.into(), value.into());
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn password(&self) -> Option<&str> { self.get(PASSWORD) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// True when at least one non-password attribute is present. A password
  /// alone never locates an account.
  pub fn is_locatable(&self) -> bool {
    self.0.keys().any(|k| k != PASSWORD)
  }

  /// Every attribute except the password.
  pub fn predicates(&self) -> Predicates {
    self
      .0
      .iter()
      .filter(|(k, _)| k.as_str() != PASSWORD)
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }
}

impl<K, V> FromIterator<(K, V)> for Credentials
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn password_only_is_not_locatable() {
    assert!(!Credentials::new().is_locatable());
    assert!(!Credentials::new().with("password", "x").is_locatable());
    assert!(Credentials::new().with("email", "a@x.com").is_locatable());
  }

  #[test]
  fn predicates_strip_password() {
    let creds = Credentials::new()
      .with("email", "a@x.com")
      .with("password", "secret");
    let preds = creds.predicates();
    assert_eq!(preds.len(), 1);
    assert_eq!(preds.get("email").map(String::as_str), Some("a@x.com"));
    assert_eq!(creds.password(), Some("secret"));
  }

  #[test]
  fn deserialises_from_flat_json_object() {
    let creds: Credentials =
      serde_json::from_str(r#"{"email":"a@x.com","password":"pw"}"#).unwrap();
    assert_eq!(creds.get("email"), Some("a@x.com"));
    assert_eq!(creds.password(), Some("pw"));
  }
}
