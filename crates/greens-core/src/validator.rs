//! Password hashing and verification.
//!
//! Hashes are argon2 PHC strings (`$argon2id$v=19$…`). Verification is
//! one-way: the stored hash is only ever compared against, never revealed.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result, credentials::Credentials, identity::Identity};

/// Check the submitted password against the identity's stored hash.
///
/// A mismatch is `Ok(false)`. Calling this without a `password` entry is a
/// caller bug and fails with [`Error::ContractViolation`].
pub fn validate(identity: &Identity, credentials: &Credentials) -> Result<bool> {
  let password = credentials
    .password()
    .ok_or(Error::ContractViolation("validate called without a password"))?;

  let parsed = match PasswordHash::new(identity.password_hash()) {
    Ok(h) => h,
    Err(e) => {
      tracing::warn!(
        kind = ?identity.kind(),
        id = identity.id(),
        "stored password hash is not a valid PHC string: {e}"
      );
      return Ok(false);
    }
  };

  Ok(
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok(),
  )
}

/// Hash `password` with the default argon2 parameters and a random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::Hash(e.to_string()))
}

/// True when `hash` was not produced with the current default algorithm,
/// version and parameters (or does not parse at all).
pub fn needs_rehash(hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    return true;
  };
  let Ok(params) = argon2::Params::try_from(&parsed) else {
    return true;
  };
  let current = Argon2::default();
  let wanted = current.params();
  let version: u32 = argon2::Version::default().into();

  parsed.algorithm != argon2::Algorithm::default().ident()
    || parsed.version != Some(version)
    || params.m_cost() != wanted.m_cost()
    || params.t_cost() != wanted.t_cost()
    || params.p_cost() != wanted.p_cost()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::person_with_password;

  #[test]
  fn correct_password_validates() {
    let id = person_with_password(1, "a@x.com", "hunter2");
    let creds = Credentials::new().with("password", "hunter2");
    assert!(validate(&id, &creds).unwrap());
    // idempotent
    assert!(validate(&id, &creds).unwrap());
  }

  #[test]
  fn wrong_password_is_false_not_error() {
    let id = person_with_password(1, "a@x.com", "hunter2");
    let creds = Credentials::new().with("password", "hunter3");
    assert!(!validate(&id, &creds).unwrap());
  }

  #[test]
  fn missing_password_is_contract_violation() {
    let id = person_with_password(1, "a@x.com", "hunter2");
    let creds = Credentials::new().with("email", "a@x.com");
    assert!(matches!(
      validate(&id, &creds),
      Err(Error::ContractViolation(_))
    ));
  }

  #[test]
  fn garbage_stored_hash_never_validates() {
    let mut id = person_with_password(1, "a@x.com", "hunter2");
    id.set_password_hash("plaintext".into());
    let creds = Credentials::new().with("password", "plaintext");
    assert!(!validate(&id, &creds).unwrap());
  }

  #[test]
  fn fresh_hash_does_not_need_rehash() {
    let hash = hash_password("pw").unwrap();
    assert!(!needs_rehash(&hash));
  }

  #[test]
  fn weaker_params_need_rehash() {
    let weak = Argon2::new(
      argon2::Algorithm::Argon2i,
      argon2::Version::V0x13,
      argon2::Params::new(8, 1, 1, None).unwrap(),
    );
    let salt = SaltString::generate(&mut OsRng);
    let hash = weak.hash_password(b"pw", &salt).unwrap().to_string();
    assert!(needs_rehash(&hash));
    assert!(needs_rehash("not-a-hash"));
  }
}
