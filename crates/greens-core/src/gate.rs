//! Access policy gate.
//!
//! Evaluated once per guarded request, before the wrapped operation runs.
//! The gate reads the identity handed to it and nothing else; it never
//! touches the store.

use thiserror::Error;

use crate::identity::{Identity, RoleClaim};

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
  /// No identity is attached to the request.
  #[error("unauthenticated")]
  Unauthenticated,

  /// An identity is attached but carries a different role.
  #[error("this action requires the {required} role")]
  Forbidden { required: RoleClaim },
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Allowed,
  Denied(Denial),
}

impl Decision {
  pub fn is_allowed(self) -> bool { matches!(self, Decision::Allowed) }

  pub fn into_result(self) -> Result<(), Denial> {
    match self {
      Decision::Allowed => Ok(()),
      Decision::Denied(d) => Err(d),
    }
  }
}

/// Decide whether `identity` may perform an operation requiring `required`.
///
/// Roles must match exactly: an admin is not implicitly a contractor.
pub fn gate(identity: Option<&Identity>, required: RoleClaim) -> Decision {
  let Some(identity) = identity else {
    tracing::debug!(%required, "gate denied: no identity");
    return Decision::Denied(Denial::Unauthenticated);
  };

  if identity.role() != required {
    tracing::debug!(
      kind = ?identity.kind(),
      id = identity.id(),
      role = %identity.role(),
      %required,
      "gate denied: role mismatch"
    );
    return Decision::Denied(Denial::Forbidden { required });
  }

  Decision::Allowed
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{organization, person};

  #[test]
  fn no_identity_is_unauthenticated_for_every_role() {
    for role in [RoleClaim::Client, RoleClaim::Admin, RoleClaim::Contractor] {
      assert_eq!(gate(None, role), Decision::Denied(Denial::Unauthenticated));
    }
  }

  #[test]
  fn client_cannot_pass_contractor_gate() {
    let client = Identity::from(person(1, "a@x.com"));
    assert_eq!(
      gate(Some(&client), RoleClaim::Contractor),
      Decision::Denied(Denial::Forbidden { required: RoleClaim::Contractor })
    );
  }

  #[test]
  fn contractor_passes_contractor_gate() {
    let org = Identity::from(organization(1, "biz@x.com"));
    assert!(gate(Some(&org), RoleClaim::Contractor).is_allowed());
  }

  #[test]
  fn admin_is_not_a_contractor() {
    let mut p = person(1, "root@x.com");
    p.is_admin = true;
    let admin = Identity::from(p);
    assert!(gate(Some(&admin), RoleClaim::Admin).is_allowed());
    assert!(!gate(Some(&admin), RoleClaim::Contractor).is_allowed());
    assert!(!gate(Some(&admin), RoleClaim::Client).is_allowed());
  }

  #[test]
  fn forbidden_message_names_required_role() {
    let d = Denial::Forbidden { required: RoleClaim::Admin };
    assert_eq!(d.to_string(), "this action requires the admin role");
  }
}
