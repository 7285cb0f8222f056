//! Authorization guard: pure decisions over resolved identity data.
//!
//! Every check here is a function of the identity's role bindings and the
//! target resource. Nothing reads hidden state, so every policy is unit
//! testable without a store.

use uuid::Uuid;

use super::entities::{Identity, Role, RoleBinding};
use super::errors::AuthError;
use crate::domain::franchise::entities::Franchise;

/// Does this set of bindings hold `role`, optionally scoped to `object`?
///
/// Matching is exact, with one exception: `admin` implicitly satisfies
/// every franchise-scoped check regardless of the object asked about.
pub fn has_role(bindings: &[RoleBinding], role: Role, object: Option<&str>) -> bool {
  bindings.iter().any(|binding| {
    if binding.role == Role::Admin {
      return true;
    }
    binding.role == role && binding.object.as_deref() == object
  })
}

/// Requires a resolved, non-anonymous identity
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity, AuthError> {
  identity.ok_or(AuthError::Unauthenticated)
}

/// Requires the global admin role
pub fn require_admin(identity: &Identity) -> Result<(), AuthError> {
  if has_role(&identity.roles, Role::Admin, None) {
    Ok(())
  } else {
    Err(AuthError::Forbidden)
  }
}

/// Store creation/deletion under a franchise: admin, or a user listed in
/// that franchise's admin list.
pub fn require_store_authority(identity: &Identity, franchise: &Franchise) -> Result<(), AuthError> {
  if has_role(&identity.roles, Role::Admin, None) {
    return Ok(());
  }
  if franchise.admins.iter().any(|a| a.id == identity.user_id) {
    return Ok(());
  }
  Err(AuthError::Forbidden)
}

/// Credential updates: the user themselves, or an admin.
pub fn require_self_or_admin(identity: &Identity, target_user_id: Uuid) -> Result<(), AuthError> {
  if identity.user_id == target_user_id || has_role(&identity.roles, Role::Admin, None) {
    Ok(())
  } else {
    Err(AuthError::Forbidden)
  }
}
