use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ValidationError;
use super::value_objects::TokenSignature;

/// Role kinds understood by the authorization guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Diner,
  Admin,
  Franchisee,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Diner => "diner",
      Role::Admin => "admin",
      Role::Franchisee => "franchisee",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, ValidationError> {
    match s.to_lowercase().as_str() {
      "diner" => Ok(Role::Diner),
      "admin" => Ok(Role::Admin),
      "franchisee" => Ok(Role::Franchisee),
      other => Err(ValidationError::InvalidRole(other.to_string())),
    }
  }
}

/// A (role, optional object) pair attached to a user.
///
/// A `franchisee` binding's object names the franchise the user administers.
/// The object is informational: store-management authority is derived from
/// franchise admin-list membership, never from this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
  pub role: Role,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub object: Option<String>,
}

impl RoleBinding {
  pub fn new(role: Role) -> Self {
    Self { role, object: None }
  }

  pub fn scoped(role: Role, object: impl Into<String>) -> Self {
    Self {
      role,
      object: Some(object.into()),
    }
  }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  /// Argon2id hash; never serialized, never returned to callers
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub roles: Vec<RoleBinding>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given role bindings
  pub fn new(name: String, email: String, password_hash: String, roles: Vec<RoleBinding>) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
      roles,
      created_at: now,
      updated_at: now,
    }
  }

  /// Reconstructs a user from database fields
  pub fn from_db(
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    roles: Vec<RoleBinding>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password_hash,
      roles,
      created_at,
      updated_at,
    }
  }
}

/// Active session: a token signature bound to its owning user.
///
/// Sessions carry no expiry; logout (row deletion) is the only way a
/// session stops being valid.
#[derive(Debug, Clone)]
pub struct Session {
  pub signature: TokenSignature,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn new(signature: TokenSignature, user_id: Uuid) -> Self {
    Self {
      signature,
      user_id,
      created_at: Utc::now(),
    }
  }

  pub fn from_db(signature: TokenSignature, user_id: Uuid, created_at: DateTime<Utc>) -> Self {
    Self {
      signature,
      user_id,
      created_at,
    }
  }
}

/// Claims embedded in a signed session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
  /// Owning user's id
  pub sub: Uuid,
  pub name: String,
  pub email: String,
  pub roles: Vec<RoleBinding>,
  /// Issued-at, seconds since the epoch
  pub iat: i64,
}

/// A verified identity resolved from a presented token.
///
/// Authorization decisions read this as plain data through the policy
/// functions; it carries no behavior of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
  pub roles: Vec<RoleBinding>,
}

impl Identity {
  pub fn from_claims(claims: IdentityClaims) -> Self {
    Self {
      user_id: claims.sub,
      name: claims.name,
      email: claims.email,
      roles: claims.roles,
    }
  }
}

impl From<&User> for IdentityClaims {
  fn from(user: &User) -> Self {
    Self {
      sub: user.id,
      name: user.name.clone(),
      email: user.email.clone(),
      roles: user.roles.clone(),
      iat: Utc::now().timestamp(),
    }
  }
}
