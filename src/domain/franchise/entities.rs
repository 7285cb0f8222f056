use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Franchise aggregate: a brand with an ordered admin list and its stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Franchise {
  pub id: Uuid,
  pub name: String,
  pub admins: Vec<FranchiseAdmin>,
  pub stores: Vec<Store>,
}

/// A user granted authority over a franchise's stores via list membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseAdmin {
  pub id: Uuid,
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
  pub id: Uuid,
  pub franchise_id: Uuid,
  pub name: String,
}

impl Store {
  pub fn new(franchise_id: Uuid, name: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      franchise_id,
      name,
    }
  }
}

/// A franchise as exposed to a caller.
///
/// Admin detail is an information-disclosure boundary: only requesters with
/// admin authority see the admin list; everyone else gets stores only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FranchiseView {
  pub id: Uuid,
  pub name: String,
  pub stores: Vec<Store>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub admins: Option<Vec<FranchiseAdmin>>,
}

impl FranchiseView {
  /// Full view, admin emails included
  pub fn unredacted(franchise: Franchise) -> Self {
    Self {
      id: franchise.id,
      name: franchise.name,
      stores: franchise.stores,
      admins: Some(franchise.admins),
    }
  }

  /// Redacted view: store lists only, no admin detail
  pub fn redacted(franchise: Franchise) -> Self {
    Self {
      id: franchise.id,
      name: franchise.name,
      stores: franchise.stores,
      admins: None,
    }
  }
}

/// Request payload for creating a franchise: admins are referenced by email
/// and every email must already belong to a known user.
#[derive(Debug, Clone)]
pub struct NewFranchise {
  pub name: String,
  pub admin_emails: Vec<String>,
}
