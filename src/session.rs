//! Explicit caller session.
//!
//! Role checks are pure predicates over a session value passed by
//! reference into the selection layer; there is no ambient current-user
//! state.

use serde::{Deserialize, Serialize};

use crate::api::UserId;

/// Account role as stored by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Student,
    Staff,
    Admin,
}

/// Caller identity and roles for one authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub roles: Vec<Role>,
    /// Admin approval; unapproved accounts browse but cannot select.
    pub approved: bool,
}

impl Session {
    pub fn new(user_id: UserId, roles: Vec<Role>, approved: bool) -> Self {
        Self {
            user_id,
            roles,
            approved,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Staff accounts are view-only; everyone else needs approval first.
    pub fn can_select_classes(&self) -> bool {
        self.approved
            && (self.has_role(Role::Parent) || self.has_role(Role::Student) || self.is_admin())
    }
}
