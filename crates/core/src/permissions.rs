// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-request capability resolution.
//!
//! A [`PermissionSet`] is a flat value computed from the actor, the
//! objective and its contributor rows. It is never cached: resolve it
//! again for every request so membership changes take effect at once.

use okr_domain::{ApprovalStatus, Contributor, Objective, User};

/// The capability an operation requires of its actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredCapability {
    /// Only the objective's owner.
    Owner,
    /// Only an organization admin.
    Admin,
    /// The owner or an admin.
    OwnerOrAdmin,
    /// The owner, an admin or a contributor.
    Participant,
}

impl RequiredCapability {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::OwnerOrAdmin => "owner/admin",
            Self::Participant => "owner/admin/contributor",
        }
    }
}

impl std::fmt::Display for RequiredCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an actor may do with one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PermissionSet {
    pub is_owner: bool,
    pub is_admin: bool,
    pub is_contributor: bool,
    /// Owner, admin or contributor.
    pub has_permission: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_update_value: bool,
    /// Contributors never manage other contributors.
    pub can_manage_contributors: bool,
}

impl PermissionSet {
    /// Returns true if this set satisfies `required`.
    #[must_use]
    pub const fn satisfies(&self, required: RequiredCapability) -> bool {
        match required {
            RequiredCapability::Owner => self.is_owner,
            RequiredCapability::Admin => self.is_admin,
            RequiredCapability::OwnerOrAdmin => self.is_owner || self.is_admin,
            RequiredCapability::Participant => self.has_permission,
        }
    }

    /// Resolves permissions against the contributors stored on the objective.
    #[must_use]
    pub fn for_objective(actor: &User, objective: &Objective) -> Self {
        resolve_permissions(actor, objective, &objective.contributors)
    }
}

/// Resolves the capability set of `actor` on `objective`.
///
/// Only contributor rows belonging to `objective` are considered.
///
/// # Arguments
///
/// * `actor` - The user performing the request
/// * `objective` - The objective being acted on
/// * `contributors` - Contributor rows; rows for other objectives are ignored
#[must_use]
pub fn resolve_permissions(
    actor: &User,
    objective: &Objective,
    contributors: &[Contributor],
) -> PermissionSet {
    let is_owner: bool = actor.id == objective.owner_id;
    let is_admin: bool = actor.is_admin();
    let is_contributor: bool = contributors
        .iter()
        .any(|c| c.objective_id == objective.id && c.user_id == actor.id);
    let has_permission: bool = is_owner || is_admin || is_contributor;
    let status: ApprovalStatus = objective.approval_status;

    PermissionSet {
        is_owner,
        is_admin,
        is_contributor,
        has_permission,
        can_edit: has_permission && status.is_editable(),
        can_delete: (is_owner || is_admin) && status.is_deletable(),
        can_update_value: has_permission && status.accepts_progress(),
        can_manage_contributors: is_owner || is_admin,
    }
}
