// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PermissionSet, resolve_permissions};
use okr_domain::{
    ApprovalStatus, Contributor, ContributorRole, KeyResult, MetricType, Objective,
    ObjectiveIndex, ObjectiveLevel, User, UserRole,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const OWNER: &str = "owner-1";
pub const ADMIN: &str = "admin-1";
pub const CONTRIBUTOR: &str = "contrib-1";
pub const STRANGER: &str = "stranger-1";

pub fn owner() -> User {
    User::new(OWNER, UserRole::Member)
}

pub fn admin() -> User {
    User::new(ADMIN, UserRole::Admin)
}

pub fn contributor() -> User {
    User::new(CONTRIBUTOR, UserRole::Member)
}

pub fn stranger() -> User {
    User::new(STRANGER, UserRole::Member)
}

pub fn created_at() -> OffsetDateTime {
    datetime!(2026-01-01 09:00 UTC)
}

pub fn mid_quarter() -> OffsetDateTime {
    datetime!(2026-02-15 12:00 UTC)
}

/// A team objective under `company-1` with one numeric key result and one
/// contributor.
pub fn create_test_objective(status: ApprovalStatus) -> Objective {
    Objective::new(
        "team-1",
        "Ship the onboarding revamp",
        OWNER,
        ObjectiveLevel::Team,
        "Q1 2026",
        created_at(),
    )
    .with_parent("company-1")
    .with_due_date(date!(2026 - 03 - 31))
    .with_approval_status(status)
    .with_key_result(KeyResult::new(
        "kr-1",
        "team-1",
        "Activation rate",
        MetricType::Percentage,
        20.0,
        60.0,
    ))
    .with_contributor(Contributor::new(
        "contrib-row-1",
        "team-1",
        CONTRIBUTOR,
        ContributorRole::Contributor,
        created_at(),
    ))
}

pub fn create_test_index() -> ObjectiveIndex {
    let mut index: ObjectiveIndex = ObjectiveIndex::new();
    index.insert("company-1", ObjectiveLevel::Company, None);
    index.insert("company-2", ObjectiveLevel::Company, None);
    index.insert("team-1", ObjectiveLevel::Team, Some("company-1"));
    index.insert("team-2", ObjectiveLevel::Team, Some("company-1"));
    index
}

pub fn permissions_of(user: &User, objective: &Objective) -> PermissionSet {
    resolve_permissions(user, objective, &objective.contributors)
}
