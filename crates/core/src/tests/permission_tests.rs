// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{admin, contributor, create_test_objective, owner, stranger};
use crate::{PermissionSet, RequiredCapability, resolve_permissions};
use okr_domain::{ApprovalStatus, Contributor, ContributorRole, Objective};
use time::macros::datetime;

#[test]
fn test_owner_permissions_in_draft() {
    let objective: Objective = create_test_objective(ApprovalStatus::Draft);

    let permissions: PermissionSet = PermissionSet::for_objective(&owner(), &objective);

    assert!(permissions.is_owner);
    assert!(!permissions.is_admin);
    assert!(!permissions.is_contributor);
    assert!(permissions.has_permission);
    assert!(permissions.can_edit);
    assert!(permissions.can_delete);
    assert!(!permissions.can_update_value);
    assert!(permissions.can_manage_contributors);
}

#[test]
fn test_contributor_never_deletes_or_manages() {
    for status in ApprovalStatus::ALL {
        let objective: Objective = create_test_objective(status);
        let permissions: PermissionSet = PermissionSet::for_objective(&contributor(), &objective);

        assert!(permissions.is_contributor);
        assert!(permissions.has_permission);
        assert!(!permissions.can_delete);
        assert!(!permissions.can_manage_contributors);
        assert_eq!(permissions.can_edit, status == ApprovalStatus::Draft);
        assert_eq!(permissions.can_update_value, status == ApprovalStatus::Active);
    }
}

#[test]
fn test_admin_can_delete_archived_only_among_late_states() {
    let deletable: Vec<ApprovalStatus> = ApprovalStatus::ALL
        .into_iter()
        .filter(|status| {
            PermissionSet::for_objective(&admin(), &create_test_objective(*status)).can_delete
        })
        .collect();

    assert_eq!(
        deletable,
        vec![ApprovalStatus::Draft, ApprovalStatus::Archived]
    );
}

#[test]
fn test_stranger_has_nothing() {
    let objective: Objective = create_test_objective(ApprovalStatus::Active);

    assert_eq!(
        PermissionSet::for_objective(&stranger(), &objective),
        PermissionSet::default()
    );
}

#[test]
fn test_contributor_rows_for_other_objectives_are_ignored() {
    let objective: Objective = create_test_objective(ApprovalStatus::Draft);
    let rows: Vec<Contributor> = vec![Contributor::new(
        "row-9",
        "team-2",
        "stranger-1",
        ContributorRole::Reviewer,
        datetime!(2026-01-02 00:00 UTC),
    )];

    let permissions: PermissionSet = resolve_permissions(&stranger(), &objective, &rows);

    assert!(!permissions.is_contributor);
    assert!(!permissions.has_permission);
}

#[test]
fn test_membership_change_takes_effect_on_next_resolve() {
    let mut objective: Objective = create_test_objective(ApprovalStatus::Draft);
    assert!(PermissionSet::for_objective(&contributor(), &objective).can_edit);

    objective.contributors.clear();

    assert!(!PermissionSet::for_objective(&contributor(), &objective).can_edit);
}

#[test]
fn test_satisfies() {
    let objective: Objective = create_test_objective(ApprovalStatus::Draft);
    let owner_set: PermissionSet = PermissionSet::for_objective(&owner(), &objective);
    let admin_set: PermissionSet = PermissionSet::for_objective(&admin(), &objective);

    assert!(owner_set.satisfies(RequiredCapability::Owner));
    assert!(!owner_set.satisfies(RequiredCapability::Admin));
    assert!(owner_set.satisfies(RequiredCapability::OwnerOrAdmin));
    assert!(!admin_set.satisfies(RequiredCapability::Owner));
    assert!(admin_set.satisfies(RequiredCapability::Participant));
}
