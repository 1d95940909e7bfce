// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{admin, contributor, create_test_objective, mid_quarter, owner, stranger};
use crate::{
    ApprovalTransition, ErrorKind, PermissionSet, lookup_transition, request_transition,
};
use okr_domain::{ApprovalStatus, Objective, User};
use proptest::prelude::*;

fn any_status() -> impl Strategy<Value = ApprovalStatus> {
    prop::sample::select(ApprovalStatus::ALL.to_vec())
}

fn any_transition() -> impl Strategy<Value = ApprovalTransition> {
    prop::sample::select(ApprovalTransition::ALL.to_vec())
}

fn any_actor() -> impl Strategy<Value = User> {
    prop::sample::select(vec![owner(), admin(), contributor(), stranger()])
}

proptest! {
    #[test]
    fn transitions_outside_the_table_never_succeed(
        status in any_status(),
        action in any_transition(),
        actor in any_actor(),
    ) {
        let objective: Objective = create_test_objective(status);
        let permissions: PermissionSet = PermissionSet::for_objective(&actor, &objective);
        let result = request_transition(
            &objective,
            action,
            &actor,
            &permissions,
            Some("reviewed"),
            mid_quarter(),
        );

        let permitted: bool = permissions.satisfies(action.required_capability());
        match lookup_transition(status, action) {
            None => {
                let expected: ErrorKind = if permitted {
                    ErrorKind::InvalidTransition
                } else {
                    ErrorKind::PermissionDenied
                };
                prop_assert_eq!(result.unwrap_err().kind(), expected);
            }
            Some(rule) => {
                if permitted {
                    let result = result.unwrap();
                    prop_assert_eq!(result.new_status, rule.to);
                    prop_assert_eq!(result.history_item.action(), rule.recorded_as);
                } else {
                    prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::PermissionDenied);
                }
            }
        }
    }

    #[test]
    fn permission_errors_take_precedence(
        status in any_status(),
        action in any_transition(),
        actor in any_actor(),
    ) {
        let objective: Objective = create_test_objective(status);
        let permissions: PermissionSet = PermissionSet::for_objective(&actor, &objective);
        prop_assume!(!permissions.satisfies(action.required_capability()));

        let err = request_transition(&objective, action, &actor, &permissions, None, mid_quarter())
            .unwrap_err();

        prop_assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }
}
