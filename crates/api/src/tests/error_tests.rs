// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, StoreError, translate_core_error};
use okr_domain::{ApprovalStatus, DomainError};
use okr_engine::{ApprovalTransition, CoreError, ErrorKind, RequiredCapability};

#[test]
fn test_translate_permission_denied() {
    let err: ApiError = translate_core_error(CoreError::PermissionDenied {
        action: String::from("approve"),
        required: RequiredCapability::Admin,
    });

    assert_eq!(
        err.to_string(),
        "Permission denied: 'approve' requires admin"
    );
}

#[test]
fn test_translate_invalid_transition() {
    let err: ApiError = translate_core_error(CoreError::InvalidTransition {
        from: ApprovalStatus::Draft,
        transition: ApprovalTransition::Approve,
    });

    assert_eq!(
        err,
        ApiError::InvalidTransition {
            message: String::from("Invalid transition: cannot approve from draft"),
        }
    );
}

#[test]
fn test_translate_cycle() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::CycleDetected {
            objective_id: String::from("a"),
            parent_id: String::from("b"),
        },
    ));

    assert_eq!(err.kind(), Some(ErrorKind::CycleDetected));
}

#[test]
fn test_store_conflict_becomes_conflict() {
    let err: ApiError = ApiError::from(StoreError::Conflict {
        objective_id: String::from("team-1"),
        expected: String::from("approved"),
        found: String::from("active"),
    });

    assert_eq!(err.kind(), Some(ErrorKind::Conflict));
}
