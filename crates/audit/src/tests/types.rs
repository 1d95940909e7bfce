// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApprovalAction, ApprovalHistory, ApprovalHistoryItem, AuditError};
use std::str::FromStr;
use time::macros::datetime;

fn create_test_item(action: ApprovalAction, comment: Option<&str>) -> ApprovalHistoryItem {
    ApprovalHistoryItem::record(
        "obj-1",
        action,
        "user-123",
        comment,
        datetime!(2026-02-01 10:00 UTC),
    )
    .unwrap()
}

#[test]
fn test_record_captures_all_fields() {
    let item: ApprovalHistoryItem = create_test_item(ApprovalAction::Submitted, Some("ready"));

    assert!(item.id().starts_with("hist_"));
    assert_eq!(item.objective_id(), "obj-1");
    assert_eq!(item.action(), ApprovalAction::Submitted);
    assert_eq!(item.performed_by(), "user-123");
    assert_eq!(item.comment(), Some("ready"));
    assert_eq!(item.created_at(), datetime!(2026-02-01 10:00 UTC));
}

#[test]
fn test_record_assigns_fresh_ids() {
    let a: ApprovalHistoryItem = create_test_item(ApprovalAction::Approved, None);
    let b: ApprovalHistoryItem = create_test_item(ApprovalAction::Approved, None);

    assert_ne!(a.id(), b.id());
}

#[test]
fn test_rejection_requires_comment() {
    for comment in [None, Some(""), Some("   ")] {
        let result = ApprovalHistoryItem::record(
            "obj-1",
            ApprovalAction::Rejected,
            "admin-1",
            comment,
            datetime!(2026-02-01 10:00 UTC),
        );
        assert_eq!(
            result,
            Err(AuditError::CommentRequired {
                action: ApprovalAction::Rejected
            })
        );
    }
}

#[test]
fn test_blank_comment_is_dropped() {
    let item: ApprovalHistoryItem = create_test_item(ApprovalAction::Paused, Some("  "));

    assert_eq!(item.comment(), None);
}

#[test]
fn test_comment_is_trimmed() {
    let item: ApprovalHistoryItem =
        create_test_item(ApprovalAction::Rejected, Some("  needs numbers \n"));

    assert_eq!(item.comment(), Some("needs numbers"));
}

#[test]
fn test_action_string_round_trip() {
    let actions: [ApprovalAction; 9] = [
        ApprovalAction::Submitted,
        ApprovalAction::Approved,
        ApprovalAction::Rejected,
        ApprovalAction::Activated,
        ApprovalAction::Paused,
        ApprovalAction::Resumed,
        ApprovalAction::Stopped,
        ApprovalAction::Archived,
        ApprovalAction::RevertedToDraft,
    ];
    for action in actions {
        assert_eq!(ApprovalAction::from_str(action.as_str()).unwrap(), action);
    }
    assert_eq!(ApprovalAction::RevertedToDraft.as_str(), "reverted_to_draft");
    assert!(ApprovalAction::from_str("reopened").is_err());
}

#[test]
fn test_history_appends_in_order() {
    let mut history: ApprovalHistory = ApprovalHistory::new("obj-1");
    let first: ApprovalHistoryItem = create_test_item(ApprovalAction::Submitted, None);
    let second: ApprovalHistoryItem = ApprovalHistoryItem::record(
        "obj-1",
        ApprovalAction::Rejected,
        "admin-1",
        Some("needs a baseline"),
        datetime!(2026-02-02 09:00 UTC),
    )
    .unwrap();

    history.append(first.clone()).unwrap();
    history.append(second.clone()).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.items(), &[first, second.clone()]);
    assert_eq!(history.latest(), Some(&second));
    assert_eq!(
        history.latest_rejection().and_then(ApprovalHistoryItem::comment),
        Some("needs a baseline")
    );
}

#[test]
fn test_history_rejects_foreign_items() {
    let mut history: ApprovalHistory = ApprovalHistory::new("obj-2");
    let item: ApprovalHistoryItem = create_test_item(ApprovalAction::Submitted, None);

    assert_eq!(
        history.append(item),
        Err(AuditError::ObjectiveMismatch {
            expected: String::from("obj-2"),
            found: String::from("obj-1"),
        })
    );
    assert!(history.is_empty());
}

#[test]
fn test_history_rejects_out_of_order_items() {
    let mut history: ApprovalHistory = ApprovalHistory::new("obj-1");
    history
        .append(create_test_item(ApprovalAction::Submitted, None))
        .unwrap();
    let earlier: ApprovalHistoryItem = ApprovalHistoryItem::record(
        "obj-1",
        ApprovalAction::Approved,
        "admin-1",
        None,
        datetime!(2026-01-15 10:00 UTC),
    )
    .unwrap();

    assert!(matches!(
        history.append(earlier),
        Err(AuditError::OutOfOrder { .. })
    ));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_history_rejects_duplicate_entries() {
    let item: ApprovalHistoryItem = create_test_item(ApprovalAction::Submitted, None);

    let result = ApprovalHistory::from_items("obj-1", [item.clone(), item]);

    assert!(matches!(result, Err(AuditError::DuplicateEntry { .. })));
}

#[test]
fn test_restore_keeps_persisted_id() {
    let item: ApprovalHistoryItem = ApprovalHistoryItem::restore(
        "hist-42",
        "obj-1",
        ApprovalAction::Archived,
        "owner-1",
        None,
        datetime!(2026-05-01 00:00 UTC),
    )
    .unwrap();

    assert_eq!(item.id(), "hist-42");
}
