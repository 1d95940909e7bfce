// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The approval state machine.
//!
//! ```text
//! draft -> pending_review -> approved -> active <-> paused
//!   ^           |               |          |         |
//!   +- reject --+               |          +- stop --+-> stopped -> archived
//!   +------- revert_to_draft ---+
//! ```
//!
//! The full set of legal moves lives in [`TRANSITIONS`]. Anything not in
//! the table is an invalid transition.

use crate::error::CoreError;
use crate::permissions::{PermissionSet, RequiredCapability};
use crate::state::TransitionResult;
use okr_audit::{ApprovalAction, ApprovalHistoryItem};
use okr_domain::{ApprovalStatus, DomainError, Objective, User};
use std::str::FromStr;
use time::OffsetDateTime;

/// An action that moves an objective between approval states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalTransition {
    SubmitForReview,
    Approve,
    /// Requires a non-empty comment.
    Reject,
    Activate,
    RevertToDraft,
    Pause,
    Resume,
    Stop,
    Archive,
}

impl ApprovalTransition {
    /// All transitions.
    pub const ALL: [Self; 9] = [
        Self::SubmitForReview,
        Self::Approve,
        Self::Reject,
        Self::Activate,
        Self::RevertToDraft,
        Self::Pause,
        Self::Resume,
        Self::Stop,
        Self::Archive,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitForReview => "submit_for_review",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Activate => "activate",
            Self::RevertToDraft => "revert_to_draft",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::Archive => "archive",
        }
    }

    /// The capability the actor must hold to request this transition.
    ///
    /// This depends on the transition alone, never on the current state,
    /// so permission can be checked before the state guard.
    #[must_use]
    pub const fn required_capability(&self) -> RequiredCapability {
        match self {
            Self::SubmitForReview => RequiredCapability::Owner,
            Self::Approve
            | Self::Reject
            | Self::Activate
            | Self::Pause
            | Self::Resume
            | Self::Stop => RequiredCapability::Admin,
            Self::RevertToDraft | Self::Archive => RequiredCapability::Participant,
        }
    }
}

impl FromStr for ApprovalTransition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::InvalidAction(s.to_string()))
    }
}

impl std::fmt::Display for ApprovalTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: ApprovalStatus,
    pub transition: ApprovalTransition,
    pub to: ApprovalStatus,
    /// How the move is recorded in the approval history.
    pub recorded_as: ApprovalAction,
}

const fn rule(
    from: ApprovalStatus,
    transition: ApprovalTransition,
    to: ApprovalStatus,
    recorded_as: ApprovalAction,
) -> TransitionRule {
    TransitionRule {
        from,
        transition,
        to,
        recorded_as,
    }
}

/// Every legal `(state, transition)` pair.
pub const TRANSITIONS: &[TransitionRule] = &[
    rule(
        ApprovalStatus::Draft,
        ApprovalTransition::SubmitForReview,
        ApprovalStatus::PendingReview,
        ApprovalAction::Submitted,
    ),
    rule(
        ApprovalStatus::PendingReview,
        ApprovalTransition::Approve,
        ApprovalStatus::Approved,
        ApprovalAction::Approved,
    ),
    rule(
        ApprovalStatus::PendingReview,
        ApprovalTransition::Reject,
        ApprovalStatus::Draft,
        ApprovalAction::Rejected,
    ),
    rule(
        ApprovalStatus::Approved,
        ApprovalTransition::Activate,
        ApprovalStatus::Active,
        ApprovalAction::Activated,
    ),
    rule(
        ApprovalStatus::Approved,
        ApprovalTransition::RevertToDraft,
        ApprovalStatus::Draft,
        ApprovalAction::RevertedToDraft,
    ),
    rule(
        ApprovalStatus::Active,
        ApprovalTransition::Pause,
        ApprovalStatus::Paused,
        ApprovalAction::Paused,
    ),
    rule(
        ApprovalStatus::Active,
        ApprovalTransition::Stop,
        ApprovalStatus::Stopped,
        ApprovalAction::Stopped,
    ),
    rule(
        ApprovalStatus::Paused,
        ApprovalTransition::Resume,
        ApprovalStatus::Active,
        ApprovalAction::Resumed,
    ),
    rule(
        ApprovalStatus::Paused,
        ApprovalTransition::Stop,
        ApprovalStatus::Stopped,
        ApprovalAction::Stopped,
    ),
    rule(
        ApprovalStatus::Stopped,
        ApprovalTransition::Archive,
        ApprovalStatus::Archived,
        ApprovalAction::Archived,
    ),
];

/// Looks up the rule for `transition` out of `from`.
#[must_use]
pub fn lookup_transition(
    from: ApprovalStatus,
    transition: ApprovalTransition,
) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|r| r.from == from && r.transition == transition)
}

/// Lists the transitions the holder of `permissions` could request now.
#[must_use]
pub fn available_transitions(
    objective: &Objective,
    permissions: &PermissionSet,
) -> Vec<ApprovalTransition> {
    TRANSITIONS
        .iter()
        .filter(|r| r.from == objective.approval_status)
        .filter(|r| permissions.satisfies(r.transition.required_capability()))
        .map(|r| r.transition)
        .collect()
}

/// Requests an approval transition.
///
/// Checks run in a fixed order: capability first, then the state guard,
/// then the rejection comment. On success the returned objective has its
/// derived fields refreshed, and the history item is ready to persist in
/// the same write.
///
/// # Arguments
///
/// * `objective` - The objective as last read from the store
/// * `transition` - The requested transition
/// * `actor` - The user requesting it
/// * `permissions` - The actor's resolved permissions on `objective`
/// * `comment` - Optional comment, required for rejections
/// * `now` - The instant of the transition
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks the transition's required capability
/// - The transition is not defined for the current approval status
/// - A rejection has no non-blank comment
pub fn request_transition(
    objective: &Objective,
    transition: ApprovalTransition,
    actor: &User,
    permissions: &PermissionSet,
    comment: Option<&str>,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let required: RequiredCapability = transition.required_capability();
    if !permissions.satisfies(required) {
        return Err(CoreError::PermissionDenied {
            action: transition.as_str().to_string(),
            required,
        });
    }

    let Some(rule) = lookup_transition(objective.approval_status, transition) else {
        return Err(CoreError::InvalidTransition {
            from: objective.approval_status,
            transition,
        });
    };

    let has_comment: bool = comment.is_some_and(|c| !c.trim().is_empty());
    if transition == ApprovalTransition::Reject && !has_comment {
        return Err(CoreError::DomainViolation(
            DomainError::RejectionCommentRequired,
        ));
    }

    let history_item: ApprovalHistoryItem =
        ApprovalHistoryItem::record(&objective.id, rule.recorded_as, &actor.id, comment, now)?;

    let mut new_objective: Objective = objective.clone();
    new_objective.approval_status = rule.to;
    new_objective.refresh_derived(now);

    Ok(TransitionResult {
        new_objective,
        previous_status: rule.from,
        new_status: rule.to,
        history_item,
    })
}
