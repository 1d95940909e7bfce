// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{MetricType, ObjectiveLevel};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Level string is not one of the known levels.
    InvalidLevel(String),
    /// Approval status string is not one of the known states.
    InvalidApprovalStatus(String),
    /// Coarse status string is not one of the known labels.
    InvalidObjectiveStatus(String),
    /// Metric type string is not one of the known types.
    InvalidMetricType(String),
    /// Contributor role string is not one of the known roles.
    InvalidContributorRole(String),
    /// User role string is not one of the known roles.
    InvalidUserRole(String),
    /// Workflow action string is not one of the known actions.
    InvalidAction(String),
    /// Objective title is empty or invalid.
    InvalidTitle(String),
    /// Objective period label is empty or invalid.
    InvalidPeriod(String),
    /// A key result definition is malformed.
    InvalidKeyResult {
        /// The key result identifier.
        key_result_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// A reported value is not acceptable for the key result's metric type.
    InvalidKeyResultValue {
        /// The key result identifier.
        key_result_id: String,
        /// The metric type of the key result.
        metric_type: MetricType,
        /// The rejected value, rendered for display.
        value: String,
    },
    /// The key result does not exist on the objective.
    KeyResultNotFound {
        /// The objective identifier.
        objective_id: String,
        /// The key result identifier.
        key_result_id: String,
    },
    /// A company objective was given a parent.
    ParentForbidden {
        /// The objective identifier.
        objective_id: String,
    },
    /// A team or individual objective has a missing or wrong-level parent.
    ParentLevelMismatch {
        /// The level of the candidate objective.
        level: ObjectiveLevel,
        /// The level its parent must have.
        required_parent_level: ObjectiveLevel,
    },
    /// An objective names itself as its parent.
    SelfReference {
        /// The objective identifier.
        objective_id: String,
    },
    /// Assigning the parent would close a loop in the hierarchy.
    CycleDetected {
        /// The objective identifier.
        objective_id: String,
        /// The proposed parent identifier.
        parent_id: String,
    },
    /// The ancestor chain is longer than the three-level hierarchy allows.
    HierarchyTooDeep {
        /// The objective identifier.
        objective_id: String,
        /// The number of parent edges found.
        depth: usize,
    },
    /// Changing the level would orphan existing children.
    ChildLevelMismatch {
        /// The objective identifier.
        objective_id: String,
        /// The first offending child.
        child_id: String,
        /// The level the candidate would have.
        level: ObjectiveLevel,
    },
    /// A reject action was requested without a reason.
    RejectionCommentRequired,
    /// The owner cannot also be recorded as a contributor.
    OwnerCannotContribute {
        /// The owner's user identifier.
        user_id: String,
    },
    /// The user is already a contributor on the objective.
    DuplicateContributor {
        /// The objective identifier.
        objective_id: String,
        /// The user identifier.
        user_id: String,
    },
    /// The user is not a contributor on the objective.
    ContributorNotFound {
        /// The objective identifier.
        objective_id: String,
        /// The user identifier.
        user_id: String,
    },
    /// Removing the objective would orphan objectives below it.
    ObjectiveHasChildren {
        /// The objective identifier.
        objective_id: String,
        /// Number of direct children.
        children: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(s) => write!(f, "Invalid objective level: {s}"),
            Self::InvalidApprovalStatus(s) => write!(f, "Invalid approval status: {s}"),
            Self::InvalidObjectiveStatus(s) => write!(f, "Invalid objective status: {s}"),
            Self::InvalidMetricType(s) => write!(f, "Invalid metric type: {s}"),
            Self::InvalidContributorRole(s) => write!(f, "Invalid contributor role: {s}"),
            Self::InvalidUserRole(s) => write!(f, "Invalid user role: {s}"),
            Self::InvalidAction(s) => write!(f, "Invalid workflow action: {s}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidPeriod(msg) => write!(f, "Invalid period: {msg}"),
            Self::InvalidKeyResult {
                key_result_id,
                reason,
            } => write!(f, "Invalid key result '{key_result_id}': {reason}"),
            Self::InvalidKeyResultValue {
                key_result_id,
                metric_type,
                value,
            } => write!(
                f,
                "Value {value} is not valid for {metric_type} key result '{key_result_id}'"
            ),
            Self::KeyResultNotFound {
                objective_id,
                key_result_id,
            } => write!(
                f,
                "Key result '{key_result_id}' not found on objective '{objective_id}'"
            ),
            Self::ParentForbidden { objective_id } => write!(
                f,
                "Objective '{objective_id}': parent forbidden at company level"
            ),
            Self::ParentLevelMismatch {
                level,
                required_parent_level,
            } => write!(f, "{level} requires a {required_parent_level}-level parent"),
            Self::SelfReference { objective_id } => {
                write!(f, "Objective '{objective_id}' cannot be its own parent")
            }
            Self::CycleDetected {
                objective_id,
                parent_id,
            } => write!(
                f,
                "Assigning parent '{parent_id}' to objective '{objective_id}' would create a cycle"
            ),
            Self::HierarchyTooDeep {
                objective_id,
                depth,
            } => write!(
                f,
                "Objective '{objective_id}' would sit {depth} levels deep; at most 2 are allowed"
            ),
            Self::ChildLevelMismatch {
                objective_id,
                child_id,
                level,
            } => write!(
                f,
                "Objective '{objective_id}' cannot become {level}: child '{child_id}' would no longer fit"
            ),
            Self::RejectionCommentRequired => {
                write!(f, "A comment is required when rejecting an objective")
            }
            Self::OwnerCannotContribute { user_id } => write!(
                f,
                "User '{user_id}' owns the objective and cannot be added as a contributor"
            ),
            Self::DuplicateContributor {
                objective_id,
                user_id,
            } => write!(
                f,
                "User '{user_id}' is already a contributor on objective '{objective_id}'"
            ),
            Self::ContributorNotFound {
                objective_id,
                user_id,
            } => write!(
                f,
                "User '{user_id}' is not a contributor on objective '{objective_id}'"
            ),
            Self::ObjectiveHasChildren {
                objective_id,
                children,
            } => write!(
                f,
                "Objective '{objective_id}' still has {children} child objective(s)"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
