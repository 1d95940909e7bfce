// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use okr_audit::AuditError;
use okr_domain::DomainError;
use okr_engine::{CoreError, ErrorKind};

/// Errors raised by an [`crate::ObjectiveStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No objective with this id is stored.
    NotFound {
        /// The objective identifier.
        objective_id: String,
    },
    /// An objective with this id is already stored.
    AlreadyExists {
        /// The objective identifier.
        objective_id: String,
    },
    /// The stored value differs from the one the write was conditioned on.
    Conflict {
        /// The objective identifier.
        objective_id: String,
        /// The expected stored value.
        expected: String,
        /// The value actually stored.
        found: String,
    },
    /// The history item could not be appended.
    History(AuditError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { objective_id } => write!(f, "Objective '{objective_id}' not found"),
            Self::AlreadyExists { objective_id } => {
                write!(f, "Objective '{objective_id}' already exists")
            }
            Self::Conflict {
                objective_id,
                expected,
                found,
            } => write!(
                f,
                "Stale write on objective '{objective_id}': expected {expected}, found {found}"
            ),
            Self::History(err) => write!(f, "History append failed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The actor lacks the capability the operation requires.
    PermissionDenied {
        /// The action that was attempted.
        action: String,
        /// The capability required for this action.
        required: String,
    },
    /// The workflow action is not defined for the current state.
    InvalidTransition {
        /// A human-readable description of the rejection.
        message: String,
    },
    /// A domain rule was violated.
    ValidationError {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The requested placement would close a loop in the hierarchy.
    CycleDetected {
        /// A human-readable description of the cycle.
        message: String,
    },
    /// The objective's approval status does not allow the operation.
    ObjectiveLocked {
        /// A human-readable description of the lock.
        message: String,
    },
    /// The objective changed since it was read. Retry with fresh state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the engine error kind this error corresponds to, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::PermissionDenied { .. } => Some(ErrorKind::PermissionDenied),
            Self::InvalidTransition { .. } => Some(ErrorKind::InvalidTransition),
            Self::ValidationError { .. } => Some(ErrorKind::Validation),
            Self::CycleDetected { .. } => Some(ErrorKind::CycleDetected),
            Self::ObjectiveLocked { .. } => Some(ErrorKind::ObjectiveLocked),
            Self::Conflict { .. } => Some(ErrorKind::Conflict),
            Self::ResourceNotFound { .. } | Self::Internal { .. } => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { action, required } => {
                write!(f, "Permission denied: '{action}' requires {required}")
            }
            Self::InvalidTransition { message } => write!(f, "Invalid transition: {message}"),
            Self::ValidationError { rule, message } => {
                write!(f, "Validation error ({rule}): {message}")
            }
            Self::CycleDetected { message } => write!(f, "Cycle detected: {message}"),
            Self::ObjectiveLocked { message } => write!(f, "Objective locked: {message}"),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { objective_id } => Self::ResourceNotFound {
                resource_type: String::from("Objective"),
                message: format!("Objective '{objective_id}' does not exist"),
            },
            StoreError::Conflict { .. } => Self::Conflict {
                message: err.to_string(),
            },
            StoreError::AlreadyExists { .. } | StoreError::History(_) => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let rule: &str = match &err {
        DomainError::CycleDetected { .. } => {
            return ApiError::CycleDetected {
                message: err.to_string(),
            };
        }
        DomainError::KeyResultNotFound { key_result_id, .. } => {
            return ApiError::ResourceNotFound {
                resource_type: String::from("Key result"),
                message: format!("Key result '{key_result_id}' does not exist"),
            };
        }
        DomainError::InvalidLevel(_)
        | DomainError::InvalidApprovalStatus(_)
        | DomainError::InvalidObjectiveStatus(_)
        | DomainError::InvalidMetricType(_)
        | DomainError::InvalidContributorRole(_)
        | DomainError::InvalidUserRole(_)
        | DomainError::InvalidAction(_) => "known_value",
        DomainError::InvalidTitle(_) => "non_empty_title",
        DomainError::InvalidPeriod(_) => "non_empty_period",
        DomainError::InvalidKeyResult { .. } | DomainError::InvalidKeyResultValue { .. } => {
            "valid_key_result"
        }
        DomainError::ParentForbidden { .. }
        | DomainError::ParentLevelMismatch { .. }
        | DomainError::SelfReference { .. }
        | DomainError::HierarchyTooDeep { .. }
        | DomainError::ChildLevelMismatch { .. } => "hierarchy_level",
        DomainError::ObjectiveHasChildren { .. } => "no_orphaned_children",
        DomainError::RejectionCommentRequired => "rejection_comment",
        DomainError::OwnerCannotContribute { .. }
        | DomainError::DuplicateContributor { .. }
        | DomainError::ContributorNotFound { .. } => "contributor_membership",
    };
    ApiError::ValidationError {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PermissionDenied { action, required } => ApiError::PermissionDenied {
            action,
            required: required.to_string(),
        },
        CoreError::InvalidTransition { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        CoreError::Audit(audit_err) => ApiError::ValidationError {
            rule: String::from("audit_record"),
            message: audit_err.to_string(),
        },
        CoreError::ObjectiveLocked { .. } => ApiError::ObjectiveLocked {
            message: err.to_string(),
        },
    }
}
