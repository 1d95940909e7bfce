// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lifecycle::ApprovalTransition;
use crate::permissions::RequiredCapability;
use okr_audit::AuditError;
use okr_domain::{ApprovalStatus, DomainError};

/// Coarse classification of a [`CoreError`], stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    InvalidTransition,
    Validation,
    CycleDetected,
    ObjectiveLocked,
    /// A stale write detected by the store. The engine never raises this.
    Conflict,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::InvalidTransition => "invalid_transition",
            Self::Validation => "validation_error",
            Self::CycleDetected => "cycle_detected",
            Self::ObjectiveLocked => "objective_locked",
            Self::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while applying an operation to an objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The actor lacks the capability the operation requires.
    PermissionDenied {
        /// The operation that was attempted.
        action: String,
        /// The capability it requires.
        required: RequiredCapability,
    },
    /// The transition is not defined for the current approval status.
    InvalidTransition {
        /// The current approval status.
        from: ApprovalStatus,
        /// The requested transition.
        transition: ApprovalTransition,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The history record could not be constructed.
    Audit(AuditError),
    /// The objective's approval status does not allow the operation.
    ObjectiveLocked {
        /// The objective identifier.
        objective_id: String,
        /// The status that blocks the operation.
        status: ApprovalStatus,
    },
}

impl CoreError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::DomainViolation(DomainError::CycleDetected { .. }) => ErrorKind::CycleDetected,
            Self::DomainViolation(_) | Self::Audit(_) => ErrorKind::Validation,
            Self::ObjectiveLocked { .. } => ErrorKind::ObjectiveLocked,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { action, required } => {
                write!(f, "Permission denied: '{action}' requires {required}")
            }
            Self::InvalidTransition { from, transition } => {
                write!(f, "Invalid transition: cannot {transition} from {from}")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Audit(err) => write!(f, "Audit error: {err}"),
            Self::ObjectiveLocked {
                objective_id,
                status,
            } => write!(f, "Objective '{objective_id}' is locked while {status}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<AuditError> for CoreError {
    fn from(err: AuditError) -> Self {
        Self::Audit(err)
    }
}
