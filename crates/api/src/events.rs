// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notifications about committed objective changes.
//!
//! Events are facts about what already happened. They are emitted only
//! after the store accepted the write and are never authoritative.

use okr_audit::{ApprovalAction, ApprovalHistoryItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something that happened to an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectiveEvent {
    #[serde(rename = "objective:created")]
    Created {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:submitted")]
    Submitted {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:approved")]
    Approved {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:rejected")]
    Rejected {
        objective_id: String,
        actor_id: String,
        /// The reviewer's reason.
        comment: String,
    },
    #[serde(rename = "objective:activated")]
    Activated {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:paused")]
    Paused {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:resumed")]
    Resumed {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:stopped")]
    Stopped {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:archived")]
    Archived {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:reverted_to_draft")]
    RevertedToDraft {
        objective_id: String,
        actor_id: String,
    },
    #[serde(rename = "objective:progress_reported")]
    ProgressReported {
        objective_id: String,
        actor_id: String,
        key_result_id: String,
        /// Objective progress after the report.
        progress: u8,
    },
    #[serde(rename = "objective:deleted")]
    Deleted {
        objective_id: String,
        actor_id: String,
    },
}

impl ObjectiveEvent {
    /// Builds the event announcing a committed approval transition.
    #[must_use]
    pub fn from_history(item: &ApprovalHistoryItem) -> Self {
        let objective_id: String = item.objective_id().to_string();
        let actor_id: String = item.performed_by().to_string();
        match item.action() {
            ApprovalAction::Submitted => Self::Submitted {
                objective_id,
                actor_id,
            },
            ApprovalAction::Approved => Self::Approved {
                objective_id,
                actor_id,
            },
            ApprovalAction::Rejected => Self::Rejected {
                objective_id,
                actor_id,
                comment: item.comment().unwrap_or_default().to_string(),
            },
            ApprovalAction::Activated => Self::Activated {
                objective_id,
                actor_id,
            },
            ApprovalAction::Paused => Self::Paused {
                objective_id,
                actor_id,
            },
            ApprovalAction::Resumed => Self::Resumed {
                objective_id,
                actor_id,
            },
            ApprovalAction::Stopped => Self::Stopped {
                objective_id,
                actor_id,
            },
            ApprovalAction::Archived => Self::Archived {
                objective_id,
                actor_id,
            },
            ApprovalAction::RevertedToDraft => Self::RevertedToDraft {
                objective_id,
                actor_id,
            },
        }
    }

    /// The wire name of the event, e.g. `objective:approved`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "objective:created",
            Self::Submitted { .. } => "objective:submitted",
            Self::Approved { .. } => "objective:approved",
            Self::Rejected { .. } => "objective:rejected",
            Self::Activated { .. } => "objective:activated",
            Self::Paused { .. } => "objective:paused",
            Self::Resumed { .. } => "objective:resumed",
            Self::Stopped { .. } => "objective:stopped",
            Self::Archived { .. } => "objective:archived",
            Self::RevertedToDraft { .. } => "objective:reverted_to_draft",
            Self::ProgressReported { .. } => "objective:progress_reported",
            Self::Deleted { .. } => "objective:deleted",
        }
    }

    /// The objective the event is about.
    #[must_use]
    pub fn objective_id(&self) -> &str {
        match self {
            Self::Created { objective_id, .. }
            | Self::Submitted { objective_id, .. }
            | Self::Approved { objective_id, .. }
            | Self::Rejected { objective_id, .. }
            | Self::Activated { objective_id, .. }
            | Self::Paused { objective_id, .. }
            | Self::Resumed { objective_id, .. }
            | Self::Stopped { objective_id, .. }
            | Self::Archived { objective_id, .. }
            | Self::RevertedToDraft { objective_id, .. }
            | Self::ProgressReported { objective_id, .. }
            | Self::Deleted { objective_id, .. } => objective_id,
        }
    }
}

/// Receives events after successful commits.
///
/// Implementations must not fail the operation that produced the event.
pub trait Notifier {
    fn notify(&self, event: &ObjectiveEvent);
}

/// A [`Notifier`] that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &ObjectiveEvent) {
        debug!(
            event = event.name(),
            objective_id = event.objective_id(),
            "Objective event"
        );
    }
}
