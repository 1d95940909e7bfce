// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use okr_audit::ApprovalHistoryItem;
use okr_domain::{ApprovalStatus, Objective};

/// The stored values a write must still find for it to be applied.
///
/// A store honouring this compares before it swaps: if the stored approval
/// status (or key result value) differs, someone else wrote in between and
/// the operation must fail with a conflict instead of overwriting.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePrecondition {
    pub objective_id: String,
    pub approval_status: ApprovalStatus,
    /// `(key_result_id, current_value)` as read, for progress reports.
    pub key_result_value: Option<(String, f64)>,
}

/// The result of a successful approval transition.
///
/// The objective and the history item must be persisted together.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub new_objective: Objective,
    pub previous_status: ApprovalStatus,
    pub new_status: ApprovalStatus,
    pub history_item: ApprovalHistoryItem,
}

impl TransitionResult {
    /// The precondition the transition was evaluated against.
    #[must_use]
    pub fn precondition(&self) -> WritePrecondition {
        WritePrecondition {
            objective_id: self.new_objective.id.clone(),
            approval_status: self.previous_status,
            key_result_value: None,
        }
    }
}

/// The result of a successful command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub new_objective: Objective,
    pub precondition: WritePrecondition,
}
