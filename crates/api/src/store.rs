// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Objective storage with conditional writes.

use crate::error::StoreError;
use okr_audit::{ApprovalHistory, ApprovalHistoryItem};
use okr_domain::{ApprovalStatus, Objective};
use okr_engine::WritePrecondition;
use std::collections::BTreeMap;

/// Storage for objectives and their approval history.
///
/// Every mutating call is a compare-and-set: the store checks the values
/// named by the precondition against what it currently holds and refuses
/// the write if they differ. The objective and its history item are
/// committed together or not at all.
pub trait ObjectiveStore {
    /// Loads one objective.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the objective does not exist.
    fn get(&self, objective_id: &str) -> Result<Objective, StoreError>;

    /// Loads every objective, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list(&self) -> Result<Vec<Objective>, StoreError>;

    /// Stores a new objective.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the id is taken.
    fn insert(&mut self, objective: Objective) -> Result<(), StoreError>;

    /// Replaces an objective, appending `history_item` if given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The objective does not exist
    /// - The stored approval status or key result value differs from the precondition
    /// - The history item cannot be appended
    fn commit(
        &mut self,
        precondition: &WritePrecondition,
        objective: Objective,
        history_item: Option<ApprovalHistoryItem>,
    ) -> Result<(), StoreError>;

    /// Removes an objective if it is still in `expected_status`.
    ///
    /// The approval history is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist or its status changed.
    fn remove(
        &mut self,
        objective_id: &str,
        expected_status: ApprovalStatus,
    ) -> Result<Objective, StoreError>;

    /// Loads the approval history of an objective, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn history(&self, objective_id: &str) -> Result<ApprovalHistory, StoreError>;
}

/// An [`ObjectiveStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    objectives: BTreeMap<String, Objective>,
    histories: BTreeMap<String, ApprovalHistory>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objectives: BTreeMap::new(),
            histories: BTreeMap::new(),
        }
    }

    /// Creates a store pre-loaded with objectives and history.
    ///
    /// # Errors
    ///
    /// Returns an error if two objectives share an id or any history
    /// item is rejected by its objective's history.
    pub fn with_contents<O, H>(objectives: O, history: H) -> Result<Self, StoreError>
    where
        O: IntoIterator<Item = Objective>,
        H: IntoIterator<Item = ApprovalHistoryItem>,
    {
        let mut store: Self = Self::new();
        for objective in objectives {
            store.insert(objective)?;
        }
        for item in history {
            store
                .histories
                .entry(item.objective_id().to_string())
                .or_insert_with(|| ApprovalHistory::new(item.objective_id()))
                .append(item)
                .map_err(StoreError::History)?;
        }
        Ok(store)
    }

    /// Every recorded history item across all objectives.
    pub fn all_history(&self) -> impl Iterator<Item = &ApprovalHistoryItem> {
        self.histories.values().flat_map(ApprovalHistory::items)
    }

    fn check(&self, precondition: &WritePrecondition) -> Result<&Objective, StoreError> {
        let stored: &Objective =
            self.objectives
                .get(&precondition.objective_id)
                .ok_or_else(|| StoreError::NotFound {
                    objective_id: precondition.objective_id.clone(),
                })?;

        if stored.approval_status != precondition.approval_status {
            return Err(StoreError::Conflict {
                objective_id: stored.id.clone(),
                expected: precondition.approval_status.to_string(),
                found: stored.approval_status.to_string(),
            });
        }

        if let Some((key_result_id, expected)) = &precondition.key_result_value {
            let found: Option<f64> = stored.key_result(key_result_id).map(|kr| kr.current_value);
            let unchanged: bool = found.is_some_and(|v| v.to_bits() == expected.to_bits());
            if !unchanged {
                return Err(StoreError::Conflict {
                    objective_id: stored.id.clone(),
                    expected: format!("{key_result_id}={expected}"),
                    found: found.map_or_else(
                        || format!("{key_result_id} missing"),
                        |v| format!("{key_result_id}={v}"),
                    ),
                });
            }
        }

        Ok(stored)
    }
}

impl ObjectiveStore for InMemoryStore {
    fn get(&self, objective_id: &str) -> Result<Objective, StoreError> {
        self.objectives
            .get(objective_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                objective_id: objective_id.to_string(),
            })
    }

    fn list(&self) -> Result<Vec<Objective>, StoreError> {
        Ok(self.objectives.values().cloned().collect())
    }

    fn insert(&mut self, objective: Objective) -> Result<(), StoreError> {
        if self.objectives.contains_key(&objective.id) {
            return Err(StoreError::AlreadyExists {
                objective_id: objective.id,
            });
        }
        self.objectives.insert(objective.id.clone(), objective);
        Ok(())
    }

    fn commit(
        &mut self,
        precondition: &WritePrecondition,
        objective: Objective,
        history_item: Option<ApprovalHistoryItem>,
    ) -> Result<(), StoreError> {
        self.check(precondition)?;

        // Stage the history append so a rejected item leaves nothing behind.
        let staged: Option<ApprovalHistory> = match history_item {
            None => None,
            Some(item) => {
                let mut history: ApprovalHistory = self
                    .histories
                    .get(&objective.id)
                    .cloned()
                    .unwrap_or_else(|| ApprovalHistory::new(&objective.id));
                history.append(item).map_err(StoreError::History)?;
                Some(history)
            }
        };

        if let Some(history) = staged {
            self.histories.insert(objective.id.clone(), history);
        }
        self.objectives.insert(objective.id.clone(), objective);
        Ok(())
    }

    fn remove(
        &mut self,
        objective_id: &str,
        expected_status: ApprovalStatus,
    ) -> Result<Objective, StoreError> {
        self.check(&WritePrecondition {
            objective_id: objective_id.to_string(),
            approval_status: expected_status,
            key_result_value: None,
        })?;
        self.objectives
            .remove(objective_id)
            .ok_or_else(|| StoreError::NotFound {
                objective_id: objective_id.to_string(),
            })
    }

    fn history(&self, objective_id: &str) -> Result<ApprovalHistory, StoreError> {
        Ok(self
            .histories
            .get(objective_id)
            .cloned()
            .unwrap_or_else(|| ApprovalHistory::new(objective_id)))
    }
}
