// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parent/child constraints across the company → team → individual tree.
//!
//! The hierarchy is held as a flat index keyed by objective id with
//! explicit parent ids. Ancestry is walked by repeated lookup.

use crate::error::DomainError;
use crate::types::{Objective, ObjectiveLevel};
use std::collections::BTreeMap;

/// What the hierarchy validator needs to know about one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub level: ObjectiveLevel,
    pub parent_id: Option<String>,
}

/// Read-only snapshot of every objective's level and parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl ObjectiveIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds an index from a set of objectives.
    #[must_use]
    pub fn from_objectives<'a, I>(objectives: I) -> Self
    where
        I: IntoIterator<Item = &'a Objective>,
    {
        let mut index: Self = Self::new();
        for objective in objectives {
            index.insert(
                &objective.id,
                objective.level,
                objective.parent_objective_id.as_deref(),
            );
        }
        index
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, id: &str, level: ObjectiveLevel, parent_id: Option<&str>) {
        self.entries.insert(
            id.to_string(),
            IndexEntry {
                level,
                parent_id: parent_id.map(str::to_string),
            },
        );
    }

    /// Removes an entry, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<IndexEntry> {
        self.entries.remove(id)
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Checks if an objective exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, entry)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Returns the ids of the direct children of `id`.
    #[must_use]
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.iter()
            .filter(|(_, entry)| entry.parent_id.as_deref() == Some(id))
            .map(|(child_id, _)| child_id)
            .collect()
    }

    /// Returns the ancestor chain of `id`, nearest parent first.
    ///
    /// Dangling parent references end the chain. The walk visits each
    /// entry at most once, so a malformed graph cannot loop forever.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CycleDetected` if the chain revisits an objective.
    pub fn ancestors(&self, id: &str) -> Result<Vec<String>, DomainError> {
        let mut chain: Vec<String> = Vec::new();
        let mut current: Option<&str> = self.get(id).and_then(|e| e.parent_id.as_deref());

        while let Some(ancestor_id) = current {
            if ancestor_id == id || chain.iter().any(|seen| seen == ancestor_id) {
                return Err(DomainError::CycleDetected {
                    objective_id: id.to_string(),
                    parent_id: ancestor_id.to_string(),
                });
            }
            chain.push(ancestor_id.to_string());
            current = self
                .get(ancestor_id)
                .and_then(|entry| entry.parent_id.as_deref());
        }

        Ok(chain)
    }
}

/// A proposed `(id, level, parent)` assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyCandidate<'a> {
    pub objective_id: &'a str,
    pub level: ObjectiveLevel,
    pub parent_id: Option<&'a str>,
}

impl<'a> HierarchyCandidate<'a> {
    #[must_use]
    pub const fn new(
        objective_id: &'a str,
        level: ObjectiveLevel,
        parent_id: Option<&'a str>,
    ) -> Self {
        Self {
            objective_id,
            level,
            parent_id,
        }
    }

    /// The candidate describing an objective's current placement.
    #[must_use]
    pub fn of(objective: &'a Objective) -> Self {
        Self::new(
            &objective.id,
            objective.level,
            objective.parent_objective_id.as_deref(),
        )
    }
}

/// Validates a proposed hierarchy placement against the index.
///
/// The candidate itself may or may not already be present in the index;
/// its own entry is ignored in favour of the proposed values.
///
/// # Arguments
///
/// * `candidate` - The proposed placement
/// * `index` - Snapshot of all existing objectives
///
/// # Errors
///
/// Returns an error if:
/// - A company objective has a parent
/// - The objective names itself as parent
/// - A team objective's parent is missing or not a company objective
/// - An individual objective's parent is missing or not a team objective
/// - Walking up from the parent reaches the candidate (cycle)
/// - The parent's own chain is longer than the candidate's level allows
/// - Existing children of the candidate would no longer fit its level
pub fn validate_hierarchy(
    candidate: &HierarchyCandidate<'_>,
    index: &ObjectiveIndex,
) -> Result<(), DomainError> {
    // Rule: company objectives are roots
    if candidate.level == ObjectiveLevel::Company && candidate.parent_id.is_some() {
        return Err(DomainError::ParentForbidden {
            objective_id: candidate.objective_id.to_string(),
        });
    }

    if candidate.parent_id == Some(candidate.objective_id) {
        return Err(DomainError::SelfReference {
            objective_id: candidate.objective_id.to_string(),
        });
    }

    if let Some(required) = candidate.level.parent_level() {
        let parent_level: Option<ObjectiveLevel> = candidate
            .parent_id
            .and_then(|parent_id| index.get(parent_id))
            .map(|entry| entry.level);

        if parent_level != Some(required) {
            return Err(DomainError::ParentLevelMismatch {
                level: candidate.level,
                required_parent_level: required,
            });
        }
    }

    if let Some(parent_id) = candidate.parent_id {
        let chain: Vec<String> = walk_from_parent(candidate.objective_id, parent_id, index)?;
        let depth: usize = chain.len();
        if depth > candidate.level.depth() {
            return Err(DomainError::HierarchyTooDeep {
                objective_id: candidate.objective_id.to_string(),
                depth,
            });
        }
    }

    // Existing children must still fit below the candidate's level
    for child_id in index.children_of(candidate.objective_id) {
        let fits: bool = index
            .get(child_id)
            .is_some_and(|child| Some(child.level) == candidate.level.child_level());
        if !fits {
            return Err(DomainError::ChildLevelMismatch {
                objective_id: candidate.objective_id.to_string(),
                child_id: child_id.to_string(),
                level: candidate.level,
            });
        }
    }

    Ok(())
}

/// Walks from `parent_id` to the root and returns the full chain of
/// parent edges the candidate would sit under, parent first.
fn walk_from_parent(
    objective_id: &str,
    parent_id: &str,
    index: &ObjectiveIndex,
) -> Result<Vec<String>, DomainError> {
    let cycle = || DomainError::CycleDetected {
        objective_id: objective_id.to_string(),
        parent_id: parent_id.to_string(),
    };

    let mut chain: Vec<String> = Vec::new();
    let mut current: Option<&str> = Some(parent_id);

    while let Some(ancestor_id) = current {
        if ancestor_id == objective_id || chain.iter().any(|seen| seen == ancestor_id) {
            return Err(cycle());
        }
        chain.push(ancestor_id.to_string());
        if chain.len() > index.len() {
            return Err(cycle());
        }
        current = index
            .get(ancestor_id)
            .and_then(|entry| entry.parent_id.as_deref());
    }

    Ok(chain)
}

/// Returns the objectives that may serve as parent for an objective at `level`.
///
/// These are the objectives one level above `level`, minus `exclude_id`
/// and minus anything whose ancestor chain contains `exclude_id`, so an
/// objective can never be re-parented under its own descendant.
/// Company objectives have no available parents.
///
/// # Arguments
///
/// * `level` - The level of the objective looking for a parent
/// * `exclude_id` - The objective being placed, if it already exists
/// * `objectives` - All existing objectives
#[must_use]
pub fn available_parents<'a>(
    level: ObjectiveLevel,
    exclude_id: Option<&str>,
    objectives: &'a [Objective],
) -> Vec<&'a Objective> {
    let Some(parent_level) = level.parent_level() else {
        return Vec::new();
    };
    let index: ObjectiveIndex = ObjectiveIndex::from_objectives(objectives);

    objectives
        .iter()
        .filter(|o| o.level == parent_level)
        .filter(|o| match exclude_id {
            None => true,
            Some(excluded) => {
                o.id != excluded
                    && index
                        .ancestors(&o.id)
                        .is_ok_and(|chain| chain.iter().all(|a| a != excluded))
            }
        })
        .collect()
}
