// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use okr_domain::{ContributorRole, KeyResult, ObjectiveLevel};
use time::Date;

/// A command represents user intent as data only.
///
/// Approval transitions are not commands; they go through
/// [`crate::request_transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Edit objective fields. Draft only.
    UpdateDetails(ObjectiveChanges),
    /// Add a key result definition. Draft only.
    AddKeyResult {
        /// The key result; its objective id is overwritten.
        key_result: KeyResult,
    },
    /// Replace a key result definition. Draft only.
    UpdateKeyResult {
        /// The new definition, matched by id.
        key_result: KeyResult,
    },
    /// Remove a key result. Draft only.
    RemoveKeyResult {
        /// The key result identifier.
        key_result_id: String,
    },
    /// Report a new current value. Active only.
    ReportProgress {
        /// The key result identifier.
        key_result_id: String,
        /// The newly observed value.
        current_value: f64,
    },
    /// Grant a user contributor rights.
    AddContributor {
        /// The user identifier.
        user_id: String,
        /// The descriptive role.
        role: ContributorRole,
    },
    /// Revoke a user's contributor rights.
    RemoveContributor {
        /// The user identifier.
        user_id: String,
    },
}

impl Command {
    /// A short name for logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateDetails(_) => "update_details",
            Self::AddKeyResult { .. } => "add_key_result",
            Self::UpdateKeyResult { .. } => "update_key_result",
            Self::RemoveKeyResult { .. } => "remove_key_result",
            Self::ReportProgress { .. } => "report_progress",
            Self::AddContributor { .. } => "add_contributor",
            Self::RemoveContributor { .. } => "remove_contributor",
        }
    }
}

/// A partial update of an objective's editable fields.
///
/// `None` leaves a field unchanged. For the two optional fields the inner
/// `None` clears the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectiveChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<ObjectiveLevel>,
    pub period: Option<String>,
    pub due_date: Option<Option<Date>>,
    pub owner_id: Option<String>,
    pub parent_objective_id: Option<Option<String>>,
}

impl ObjectiveChanges {
    /// Returns true if the level or parent changes.
    #[must_use]
    pub const fn touches_hierarchy(&self) -> bool {
        self.level.is_some() || self.parent_objective_id.is_some()
    }
}

/// The input of [`crate::create_objective`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjective {
    pub title: String,
    pub description: String,
    pub level: ObjectiveLevel,
    pub period: String,
    pub due_date: Option<Date>,
    /// Defaults to the creating actor.
    pub owner_id: Option<String>,
    pub parent_objective_id: Option<String>,
    /// Key results with an empty id are given a fresh one.
    pub key_results: Vec<KeyResult>,
}

impl NewObjective {
    /// Creates a minimal new objective.
    #[must_use]
    pub fn new(title: &str, level: ObjectiveLevel, period: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            level,
            period: period.to_string(),
            due_date: None,
            owner_id: None,
            parent_objective_id: None,
            key_results: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_objective_id = Some(parent_id.to_string());
        self
    }

    #[must_use]
    pub const fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner_id: &str) -> Self {
        self.owner_id = Some(owner_id.to_string());
        self
    }

    #[must_use]
    pub fn with_key_result(mut self, key_result: KeyResult) -> Self {
        self.key_results.push(key_result);
        self
    }
}
