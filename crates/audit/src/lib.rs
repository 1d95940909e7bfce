// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Approval history for objectives.
//!
//! Every successful workflow transition produces exactly one
//! [`ApprovalHistoryItem`]. Items are immutable once created: fields are
//! private and only readable through accessors, and [`ApprovalHistory`]
//! exposes no way to edit or remove an entry.

#[cfg(test)]
mod tests;

use okr_domain::generate_id;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Errors raised while constructing or appending audit records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// Action string is not one of the known actions.
    InvalidAction(String),
    /// The action requires a comment and none was given.
    CommentRequired {
        /// The action being recorded.
        action: ApprovalAction,
    },
    /// An item for one objective was appended to another objective's history.
    ObjectiveMismatch {
        /// The objective the history belongs to.
        expected: String,
        /// The objective named by the item.
        found: String,
    },
    /// An item is older than the latest entry already in the history.
    OutOfOrder {
        /// The item identifier.
        item_id: String,
    },
    /// An item with the same id is already in the history.
    DuplicateEntry {
        /// The item identifier.
        item_id: String,
    },
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAction(s) => write!(f, "Invalid approval action: {s}"),
            Self::CommentRequired { action } => {
                write!(f, "A comment is required for '{action}' entries")
            }
            Self::ObjectiveMismatch { expected, found } => write!(
                f,
                "History for objective '{expected}' cannot hold an entry for '{found}'"
            ),
            Self::OutOfOrder { item_id } => {
                write!(f, "History entry '{item_id}' predates the latest entry")
            }
            Self::DuplicateEntry { item_id } => {
                write!(f, "History entry '{item_id}' has already been recorded")
            }
        }
    }
}

impl std::error::Error for AuditError {}

/// What happened to an objective in a recorded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Submitted,
    Approved,
    Rejected,
    Activated,
    Paused,
    Resumed,
    Stopped,
    Archived,
    RevertedToDraft,
}

impl ApprovalAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Activated => "activated",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Stopped => "stopped",
            Self::Archived => "archived",
            Self::RevertedToDraft => "reverted_to_draft",
        }
    }

    /// Returns true if entries for this action must carry a comment.
    #[must_use]
    pub const fn requires_comment(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

impl FromStr for ApprovalAction {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "activated" => Ok(Self::Activated),
            "paused" => Ok(Self::Paused),
            "resumed" => Ok(Self::Resumed),
            "stopped" => Ok(Self::Stopped),
            "archived" => Ok(Self::Archived),
            "reverted_to_draft" => Ok(Self::RevertedToDraft),
            _ => Err(AuditError::InvalidAction(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of one approval workflow transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalHistoryItem {
    id: String,
    objective_id: String,
    action: ApprovalAction,
    performed_by: String,
    comment: Option<String>,
    created_at: OffsetDateTime,
}

impl ApprovalHistoryItem {
    /// Records a new history item with a fresh id.
    ///
    /// Comments are trimmed; a blank comment is treated as absent.
    ///
    /// # Arguments
    ///
    /// * `objective_id` - The objective that transitioned
    /// * `action` - What happened
    /// * `performed_by` - The user who performed the action
    /// * `comment` - Optional free text, required for rejections
    /// * `created_at` - When the transition happened
    ///
    /// # Errors
    ///
    /// Returns `AuditError::CommentRequired` if the action requires a
    /// comment and none was given.
    pub fn record(
        objective_id: &str,
        action: ApprovalAction,
        performed_by: &str,
        comment: Option<&str>,
        created_at: OffsetDateTime,
    ) -> Result<Self, AuditError> {
        Self::restore(
            &generate_id("hist", created_at),
            objective_id,
            action,
            performed_by,
            comment,
            created_at,
        )
    }

    /// Rebuilds a history item that was previously recorded and persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::CommentRequired` if the action requires a
    /// comment and none was given.
    pub fn restore(
        id: &str,
        objective_id: &str,
        action: ApprovalAction,
        performed_by: &str,
        comment: Option<&str>,
        created_at: OffsetDateTime,
    ) -> Result<Self, AuditError> {
        let comment: Option<String> = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        if action.requires_comment() && comment.is_none() {
            return Err(AuditError::CommentRequired { action });
        }

        Ok(Self {
            id: id.to_string(),
            objective_id: objective_id.to_string(),
            action,
            performed_by: performed_by.to_string(),
            comment,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn objective_id(&self) -> &str {
        &self.objective_id
    }

    #[must_use]
    pub const fn action(&self) -> ApprovalAction {
        self.action
    }

    #[must_use]
    pub fn performed_by(&self) -> &str {
        &self.performed_by
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// The append-only approval history of a single objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalHistory {
    objective_id: String,
    items: Vec<ApprovalHistoryItem>,
}

impl ApprovalHistory {
    /// Creates an empty history for an objective.
    #[must_use]
    pub fn new(objective_id: &str) -> Self {
        Self {
            objective_id: objective_id.to_string(),
            items: Vec::new(),
        }
    }

    /// Rebuilds a history from persisted items, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if any item fails the [`Self::append`] checks.
    pub fn from_items<I>(objective_id: &str, items: I) -> Result<Self, AuditError>
    where
        I: IntoIterator<Item = ApprovalHistoryItem>,
    {
        let mut history: Self = Self::new(objective_id);
        for item in items {
            history.append(item)?;
        }
        Ok(history)
    }

    /// Appends an item.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The item belongs to a different objective
    /// - The item is older than the latest entry
    /// - An item with the same id was already appended
    pub fn append(&mut self, item: ApprovalHistoryItem) -> Result<(), AuditError> {
        if item.objective_id != self.objective_id {
            return Err(AuditError::ObjectiveMismatch {
                expected: self.objective_id.clone(),
                found: item.objective_id,
            });
        }
        if self.items.iter().any(|existing| existing.id == item.id) {
            return Err(AuditError::DuplicateEntry { item_id: item.id });
        }
        if self
            .latest()
            .is_some_and(|latest| item.created_at < latest.created_at)
        {
            return Err(AuditError::OutOfOrder { item_id: item.id });
        }
        self.items.push(item);
        Ok(())
    }

    #[must_use]
    pub fn objective_id(&self) -> &str {
        &self.objective_id
    }

    /// All items, oldest first.
    #[must_use]
    pub fn items(&self) -> &[ApprovalHistoryItem] {
        &self.items
    }

    /// The most recent item, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ApprovalHistoryItem> {
        self.items.last()
    }

    /// The most recent rejection, which carries the reviewer's reason.
    #[must_use]
    pub fn latest_rejection(&self) -> Option<&ApprovalHistoryItem> {
        self.items
            .iter()
            .rev()
            .find(|item| item.action == ApprovalAction::Rejected)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
