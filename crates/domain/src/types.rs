// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The organizational level an objective belongs to.
///
/// Levels form a fixed three-tier tree: company objectives are roots,
/// team objectives roll up under company objectives, and individual
/// objectives roll up under team objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveLevel {
    /// Root of the hierarchy. Never has a parent.
    Company,
    /// Rolls up under a company objective.
    Team,
    /// Rolls up under a team objective.
    Individual,
}

impl ObjectiveLevel {
    /// All levels, root first.
    pub const ALL: [Self; 3] = [Self::Company, Self::Team, Self::Individual];

    /// Returns the string representation of the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Team => "team",
            Self::Individual => "individual",
        }
    }

    /// Returns the level a parent objective must have, if any.
    #[must_use]
    pub const fn parent_level(&self) -> Option<Self> {
        match self {
            Self::Company => None,
            Self::Team => Some(Self::Company),
            Self::Individual => Some(Self::Team),
        }
    }

    /// Returns the level a child objective must have, if any.
    #[must_use]
    pub const fn child_level(&self) -> Option<Self> {
        match self {
            Self::Company => Some(Self::Team),
            Self::Team => Some(Self::Individual),
            Self::Individual => None,
        }
    }

    /// Number of parent edges between an objective of this level and the root.
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Company => 0,
            Self::Team => 1,
            Self::Individual => 2,
        }
    }
}

impl FromStr for ObjectiveLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Self::Company),
            "team" => Ok(Self::Team),
            "individual" => Ok(Self::Individual),
            _ => Err(DomainError::InvalidLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectiveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The workflow stage of an objective.
///
/// Transitions between these states are governed by the approval state
/// machine in the engine crate; this type only answers questions about
/// what a given state permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Being written by its owner. The only editable state.
    #[default]
    Draft,
    /// Submitted and awaiting an admin decision.
    PendingReview,
    /// Approved but not yet tracking progress.
    Approved,
    /// Live. Key result values may be reported.
    Active,
    /// Temporarily halted by an admin.
    Paused,
    /// Permanently halted. May only be archived.
    Stopped,
    /// Retired. Terminal.
    Archived,
}

impl ApprovalStatus {
    /// All approval states in workflow order.
    pub const ALL: [Self; 7] = [
        Self::Draft,
        Self::PendingReview,
        Self::Approved,
        Self::Active,
        Self::Paused,
        Self::Stopped,
        Self::Archived,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Archived => "archived",
        }
    }

    /// Returns whether objective fields and key result definitions may be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns whether the objective may be deleted in this state.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Draft | Self::Archived)
    }

    /// Returns whether key result values may be reported in this state.
    #[must_use]
    pub const fn accepts_progress(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if no further transition leaves this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_review" => Ok(Self::PendingReview),
            "approved" => Ok(Self::Approved),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "stopped" => Ok(Self::Stopped),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidApprovalStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse health label shown next to an objective.
///
/// Never set directly; see [`crate::derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveStatus {
    OnTrack,
    AtRisk,
    OffTrack,
    Completed,
    #[default]
    Draft,
}

impl ObjectiveStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::OffTrack => "off-track",
            Self::Completed => "completed",
            Self::Draft => "draft",
        }
    }
}

impl FromStr for ObjectiveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-track" => Ok(Self::OnTrack),
            "at-risk" => Ok(Self::AtRisk),
            "off-track" => Ok(Self::OffTrack),
            "completed" => Ok(Self::Completed),
            "draft" => Ok(Self::Draft),
            _ => Err(DomainError::InvalidObjectiveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a key result is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Number,
    Percentage,
    Currency,
    /// Done or not done. Stored as `0`/`1` against a target of `1`.
    Boolean,
}

impl MetricType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Percentage => "percentage",
            Self::Currency => "currency",
            Self::Boolean => "boolean",
        }
    }
}

impl FromStr for MetricType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(Self::Number),
            "percentage" => Ok(Self::Percentage),
            "currency" => Ok(Self::Currency),
            "boolean" => Ok(Self::Boolean),
            _ => Err(DomainError::InvalidMetricType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role a contributor plays on an objective.
///
/// The role is descriptive only; every contributor receives the same
/// editing and reporting rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRole {
    #[default]
    Contributor,
    Reviewer,
    Supporter,
}

impl ContributorRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contributor => "contributor",
            Self::Reviewer => "reviewer",
            Self::Supporter => "supporter",
        }
    }
}

impl FromStr for ContributorRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contributor" => Ok(Self::Contributor),
            "reviewer" => Ok(Self::Reviewer),
            "supporter" => Ok(Self::Supporter),
            _ => Err(DomainError::InvalidContributorRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ContributorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Organization-wide role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Reviews, approves and steers objectives across the organization.
    Admin,
    /// Regular member. Rights come from ownership or contribution.
    #[default]
    Member,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" | "user" => Ok(Self::Member),
            _ => Err(DomainError::InvalidUserRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user as seen by the engine.
///
/// Authentication happens elsewhere; the engine only needs an identity
/// and an organization role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: UserRole,
}

impl User {
    /// Creates a new `User`.
    ///
    /// # Arguments
    ///
    /// * `id` - The user's identifier
    /// * `role` - The user's organization role
    #[must_use]
    pub fn new(id: &str, role: UserRole) -> Self {
        Self {
            id: id.to_string(),
            role,
        }
    }

    /// Returns true if this user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

/// A measurable result attached to an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    pub id: String,
    pub objective_id: String,
    pub description: String,
    pub metric_type: MetricType,
    pub start_value: f64,
    pub target_value: f64,
    pub current_value: f64,
    /// Display unit. Always `None` for boolean key results.
    pub unit: Option<String>,
}

impl KeyResult {
    /// Creates a key result starting at `start_value`.
    ///
    /// The result is not validated; pass it through
    /// [`crate::validate_key_result`] before storing it.
    #[must_use]
    pub fn new(
        id: &str,
        objective_id: &str,
        description: &str,
        metric_type: MetricType,
        start_value: f64,
        target_value: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            objective_id: objective_id.to_string(),
            description: description.to_string(),
            metric_type,
            start_value,
            target_value,
            current_value: start_value,
            unit: None,
        }
    }

    /// Creates a boolean (done / not done) key result, not yet done.
    #[must_use]
    pub fn boolean(id: &str, objective_id: &str, description: &str) -> Self {
        Self::new(id, objective_id, description, MetricType::Boolean, 0.0, 1.0)
    }

    /// Sets the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Sets the current value.
    #[must_use]
    pub const fn with_current_value(mut self, current_value: f64) -> Self {
        self.current_value = current_value;
        self
    }
}

/// A non-owner user granted owner-equivalent editing and reporting rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: String,
    pub objective_id: String,
    pub user_id: String,
    pub role: ContributorRole,
    pub added_at: OffsetDateTime,
}

impl Contributor {
    /// Creates a new `Contributor`.
    #[must_use]
    pub fn new(
        id: &str,
        objective_id: &str,
        user_id: &str,
        role: ContributorRole,
        added_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.to_string(),
            objective_id: objective_id.to_string(),
            user_id: user_id.to_string(),
            role,
            added_at,
        }
    }
}

/// A goal at company, team or individual level.
///
/// `status` and `progress` are derived values kept alongside the record
/// so callers can persist and display them. The engine recomputes them
/// whenever it returns a modified objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner_id: String,
    pub level: ObjectiveLevel,
    /// Period label, e.g. "Q1 2026".
    pub period: String,
    pub due_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub approval_status: ApprovalStatus,
    pub status: ObjectiveStatus,
    pub progress: u8,
    pub parent_objective_id: Option<String>,
    pub key_results: Vec<KeyResult>,
    pub contributors: Vec<Contributor>,
}

impl Objective {
    /// Creates a new draft objective with no key results or contributors.
    ///
    /// # Arguments
    ///
    /// * `id` - The objective identifier
    /// * `title` - The objective title
    /// * `owner_id` - The owning user
    /// * `level` - The organizational level
    /// * `period` - The period label
    /// * `created_at` - Creation timestamp
    #[must_use]
    pub fn new(
        id: &str,
        title: &str,
        owner_id: &str,
        level: ObjectiveLevel,
        period: &str,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            owner_id: owner_id.to_string(),
            level,
            period: period.to_string(),
            due_date: None,
            created_at,
            approval_status: ApprovalStatus::Draft,
            status: ObjectiveStatus::Draft,
            progress: 0,
            parent_objective_id: None,
            key_results: Vec::new(),
            contributors: Vec::new(),
        }
    }

    /// Sets the parent objective.
    #[must_use]
    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_objective_id = Some(parent_id.to_string());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the approval status.
    #[must_use]
    pub const fn with_approval_status(mut self, approval_status: ApprovalStatus) -> Self {
        self.approval_status = approval_status;
        self
    }

    /// Appends a key result, re-parenting it onto this objective.
    #[must_use]
    pub fn with_key_result(mut self, mut key_result: KeyResult) -> Self {
        key_result.objective_id.clone_from(&self.id);
        self.key_results.push(key_result);
        self
    }

    /// Appends a contributor.
    #[must_use]
    pub fn with_contributor(mut self, contributor: Contributor) -> Self {
        self.contributors.push(contributor);
        self
    }

    /// Looks up a key result by id.
    #[must_use]
    pub fn key_result(&self, key_result_id: &str) -> Option<&KeyResult> {
        self.key_results.iter().find(|kr| kr.id == key_result_id)
    }

    /// Returns true if `user_id` is a contributor on this objective.
    #[must_use]
    pub fn has_contributor(&self, user_id: &str) -> bool {
        self.contributors.iter().any(|c| c.user_id == user_id)
    }
}
