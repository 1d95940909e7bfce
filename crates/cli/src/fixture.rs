// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON fixture files: users, objectives and approval history.
//!
//! Timestamps are RFC 3339 strings and due dates are `YYYY-MM-DD`.

use color_eyre::eyre::{Context, Result, eyre};
use okr_audit::{ApprovalAction, ApprovalHistoryItem};
use okr_domain::{
    ApprovalStatus, Contributor, ContributorRole, KeyResult, MetricType, Objective,
    ObjectiveLevel, User, UserRole,
};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveRecord>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: String,
    pub level: ObjectiveLevel,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_objective_id: Option<String>,
    #[serde(default)]
    pub key_results: Vec<KeyResultRecord>,
    #[serde(default)]
    pub contributors: Vec<ContributorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResultRecord {
    pub id: String,
    pub description: String,
    pub metric_type: MetricType,
    #[serde(default)]
    pub start_value: f64,
    pub target_value: f64,
    /// Defaults to `start_value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub user_id: String,
    #[serde(default)]
    pub role: ContributorRole,
    /// Defaults to the objective's creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub objective_id: String,
    pub action: ApprovalAction,
    pub performed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

/// The domain values held by a fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub users: Vec<User>,
    pub objectives: Vec<Objective>,
    pub history: Vec<ApprovalHistoryItem>,
}

impl Loaded {
    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no such user is listed.
    pub fn user(&self, user_id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| eyre!("unknown user '{user_id}'"))
    }
}

impl Fixture {
    /// Parses a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid fixture.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).wrap_err("fixture is not valid JSON")
    }

    /// Converts the records into domain values.
    ///
    /// # Errors
    ///
    /// Returns an error if a date, timestamp or history entry is malformed.
    pub fn load(&self) -> Result<Loaded> {
        let users: Vec<User> = self
            .users
            .iter()
            .map(|u| User::new(&u.id, u.role))
            .collect();
        let objectives: Vec<Objective> = self
            .objectives
            .iter()
            .map(ObjectiveRecord::to_objective)
            .collect::<Result<_>>()?;
        let history: Vec<ApprovalHistoryItem> = self
            .history
            .iter()
            .map(HistoryRecord::to_item)
            .collect::<Result<_>>()?;
        Ok(Loaded {
            users,
            objectives,
            history,
        })
    }

    /// Builds a fixture from domain values.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn store(loaded: &Loaded) -> Result<Self> {
        Ok(Self {
            users: loaded
                .users
                .iter()
                .map(|u| UserRecord {
                    id: u.id.clone(),
                    role: u.role,
                })
                .collect(),
            objectives: loaded
                .objectives
                .iter()
                .map(ObjectiveRecord::from_objective)
                .collect::<Result<_>>()?,
            history: loaded
                .history
                .iter()
                .map(HistoryRecord::from_item)
                .collect::<Result<_>>()?,
        })
    }
}

impl ObjectiveRecord {
    fn to_objective(&self) -> Result<Objective> {
        let created_at: OffsetDateTime = parse_timestamp(&self.created_at)
            .wrap_err_with(|| format!("objective '{}'", self.id))?;

        let mut objective: Objective = Objective::new(
            &self.id,
            &self.title,
            &self.owner_id,
            self.level,
            &self.period,
            created_at,
        )
        .with_description(&self.description)
        .with_approval_status(self.approval_status);
        objective.parent_objective_id.clone_from(&self.parent_objective_id);
        if let Some(due_date) = &self.due_date {
            objective.due_date = Some(
                parse_date(due_date).wrap_err_with(|| format!("objective '{}'", self.id))?,
            );
        }

        for record in &self.key_results {
            let mut key_result: KeyResult = KeyResult::new(
                &record.id,
                &self.id,
                &record.description,
                record.metric_type,
                record.start_value,
                record.target_value,
            );
            if let Some(current_value) = record.current_value {
                key_result.current_value = current_value;
            }
            key_result.unit.clone_from(&record.unit);
            objective.key_results.push(key_result);
        }

        for record in &self.contributors {
            let added_at: OffsetDateTime = match &record.added_at {
                Some(added_at) => parse_timestamp(added_at)?,
                None => created_at,
            };
            objective.contributors.push(Contributor::new(
                &format!("contrib-{}-{}", self.id, record.user_id),
                &self.id,
                &record.user_id,
                record.role,
                added_at,
            ));
        }

        Ok(objective)
    }

    /// Renders an objective as a record.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be formatted.
    pub fn from_objective(objective: &Objective) -> Result<Self> {
        Ok(Self {
            id: objective.id.clone(),
            title: objective.title.clone(),
            description: objective.description.clone(),
            owner_id: objective.owner_id.clone(),
            level: objective.level,
            period: objective.period.clone(),
            due_date: objective.due_date.map(format_date).transpose()?,
            created_at: format_timestamp(objective.created_at)?,
            approval_status: objective.approval_status,
            parent_objective_id: objective.parent_objective_id.clone(),
            key_results: objective
                .key_results
                .iter()
                .map(|kr| KeyResultRecord {
                    id: kr.id.clone(),
                    description: kr.description.clone(),
                    metric_type: kr.metric_type,
                    start_value: kr.start_value,
                    target_value: kr.target_value,
                    current_value: Some(kr.current_value),
                    unit: kr.unit.clone(),
                })
                .collect(),
            contributors: objective
                .contributors
                .iter()
                .map(|c| {
                    Ok(ContributorRecord {
                        user_id: c.user_id.clone(),
                        role: c.role,
                        added_at: Some(format_timestamp(c.added_at)?),
                    })
                })
                .collect::<Result<_>>()?,
        })
    }
}

impl HistoryRecord {
    fn to_item(&self) -> Result<ApprovalHistoryItem> {
        let created_at: OffsetDateTime = parse_timestamp(&self.created_at)?;
        ApprovalHistoryItem::restore(
            &self.id,
            &self.objective_id,
            self.action,
            &self.performed_by,
            self.comment.as_deref(),
            created_at,
        )
        .wrap_err_with(|| format!("history entry '{}'", self.id))
    }

    /// Renders a history item as a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_item(item: &ApprovalHistoryItem) -> Result<Self> {
        Ok(Self {
            id: item.id().to_string(),
            objective_id: item.objective_id().to_string(),
            action: item.action(),
            performed_by: item.performed_by().to_string(),
            comment: item.comment().map(str::to_string),
            created_at: format_timestamp(item.created_at())?,
        })
    }
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).wrap_err_with(|| format!("invalid timestamp '{text}'"))
}

fn format_timestamp(value: OffsetDateTime) -> Result<String> {
    value.format(&Rfc3339).wrap_err("cannot format timestamp")
}

fn parse_date(text: &str) -> Result<Date> {
    Date::parse(text, DATE_FORMAT).wrap_err_with(|| format!("invalid date '{text}'"))
}

fn format_date(value: Date) -> Result<String> {
    value.format(DATE_FORMAT).wrap_err("cannot format date")
}
