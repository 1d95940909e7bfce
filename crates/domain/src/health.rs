// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Health metrics derived from time and key result data.
//!
//! Health is **computed**, not stored. It's a pure function of the
//! objective's timing, its progress and a caller-supplied `now`.
//!
//! Days are counted on UTC calendar dates. An objective is due at the end
//! of its due date, so an objective created on its due date has one day
//! in which to complete.

use crate::types::Objective;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};

/// Pace at or above which an objective is considered on pace.
pub const ON_PACE_THRESHOLD: f64 = 0.9;
/// Pace at or above which risk is at most medium.
const MEDIUM_RISK_THRESHOLD: f64 = 0.7;
/// Pace above which risk is at most high.
const HIGH_RISK_THRESHOLD: f64 = 0.5;
/// Days remaining at or below which recommendations flag urgency.
pub const URGENT_DAYS_REMAINING: i64 = 7;

/// Risk classification derived from pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Classifies a pace ratio.
    ///
    /// `>= 0.9` is low, `>= 0.7` medium, `> 0.5` high, anything at or
    /// below half pace is critical.
    #[must_use]
    pub fn from_pace(pace_ratio: f64) -> Self {
        if pace_ratio >= ON_PACE_THRESHOLD {
            Self::Low
        } else if pace_ratio >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else if pace_ratio > HIGH_RISK_THRESHOLD {
            Self::High
        } else {
            Self::Critical
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The raw inputs of a health computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthInputs {
    pub created_at: OffsetDateTime,
    pub due_date: Option<Date>,
    /// Current progress percentage.
    pub progress: f64,
}

impl HealthInputs {
    /// Extracts the health inputs of an objective.
    ///
    /// Progress is recomputed from the key results rather than read from
    /// the stored `progress` field.
    #[must_use]
    pub fn for_objective(objective: &Objective) -> Self {
        Self {
            created_at: objective.created_at,
            due_date: objective.due_date,
            progress: f64::from(objective.computed_progress()),
        }
    }
}

/// Time and progress derived signals for an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Days since creation, capped at `total_days` when a due date is set.
    pub days_elapsed: i64,
    /// Length of the objective in days. `None` without a due date.
    pub total_days: Option<i64>,
    /// Days left including the due date itself. `None` without a due date.
    pub days_remaining: Option<i64>,
    pub percent_time_elapsed: f64,
    pub progress: f64,
    pub expected_progress: f64,
    /// `expected_progress - progress`. Positive means behind schedule.
    pub progress_gap: f64,
    pub pace_ratio: f64,
    pub is_on_pace: bool,
    pub risk_level: RiskLevel,
    /// Present only when `risk_level` is not low.
    pub recommendation: Option<String>,
}

/// Computes health metrics for an objective.
///
/// # Arguments
///
/// * `objective` - The objective to evaluate
/// * `now` - The evaluation instant, supplied by the caller
#[must_use]
pub fn compute_health(objective: &Objective, now: OffsetDateTime) -> HealthMetrics {
    compute_health_from(&HealthInputs::for_objective(objective), now)
}

/// Computes health metrics from raw inputs.
///
/// Calling this twice with identical arguments yields identical output.
#[must_use]
pub fn compute_health_from(inputs: &HealthInputs, now: OffsetDateTime) -> HealthMetrics {
    let created: Date = inputs.created_at.to_offset(UtcOffset::UTC).date();
    let today: Date = now.to_offset(UtcOffset::UTC).date();
    let since_creation: i64 = (today - created).whole_days();
    let progress: f64 = if inputs.progress.is_nan() {
        0.0
    } else {
        inputs.progress.clamp(0.0, 100.0)
    };

    let (days_elapsed, total_days, days_remaining) = match inputs.due_date {
        None => (since_creation.max(0), None, None),
        Some(due_date) => {
            let total: i64 = ((due_date - created).whole_days() + 1).max(1);
            let remaining: i64 = ((due_date - today).whole_days() + 1).max(0);
            (since_creation.clamp(0, total), Some(total), Some(remaining))
        }
    };

    // Pace comes from the day counts, not the rounded percentage.
    #[allow(clippy::cast_precision_loss)]
    let (percent_time_elapsed, expected_progress, pace_ratio) = match total_days {
        None => (0.0, progress, 1.0),
        Some(total) => {
            let percent: f64 = 100.0 * days_elapsed as f64 / total as f64;
            let pace: f64 = if days_elapsed == 0 {
                1.0
            } else {
                progress * total as f64 / (100.0 * days_elapsed as f64)
            };
            (percent, percent, pace)
        }
    };

    let risk_level: RiskLevel = if progress >= 100.0 || expected_progress <= 0.0 {
        RiskLevel::Low
    } else {
        RiskLevel::from_pace(pace_ratio)
    };

    let progress_gap: f64 = expected_progress - progress;
    let recommendation: Option<String> = recommend(risk_level, progress_gap, days_remaining);

    HealthMetrics {
        days_elapsed,
        total_days,
        days_remaining,
        percent_time_elapsed,
        progress,
        expected_progress,
        progress_gap,
        pace_ratio,
        is_on_pace: pace_ratio >= ON_PACE_THRESHOLD,
        risk_level,
        recommendation,
    }
}

fn recommend(
    risk_level: RiskLevel,
    progress_gap: f64,
    days_remaining: Option<i64>,
) -> Option<String> {
    if risk_level == RiskLevel::Low {
        return None;
    }

    let gap: f64 = progress_gap.max(0.0);
    let text: String = match days_remaining {
        Some(0) => format!("{gap:.0}% behind pace and past the due date"),
        Some(1) => format!("{gap:.0}% behind pace with 1 day remaining"),
        Some(days) if days <= URGENT_DAYS_REMAINING => {
            format!("{gap:.0}% behind pace with {days} days remaining")
        }
        _ => match risk_level {
            RiskLevel::Medium => format!("{gap:.0}% behind pace; review lagging key results"),
            RiskLevel::High => {
                format!("{gap:.0}% behind pace; re-plan remaining work or adjust targets")
            }
            RiskLevel::Low | RiskLevel::Critical => {
                format!("{gap:.0}% behind pace; escalate to unblock this objective")
            }
        },
    };
    Some(text)
}
