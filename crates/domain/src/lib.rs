// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod health;
mod hierarchy;
mod ids;
mod progress;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use health::{
    HealthInputs, HealthMetrics, ON_PACE_THRESHOLD, RiskLevel, URGENT_DAYS_REMAINING,
    compute_health, compute_health_from,
};
pub use hierarchy::{
    HierarchyCandidate, IndexEntry, ObjectiveIndex, available_parents, validate_hierarchy,
};
pub use ids::generate_id;
pub use progress::{key_result_progress, objective_progress};
pub use status::derive_status;
pub use types::{
    ApprovalStatus, Contributor, ContributorRole, KeyResult, MetricType, Objective,
    ObjectiveLevel, ObjectiveStatus, User, UserRole,
};
pub use validation::{
    validate_key_result, validate_key_result_value, validate_objective_fields, validate_period,
    validate_title,
};
