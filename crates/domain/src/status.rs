// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coarse status label derivation.

use crate::health::{RiskLevel, compute_health};
use crate::types::{ApprovalStatus, Objective, ObjectiveStatus};
use time::OffsetDateTime;

/// Derives the coarse status label of an objective.
///
/// - `draft` while the objective has not left the draft state
/// - `completed` once progress reaches 100
/// - otherwise by risk: low is on track, medium and high are at risk,
///   critical is off track
#[must_use]
pub const fn derive_status(
    approval_status: ApprovalStatus,
    progress: u8,
    risk_level: RiskLevel,
) -> ObjectiveStatus {
    if matches!(approval_status, ApprovalStatus::Draft) {
        return ObjectiveStatus::Draft;
    }
    if progress >= 100 {
        return ObjectiveStatus::Completed;
    }
    match risk_level {
        RiskLevel::Low => ObjectiveStatus::OnTrack,
        RiskLevel::Medium | RiskLevel::High => ObjectiveStatus::AtRisk,
        RiskLevel::Critical => ObjectiveStatus::OffTrack,
    }
}

impl Objective {
    /// Recomputes the derived `progress` and `status` fields.
    pub fn refresh_derived(&mut self, now: OffsetDateTime) {
        self.progress = self.computed_progress();
        let risk_level: RiskLevel = compute_health(self, now).risk_level;
        self.status = derive_status(self.approval_status, self.progress, risk_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_wins() {
        assert_eq!(
            derive_status(ApprovalStatus::Draft, 100, RiskLevel::Critical),
            ObjectiveStatus::Draft
        );
    }

    #[test]
    fn test_completed_at_full_progress() {
        assert_eq!(
            derive_status(ApprovalStatus::Active, 100, RiskLevel::Low),
            ObjectiveStatus::Completed
        );
    }

    #[test]
    fn test_risk_mapping() {
        let cases: [(RiskLevel, ObjectiveStatus); 4] = [
            (RiskLevel::Low, ObjectiveStatus::OnTrack),
            (RiskLevel::Medium, ObjectiveStatus::AtRisk),
            (RiskLevel::High, ObjectiveStatus::AtRisk),
            (RiskLevel::Critical, ObjectiveStatus::OffTrack),
        ];
        for (risk, expected) in cases {
            assert_eq!(derive_status(ApprovalStatus::Active, 40, risk), expected);
        }
    }
}
