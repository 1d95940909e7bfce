// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{InMemoryStore, Notifier, ObjectiveEvent, OkrService};
use okr_domain::{
    ApprovalStatus, KeyResult, MetricType, Objective, ObjectiveLevel, User, UserRole,
};
use std::cell::RefCell;
use std::rc::Rc;
use time::OffsetDateTime;
use time::macros::{date, datetime};

/// Collects every event it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Rc<RefCell<Vec<ObjectiveEvent>>>,
}

impl RecordingNotifier {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(ObjectiveEvent::name).collect()
    }

    pub fn events(&self) -> Vec<ObjectiveEvent> {
        self.events.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &ObjectiveEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

pub fn owner() -> User {
    User::new("owner-1", UserRole::Member)
}

pub fn admin() -> User {
    User::new("admin-1", UserRole::Admin)
}

pub fn stranger() -> User {
    User::new("stranger-1", UserRole::Member)
}

pub fn created_at() -> OffsetDateTime {
    datetime!(2026-01-01 09:00 UTC)
}

pub fn mid_quarter() -> OffsetDateTime {
    datetime!(2026-02-15 12:00 UTC)
}

pub fn company_objective() -> Objective {
    Objective::new(
        "company-1",
        "Grow revenue",
        "admin-1",
        ObjectiveLevel::Company,
        "2026",
        created_at(),
    )
    .with_approval_status(ApprovalStatus::Active)
}

pub fn team_objective(status: ApprovalStatus) -> Objective {
    Objective::new(
        "team-1",
        "Launch self-serve checkout",
        "owner-1",
        ObjectiveLevel::Team,
        "Q1 2026",
        created_at(),
    )
    .with_parent("company-1")
    .with_due_date(date!(2026 - 03 - 31))
    .with_approval_status(status)
    .with_key_result(KeyResult::new(
        "kr-1",
        "team-1",
        "Checkout conversions",
        MetricType::Number,
        0.0,
        200.0,
    ))
}

pub fn create_test_service(
    team_status: ApprovalStatus,
) -> (OkrService<InMemoryStore, RecordingNotifier>, RecordingNotifier) {
    let store: InMemoryStore =
        InMemoryStore::with_contents([company_objective(), team_objective(team_status)], [])
            .unwrap();
    let notifier: RecordingNotifier = RecordingNotifier::default();
    (OkrService::new(store, notifier.clone()), notifier)
}
