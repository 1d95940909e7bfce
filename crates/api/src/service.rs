// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::events::{Notifier, ObjectiveEvent};
use crate::store::ObjectiveStore;
use okr_audit::ApprovalHistory;
use okr_domain::{
    HealthMetrics, Objective, ObjectiveIndex, ObjectiveLevel, User, available_parents,
    compute_health,
};
use okr_engine::{
    ApprovalTransition, Command, CommandResult, NewObjective, PermissionSet, TransitionResult,
    apply, authorize_delete, create_objective, request_transition,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Runs engine operations against a store and announces the results.
///
/// Every mutating call reads the current objective, resolves the actor's
/// permissions from it, runs the pure engine operation and commits the
/// result conditioned on the state that was read. A concurrent write in
/// between surfaces as [`ApiError::Conflict`]; the caller retries with
/// fresh state.
#[derive(Debug)]
pub struct OkrService<S, N> {
    store: S,
    notifier: N,
}

impl<S: ObjectiveStore, N: Notifier> OkrService<S, N> {
    /// Creates a new service.
    #[must_use]
    pub const fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the service, returning the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads an objective with its derived fields brought up to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist.
    pub fn objective(
        &self,
        objective_id: &str,
        now: OffsetDateTime,
    ) -> Result<Objective, ApiError> {
        let mut objective: Objective = self.store.get(objective_id)?;
        objective.refresh_derived(now);
        Ok(objective)
    }

    /// Loads every objective with derived fields brought up to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn objectives(&self, now: OffsetDateTime) -> Result<Vec<Objective>, ApiError> {
        let mut objectives: Vec<Objective> = self.store.list()?;
        for objective in &mut objectives {
            objective.refresh_derived(now);
        }
        Ok(objectives)
    }

    /// Computes the health of an objective at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist.
    pub fn health(
        &self,
        objective_id: &str,
        now: OffsetDateTime,
    ) -> Result<HealthMetrics, ApiError> {
        let objective: Objective = self.store.get(objective_id)?;
        let health: HealthMetrics = compute_health(&objective, now);
        debug!(
            objective_id,
            risk = %health.risk_level,
            pace = health.pace_ratio,
            "Computed health"
        );
        Ok(health)
    }

    /// Resolves what `actor` may do with an objective.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist.
    pub fn permissions(&self, objective_id: &str, actor: &User) -> Result<PermissionSet, ApiError> {
        let objective: Objective = self.store.get(objective_id)?;
        Ok(PermissionSet::for_objective(actor, &objective))
    }

    /// Lists the objectives that may serve as parent at `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn available_parents(
        &self,
        level: ObjectiveLevel,
        exclude_id: Option<&str>,
    ) -> Result<Vec<Objective>, ApiError> {
        let objectives: Vec<Objective> = self.store.list()?;
        Ok(available_parents(level, exclude_id, &objectives)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Loads the approval history of an objective.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn history(&self, objective_id: &str) -> Result<ApprovalHistory, ApiError> {
        Ok(self.store.history(objective_id)?)
    }

    /// Creates and stores a new draft objective.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the objective or the store
    /// refuses it.
    pub fn create(
        &mut self,
        new: NewObjective,
        actor: &User,
        now: OffsetDateTime,
    ) -> Result<Objective, ApiError> {
        let index: ObjectiveIndex = self.index()?;
        let objective: Objective = create_objective(new, actor, &index, now)
            .map_err(|err| rejected("create", None, actor, err.into()))?;

        self.store.insert(objective.clone())?;
        info!(
            objective_id = %objective.id,
            level = %objective.level,
            actor_id = %actor.id,
            "Objective created"
        );
        self.notifier.notify(&ObjectiveEvent::Created {
            objective_id: objective.id.clone(),
            actor_id: actor.id.clone(),
        });
        Ok(objective)
    }

    /// Requests an approval transition and commits it with its history item.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist, the engine
    /// rejects the transition, or the objective changed since it was read.
    pub fn transition(
        &mut self,
        objective_id: &str,
        transition: ApprovalTransition,
        actor: &User,
        comment: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<TransitionResult, ApiError> {
        let objective: Objective = self.store.get(objective_id)?;
        let permissions: PermissionSet = PermissionSet::for_objective(actor, &objective);

        let result: TransitionResult =
            request_transition(&objective, transition, actor, &permissions, comment, now).map_err(
                |err| rejected(transition.as_str(), Some(objective_id), actor, err.into()),
            )?;

        self.store
            .commit(
                &result.precondition(),
                result.new_objective.clone(),
                Some(result.history_item.clone()),
            )
            .map_err(|err| rejected(transition.as_str(), Some(objective_id), actor, err.into()))?;

        info!(
            objective_id,
            transition = transition.as_str(),
            from = %result.previous_status,
            to = %result.new_status,
            actor_id = %actor.id,
            "Transition committed"
        );
        self.notifier
            .notify(&ObjectiveEvent::from_history(&result.history_item));
        Ok(result)
    }

    /// Applies a command and commits the updated objective.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist, the engine
    /// rejects the command, or the objective changed since it was read.
    pub fn execute(
        &mut self,
        objective_id: &str,
        command: Command,
        actor: &User,
        now: OffsetDateTime,
    ) -> Result<Objective, ApiError> {
        let action: &'static str = command.name();
        let reported_key_result: Option<String> = match &command {
            Command::ReportProgress { key_result_id, .. } => Some(key_result_id.clone()),
            _ => None,
        };

        let objective: Objective = self.store.get(objective_id)?;
        let permissions: PermissionSet = PermissionSet::for_objective(actor, &objective);
        let index: ObjectiveIndex = self.index()?;

        let CommandResult {
            new_objective,
            precondition,
        } = apply(&objective, command, &permissions, &index, now)
            .map_err(|err| rejected(action, Some(objective_id), actor, err.into()))?;

        self.store
            .commit(&precondition, new_objective.clone(), None)
            .map_err(|err| rejected(action, Some(objective_id), actor, err.into()))?;

        info!(objective_id, action, actor_id = %actor.id, "Command committed");
        if let Some(key_result_id) = reported_key_result {
            self.notifier.notify(&ObjectiveEvent::ProgressReported {
                objective_id: objective_id.to_string(),
                actor_id: actor.id.clone(),
                key_result_id,
                progress: new_objective.progress,
            });
        }
        Ok(new_objective)
    }

    /// Deletes an objective. Its approval history is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective does not exist, deletion is not
    /// allowed, or the objective changed since it was read.
    pub fn delete(&mut self, objective_id: &str, actor: &User) -> Result<Objective, ApiError> {
        let objective: Objective = self.store.get(objective_id)?;
        let permissions: PermissionSet = PermissionSet::for_objective(actor, &objective);
        let index: ObjectiveIndex = self.index()?;

        authorize_delete(&objective, &permissions, &index)
            .map_err(|err| rejected("delete", Some(objective_id), actor, err.into()))?;
        let removed: Objective = self
            .store
            .remove(objective_id, objective.approval_status)
            .map_err(|err| rejected("delete", Some(objective_id), actor, err.into()))?;

        info!(objective_id, actor_id = %actor.id, "Objective deleted");
        self.notifier.notify(&ObjectiveEvent::Deleted {
            objective_id: objective_id.to_string(),
            actor_id: actor.id.clone(),
        });
        Ok(removed)
    }

    fn index(&self) -> Result<ObjectiveIndex, ApiError> {
        let objectives: Vec<Objective> = self.store.list()?;
        debug!(objectives = objectives.len(), "Built objective index");
        Ok(ObjectiveIndex::from_objectives(&objectives))
    }
}

fn rejected(action: &str, objective_id: Option<&str>, actor: &User, err: ApiError) -> ApiError {
    warn!(
        action,
        objective_id = objective_id.unwrap_or("-"),
        actor_id = %actor.id,
        error = %err,
        "Request rejected"
    );
    err
}
