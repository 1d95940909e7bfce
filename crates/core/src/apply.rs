// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, NewObjective, ObjectiveChanges};
use crate::error::CoreError;
use crate::permissions::{PermissionSet, RequiredCapability};
use crate::state::{CommandResult, WritePrecondition};
use okr_domain::{
    ApprovalStatus, Contributor, ContributorRole, DomainError, HierarchyCandidate, KeyResult,
    Objective, ObjectiveIndex, User, generate_id, validate_hierarchy, validate_key_result,
    validate_key_result_value, validate_objective_fields,
};
use time::OffsetDateTime;

/// Creates a new draft objective.
///
/// The owner defaults to `actor`. Only admins may create objectives on
/// behalf of someone else.
///
/// # Arguments
///
/// * `new` - The requested objective
/// * `actor` - The user creating it
/// * `index` - Snapshot of all existing objectives
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - A non-admin names another user as owner
/// - The title, period or any key result is invalid
/// - The level/parent placement is invalid
pub fn create_objective(
    new: NewObjective,
    actor: &User,
    index: &ObjectiveIndex,
    now: OffsetDateTime,
) -> Result<Objective, CoreError> {
    let owner_id: String = new.owner_id.unwrap_or_else(|| actor.id.clone());
    if owner_id != actor.id && !actor.is_admin() {
        return Err(CoreError::PermissionDenied {
            action: String::from("create_objective_for_other_owner"),
            required: RequiredCapability::Admin,
        });
    }

    let id: String = generate_id("obj", now);
    let mut objective: Objective =
        Objective::new(&id, &new.title, &owner_id, new.level, &new.period, now)
            .with_description(&new.description);
    objective.due_date = new.due_date;
    objective.parent_objective_id = new.parent_objective_id;
    for mut key_result in new.key_results {
        if key_result.id.trim().is_empty() {
            key_result.id = generate_id("kr", now);
        }
        objective = objective.with_key_result(key_result);
    }

    let mut objective: Objective = validate_objective_fields(&objective)?;
    validate_hierarchy(&HierarchyCandidate::of(&objective), index)?;
    objective.refresh_derived(now);
    Ok(objective)
}

/// Applies a command to an objective, producing the updated objective.
///
/// The input objective is not modified. The returned precondition names
/// the stored values the write must still find.
///
/// # Arguments
///
/// * `objective` - The objective as last read from the store
/// * `command` - The command to apply
/// * `permissions` - The actor's resolved permissions on `objective`
/// * `index` - Snapshot of all objectives, used when the placement changes
/// * `now` - The instant of the change
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks the capability the command requires
/// - The approval status does not allow the command
/// - The command violates a domain rule
pub fn apply(
    objective: &Objective,
    command: Command,
    permissions: &PermissionSet,
    index: &ObjectiveIndex,
    now: OffsetDateTime,
) -> Result<CommandResult, CoreError> {
    let action: &'static str = command.name();
    let mut precondition: WritePrecondition = WritePrecondition {
        objective_id: objective.id.clone(),
        approval_status: objective.approval_status,
        key_result_value: None,
    };

    let mut new_objective: Objective = match command {
        Command::UpdateDetails(changes) => {
            require_draft(objective, permissions, action)?;
            update_details(objective, changes, index)?
        }
        Command::AddKeyResult { key_result } => {
            require_draft(objective, permissions, action)?;
            add_key_result(objective, key_result, now)?
        }
        Command::UpdateKeyResult { key_result } => {
            require_draft(objective, permissions, action)?;
            update_key_result(objective, key_result)?
        }
        Command::RemoveKeyResult { key_result_id } => {
            require_draft(objective, permissions, action)?;
            let mut updated: Objective = objective.clone();
            let position: usize = key_result_position(objective, &key_result_id)?;
            updated.key_results.remove(position);
            updated
        }
        Command::ReportProgress {
            key_result_id,
            current_value,
        } => {
            require(permissions, RequiredCapability::Participant, action)?;
            require_status(objective, ApprovalStatus::accepts_progress)?;
            let mut updated: Objective = objective.clone();
            let position: usize = key_result_position(objective, &key_result_id)?;
            let key_result: &mut KeyResult = &mut updated.key_results[position];
            let prior: f64 = key_result.current_value;
            key_result.current_value = validate_key_result_value(key_result, current_value)?;
            precondition.key_result_value = Some((key_result_id, prior));
            updated
        }
        Command::AddContributor { user_id, role } => {
            require(permissions, RequiredCapability::OwnerOrAdmin, action)?;
            add_contributor(objective, &user_id, role, now)?
        }
        Command::RemoveContributor { user_id } => {
            require(permissions, RequiredCapability::OwnerOrAdmin, action)?;
            let Some(position) = objective
                .contributors
                .iter()
                .position(|c| c.user_id == user_id)
            else {
                return Err(CoreError::DomainViolation(
                    DomainError::ContributorNotFound {
                        objective_id: objective.id.clone(),
                        user_id,
                    },
                ));
            };
            let mut updated: Objective = objective.clone();
            updated.contributors.remove(position);
            updated
        }
    };

    new_objective.refresh_derived(now);
    Ok(CommandResult {
        new_objective,
        precondition,
    })
}

/// Checks that the objective may be deleted.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither owner nor admin
/// - The objective is not in `draft` or `archived`
/// - Other objectives still name it as parent
pub fn authorize_delete(
    objective: &Objective,
    permissions: &PermissionSet,
    index: &ObjectiveIndex,
) -> Result<(), CoreError> {
    require(permissions, RequiredCapability::OwnerOrAdmin, "delete")?;
    require_status(objective, ApprovalStatus::is_deletable)?;

    let children: usize = index.children_of(&objective.id).len();
    if children > 0 {
        return Err(CoreError::DomainViolation(
            DomainError::ObjectiveHasChildren {
                objective_id: objective.id.clone(),
                children,
            },
        ));
    }
    Ok(())
}

fn require(
    permissions: &PermissionSet,
    required: RequiredCapability,
    action: &str,
) -> Result<(), CoreError> {
    if permissions.satisfies(required) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied {
            action: action.to_string(),
            required,
        })
    }
}

fn require_status(
    objective: &Objective,
    allowed: fn(&ApprovalStatus) -> bool,
) -> Result<(), CoreError> {
    if allowed(&objective.approval_status) {
        Ok(())
    } else {
        Err(CoreError::ObjectiveLocked {
            objective_id: objective.id.clone(),
            status: objective.approval_status,
        })
    }
}

fn require_draft(
    objective: &Objective,
    permissions: &PermissionSet,
    action: &str,
) -> Result<(), CoreError> {
    require(permissions, RequiredCapability::Participant, action)?;
    require_status(objective, ApprovalStatus::is_editable)
}

fn key_result_position(objective: &Objective, key_result_id: &str) -> Result<usize, CoreError> {
    objective
        .key_results
        .iter()
        .position(|kr| kr.id == key_result_id)
        .ok_or_else(|| {
            CoreError::DomainViolation(DomainError::KeyResultNotFound {
                objective_id: objective.id.clone(),
                key_result_id: key_result_id.to_string(),
            })
        })
}

fn update_details(
    objective: &Objective,
    changes: ObjectiveChanges,
    index: &ObjectiveIndex,
) -> Result<Objective, CoreError> {
    let touches_hierarchy: bool = changes.touches_hierarchy();
    let mut updated: Objective = objective.clone();

    if let Some(title) = changes.title {
        updated.title = title;
    }
    if let Some(description) = changes.description {
        updated.description = description;
    }
    if let Some(level) = changes.level {
        updated.level = level;
    }
    if let Some(period) = changes.period {
        updated.period = period;
    }
    if let Some(due_date) = changes.due_date {
        updated.due_date = due_date;
    }
    if let Some(parent_objective_id) = changes.parent_objective_id {
        updated.parent_objective_id = parent_objective_id;
    }
    if let Some(owner_id) = changes.owner_id {
        if updated.has_contributor(&owner_id) {
            return Err(CoreError::DomainViolation(
                DomainError::OwnerCannotContribute { user_id: owner_id },
            ));
        }
        updated.owner_id = owner_id;
    }

    let updated: Objective = validate_objective_fields(&updated)?;
    if touches_hierarchy {
        validate_hierarchy(&HierarchyCandidate::of(&updated), index)?;
    }
    Ok(updated)
}

fn add_key_result(
    objective: &Objective,
    mut key_result: KeyResult,
    now: OffsetDateTime,
) -> Result<Objective, CoreError> {
    if key_result.id.trim().is_empty() {
        key_result.id = generate_id("kr", now);
    }
    if objective.key_result(&key_result.id).is_some() {
        return Err(CoreError::DomainViolation(DomainError::InvalidKeyResult {
            key_result_id: key_result.id,
            reason: String::from("duplicate key result id"),
        }));
    }
    key_result.objective_id.clone_from(&objective.id);
    let normalized: KeyResult = validate_key_result(&key_result)?;

    let mut updated: Objective = objective.clone();
    updated.key_results.push(normalized);
    Ok(updated)
}

fn update_key_result(
    objective: &Objective,
    mut key_result: KeyResult,
) -> Result<Objective, CoreError> {
    let position: usize = key_result_position(objective, &key_result.id)?;
    key_result.objective_id.clone_from(&objective.id);
    let normalized: KeyResult = validate_key_result(&key_result)?;

    let mut updated: Objective = objective.clone();
    updated.key_results[position] = normalized;
    Ok(updated)
}

fn add_contributor(
    objective: &Objective,
    user_id: &str,
    role: ContributorRole,
    now: OffsetDateTime,
) -> Result<Objective, CoreError> {
    if user_id == objective.owner_id {
        return Err(CoreError::DomainViolation(
            DomainError::OwnerCannotContribute {
                user_id: user_id.to_string(),
            },
        ));
    }
    if objective.has_contributor(user_id) {
        return Err(CoreError::DomainViolation(
            DomainError::DuplicateContributor {
                objective_id: objective.id.clone(),
                user_id: user_id.to_string(),
            },
        ));
    }

    let contributor: Contributor = Contributor::new(
        &generate_id("contrib", now),
        &objective.id,
        user_id,
        role,
        now,
    );
    Ok(objective.clone().with_contributor(contributor))
}
