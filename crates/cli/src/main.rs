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

//! `okr` - inspect and drive objectives stored in a JSON fixture.
//!
//! Every command loads the fixture into an in-memory store. Mutating
//! commands only touch the file when `--write` is given.

mod fixture;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::eyre::{Context, Result, eyre};
use fixture::{Fixture, HistoryRecord, Loaded, ObjectiveRecord, parse_timestamp};
use okr_api::{InMemoryStore, ObjectiveStore, OkrService, TracingNotifier};
use okr_audit::ApprovalHistory;
use okr_domain::{
    HealthMetrics, HierarchyCandidate, Objective, ObjectiveIndex, ObjectiveLevel,
    ObjectiveStatus, compute_health, validate_hierarchy, validate_objective_fields,
};
use okr_engine::{
    ApprovalTransition, Command as EngineCommand, PermissionSet, TransitionResult,
    available_transitions,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

type Service = OkrService<InMemoryStore, TracingNotifier>;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // RUST_LOG wins over -v/-q
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    args.run()
}

/// Inspect and drive OKR objectives stored in a JSON fixture
#[derive(Debug, Parser)]
#[command(name = "okr", author, version, about, long_about = None)]
struct Args {
    /// Path to the fixture file
    #[arg(short, long)]
    fixture: PathBuf,

    /// Evaluation instant (RFC 3339). Defaults to the current time.
    #[arg(long)]
    now: Option<String>,

    /// Save changes back to the fixture file
    #[arg(long)]
    write: bool,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Show an objective with its derived status and health
    Show { objective_id: String },

    /// Compute the health metrics of an objective
    Health { objective_id: String },

    /// Check every objective's fields and hierarchy placement
    Validate,

    /// List the objectives that may serve as parent at a level
    Parents {
        #[arg(long)]
        level: ObjectiveLevel,
        /// The objective being placed, excluded with its descendants
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Show what a user may do with an objective
    Permissions {
        objective_id: String,
        #[arg(long)]
        actor: String,
    },

    /// Request an approval transition
    Transition {
        objective_id: String,
        action: ApprovalTransition,
        #[arg(long)]
        actor: String,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Report a new current value for a key result
    Report {
        objective_id: String,
        key_result_id: String,
        value: f64,
        #[arg(long)]
        actor: String,
    },

    /// Show the approval history of an objective
    History { objective_id: String },
}

#[derive(Debug, Serialize)]
struct ObjectiveView {
    #[serde(flatten)]
    record: ObjectiveRecord,
    status: ObjectiveStatus,
    progress: u8,
    health: HealthMetrics,
}

#[derive(Debug, Serialize)]
#[allow(clippy::struct_excessive_bools)]
struct PermissionView {
    is_owner: bool,
    is_admin: bool,
    is_contributor: bool,
    can_edit: bool,
    can_delete: bool,
    can_update_value: bool,
    can_manage_contributors: bool,
    available_transitions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct TransitionView {
    objective_id: String,
    from: String,
    to: String,
    status: ObjectiveStatus,
    history_id: String,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn now(&self) -> Result<OffsetDateTime> {
        self.now
            .as_deref()
            .map_or_else(|| Ok(OffsetDateTime::now_utc()), parse_timestamp)
    }

    #[allow(clippy::too_many_lines)]
    fn run(self) -> Result<()> {
        let now: OffsetDateTime = self.now()?;
        let text: String = std::fs::read_to_string(&self.fixture)
            .wrap_err_with(|| format!("cannot read {}", self.fixture.display()))?;
        let loaded: Loaded = Fixture::from_json(&text)?.load()?;
        info!(
            fixture = %self.fixture.display(),
            objectives = loaded.objectives.len(),
            "Loaded fixture"
        );

        let store: InMemoryStore =
            InMemoryStore::with_contents(loaded.objectives.clone(), loaded.history.clone())?;
        let mut service: Service = OkrService::new(store, TracingNotifier);

        let changed: bool = match self.command.clone() {
            Command::Show { objective_id } => {
                let objective: Objective = service.objective(&objective_id, now)?;
                print_json(&view(&objective, now)?)?;
                false
            }
            Command::Health { objective_id } => {
                print_json(&service.health(&objective_id, now)?)?;
                false
            }
            Command::Validate => {
                validate_all(&loaded.objectives)?;
                false
            }
            Command::Parents { level, exclude } => {
                let parents: Vec<Objective> =
                    service.available_parents(level, exclude.as_deref())?;
                let ids: Vec<&str> = parents.iter().map(|o| o.id.as_str()).collect();
                print_json(&ids)?;
                false
            }
            Command::Permissions {
                objective_id,
                actor,
            } => {
                let objective: Objective = service.objective(&objective_id, now)?;
                let permissions: PermissionSet =
                    PermissionSet::for_objective(loaded.user(&actor)?, &objective);
                print_json(&permission_view(&objective, &permissions))?;
                false
            }
            Command::Transition {
                objective_id,
                action,
                actor,
                comment,
            } => {
                let result: TransitionResult = service.transition(
                    &objective_id,
                    action,
                    loaded.user(&actor)?,
                    comment.as_deref(),
                    now,
                )?;
                print_json(&TransitionView {
                    objective_id,
                    from: result.previous_status.to_string(),
                    to: result.new_status.to_string(),
                    status: result.new_objective.status,
                    history_id: result.history_item.id().to_string(),
                })?;
                true
            }
            Command::Report {
                objective_id,
                key_result_id,
                value,
                actor,
            } => {
                let objective: Objective = service.execute(
                    &objective_id,
                    EngineCommand::ReportProgress {
                        key_result_id,
                        current_value: value,
                    },
                    loaded.user(&actor)?,
                    now,
                )?;
                print_json(&view(&objective, now)?)?;
                true
            }
            Command::History { objective_id } => {
                let history: ApprovalHistory = service.history(&objective_id)?;
                let records: Vec<HistoryRecord> = history
                    .items()
                    .iter()
                    .map(HistoryRecord::from_item)
                    .collect::<Result<_>>()?;
                print_json(&records)?;
                false
            }
        };

        if changed && self.write {
            save(&self.fixture, &loaded, &service)?;
        }
        Ok(())
    }
}

/// Renders an objective with its derived fields brought up to `now`.
fn view(objective: &Objective, now: OffsetDateTime) -> Result<ObjectiveView> {
    let mut current: Objective = objective.clone();
    current.refresh_derived(now);

    Ok(ObjectiveView {
        record: ObjectiveRecord::from_objective(&current)?,
        status: current.status,
        progress: current.progress,
        health: compute_health(&current, now),
    })
}

fn permission_view(objective: &Objective, permissions: &PermissionSet) -> PermissionView {
    PermissionView {
        is_owner: permissions.is_owner,
        is_admin: permissions.is_admin,
        is_contributor: permissions.is_contributor,
        can_edit: permissions.can_edit,
        can_delete: permissions.can_delete,
        can_update_value: permissions.can_update_value,
        can_manage_contributors: permissions.can_manage_contributors,
        available_transitions: available_transitions(objective, permissions)
            .iter()
            .map(ApprovalTransition::as_str)
            .collect(),
    }
}

fn validate_all(objectives: &[Objective]) -> Result<()> {
    let index: ObjectiveIndex = ObjectiveIndex::from_objectives(objectives);
    let mut failures: usize = 0;

    for objective in objectives {
        let outcome = validate_objective_fields(objective)
            .and_then(|_| validate_hierarchy(&HierarchyCandidate::of(objective), &index));
        match outcome {
            Ok(()) => println!("ok    {}", objective.id),
            Err(err) => {
                failures += 1;
                println!("FAIL  {}: {err}", objective.id);
            }
        }
    }

    if failures > 0 {
        return Err(eyre!("{failures} objective(s) failed validation"));
    }
    Ok(())
}

fn save(path: &Path, loaded: &Loaded, service: &Service) -> Result<()> {
    let updated: Loaded = Loaded {
        users: loaded.users.clone(),
        objectives: service.store().list()?,
        history: service.store().all_history().cloned().collect(),
    };
    let text: String = serde_json::to_string_pretty(&Fixture::store(&updated)?)?;
    std::fs::write(path, text + "\n")
        .wrap_err_with(|| format!("cannot write {}", path.display()))?;
    info!(fixture = %path.display(), "Saved fixture");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use okr_domain::ApprovalStatus;
    use time::macros::datetime;

    const SAMPLE: &str = include_str!("../fixtures/q1-2026.json");
    const MID_QUARTER: &str = "2026-02-15T12:00:00Z";

    fn sample() -> Loaded {
        Fixture::from_json(SAMPLE).unwrap().load().unwrap()
    }

    fn fixture_path() -> String {
        format!("{}/fixtures/q1-2026.json", env!("CARGO_MANIFEST_DIR"))
    }

    fn parse(command: &[&str]) -> Args {
        let path: String = fixture_path();
        let mut argv: Vec<&str> = vec!["okr", "--fixture", path.as_str(), "--now", MID_QUARTER];
        argv.extend_from_slice(command);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_transition_arguments() {
        let args: Args = parse(&[
            "transition",
            "team-growth",
            "reject",
            "--actor",
            "morgan",
            "--comment",
            "Scope too wide",
        ]);

        assert!(!args.write);
        match args.command {
            Command::Transition {
                objective_id,
                action,
                actor,
                comment,
            } => {
                assert_eq!(objective_id, "team-growth");
                assert_eq!(action, ApprovalTransition::Reject);
                assert_eq!(actor, "morgan");
                assert_eq!(comment.as_deref(), Some("Scope too wide"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_transition() {
        let path: String = fixture_path();
        let result = Args::try_parse_from([
            "okr",
            "--fixture",
            path.as_str(),
            "transition",
            "team-growth",
            "close",
            "--actor",
            "morgan",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_now_comes_from_argument() {
        let args: Args = parse(&["validate"]);

        assert_eq!(args.now().unwrap(), datetime!(2026-02-15 12:00 UTC));
    }

    #[test]
    fn test_sample_validates() {
        assert!(validate_all(&sample().objectives).is_ok());
    }

    #[test]
    fn test_misplaced_objective_fails_validation() {
        let mut objectives: Vec<Objective> = sample().objectives;
        let person: &mut Objective = objectives
            .iter_mut()
            .find(|o| o.id == "person-jamie")
            .unwrap();
        person.parent_objective_id = Some("company-2026".to_string());

        assert!(validate_all(&objectives).is_err());
    }

    #[test]
    fn test_view_carries_derived_fields() {
        let loaded: Loaded = sample();
        let team: &Objective = loaded
            .objectives
            .iter()
            .find(|o| o.id == "team-growth")
            .unwrap();

        let view: ObjectiveView = view(team, datetime!(2026-02-15 12:00 UTC)).unwrap();

        assert_eq!(view.record.id, "team-growth");
        assert_eq!(view.record.level, ObjectiveLevel::Team);
        // (25 + 0) / 2
        assert_eq!(view.progress, 13);
        assert!(view.health.progress > 12.0);
    }

    #[test]
    fn test_contributor_permission_view() {
        let loaded: Loaded = sample();
        let team: &Objective = loaded
            .objectives
            .iter()
            .find(|o| o.id == "team-growth")
            .unwrap();
        let permissions: PermissionSet =
            PermissionSet::for_objective(loaded.user("casey").unwrap(), team);

        let view: PermissionView = permission_view(team, &permissions);

        assert!(view.is_contributor);
        assert!(view.can_update_value);
        assert!(!view.can_delete);
        assert!(!view.can_manage_contributors);
        assert!(!view.available_transitions.contains(&"pause"));
    }

    #[test]
    fn test_read_only_commands_run() {
        let commands: [&[&str]; 5] = [
            &["show", "team-growth"],
            &["health", "company-2026"],
            &["parents", "--level", "team"],
            &["permissions", "team-growth", "--actor", "morgan"],
            &["history", "team-growth"],
        ];
        for command in commands {
            assert!(parse(command).run().is_ok(), "okr {command:?} failed");
        }
    }

    #[test]
    fn test_transition_without_write_leaves_fixture_alone() {
        let before: String = std::fs::read_to_string(fixture_path()).unwrap();

        parse(&["transition", "person-jamie", "submit_for_review", "--actor", "jamie"])
            .run()
            .unwrap();

        let after: String = std::fs::read_to_string(fixture_path()).unwrap();
        assert_eq!(before, after);
        let jamie: Objective = Fixture::from_json(&after)
            .unwrap()
            .load()
            .unwrap()
            .objectives
            .into_iter()
            .find(|o| o.id == "person-jamie")
            .unwrap();
        assert_eq!(jamie.approval_status, ApprovalStatus::Draft);
    }

    #[test]
    fn test_stranger_cannot_report_progress() {
        let result = parse(&[
            "report",
            "team-growth",
            "kr-signups",
            "80",
            "--actor",
            "jamie",
        ])
        .run();

        assert!(result.is_err());
    }
}
