// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, HierarchyCandidate, Objective, ObjectiveIndex, ObjectiveLevel,
    available_parents, validate_hierarchy,
};
use time::macros::datetime;

fn objective(id: &str, level: ObjectiveLevel, parent: Option<&str>) -> Objective {
    let base: Objective = Objective::new(
        id,
        id,
        "owner-1",
        level,
        "Q1 2026",
        datetime!(2026-01-01 00:00 UTC),
    );
    match parent {
        Some(parent_id) => base.with_parent(parent_id),
        None => base,
    }
}

/// company-a ─┬─ team-a ── person-a
///            └─ team-b
/// company-b
fn create_test_tree() -> Vec<Objective> {
    vec![
        objective("company-a", ObjectiveLevel::Company, None),
        objective("company-b", ObjectiveLevel::Company, None),
        objective("team-a", ObjectiveLevel::Team, Some("company-a")),
        objective("team-b", ObjectiveLevel::Team, Some("company-a")),
        objective("person-a", ObjectiveLevel::Individual, Some("team-a")),
    ]
}

fn create_test_index() -> ObjectiveIndex {
    ObjectiveIndex::from_objectives(&create_test_tree())
}

#[test]
fn test_company_without_parent_is_valid() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Company, None);

    assert_eq!(validate_hierarchy(&candidate, &index), Ok(()));
}

#[test]
fn test_company_with_parent_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Company, Some("company-a"));

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::ParentForbidden { .. })
    ));
}

#[test]
fn test_team_under_company_is_valid() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, Some("company-b"));

    assert_eq!(validate_hierarchy(&candidate, &index), Ok(()));
}

#[test]
fn test_team_under_individual_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, Some("person-a"));

    let err: DomainError = validate_hierarchy(&candidate, &index).unwrap_err();
    assert_eq!(
        err,
        DomainError::ParentLevelMismatch {
            level: ObjectiveLevel::Team,
            required_parent_level: ObjectiveLevel::Company,
        }
    );
    assert_eq!(err.to_string(), "team requires a company-level parent");
}

#[test]
fn test_team_without_parent_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, None);

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::ParentLevelMismatch { .. })
    ));
}

#[test]
fn test_team_with_unknown_parent_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, Some("ghost"));

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::ParentLevelMismatch { .. })
    ));
}

#[test]
fn test_individual_under_company_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate =
        HierarchyCandidate::new("new", ObjectiveLevel::Individual, Some("company-a"));

    let err: DomainError = validate_hierarchy(&candidate, &index).unwrap_err();
    assert_eq!(err.to_string(), "individual requires a team-level parent");
}

#[test]
fn test_individual_under_team_is_valid() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Individual, Some("team-b"));

    assert_eq!(validate_hierarchy(&candidate, &index), Ok(()));
}

#[test]
fn test_self_reference_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("team-a", ObjectiveLevel::Team, Some("team-a"));

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::SelfReference { .. })
    ));
}

#[test]
fn test_malformed_index_cycle_is_detected() {
    // Externally corrupted data: two team objectives pointing at each other
    // through a company entry that itself has a parent.
    let mut index: ObjectiveIndex = ObjectiveIndex::new();
    index.insert("company-x", ObjectiveLevel::Company, Some("team-x"));
    index.insert("team-x", ObjectiveLevel::Team, Some("company-x"));

    let candidate = HierarchyCandidate::new("team-x", ObjectiveLevel::Team, Some("company-x"));

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::CycleDetected { .. })
    ));
}

#[test]
fn test_malformed_index_loop_elsewhere_terminates() {
    let mut index: ObjectiveIndex = ObjectiveIndex::new();
    index.insert("company-x", ObjectiveLevel::Company, Some("company-y"));
    index.insert("company-y", ObjectiveLevel::Company, Some("company-x"));

    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, Some("company-x"));

    assert!(matches!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::CycleDetected { .. })
    ));
}

#[test]
fn test_malformed_deep_chain_is_rejected() {
    let mut index: ObjectiveIndex = ObjectiveIndex::new();
    index.insert("root", ObjectiveLevel::Company, None);
    index.insert("company-x", ObjectiveLevel::Company, Some("root"));

    let candidate = HierarchyCandidate::new("new", ObjectiveLevel::Team, Some("company-x"));

    assert_eq!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::HierarchyTooDeep {
            objective_id: String::from("new"),
            depth: 2,
        })
    );
}

#[test]
fn test_relevel_with_children_is_rejected() {
    let index: ObjectiveIndex = create_test_index();
    // team-a has person-a below it; turning it into an individual objective
    // would leave person-a under an individual.
    let candidate =
        HierarchyCandidate::new("team-a", ObjectiveLevel::Individual, Some("team-b"));

    assert_eq!(
        validate_hierarchy(&candidate, &index),
        Err(DomainError::ChildLevelMismatch {
            objective_id: String::from("team-a"),
            child_id: String::from("person-a"),
            level: ObjectiveLevel::Individual,
        })
    );
}

#[test]
fn test_reparent_team_keeps_children_valid() {
    let index: ObjectiveIndex = create_test_index();
    let candidate = HierarchyCandidate::new("team-a", ObjectiveLevel::Team, Some("company-b"));

    assert_eq!(validate_hierarchy(&candidate, &index), Ok(()));
}

#[test]
fn test_ancestors_nearest_first() {
    let index: ObjectiveIndex = create_test_index();

    assert_eq!(
        index.ancestors("person-a").unwrap(),
        vec![String::from("team-a"), String::from("company-a")]
    );
    assert!(index.ancestors("company-a").unwrap().is_empty());
    assert_eq!(index.children_of("company-a"), vec!["team-a", "team-b"]);
}

#[test]
fn test_available_parents_for_team_are_companies() {
    let tree: Vec<Objective> = create_test_tree();
    let ids: Vec<&str> = available_parents(ObjectiveLevel::Team, None, &tree)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();

    assert_eq!(ids, vec!["company-a", "company-b"]);
}

#[test]
fn test_available_parents_for_individual_are_teams() {
    let tree: Vec<Objective> = create_test_tree();
    let ids: Vec<&str> = available_parents(ObjectiveLevel::Individual, Some("person-a"), &tree)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();

    assert_eq!(ids, vec!["team-a", "team-b"]);
}

#[test]
fn test_available_parents_for_company_is_empty() {
    let tree: Vec<Objective> = create_test_tree();

    assert!(available_parents(ObjectiveLevel::Company, None, &tree).is_empty());
}

#[test]
fn test_available_parents_exclude_self_and_descendants() {
    let tree: Vec<Objective> = create_test_tree();
    // A company objective re-levelled to team must not land under itself,
    // and teams already below company-a are its descendants.
    let ids: Vec<&str> = available_parents(ObjectiveLevel::Individual, Some("company-a"), &tree)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();
    assert!(ids.is_empty());

    let ids: Vec<&str> = available_parents(ObjectiveLevel::Team, Some("company-a"), &tree)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, vec!["company-b"]);
}
