//! Integration tests for the preference-data pipeline.
//!
//! These tests drive the stage handlers end to end over real JSON documents
//! in a temporary directory, with the mock oracle standing in for the model:
//! 1. Generation covers every pair when the pair space is small
//! 2. Scoring isolates failures and keeps work-set order
//! 3. Mirroring produces a symmetric set exactly once

use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use action_prioritizer::adapters::{JsonDatasetStore, MockScoringOracle};
use action_prioritizer::application::{
    ConcurrentScorer, GenerateCombinationsCommand, GenerateCombinationsHandler,
    MirrorScoresCommand, MirrorScoresHandler, PipelineError, RunPipelineCommand,
    RunPipelineHandler, ScoreCombinationsCommand, ScoreCombinationsHandler,
};
use action_prioritizer::domain::action::Action;
use action_prioritizer::domain::augmentation::AugmentError;
use action_prioritizer::domain::combination::{Combination, PreferenceLabel};
use action_prioritizer::domain::generator::CombinationGenerator;
use action_prioritizer::domain::profile::{
    ClimateZone, Diet, EnergySource, HousingType, IncomeLevel, TransportMode, UserProfile,
};
use action_prioritizer::ports::{DatasetStore, ScoringOracle};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn store() -> Arc<dyn DatasetStore> {
    Arc::new(JsonDatasetStore::new())
}

fn profile(city: &str) -> UserProfile {
    UserProfile::new(
        city,
        ClimateZone::Tropical,
        TransportMode::PublicTransit,
        Diet::ModerateMeat,
        HousingType::Apartment,
        EnergySource::Grid,
        IncomeLevel::Low,
    )
    .unwrap()
}

fn action(solution: &str) -> Action {
    Action::new(format!("Adopt {}", solution), solution).unwrap()
}

fn scorer(oracle: MockScoringOracle, concurrency: usize) -> ConcurrentScorer {
    let oracle: Arc<dyn ScoringOracle> = Arc::new(oracle);
    ConcurrentScorer::new(oracle, concurrency, Duration::from_secs(5))
}

async fn write_json(path: &Path, value: serde_json::Value) {
    tokio::fs::write(path, serde_json::to_vec_pretty(&value).unwrap())
        .await
        .unwrap();
}

async fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&tokio::fs::read(path).await.unwrap()).unwrap()
}

struct Paths {
    _dir: TempDir,
    actions: PathBuf,
    profiles: PathBuf,
    work_set: PathBuf,
    scored: PathBuf,
    mirrored: PathBuf,
}

fn paths() -> Paths {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    Paths {
        _dir: dir,
        actions: root.join("actions.json"),
        profiles: root.join("synthetic_profiles.json"),
        work_set: root.join("synthetic_action_combinations.json"),
        scored: root.join("synthetic_action_pair_scores.json"),
        mirrored: root.join("synthetic_action_pair_scores_mirrored.json"),
    }
}

async fn seed_inputs(paths: &Paths, solutions: &[&str], cities: &[&str]) {
    let actions: Vec<_> = solutions
        .iter()
        .map(|s| json!({"action": format!("Adopt {}", s), "solution": s, "cost": "1,000"}))
        .collect();
    write_json(&paths.actions, json!(actions)).await;

    let profiles: Vec<_> = cities.iter().map(|c| profile(c)).collect();
    write_json(&paths.profiles, json!({ "profiles": profiles })).await;
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn small_pair_space_yields_every_pair_per_persona() {
    let paths = paths();
    seed_inputs(&paths, &["Alpha", "Beta", "Gamma"], &["Lagos", "Oslo"]).await;

    let handler = GenerateCombinationsHandler::new(store(), CombinationGenerator::default());
    let result = handler
        .handle(GenerateCombinationsCommand {
            actions_path: paths.actions.clone(),
            profiles_path: paths.profiles.clone(),
            output_path: paths.work_set.clone(),
            require_ghg_impact: false,
        })
        .await
        .unwrap();

    assert_eq!(result.combinations, 6);

    let work_set = store().load_work_set(&paths.work_set).await.unwrap();
    for city in ["Lagos", "Oslo"] {
        let mut pairs: Vec<(String, String)> = work_set
            .iter()
            .map(|r| Combination::from_record(r).unwrap())
            .filter(|c| c.user_profile().city == city)
            .map(|c| {
                let mut pair = [
                    c.action_a().solution.clone(),
                    c.action_b().solution.clone(),
                ];
                pair.sort();
                let [x, y] = pair;
                (x, y)
            })
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("Alpha".to_string(), "Beta".to_string()),
                ("Alpha".to_string(), "Gamma".to_string()),
                ("Beta".to_string(), "Gamma".to_string()),
            ]
        );
    }
}

// =============================================================================
// Scoring
// =============================================================================

async fn five_item_work_set(path: &Path) {
    let persona = profile("Accra");
    let work_set: Vec<Combination> = [
        ("A1", "B1"),
        ("A2", "B2"),
        ("Broken", "B3"),
        ("A4", "B4"),
        ("A5", "B5"),
    ]
    .iter()
    .map(|(a, b)| Combination::new(action(a), action(b), persona.clone()).unwrap())
    .collect();
    store().save_work_set(path, &work_set).await.unwrap();
}

#[tokio::test]
async fn one_oracle_failure_leaves_the_rest_scored_in_order() {
    let paths = paths();
    five_item_work_set(&paths.work_set).await;

    let handler = ScoreCombinationsHandler::new(
        store(),
        scorer(MockScoringOracle::new().failing_on("Broken"), 2),
    );
    let report = handler
        .handle(ScoreCombinationsCommand {
            input_path: paths.work_set.clone(),
            output_path: paths.scored.clone(),
        })
        .await
        .unwrap();

    assert_eq!(report.completed, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total, 5);

    let scored = store().load_scored(&paths.scored).await.unwrap();
    let firsts: Vec<_> = scored
        .iter()
        .map(|s| s.combination.action_a().solution.as_str())
        .collect();
    assert_eq!(firsts, vec!["A1", "A2", "A4", "A5"]);
    assert!(scored
        .iter()
        .all(|s| s.score == PreferenceLabel::FirstPreferred));
}

#[tokio::test]
async fn invalid_persona_is_counted_but_never_sent_to_the_oracle() {
    let paths = paths();
    let valid = profile("Lima");
    let mut bad_persona = serde_json::to_value(&valid).unwrap();
    bad_persona["climate_zone"] = json!("polar");

    write_json(
        &paths.work_set,
        json!([
            {"action_a": action("A1"), "action_b": action("B1"), "user_profile": valid},
            {"action_a": action("A2"), "action_b": action("B2"), "user_profile": bad_persona},
            {"action_a": action("A3"), "action_b": action("B3"), "user_profile": valid},
        ]),
    )
    .await;

    let oracle = MockScoringOracle::new();
    let handler = ScoreCombinationsHandler::new(store(), scorer(oracle.clone(), 4));
    let report = handler
        .handle(ScoreCombinationsCommand {
            input_path: paths.work_set.clone(),
            output_path: paths.scored.clone(),
        })
        .await
        .unwrap();

    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(oracle.call_count(), 2);
}

#[tokio::test]
async fn in_flight_calls_reach_but_never_exceed_concurrency() {
    let persona = profile("Quito");
    let records: Vec<_> = (0..24)
        .map(|i| {
            Combination::new(
                action(&format!("A{:02}", i)),
                action(&format!("B{:02}", i)),
                persona.clone(),
            )
            .unwrap()
            .to_record()
            .unwrap()
        })
        .collect();

    let oracle = MockScoringOracle::new().with_delay(Duration::from_millis(10));
    let report = scorer(oracle.clone(), 3).score(&records).await;

    assert_eq!(report.completed, 24);
    assert_eq!(oracle.call_count(), 24);
    assert_eq!(oracle.max_in_flight(), 3);
    let firsts: Vec<_> = report
        .scored
        .iter()
        .map(|s| s.combination.action_a().solution.clone())
        .collect();
    let expected: Vec<_> = (0..24).map(|i| format!("A{:02}", i)).collect();
    assert_eq!(firsts, expected);
}

// =============================================================================
// Mirroring
// =============================================================================

#[tokio::test]
async fn mirroring_is_refused_on_an_already_mirrored_set() {
    let paths = paths();
    five_item_work_set(&paths.work_set).await;
    ScoreCombinationsHandler::new(store(), scorer(MockScoringOracle::new(), 2))
        .handle(ScoreCombinationsCommand {
            input_path: paths.work_set.clone(),
            output_path: paths.scored.clone(),
        })
        .await
        .unwrap();

    let mirror = MirrorScoresHandler::new(store());
    let first = mirror
        .handle(MirrorScoresCommand {
            input_path: paths.scored.clone(),
            output_path: paths.mirrored.clone(),
        })
        .await
        .unwrap();
    assert_eq!(first.original, 5);
    assert_eq!(first.augmented, 10);

    let again = mirror
        .handle(MirrorScoresCommand {
            input_path: paths.mirrored.clone(),
            output_path: paths.mirrored.with_extension("again.json"),
        })
        .await;
    assert!(matches!(
        again,
        Err(PipelineError::Augment(AugmentError::AlreadyAugmented { .. }))
    ));
}

#[tokio::test]
async fn mirror_records_swap_actions_and_flip_score() {
    let paths = paths();
    five_item_work_set(&paths.work_set).await;
    ScoreCombinationsHandler::new(
        store(),
        scorer(MockScoringOracle::constant(PreferenceLabel::SecondPreferred), 1),
    )
    .handle(ScoreCombinationsCommand {
        input_path: paths.work_set.clone(),
        output_path: paths.scored.clone(),
    })
    .await
    .unwrap();

    MirrorScoresHandler::new(store())
        .handle(MirrorScoresCommand {
            input_path: paths.scored.clone(),
            output_path: paths.mirrored.clone(),
        })
        .await
        .unwrap();

    let doc = read_json(&paths.mirrored).await;
    let records = doc.as_array().unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(records[0]["score"], json!(0));
    assert_eq!(records[1]["score"], json!(1));
    assert_eq!(records[0]["action_a"], records[1]["action_b"]);
    assert_eq!(records[0]["action_b"], records[1]["action_a"]);
    assert_eq!(records[0]["user_profile"], records[1]["user_profile"]);
}

// =============================================================================
// Full pipeline
// =============================================================================

#[tokio::test]
async fn run_pipeline_writes_all_three_documents() {
    let paths = paths();
    seed_inputs(&paths, &["Alpha", "Beta", "Gamma", "Delta"], &["Nairobi"]).await;

    let handler = RunPipelineHandler::new(
        GenerateCombinationsHandler::new(
            store(),
            CombinationGenerator::new(4).with_seed(Some(7)),
        ),
        ScoreCombinationsHandler::new(store(), scorer(MockScoringOracle::new(), 2)),
        MirrorScoresHandler::new(store()),
    );
    let result = handler
        .handle(RunPipelineCommand {
            actions_path: paths.actions.clone(),
            profiles_path: paths.profiles.clone(),
            work_set_path: paths.work_set.clone(),
            scored_path: paths.scored.clone(),
            mirrored_path: paths.mirrored.clone(),
            require_ghg_impact: false,
        })
        .await
        .unwrap();

    assert_eq!(result.generated.combinations, 4);
    assert_eq!(result.scoring.completed, 4);
    assert_eq!(result.scoring.failed, 0);
    assert_eq!(result.mirrored.augmented, 8);
    assert_eq!(read_json(&paths.mirrored).await.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn pipeline_refuses_to_overwrite_its_input() {
    let paths = paths();
    five_item_work_set(&paths.work_set).await;

    let result = MirrorScoresHandler::new(store())
        .handle(MirrorScoresCommand {
            input_path: paths.work_set.clone(),
            output_path: paths.work_set.clone(),
        })
        .await;

    assert!(matches!(result, Err(PipelineError::SameArtifact(_))));
}
