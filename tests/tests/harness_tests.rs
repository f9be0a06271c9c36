use isokex_api::{Error, Status};
use isokex_engine::ReferenceEngine;
use isokex_harness::{Harness, HarnessConfig, Phase, PhaseDetail, PhaseState};
use isokex_params::reference::REFP62;
use isokex_tests::{Corruption, CorruptingEngine, EngineOp, FaultInjectingEngine, ScriptedCycles};
use std::num::NonZeroUsize;

fn config() -> HarnessConfig {
    HarnessConfig::default()
        .with_seed(2024)
        .with_trials(NonZeroUsize::new(5).unwrap())
        .with_bench_loops(NonZeroUsize::new(3).unwrap())
}

#[test]
fn test_full_run_passes_with_scripted_timer() {
    let engine = ReferenceEngine::new();
    let report = Harness::new(&engine, &REFP62, config())
        .with_timer(ScriptedCycles::new([250]))
        .run();

    assert!(report.passed());
    assert_eq!(report.engine, "reference");
    let phases: Vec<_> = report.phases.iter().map(|p| p.phase).collect();
    assert_eq!(phases, Phase::ORDER);

    match &report.phase(Phase::KeyExchangeBench).unwrap().detail {
        Some(PhaseDetail::KeyExchangeBench(bench)) => {
            assert_eq!(bench.measurements.len(), 6);
            assert!(bench.measurements.iter().all(|m| m.average_cycles() == Some(250)));
        }
        other => panic!("unexpected detail {:?}", other),
    }

    let text = report.to_string();
    assert!(text.contains("BENCHMARKING ELLIPTIC CURVE BIGMONT"));
    assert!(text.contains("BigMont's scalar multiplication runs in"));
    assert!(text.contains("    250 cycles"));
}

#[test]
fn test_mismatch_stops_the_run() {
    let engine = CorruptingEngine::new(ReferenceEngine::new(), Corruption::AfterKeygen);
    let report = Harness::new(&engine, &REFP62, config()).run();

    assert!(!report.passed());
    assert_eq!(report.status(), Status::SharedKey);
    let first = report.first_failure().unwrap();
    assert_eq!(first.phase, Phase::KeyExchangeVerify);
    for phase in &report.phases[1..] {
        assert_eq!(
            phase.state,
            PhaseState::Skipped { reason: "earlier phase failed".into() }
        );
    }

    let text = report.to_string();
    assert!(text.contains("Key exchange tests"));
    assert!(text.contains("FAILED"));
    assert!(text.contains("Error detected: CRYPTO_ERROR_SHARED_KEY"));
}

#[test]
fn test_ladder_failure_after_benchmarks() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new()).failing(
        EngineOp::Ladder,
        1,
        Error::Engine { context: "ladder", message: "injected".into() },
    );
    let report = Harness::new(&engine, &REFP62, config()).run();

    let states: Vec<_> = report.phases.iter().map(|p| &p.state).collect();
    assert_eq!(states[0], &PhaseState::Passed);
    assert_eq!(states[1], &PhaseState::Passed);
    assert!(matches!(states[2], PhaseState::Failed { status: Status::Error, .. }));
    assert!(matches!(states[3], PhaseState::Skipped { .. }));
    assert_eq!(report.status(), Status::Error);
    assert_eq!(engine.calls(EngineOp::Sample), 0);
}

#[test]
fn test_disabled_benchmarks_are_not_failures() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new());
    let report = Harness::new(&engine, &REFP62, config().without_benchmarks()).run();

    assert!(report.passed());
    assert_eq!(engine.calls(EngineOp::Sample), 0);
    assert_eq!(engine.frees(), 2);
}

#[test]
fn test_report_serializes_to_json() {
    let engine = ReferenceEngine::new();
    let report = Harness::new(&engine, &REFP62, config().without_benchmarks()).run();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["curve"], "REFp62");
    assert_eq!(json["config"]["trials"], 5);
    assert_eq!(json["config"]["random"]["seeded"], 2024);

    let verify = &json["phases"][0];
    assert_eq!(verify["phase"], "key_exchange_verify");
    assert_eq!(verify["state"], "passed");
    assert_eq!(verify["detail"]["key_exchange"]["unvalidated"]["outcome"], "passed");
    assert_eq!(verify["detail"]["key_exchange"]["validated"]["trials"], 5);

    let bench = &json["phases"][1];
    assert_eq!(bench["state"], "skipped");
    assert_eq!(bench["reason"], "benchmarks disabled");
    assert!(bench["detail"].is_null());

    let ladder = &json["phases"][2];
    assert_eq!(ladder["detail"]["ladder"]["matched"], true);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let engine = ReferenceEngine::new();
    let a = Harness::new(&engine, &REFP62, config().without_benchmarks()).run();
    let b = Harness::new(&engine, &REFP62, config().without_benchmarks()).run();
    assert_eq!(a, b);
}
