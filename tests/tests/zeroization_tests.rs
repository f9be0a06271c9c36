use isokex_api::{Error, RandomSource, Status};
use isokex_common::{RngSource, SecureBuffer, ZeroizeGuard};
use isokex_engine::ReferenceEngine;
use isokex_harness::{ExchangeBuffers, KeyExchangeBenchmark, KeyExchangeVerifier};
use isokex_params::reference::REFP62;
use isokex_tests::{Corruption, CorruptingEngine, EngineOp, FaultInjectingEngine, ScriptedCycles};

fn seeded(seed: u64) -> Box<dyn RandomSource> {
    Box::new(RngSource::seeded(seed))
}

fn dirty_buffers() -> ExchangeBuffers {
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();
    buffers.secret_a.as_mut_slice().fill(0xAA);
    buffers.public_b.as_mut_slice().fill(0x55);
    assert!(!buffers.is_zeroed());
    buffers
}

#[test]
fn test_verifier_wipes_after_success() {
    let engine = ReferenceEngine::new();
    let mut buffers = dirty_buffers();
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(1), &mut buffers)
        .unwrap();
    assert!(report.passed());
    assert!(buffers.is_zeroed());
}

#[test]
fn test_verifier_wipes_after_mismatch() {
    let engine = CorruptingEngine::new(ReferenceEngine::new(), Corruption::AfterKeygen);
    let mut buffers = dirty_buffers();
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(1), &mut buffers)
        .unwrap();
    assert_eq!(report.status(), Status::SharedKey);
    assert!(buffers.is_zeroed());
}

#[test]
fn test_verifier_wipes_after_injected_failure() {
    for (op, nth) in [
        (EngineOp::Initialize, 1),
        (EngineOp::GenerateKeypair, 2),
        (EngineOp::Agree, 7),
        (EngineOp::AgreeValidated, 1),
    ] {
        let engine = FaultInjectingEngine::new(ReferenceEngine::new()).failing(
            op,
            nth,
            Error::Unknown { context: "injected" },
        );
        let mut buffers = dirty_buffers();
        let err = KeyExchangeVerifier::new(&engine, &REFP62)
            .run_with(seeded(1), &mut buffers)
            .unwrap_err();
        assert_eq!(err.status(), Status::Unknown, "{:?}", op);
        assert!(buffers.is_zeroed(), "{:?} left key material behind", op);
        assert_eq!(engine.frees(), 1, "{:?}", op);
    }
}

#[test]
fn test_allocation_failure_reports_no_memory() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new()).failing(
        EngineOp::Allocate,
        1,
        Error::NoMemory { context: "allocate_context" },
    );
    let mut buffers = dirty_buffers();
    let err = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(1), &mut buffers)
        .unwrap_err();
    assert_eq!(err.status(), Status::NoMemory);
    assert_eq!(engine.frees(), 0);
    assert!(buffers.is_zeroed());
}

#[test]
fn test_benchmark_wipes_after_failure() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new()).failing(
        EngineOp::Agree,
        12,
        Error::Unknown { context: "injected" },
    );
    let mut buffers = dirty_buffers();
    let report = KeyExchangeBenchmark::new(&engine, &REFP62, ScriptedCycles::new([3]))
        .run_with(seeded(1), &mut buffers)
        .unwrap();
    assert_eq!(report.status(), Status::Unknown);
    assert!(buffers.is_zeroed());
}

#[test]
fn test_guard_wipes_on_early_return() {
    fn fill_then_bail(buffer: &mut SecureBuffer) -> Result<(), Status> {
        let mut guard = ZeroizeGuard::new(buffer);
        guard.as_mut_slice().fill(7);
        Err(Status::ErrorDuringTest)
    }

    let mut buffer = SecureBuffer::new(32).unwrap();
    assert_eq!(fill_then_bail(&mut buffer), Err(Status::ErrorDuringTest));
    assert_eq!(buffer.len(), 32);
    assert!(buffer.is_zeroed());
}
