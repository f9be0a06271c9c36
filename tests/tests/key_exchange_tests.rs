use isokex_api::{Error, RandomSource, Role, Status};
use isokex_common::RngSource;
use isokex_engine::ReferenceEngine;
use isokex_harness::{ExchangeBuffers, KeyExchangeVerifier, PassOutcome, Session};
use isokex_params::reference::REFP62;
use isokex_tests::{Corruption, CorruptingEngine, EngineOp, FaultInjectingEngine};
use std::num::NonZeroUsize;

fn seeded(seed: u64) -> Box<dyn RandomSource> {
    Box::new(RngSource::seeded(seed))
}

#[test]
fn test_both_passes_hold_for_reference_engine() {
    let engine = ReferenceEngine::new();
    for seed in 0..4 {
        let report = KeyExchangeVerifier::new(&engine, &REFP62)
            .run(seeded(seed))
            .unwrap();
        assert!(report.passed(), "seed {} failed: {:?}", seed, report);
    }
}

#[test]
fn test_agreement_is_symmetric_over_independent_keypairs() {
    let engine = ReferenceEngine::new();
    let mut session = Session::open(&engine, &REFP62, seeded(3)).unwrap();
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();
    let mut previous = Vec::new();

    for _ in 0..10 {
        for role in Role::ALL {
            let (sk, pk) = buffers.keypair_mut(role);
            session.generate_keypair(role, sk, pk).unwrap();
        }
        for validate in [false, true] {
            for role in Role::ALL {
                let (sk, peer, secret) = buffers.agreement_mut(role);
                session.agree(role, sk, peer, secret, validate).unwrap();
            }
            assert!(buffers.secrets_match());
        }
        // fresh keys each trial give fresh secrets
        assert_ne!(buffers.secret_a.as_slice(), previous.as_slice());
        previous = buffers.secret_a.as_slice().to_vec();
    }
}

#[test]
fn test_tampered_key_rejected_only_with_validation() {
    let engine = ReferenceEngine::new();
    let mut session = Session::open(&engine, &REFP62, seeded(8)).unwrap();
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();

    for role in Role::ALL {
        let (sk, pk) = buffers.keypair_mut(role);
        session.generate_keypair(role, sk, pk).unwrap();
    }
    let offset = CorruptingEngine::<ReferenceEngine>::offset(REFP62.public_key_bytes());
    buffers.public_key_mut(Role::B)[offset] ^= 0x01;

    let (sk, peer, secret) = buffers.agreement_mut(Role::A);
    let err = session.agree(Role::A, sk, peer, secret, true).unwrap_err();
    assert_eq!(err.status(), Status::PublicKeyValidation);

    let (sk, peer, secret) = buffers.agreement_mut(Role::A);
    session.agree(Role::A, sk, peer, secret, false).unwrap();
    let (sk, peer, secret) = buffers.agreement_mut(Role::B);
    session.agree(Role::B, sk, peer, secret, false).unwrap();
    assert!(!buffers.secrets_match());
}

#[test]
fn test_corrupted_key_is_a_mismatch_without_validation() {
    let engine = CorruptingEngine::new(ReferenceEngine::new(), Corruption::AfterKeygen);
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(1), &mut buffers)
        .unwrap();

    assert_eq!(report.unvalidated, PassOutcome::SharedKeyMismatch { trial: 0 });
    assert_eq!(report.validated, PassOutcome::Skipped);
    assert_eq!(report.status(), Status::SharedKey);
    assert!(buffers.is_zeroed());
}

#[test]
fn test_corrupted_key_is_rejected_with_validation() {
    let engine = CorruptingEngine::new(ReferenceEngine::new(), Corruption::ValidatedAgreement);
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(1), &mut buffers)
        .unwrap();

    assert!(report.unvalidated.passed());
    assert_eq!(
        report.validated,
        PassOutcome::ValidationRejected { trial: 0, role: Role::A }
    );
    assert_eq!(report.status(), Status::PublicKeyValidation);
    assert!(report.into_result().unwrap_err().is_validation_failure());
    assert!(buffers.is_zeroed());
}

#[test]
fn test_validation_pass_reuses_final_keypairs() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new());
    let trials = NonZeroUsize::new(4).unwrap();
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .with_trials(trials)
        .run(seeded(2))
        .unwrap();

    assert!(report.passed());
    assert_eq!(engine.calls(EngineOp::GenerateKeypair), 2 * 4);
    assert_eq!(engine.calls(EngineOp::Agree), 2 * 4);
    assert_eq!(engine.calls(EngineOp::AgreeValidated), 2 * 4);
    assert_eq!(engine.frees(), 1);
}

#[test]
fn test_mismatch_skips_validation_pass() {
    let engine = FaultInjectingEngine::new(CorruptingEngine::new(
        ReferenceEngine::new(),
        Corruption::AfterKeygen,
    ));
    let report = KeyExchangeVerifier::new(&engine, &REFP62)
        .run(seeded(2))
        .unwrap();

    assert!(!report.passed());
    assert_eq!(engine.calls(EngineOp::GenerateKeypair), 2);
    assert_eq!(engine.calls(EngineOp::AgreeValidated), 0);
}

#[test]
fn test_engine_error_in_validation_pass_is_fatal() {
    let engine = FaultInjectingEngine::new(ReferenceEngine::new()).failing(
        EngineOp::AgreeValidated,
        3,
        Error::Engine { context: "agree", message: "injected".into() },
    );
    let mut buffers = ExchangeBuffers::for_params(&REFP62).unwrap();
    let err = KeyExchangeVerifier::new(&engine, &REFP62)
        .run_with(seeded(4), &mut buffers)
        .unwrap_err();

    assert_eq!(err.status(), Status::Error);
    assert_eq!(engine.calls(EngineOp::AgreeValidated), 3);
    assert_eq!(engine.frees(), 1);
    assert!(buffers.is_zeroed());
}
