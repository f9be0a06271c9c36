//! Known-answer check of the scalar ladder
//!
//! Starting from the published seed scalar and x-coordinate, each step
//! shifts the scalar right by one bit and feeds the ladder its own previous
//! output. The final x-coordinate must match the published one exactly.

use isokex_api::error::validation;
use isokex_api::{CurveParameterSet, Error, IsogenyEngine, Limb, RandomSource, Result, Status};
use isokex_internal::constant_time::ct_eq_limbs;
use isokex_internal::limbs::shift_right_one;
use isokex_params::curve::LadderVector;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::session::Session;

/// Final x-coordinate of a ladder trace against the expected one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderReport {
    pub matched: bool,
    pub expected: Vec<Limb>,
    pub actual: Vec<Limb>,
}

impl LadderReport {
    pub fn passed(&self) -> bool {
        self.matched
    }

    pub fn status(&self) -> Status {
        if self.matched {
            Status::Success
        } else {
            Status::SharedKey
        }
    }

    pub fn into_result(self) -> Result<Self> {
        if self.matched {
            Ok(self)
        } else {
            Err(Error::SharedKeyMismatch { context: "ladder known-answer trace" })
        }
    }
}

pub struct LadderVerifier<'e, E: IsogenyEngine> {
    engine: &'e E,
    params: &'e CurveParameterSet,
    vector: &'e LadderVector,
}

impl<'e, E: IsogenyEngine> LadderVerifier<'e, E> {
    /// Verifier for the vector published with `params`
    pub fn new(engine: &'e E, params: &'e CurveParameterSet) -> Result<Self> {
        let vector = params.ladder_vector.ok_or(Error::NotImplemented {
            feature: "ladder known-answer vector for this curve",
        })?;
        Ok(Self::with_vector(engine, params, vector))
    }

    pub fn with_vector(
        engine: &'e E,
        params: &'e CurveParameterSet,
        vector: &'e LadderVector,
    ) -> Self {
        Self { engine, params, vector }
    }

    /// Replay the trace
    ///
    /// A mismatch is reported in the returned [`LadderReport`]; `Err` means
    /// an engine call failed.
    pub fn run(&self, random: Box<dyn RandomSource>) -> Result<LadderReport> {
        let scalar_words = self.params.ladder_scalar_words();
        let field_words = self.params.field_words();
        let vector = self.vector;

        validation::length("ladder seed scalar", vector.seed_scalar.len(), scalar_words)?;
        validation::parameter(
            vector.expected_x.len() <= field_words,
            "ladder expected x-coordinate",
            "wider than a field element",
        )?;

        let mut session = Session::open(self.engine, self.params, random)?;

        let mut scalar = vector.seed_scalar.to_vec();
        let mut x = vec![0 as Limb; field_words];
        x[0] = vector.initial_x;

        for step in 0..vector.iterations {
            shift_right_one(&mut scalar);
            session.ladder(&mut x, &scalar)?;
            debug!(step, x = format_args!("{:#x}", x[0]), "ladder step");
        }

        let mut expected = vec![0 as Limb; field_words];
        expected[..vector.expected_x.len()].copy_from_slice(vector.expected_x);
        let matched = ct_eq_limbs(&x, &expected);

        if matched {
            info!(curve = self.params.id, steps = vector.iterations, "ladder trace matches");
        } else {
            warn!(curve = self.params.id, "ladder trace differs from the expected x-coordinate");
        }
        Ok(LadderReport { matched, expected, actual: x })
    }
}
