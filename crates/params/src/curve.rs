//! Curve parameter set descriptor

/// Bits per machine word in limb arrays
pub const WORD_BITS: usize = 64;

/// Read-only description of a curve, as seen by the harness.
///
/// Only bit widths are recorded here; the engine owns the arithmetic. All
/// key, secret and coordinate buffer sizes are derived from these fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParameterSet {
    /// Curve identifier
    pub id: &'static str,

    /// Bit width of a field element container
    pub field_bits: usize,

    /// Bit width of a private key container
    pub order_bits: usize,

    /// Bit length of the field prime
    pub prime_bits: usize,

    /// Exponent of the role A key space
    pub alice_exponent: usize,

    /// Exponent of the role B key space
    pub bob_exponent: usize,

    /// Bit width of a ladder scalar
    pub ladder_scalar_bits: usize,

    /// Known-answer trace for the ladder, if one is published
    pub ladder_vector: Option<&'static LadderVector>,
}

impl CurveParameterSet {
    /// Bytes in one field element
    pub const fn field_bytes(&self) -> usize {
        self.field_bits.div_ceil(8)
    }

    /// Limbs in one field element
    pub const fn field_words(&self) -> usize {
        self.field_bits.div_ceil(WORD_BITS)
    }

    /// Private key length in bytes
    pub const fn private_key_bytes(&self) -> usize {
        self.order_bits.div_ceil(8)
    }

    /// Public key length: four elements of the quadratic extension
    pub const fn public_key_bytes(&self) -> usize {
        4 * 2 * self.field_bytes()
    }

    /// Shared secret length: one element of the quadratic extension
    pub const fn shared_secret_bytes(&self) -> usize {
        2 * self.field_bytes()
    }

    /// Limbs in a ladder scalar
    pub const fn ladder_scalar_words(&self) -> usize {
        self.ladder_scalar_bits.div_ceil(WORD_BITS)
    }
}

/// Deterministic rotate-and-ladder trace with its expected result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderVector {
    /// Scalar before the first shift, least significant limb first
    pub seed_scalar: &'static [u64],

    /// Starting x-coordinate as a small field value
    pub initial_x: u64,

    /// Number of shift-then-ladder steps
    pub iterations: usize,

    /// Expected x-coordinate after the last step, least significant limb first
    pub expected_x: &'static [u64],
}
