//! Constants for the REFp62 reference parameter set
//!
//! A 62-bit safe prime field small enough to exercise every harness path
//! quickly. Key exchange runs in the order-q subgroup of GF(p)*, and the
//! ladder runs on the Montgomery curve y^2 = x^3 + 150x^2 + x.

use crate::curve::{CurveParameterSet, LadderVector};

/// Field prime, p = 2q + 1
pub const PRIME: u64 = 0x2000_003E_74B9_1CB3;

/// Bit length of [`PRIME`]
pub const PRIME_BITS: usize = 62;

/// Prime order of the key-exchange subgroup
pub const SUBGROUP_ORDER: u64 = 0x1000_001F_3A5C_8E59;

/// Generator of the order-q subgroup
pub const GENERATOR: u64 = 4;

/// Role A keys are even integers below 2^EA
pub const EA: usize = 60;

/// Role B keys are multiples of three below 3^EB
pub const EB: usize = 37;

/// 3^EB
pub const THREE_POW_EB: u64 = 0x063F_BAD3_A2B5_5473;

/// Montgomery coefficient of the ladder curve
pub const LADDER_A: u64 = 150;

/// (A + 2) / 4
pub const LADDER_A24: u64 = 38;

/// Curve order, 4 * 13 * [`LADDER_ORDER`]
pub const LADDER_CURVE_ORDER: u64 = 0x2000_003E_3F80_AFFC;

/// Large prime factor of the ladder curve order
pub const LADDER_ORDER: u64 = 0x009D_89D9_CFFD_8D3B;

/// Reference rotate-and-ladder trace
pub const LADDER_VECTOR: LadderVector = LadderVector {
    seed_scalar: &[0x154A166BBD471DF4, 0xBF7CA3B41010FE6B],
    initial_x: 3,
    iterations: 10,
    expected_x: &[0x0C0F_2179_C1D3_5ABE],
};

/// REFp62 parameter set
pub const REFP62: CurveParameterSet = CurveParameterSet {
    id: "REFp62",
    field_bits: 64,
    order_bits: 64,
    prime_bits: PRIME_BITS,
    alice_exponent: EA,
    bob_exponent: EB,
    ladder_scalar_bits: 128,
    ladder_vector: Some(&LADDER_VECTOR),
};
