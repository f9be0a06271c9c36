//! Constants for SIDH over p751 = 2^372 * 3^239 - 1

use crate::curve::{CurveParameterSet, LadderVector};

/// Bit length of p751
pub const P751_BITS: usize = 751;

/// Power-of-two exponent (role A)
pub const P751_EA: usize = 372;

/// Power-of-three exponent (role B)
pub const P751_EB: usize = 239;

/// Bit length of the BigMont group order
pub const BIGMONT_ORDER_BITS: usize = 749;

/// BigMont known-answer scalar
pub const BIGMONT_SCALAR: [u64; 12] = [
    0x154A166BBD471DF4, 0xBF7CA3B41010FE6B, 0xC34BD28655936246, 0xAD8E8F394D3428B5,
    0x275B1116E6B3BF08, 0x3C024A3CC03A6AFC, 0x2300A0049FC615AF, 0xA0060FEC19263F0B,
    0x69A1EB9091B8162C, 0xFDBE1DF28CDC03EE, 0xAA2030E6922EF3D5, 0x0000075E7401FA0E,
];

/// BigMont known-answer output x-coordinate
pub const BIGMONT_EXPECTED_X: [u64; 12] = [
    0x30E9AFA5BF75A92F, 0x88BC71EE9E221028, 0x999A50A9EE3B9A8E, 0x77E2934BD8D38B5A,
    0x2668CAFC2933DB58, 0x457C65F7AD941041, 0x72EA3D5F92F33153, 0x6E04B56AF98D6285,
    0x28FA680C091A9AE2, 0xE73DFE058AFD79ED, 0x902CD9E695BC7260, 0x00006FAC6F6E88AF,
];

/// BigMont rotate-and-ladder trace
pub const BIGMONT_VECTOR: LadderVector = LadderVector {
    seed_scalar: &BIGMONT_SCALAR,
    initial_x: 3,
    iterations: 10,
    expected_x: &BIGMONT_EXPECTED_X,
};

/// SIDHp751 parameter set
pub const SIDHP751: CurveParameterSet = CurveParameterSet {
    id: "SIDHp751",
    field_bits: 768,
    order_bits: 384,
    prime_bits: P751_BITS,
    alice_exponent: P751_EA,
    bob_exponent: P751_EB,
    ladder_scalar_bits: BIGMONT_ORDER_BITS,
    ladder_vector: Some(&BIGMONT_VECTOR),
};
