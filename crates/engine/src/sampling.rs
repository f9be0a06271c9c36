//! Rejection sampling of private keys and ladder scalars

use isokex_api::{RandomSource, Role};
use isokex_params::harness::MAX_SAMPLING_ATTEMPTS;
use isokex_params::reference::{EA, LADDER_ORDER, THREE_POW_EB};

use crate::error::{EngineError, Result};

/// Draw a masked u64 until it falls below `bound`
fn below(
    random: &mut dyn RandomSource,
    mask: u64,
    bound: u64,
    context: &'static str,
) -> Result<u64> {
    let mut buf = [0u8; 8];
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        random.random_bytes(&mut buf)?;
        let candidate = u64::from_le_bytes(buf) & mask;
        if candidate < bound {
            buf.fill(0);
            return Ok(candidate);
        }
    }
    buf.fill(0);
    Err(EngineError::SamplingExhausted {
        context,
        limit: MAX_SAMPLING_ATTEMPTS,
    })
}

/// Mask covering every bit of `value`
fn mask_for(value: u64) -> u64 {
    match value.leading_zeros() {
        0 => u64::MAX,
        lz => (1u64 << (64 - lz)) - 1,
    }
}

/// Upper bound on the draw for each role's key space
fn key_bound(role: Role) -> u64 {
    match role {
        Role::A => (1u64 << (EA - 1)) - 1,
        Role::B => THREE_POW_EB / 3 - 1,
    }
}

/// Private key for `role`
///
/// Role A keys are even, in [2, 2^EA - 2]. Role B keys are multiples of
/// three, in [3, 3^EB - 3].
pub fn private_key(random: &mut dyn RandomSource, role: Role) -> Result<u64> {
    let bound = key_bound(role);
    let r = below(random, mask_for(bound), bound, "private key")?;
    Ok(match role {
        Role::A => 2 * (r + 1),
        Role::B => 3 * (r + 1),
    })
}

/// Whether `key` lies in the key space of `role`
pub fn in_key_space(role: Role, key: u64) -> bool {
    match role {
        Role::A => key >= 2 && key % 2 == 0 && key <= 2 * key_bound(role),
        Role::B => key >= 3 && key % 3 == 0 && key <= 3 * key_bound(role),
    }
}

/// Ladder scalar, uniform in [1, LADDER_ORDER - 1]
pub fn ladder_scalar(random: &mut dyn RandomSource) -> Result<u64> {
    let bound = LADDER_ORDER - 1;
    Ok(below(random, mask_for(bound), bound, "ladder scalar")? + 1)
}
