//! Key generation and agreement for REFp62
//!
//! Diffie-Hellman in the order-q subgroup of GF(p)*. A public key carries
//! four extension elements (X1, Z1, X2, Z2): the public point y = X1/Z1 and
//! a witness X2/Z2 = y^2, each blinded by a fresh projective factor.

use isokex_api::{RandomSource, Role};
use isokex_params::reference::{GENERATOR, SUBGROUP_ORDER};
use zeroize::Zeroize;

use crate::error::{length, public_key, EngineError, Result};
use crate::field::{decode_fp2, decode_fp2_real_lenient, encode_fp2, FieldElement, FP2_BYTES};
use crate::sampling;

/// Encoded private key size
pub const PRIVATE_KEY_BYTES: usize = 8;

/// Encoded public key size
pub const PUBLIC_KEY_BYTES: usize = 4 * FP2_BYTES;

/// Encoded shared secret size
pub const SHARED_SECRET_BYTES: usize = FP2_BYTES;

fn nonzero_element(random: &mut dyn RandomSource) -> Result<FieldElement> {
    let mut buf = [0u8; 8];
    let mut out = FieldElement::ZERO;
    for _ in 0..isokex_params::harness::MAX_SAMPLING_ATTEMPTS {
        random.random_bytes(&mut buf)?;
        out = FieldElement::from_u64(u64::from_le_bytes(buf));
        if !out.is_zero() {
            break;
        }
    }
    buf.zeroize();
    if out.is_zero() {
        return Err(EngineError::SamplingExhausted {
            context: "projective factor",
            limit: isokex_params::harness::MAX_SAMPLING_ATTEMPTS,
        });
    }
    Ok(out)
}

fn decode_private_key(role: Role, bytes: &[u8]) -> Result<u64> {
    length("private key", bytes.len(), PRIVATE_KEY_BYTES)?;
    let mut word = [0u8; PRIVATE_KEY_BYTES];
    word.copy_from_slice(bytes);
    let key = u64::from_le_bytes(word);
    word.zeroize();
    if !sampling::in_key_space(role, key) {
        return Err(EngineError::InvalidInput {
            context: "private key",
            reason: "outside the key space of its role",
        });
    }
    Ok(key)
}

/// Generate a keypair for `role`
pub fn generate_keypair(
    random: &mut dyn RandomSource,
    role: Role,
    private_key: &mut [u8],
    public_key: &mut [u8],
) -> Result<()> {
    length("private key", private_key.len(), PRIVATE_KEY_BYTES)?;
    length("public key", public_key.len(), PUBLIC_KEY_BYTES)?;

    let mut sk = sampling::private_key(random, role)?;
    let y = FieldElement::from_u64(GENERATOR).pow(sk);
    let z1 = nonzero_element(random)?;
    let z2 = nonzero_element(random)?;

    let coords = [y * z1, z1, y.square() * z2, z2];
    for (chunk, coord) in public_key.chunks_exact_mut(FP2_BYTES).zip(coords) {
        encode_fp2(coord, chunk)?;
    }
    private_key.copy_from_slice(&sk.to_le_bytes());
    sk.zeroize();
    Ok(())
}

/// Structural checks on a peer public key; returns the public point
fn validated_point(peer: &[u8]) -> Result<FieldElement> {
    let mut parts = [FieldElement::ZERO; 4];
    for (part, chunk) in parts.iter_mut().zip(peer.chunks_exact(FP2_BYTES)) {
        let (real, imag) = decode_fp2(chunk).map_err(|e| match e {
            EngineError::InvalidInput { .. } => EngineError::Validation("coordinate not reduced"),
            other => other,
        })?;
        public_key(imag.is_zero(), "coordinate leaves the base field")?;
        *part = real;
    }
    let [x1, z1, x2, z2] = parts;

    public_key(!z1.is_zero() && !z2.is_zero(), "zero projective coordinate")?;
    let y = x1 * z1.invert();
    public_key(y != FieldElement::ONE && !y.is_zero(), "degenerate public point")?;
    public_key(y.pow(SUBGROUP_ORDER) == FieldElement::ONE, "point outside the prime-order subgroup")?;
    public_key(x2 == y.square() * z2, "witness does not match the public point")?;
    Ok(y)
}

/// Public point without any checks
fn unchecked_point(peer: &[u8]) -> Result<FieldElement> {
    let x1 = decode_fp2_real_lenient(&peer[..FP2_BYTES])?;
    let z1 = decode_fp2_real_lenient(&peer[FP2_BYTES..2 * FP2_BYTES])?;
    Ok(x1 * z1.invert())
}

/// Shared secret of `role` against a peer public key
pub fn agree(
    role: Role,
    private_key: &[u8],
    peer_public_key: &[u8],
    shared_secret: &mut [u8],
    validate: bool,
) -> Result<()> {
    length("peer public key", peer_public_key.len(), PUBLIC_KEY_BYTES)?;
    length("shared secret", shared_secret.len(), SHARED_SECRET_BYTES)?;
    let mut sk = decode_private_key(role, private_key)?;

    let y = if validate {
        validated_point(peer_public_key)?
    } else {
        unchecked_point(peer_public_key)?
    };
    let mut secret = y.pow(sk);
    sk.zeroize();

    let result = encode_fp2(secret, shared_secret);
    secret.zeroize();
    result
}
