//! Arithmetic in GF(p) for the REFp62 prime
//!
//! Elements are kept fully reduced in a single u64. Products go through a
//! u128 intermediate. Exponentiation runs a fixed 64-step ladder with
//! constant-time selection, so its running time does not depend on the
//! exponent.
//!
//! Quadratic extension elements a + b*i travel on the wire as {b, a}: the
//! imaginary part first, each part little endian.

use core::ops::{Add, Mul, Neg, Sub};

use isokex_internal::constant_time::ct_select;
use isokex_params::reference::PRIME;
use zeroize::Zeroize;

use crate::error::{length, EngineError, Result};

/// Encoded size of one GF(p) element
pub const FIELD_BYTES: usize = 8;

/// Encoded size of one GF(p^2) element
pub const FP2_BYTES: usize = 2 * FIELD_BYTES;

/// Element of GF(p)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct FieldElement(u64);

impl FieldElement {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Reduce an arbitrary u64 into the field
    pub fn from_u64(value: u64) -> Self {
        Self(value % PRIME)
    }

    /// Accept only values already below p
    pub fn from_canonical(value: u64) -> Option<Self> {
        (value < PRIME).then_some(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn square(self) -> Self {
        self * self
    }

    /// self^exp over all 64 exponent bits
    pub fn pow(self, exp: u64) -> Self {
        let mut acc = Self::ONE;
        for i in (0..64).rev() {
            acc = acc.square();
            let product = acc * self;
            acc = Self(ct_select(acc.0, product.0, (exp >> i) & 1 == 1));
        }
        acc
    }

    /// Multiplicative inverse by Fermat; zero maps to zero
    pub fn invert(self) -> Self {
        self.pow(PRIME - 2)
    }

    /// Little-endian encoding
    pub fn to_le_bytes(self) -> [u8; FIELD_BYTES] {
        self.0.to_le_bytes()
    }

    /// Decode a canonical element
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_canonical(raw_word(bytes)?).ok_or(EngineError::InvalidInput {
            context: "field element",
            reason: "value is not reduced modulo p",
        })
    }

    /// Decode and reduce, accepting any bit pattern
    pub fn from_le_bytes_reduced(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_u64(raw_word(bytes)?))
    }
}

fn raw_word(bytes: &[u8]) -> Result<u64> {
    length("field element", bytes.len(), FIELD_BYTES)?;
    let mut word = [0u8; FIELD_BYTES];
    word.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(word))
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // both operands < 2^62, no overflow
        let sum = self.0 + rhs.0;
        Self(ct_select(sum, sum.wrapping_sub(PRIME), sum >= PRIME))
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let diff = self.0.wrapping_sub(rhs.0);
        Self(ct_select(diff, diff.wrapping_add(PRIME), self.0 < rhs.0))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as u128 * rhs.0 as u128) % PRIME as u128) as u64)
    }
}

/// Write a GF(p) value as the GF(p^2) element `real + 0*i`
pub fn encode_fp2(real: FieldElement, out: &mut [u8]) -> Result<()> {
    length("extension element", out.len(), FP2_BYTES)?;
    out[..FIELD_BYTES].fill(0);
    out[FIELD_BYTES..].copy_from_slice(&real.to_le_bytes());
    Ok(())
}

/// Strictly decode a GF(p^2) element as (real, imaginary)
pub fn decode_fp2(bytes: &[u8]) -> Result<(FieldElement, FieldElement)> {
    length("extension element", bytes.len(), FP2_BYTES)?;
    let imag = FieldElement::from_le_bytes(&bytes[..FIELD_BYTES])?;
    let real = FieldElement::from_le_bytes(&bytes[FIELD_BYTES..])?;
    Ok((real, imag))
}

/// Real part of a GF(p^2) element, reduced, imaginary part ignored
pub fn decode_fp2_real_lenient(bytes: &[u8]) -> Result<FieldElement> {
    length("extension element", bytes.len(), FP2_BYTES)?;
    FieldElement::from_le_bytes_reduced(&bytes[FIELD_BYTES..])
}
