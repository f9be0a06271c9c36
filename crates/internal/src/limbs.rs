//! Little-endian limb array helpers
//!
//! Limb arrays store the least significant word at index 0.

/// Shift a limb array right by one bit
///
/// Every limb takes the low bit of the next more significant limb into its
/// top bit. The most significant limb has no carry-in, and the lowest bit
/// of the whole value is discarded.
pub fn shift_right_one(limbs: &mut [u64]) {
    let n = limbs.len();
    if n == 0 {
        return;
    }
    for i in 0..n - 1 {
        limbs[i] = (limbs[i] >> 1) | (limbs[i + 1] << 63);
    }
    limbs[n - 1] >>= 1;
}
