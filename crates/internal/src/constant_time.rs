//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Slices of different length compare unequal without inspecting contents.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Constant-time comparison of two limb arrays
pub fn ct_eq_limbs(a: &[u64], b: &[u64]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Swap `a` and `b` when `condition` is set, without branching on it
pub fn ct_swap(a: &mut u64, b: &mut u64, condition: u64) {
    let choice = Choice::from((condition & 1) as u8);
    u64::conditional_swap(a, b, choice);
}

/// Returns `a` if `condition` is false, `b` if it is true
pub fn ct_select(a: u64, b: u64, condition: bool) -> u64 {
    u64::conditional_select(&a, &b, Choice::from(condition as u8))
}
