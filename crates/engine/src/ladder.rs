//! x-only Montgomery ladder on y^2 = x^3 + 150x^2 + x over GF(p)

use isokex_api::Limb;
use isokex_internal::constant_time::ct_swap;
use isokex_params::reference::LADDER_A24;

use crate::field::FieldElement;

#[derive(Clone, Copy)]
struct Projective {
    x: FieldElement,
    z: FieldElement,
}

fn cswap(p: &mut Projective, q: &mut Projective, bit: u64) {
    let (mut px, mut qx) = (p.x.value(), q.x.value());
    let (mut pz, mut qz) = (p.z.value(), q.z.value());
    ct_swap(&mut px, &mut qx, bit);
    ct_swap(&mut pz, &mut qz, bit);
    // swapped values were canonical before, so they still are
    *p = Projective { x: FieldElement::from_u64(px), z: FieldElement::from_u64(pz) };
    *q = Projective { x: FieldElement::from_u64(qx), z: FieldElement::from_u64(qz) };
}

/// Affine x-coordinate of `scalar * P`, where `x` is the affine
/// x-coordinate of P. Every bit of the scalar container is processed, most
/// significant first. The point at infinity maps to 0.
pub fn ladder(x: FieldElement, scalar: &[Limb]) -> FieldElement {
    let a24 = FieldElement::from_u64(LADDER_A24);
    let mut r0 = Projective { x: FieldElement::ONE, z: FieldElement::ZERO };
    let mut r1 = Projective { x, z: FieldElement::ONE };

    for limb in scalar.iter().rev() {
        for i in (0..Limb::BITS).rev() {
            let bit = (limb >> i) & 1;
            cswap(&mut r0, &mut r1, bit);

            let a = r0.x + r0.z;
            let aa = a.square();
            let b = r0.x - r0.z;
            let bb = b.square();
            let e = aa - bb;
            let c = r1.x + r1.z;
            let d = r1.x - r1.z;
            let da = d * a;
            let cb = c * b;

            r1 = Projective { x: (da + cb).square(), z: x * (da - cb).square() };
            r0 = Projective { x: aa * bb, z: e * (bb + a24 * e) };

            cswap(&mut r0, &mut r1, bit);
        }
    }

    r0.x * r0.z.invert()
}
