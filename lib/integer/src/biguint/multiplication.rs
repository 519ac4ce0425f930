//! Magnitude multiplication: schoolbook for short operands, Karatsuba above
//! a fixed limb threshold.

use core::iter::repeat;
use core::ops::{Mul, MulAssign};

use num_traits::Zero;

use crate::big_digit::{self, BigDigit};
use crate::bigint::Sign::{self, Minus, NoSign, Plus};
use crate::biguint::addition::add2;
use crate::biguint::subtraction::sub2;
use crate::biguint::{cmp_slice, BigUint};

/// Operand limb count below which the schoolbook product is faster than
/// splitting. Correctness holds on either side; tests cross it both ways.
const KARATSUBA_THRESHOLD: usize = 32;

/// Multiply-accumulate with carry: returns the low limb of
/// `a + b * c + carry`, storing the high limb back into `carry`.
#[inline]
pub(crate) fn mac_with_carry(
    a: BigDigit,
    b: BigDigit,
    c: BigDigit,
    carry: &mut BigDigit,
) -> BigDigit {
    let (hi, lo) = big_digit::from_doublebigdigit(
        u64::from(a) + u64::from(b) * u64::from(c) + u64::from(*carry),
    );
    *carry = hi;
    lo
}

/// Returns the low limb of `a * b + carry`, storing the high limb back into
/// `carry`.
#[inline]
pub(crate) fn mul_with_carry(a: BigDigit, b: BigDigit, carry: &mut BigDigit) -> BigDigit {
    let (hi, lo) =
        big_digit::from_doublebigdigit(u64::from(a) * u64::from(b) + u64::from(*carry));
    *carry = hi;
    lo
}

/// `acc += b * c` for a single limb `c`.
///
/// The caller must size `acc` so the final carry has a limb to land in.
pub(crate) fn mac_digit(acc: &mut [BigDigit], b: &[BigDigit], c: BigDigit) {
    if c == 0 {
        return;
    }

    let mut b_iter = b.iter();
    let mut carry = 0;

    for ai in acc.iter_mut() {
        if let Some(bi) = b_iter.next() {
            *ai = mac_with_carry(*ai, *bi, c, &mut carry);
        } else if carry != 0 {
            *ai = mac_with_carry(*ai, 0, c, &mut carry);
        } else {
            break;
        }
    }

    debug_assert!(carry == 0);
}

/// `a *= b` for a single limb `b`, returning the final carry.
pub(crate) fn scalar_mul(a: &mut [BigDigit], b: BigDigit) -> BigDigit {
    let mut carry = 0;
    for a in a.iter_mut() {
        *a = mul_with_carry(*a, b, &mut carry);
    }
    carry
}

/// Subtracts the smaller slice from the larger, reporting which was larger.
pub(crate) fn sub_sign(mut a: &[BigDigit], mut b: &[BigDigit]) -> (Sign, BigUint) {
    // Strip trailing zeros; the inputs are raw sub-slices of a split operand.
    a = &a[..a.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1)];
    b = &b[..b.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1)];

    match cmp_slice(a, b) {
        core::cmp::Ordering::Greater => {
            let mut a = a.to_vec();
            sub2(&mut a, b);
            (Plus, BigUint::new(a))
        }
        core::cmp::Ordering::Less => {
            let mut b = b.to_vec();
            sub2(&mut b, a);
            (Minus, BigUint::new(b))
        }
        core::cmp::Ordering::Equal => (NoSign, BigUint::zero()),
    }
}

/// Three-argument multiply-accumulate: `acc += b * c`.
pub(crate) fn mac3(acc: &mut [BigDigit], b: &[BigDigit], c: &[BigDigit]) {
    // Arrange for `x` to be the shorter operand.
    let (x, y) = if b.len() < c.len() { (b, c) } else { (c, b) };

    if x.len() < KARATSUBA_THRESHOLD {
        for (i, xi) in x.iter().enumerate() {
            mac_digit(&mut acc[i..], y, *xi);
        }
        return;
    }

    // Karatsuba: split both operands at `b = x.len() / 2` limbs, so
    //
    //     x = x0 + x1 * W,   y = y0 + y1 * W,   W = BASE^b
    //
    // and combine three half-size products instead of four:
    //
    //     p0 = x0 * y0
    //     p1 = (x1 - x0) * (y1 - y0)
    //     p2 = x1 * y1
    //
    //     x * y = p2 * W^2 + (p0 + p2 - p1) * W + p0
    //
    // Shifts by W are performed by offsetting into `acc` rather than by
    // moving limbs. `p1` may be negative, so it is applied last with its
    // sign resolved by `sub_sign`.
    let split = x.len() / 2;
    let (x0, x1) = x.split_at(split);
    let (y0, y1) = y.split_at(split);

    // One scratch buffer serves all three partial products.
    let len = x1.len() + y1.len() + 1;
    let mut p = BigUint { data: vec![0; len] };

    // p2 = x1 * y1, added at offsets W and W^2.
    mac3(&mut p.data, x1, y1);
    p.normalize();

    add2(&mut acc[split..], &p.data);
    add2(&mut acc[split * 2..], &p.data);

    // p0 = x0 * y0, added at offsets 1 and W.
    p.data.clear();
    p.data.extend(repeat(0).take(len));

    mac3(&mut p.data, x0, y0);
    p.normalize();

    add2(acc, &p.data);
    add2(&mut acc[split..], &p.data);

    // p1 = (x1 - x0) * (y1 - y0), applied at offset W with its sign.
    let (j0_sign, j0) = sub_sign(x1, x0);
    let (j1_sign, j1) = sub_sign(y1, y0);

    match j0_sign * j1_sign {
        Plus => {
            p.data.clear();
            p.data.extend(repeat(0).take(len));

            mac3(&mut p.data, &j0.data, &j1.data);
            p.normalize();

            sub2(&mut acc[split..], &p.data);
        }
        Minus => {
            mac3(&mut acc[split..], &j0.data, &j1.data);
        }
        NoSign => {}
    }
}

/// Multiplies two limb slices into a fresh magnitude.
pub(crate) fn mul3(x: &[BigDigit], y: &[BigDigit]) -> BigUint {
    if x.is_empty() || y.is_empty() {
        return BigUint::zero();
    }

    let len = x.len() + y.len() + 1;
    let mut prod = BigUint { data: vec![0; len] };

    mac3(&mut prod.data, x, y);
    prod.normalized()
}

impl Mul<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn mul(self, other: &BigUint) -> BigUint {
        mul3(&self.data, &other.data)
    }
}

forward_binop!(impl Mul for BigUint, mul);

impl MulAssign<&BigUint> for BigUint {
    #[inline]
    fn mul_assign(&mut self, other: &BigUint) {
        *self = mul3(&self.data, &other.data);
    }
}

forward_assign!(impl MulAssign for BigUint, mul_assign);
