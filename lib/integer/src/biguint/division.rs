//! Magnitude division: a single-limb fast path, and Knuth's Algorithm D
//! (normalize, estimate, correct, multiply-subtract) for longer divisors.

use core::cmp::Ordering::{Equal, Greater, Less};
use core::ops::{Div, DivAssign, Rem, RemAssign};

use num_traits::{One, Zero};

use crate::big_digit::{self, BigDigit};
use crate::biguint::addition::add2;
use crate::biguint::subtraction::sub2;
use crate::biguint::{cmp_slice, BigUint};

/// Divides the two-limb value `(hi, lo)` by a single limb.
///
/// The caller must ensure `hi < divisor` so the quotient fits in one limb.
#[inline]
pub(crate) fn div_wide(hi: BigDigit, lo: BigDigit, divisor: BigDigit) -> (BigDigit, BigDigit) {
    debug_assert!(hi < divisor);

    let lhs = big_digit::to_doublebigdigit(hi, lo);
    let rhs = u64::from(divisor);
    ((lhs / rhs) as BigDigit, (lhs % rhs) as BigDigit)
}

/// Divides a magnitude by a single limb, one limb at a time from the top,
/// carrying the running remainder down.
pub(crate) fn div_rem_digit(mut a: BigUint, b: BigDigit) -> (BigUint, BigDigit) {
    assert!(b != 0, "attempt to divide by zero");

    let mut rem = 0;

    for d in a.data.iter_mut().rev() {
        let (q, r) = div_wide(rem, *d, b);
        *d = q;
        rem = r;
    }

    (a.normalized(), rem)
}

/// Remainder of a magnitude divided by a single limb, without building the
/// quotient.
pub(crate) fn rem_digit(a: &BigUint, b: BigDigit) -> BigDigit {
    assert!(b != 0, "attempt to divide by zero");

    let mut rem: u64 = 0;
    for &d in a.data.iter().rev() {
        rem = (rem << big_digit::BITS | u64::from(d)) % u64::from(b);
    }
    rem as BigDigit
}

pub(crate) fn div_rem(u: BigUint, d: &BigUint) -> (BigUint, BigUint) {
    if d.is_zero() {
        panic!("attempt to divide by zero");
    }
    if u.is_zero() {
        return (BigUint::zero(), BigUint::zero());
    }
    if d.data.len() == 1 {
        if d.data == [1] {
            return (u, BigUint::zero());
        }
        let (q, rem) = div_rem_digit(u, d.data[0]);
        return (q, BigUint::from(rem));
    }

    // Required or the q_len calculation below can underflow.
    match u.cmp(d) {
        Less => return (BigUint::zero(), u),
        Equal => return (BigUint::one(), BigUint::zero()),
        Greater => {}
    }

    // Knuth Algorithm D.
    //
    // First normalize so the highest bit of the divisor's top limb is set:
    // quotient digits are guessed from that limb, and the guesses are only
    // within 2 of the true digit once it is at least BASE/2.
    let shift = d.data.last().unwrap().leading_zeros() as usize;
    let mut a = u << shift;
    let b = d << shift;

    // Each round guesses a quotient chunk q0 from the top limbs of the
    // remaining dividend and the divisor's top limb. The guess can only be
    // high, so it is corrected downward while q0 * b overshoots, then
    // q0 * b is subtracted out and q0 accumulated into the quotient.
    let bn = *b.data.last().unwrap();
    let q_len = a.data.len() - b.data.len() + 1;
    let mut q = BigUint { data: vec![0; q_len] };

    for j in (0..q_len).rev() {
        // The guess for quotient digit j only needs the dividend limbs at and
        // above j + b.len() - 1; the product q0 * bn is zero below that.
        let offset = j + b.data.len() - 1;
        if offset >= a.data.len() {
            continue;
        }

        let a0 = BigUint::from_slice(&a.data[offset..]);

        let (mut q0, _) = div_rem_digit(a0, bn);
        let mut prod = &b * &q0;

        while cmp_slice(&prod.data, &a.data[j..]) == Greater {
            q0 -= BigUint::one();
            prod -= &b;
        }

        add2(&mut q.data[j..], &q0.data);
        sub2(&mut a.data[j..], &prod.data);
        a.normalize();
    }

    debug_assert!(a < b);

    // Undo the normalization shift on the remainder.
    (q.normalized(), a >> shift)
}

/// Borrowing wrapper around [`div_rem`].
pub(crate) fn div_rem_ref(u: &BigUint, d: &BigUint) -> (BigUint, BigUint) {
    div_rem(u.clone(), d)
}

impl Div<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn div(self, other: &BigUint) -> BigUint {
        div_rem(self, other).0
    }
}

forward_binop!(impl Div for BigUint, div);

impl DivAssign<&BigUint> for BigUint {
    #[inline]
    fn div_assign(&mut self, other: &BigUint) {
        *self = core::mem::take(self) / other;
    }
}

forward_assign!(impl DivAssign for BigUint, div_assign);

impl Rem<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn rem(self, other: &BigUint) -> BigUint {
        div_rem(self, other).1
    }
}

forward_binop!(impl Rem for BigUint, rem);

impl RemAssign<&BigUint> for BigUint {
    #[inline]
    fn rem_assign(&mut self, other: &BigUint) {
        *self = core::mem::take(self) % other;
    }
}

forward_assign!(impl RemAssign for BigUint, rem_assign);
