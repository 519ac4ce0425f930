//! Magnitude addition with ripple carry.

use core::ops::{Add, AddAssign};

use crate::big_digit::{self, BigDigit};
use crate::biguint::BigUint;

/// Add with carry: returns the low limb of `a + b + carry`, storing the
/// carry-out back into `carry`.
#[inline]
pub(crate) fn adc(a: BigDigit, b: BigDigit, carry: &mut BigDigit) -> BigDigit {
    let (hi, lo) = big_digit::from_doublebigdigit(
        u64::from(a) + u64::from(b) + u64::from(*carry),
    );
    *carry = hi;
    lo
}

/// `a += b`, returning the final carry.
///
/// Requires `a.len() >= b.len()`.
pub(crate) fn __add2(a: &mut [BigDigit], b: &[BigDigit]) -> BigDigit {
    debug_assert!(a.len() >= b.len());

    let mut carry = 0;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, *b, &mut carry);
    }

    if carry != 0 {
        for a in a_hi {
            *a = adc(*a, 0, &mut carry);
            if carry == 0 {
                break;
            }
        }
    }

    carry
}

/// `a += b`; the caller must have sized `a` so the carry cannot escape.
pub(crate) fn add2(a: &mut [BigDigit], b: &[BigDigit]) {
    let carry = __add2(a, b);

    debug_assert!(carry == 0);
}

impl AddAssign<&BigUint> for BigUint {
    fn add_assign(&mut self, other: &BigUint) {
        let self_len = self.data.len();
        let carry = if self_len < other.data.len() {
            let lo_carry = __add2(&mut self.data, &other.data[..self_len]);
            self.data.extend_from_slice(&other.data[self_len..]);
            __add2(&mut self.data[self_len..], &[lo_carry])
        } else {
            __add2(&mut self.data, &other.data)
        };
        if carry != 0 {
            self.data.push(carry);
        }
    }
}

forward_assign!(impl AddAssign for BigUint, add_assign);

impl Add<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn add(mut self, other: &BigUint) -> BigUint {
        self += other;
        self
    }
}

forward_binop!(impl Add for BigUint, add);

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};

    use super::super::BigUint;

    #[test]
    fn carry_ripples_across_limbs() {
        let a = BigUint::new(vec![u32::MAX, u32::MAX]);
        let sum = a + BigUint::one();
        assert_eq!(sum.data, [0, 0, 1]);
    }

    #[test]
    fn add_zero_is_identity() {
        let a = BigUint::new(vec![7, 9]);
        assert_eq!(&a + BigUint::zero(), a);
        assert_eq!(BigUint::zero() + &a, a);
    }

    #[test]
    fn add_extends_to_longer_operand() {
        let short = BigUint::from(3u32);
        let long = BigUint::new(vec![u32::MAX, 1, 1]);
        let sum = short + &long;
        assert_eq!(sum.data, [2, 2, 1]);
    }
}
