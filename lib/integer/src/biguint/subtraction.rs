//! Magnitude subtraction with ripple borrow.

use core::ops::{Sub, SubAssign};

use crate::big_digit::{self, BigDigit};
use crate::biguint::BigUint;

/// Subtract with borrow: returns the low limb of `a - b - borrow`, storing
/// the borrow-out back into `borrow`.
#[inline]
pub(crate) fn sbb(a: BigDigit, b: BigDigit, borrow: &mut BigDigit) -> BigDigit {
    let (hi, lo) = big_digit::from_doublebigdigit(
        big_digit::BASE + u64::from(a) - u64::from(b) - u64::from(*borrow),
    );
    // hi * BASE + lo == BASE + a - b - borrow, so a - b - borrow < 0 iff hi == 0.
    *borrow = BigDigit::from(hi == 0);
    lo
}

/// `a -= b`.
///
/// # Panics
///
/// Panics if `b > a`; magnitudes cannot go negative.
pub(crate) fn sub2(a: &mut [BigDigit], b: &[BigDigit]) {
    let mut borrow = 0;

    let len = Ord::min(a.len(), b.len());
    let (a_lo, a_hi) = a.split_at_mut(len);
    let (b_lo, b_hi) = b.split_at(len);

    for (a, b) in a_lo.iter_mut().zip(b_lo) {
        *a = sbb(*a, *b, &mut borrow);
    }

    if borrow != 0 {
        for a in a_hi {
            *a = sbb(*a, 0, &mut borrow);
            if borrow == 0 {
                break;
            }
        }
    }

    assert!(
        borrow == 0 && b_hi.iter().all(|x| *x == 0),
        "Cannot subtract b from a because b is larger than a."
    );
}

impl SubAssign<&BigUint> for BigUint {
    fn sub_assign(&mut self, other: &BigUint) {
        sub2(&mut self.data, &other.data);
        self.normalize();
    }
}

forward_assign!(impl SubAssign for BigUint, sub_assign);

impl Sub<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn sub(mut self, other: &BigUint) -> BigUint {
        self -= other;
        self
    }
}

forward_binop!(impl Sub for BigUint, sub);

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};

    use super::super::BigUint;

    #[test]
    fn borrow_ripples_across_limbs() {
        let a = BigUint::new(vec![0, 0, 1]);
        let diff = a - BigUint::one();
        assert_eq!(diff.data, [u32::MAX, u32::MAX]);
    }

    #[test]
    fn subtract_to_zero_normalizes() {
        let a = BigUint::new(vec![5, 5]);
        assert!((&a - &a).is_zero());
    }

    #[test]
    #[should_panic(expected = "Cannot subtract")]
    fn underflow_panics() {
        let _ = BigUint::one() - BigUint::from(2u32);
    }
}
