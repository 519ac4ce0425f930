//! Signed shifts.
//!
//! Left shifts scale the magnitude. Right shifts are arithmetic: for
//! negative values they behave as floor division by `2^n`, which in
//! sign-magnitude form means rounding the magnitude up whenever any shifted
//! out bit was set.

use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use num_traits::{One, Zero};

use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

impl Shl<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: usize) -> BigInt {
        BigInt::from_biguint(self.sign, self.data << rhs)
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: usize) -> BigInt {
        self.clone() << rhs
    }
}

impl ShlAssign<usize> for BigInt {
    #[inline]
    fn shl_assign(&mut self, rhs: usize) {
        *self = core::mem::take(self) << rhs;
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, rhs: usize) -> BigInt {
        // True when the discarded low bits of a negative value are not all
        // zero, so the floor rounds away from zero.
        let round_down = self.sign == Sign::Minus
            && self.data.trailing_zeros().is_some_and(|tz| tz < rhs as u64);

        let mut shifted = &self.data >> rhs;
        if round_down {
            shifted += BigUint::one();
        }
        if shifted.is_zero() {
            return BigInt::zero();
        }
        BigInt::from_biguint(self.sign, shifted)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, rhs: usize) -> BigInt {
        self.clone() >> rhs
    }
}

impl ShrAssign<usize> for BigInt {
    #[inline]
    fn shr_assign(&mut self, rhs: usize) {
        *self = core::mem::take(self) >> rhs;
    }
}
