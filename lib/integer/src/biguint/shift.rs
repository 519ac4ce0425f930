//! Magnitude shifts across limb boundaries.

use core::iter::repeat;
use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use num_traits::Zero;

use crate::big_digit::{self, BigDigit};
use crate::biguint::BigUint;

pub(crate) fn biguint_shl(n: &BigUint, bits: usize) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let n_unit = bits / big_digit::BITS as usize;
    let mut data: alloc::vec::Vec<BigDigit> =
        alloc::vec::Vec::with_capacity(n_unit + n.data.len() + 1);
    data.extend(repeat(0).take(n_unit));
    data.extend_from_slice(&n.data);

    let n_bits = bits % big_digit::BITS as usize;
    if n_bits > 0 {
        let mut carry = 0;
        for elem in data[n_unit..].iter_mut() {
            let new_carry = *elem >> (big_digit::BITS as usize - n_bits);
            *elem = (*elem << n_bits) | carry;
            carry = new_carry;
        }
        if carry != 0 {
            data.push(carry);
        }
    }

    BigUint::new(data)
}

pub(crate) fn biguint_shr(n: &BigUint, bits: usize) -> BigUint {
    let n_unit = bits / big_digit::BITS as usize;
    if n_unit >= n.data.len() {
        return BigUint::zero();
    }
    let mut data = n.data[n_unit..].to_vec();

    let n_bits = bits % big_digit::BITS as usize;
    if n_bits > 0 {
        let mut borrow = 0;
        for elem in data.iter_mut().rev() {
            let new_borrow = *elem << (big_digit::BITS as usize - n_bits);
            *elem = (*elem >> n_bits) | borrow;
            borrow = new_borrow;
        }
    }

    BigUint::new(data)
}

impl Shl<usize> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn shl(self, rhs: usize) -> BigUint {
        biguint_shl(self, rhs)
    }
}

impl Shl<usize> for BigUint {
    type Output = BigUint;

    #[inline]
    fn shl(self, rhs: usize) -> BigUint {
        biguint_shl(&self, rhs)
    }
}

impl ShlAssign<usize> for BigUint {
    #[inline]
    fn shl_assign(&mut self, rhs: usize) {
        *self = biguint_shl(self, rhs);
    }
}

impl Shr<usize> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn shr(self, rhs: usize) -> BigUint {
        biguint_shr(self, rhs)
    }
}

impl Shr<usize> for BigUint {
    type Output = BigUint;

    #[inline]
    fn shr(self, rhs: usize) -> BigUint {
        biguint_shr(&self, rhs)
    }
}

impl ShrAssign<usize> for BigUint {
    #[inline]
    fn shr_assign(&mut self, rhs: usize) {
        *self = biguint_shr(self, rhs);
    }
}

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use super::super::BigUint;

    #[test]
    fn shift_left_crosses_limb_boundary() {
        let one = BigUint::one();
        let shifted = &one << 33;
        assert_eq!(shifted.data, [0, 2]);
        assert_eq!(&one << 64, BigUint::new(vec![0, 0, 1]));
    }

    #[test]
    fn shift_right_discards_low_bits() {
        let n = BigUint::new(vec![0b101, 0b11]);
        assert_eq!(&n >> 1, BigUint::new(vec![0x8000_0002, 0b1]));
        assert_eq!(&n >> 33, BigUint::from(1u32));
        assert!((&n >> 64).is_zero());
    }

    #[test]
    fn whole_limb_shifts() {
        let n = BigUint::new(vec![7, 9]);
        assert_eq!(&n << 32, BigUint::new(vec![0, 7, 9]));
        assert_eq!(&n >> 32, BigUint::from(9u32));
    }

    proptest! {
        #[test]
        fn shl_then_shr_roundtrips(data in proptest::collection::vec(any::<u32>(), 0..8),
                                   shift in 0usize..200) {
            let n = BigUint::new(data);
            prop_assert_eq!((&n << shift) >> shift, n);
        }
    }
}
