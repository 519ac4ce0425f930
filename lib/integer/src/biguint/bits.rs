//! Bitwise operations on magnitudes.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

use crate::big_digit::{self, BigDigit};
use crate::biguint::BigUint;

impl BigUint {
    /// Returns bit `bit` of the magnitude (bit 0 is least significant).
    #[must_use]
    pub fn bit(&self, bit: u64) -> bool {
        let limb = (bit / big_digit::BITS) as usize;
        match self.data.get(limb) {
            None => false,
            Some(&d) => d & (1 << (bit % big_digit::BITS)) != 0,
        }
    }

    /// Sets or clears bit `bit` of the magnitude.
    pub fn set_bit(&mut self, bit: u64, value: bool) {
        let limb = (bit / big_digit::BITS) as usize;
        let mask: BigDigit = 1 << (bit % big_digit::BITS);
        if value {
            if limb >= self.data.len() {
                self.data.resize(limb + 1, 0);
            }
            self.data[limb] |= mask;
        } else if limb < self.data.len() {
            self.data[limb] &= !mask;
            self.normalize();
        }
    }
}

impl BitAndAssign<&BigUint> for BigUint {
    fn bitand_assign(&mut self, other: &BigUint) {
        self.data.truncate(other.data.len());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a &= b;
        }
        self.normalize();
    }
}

forward_assign!(impl BitAndAssign for BigUint, bitand_assign);

impl BitAnd<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn bitand(mut self, other: &BigUint) -> BigUint {
        self &= other;
        self
    }
}

forward_binop!(impl BitAnd for BigUint, bitand);

impl BitOrAssign<&BigUint> for BigUint {
    fn bitor_assign(&mut self, other: &BigUint) {
        if self.data.len() < other.data.len() {
            self.data.resize(other.data.len(), 0);
        }
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
    }
}

forward_assign!(impl BitOrAssign for BigUint, bitor_assign);

impl BitOr<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn bitor(mut self, other: &BigUint) -> BigUint {
        self |= other;
        self
    }
}

forward_binop!(impl BitOr for BigUint, bitor);

impl BitXorAssign<&BigUint> for BigUint {
    fn bitxor_assign(&mut self, other: &BigUint) {
        if self.data.len() < other.data.len() {
            self.data.resize(other.data.len(), 0);
        }
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a ^= b;
        }
        self.normalize();
    }
}

forward_assign!(impl BitXorAssign for BigUint, bitxor_assign);

impl BitXor<&BigUint> for BigUint {
    type Output = BigUint;

    #[inline]
    fn bitxor(mut self, other: &BigUint) -> BigUint {
        self ^= other;
        self
    }
}

forward_binop!(impl BitXor for BigUint, bitxor);

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::super::BigUint;

    #[test]
    fn bit_get_and_set() {
        let mut n = BigUint::zero();
        n.set_bit(100, true);
        assert!(n.bit(100));
        assert!(!n.bit(99));
        assert!(!n.bit(101));
        assert_eq!(n.bits(), 101);

        n.set_bit(100, false);
        assert!(n.is_zero());
    }

    #[test]
    fn and_truncates_or_extends() {
        let a = BigUint::new(vec![0b1100, 0b1010]);
        let b = BigUint::new(vec![0b0110]);
        assert_eq!(&a & &b, BigUint::from(0b0100u32));
        assert_eq!(&a | &b, BigUint::new(vec![0b1110, 0b1010]));
        assert_eq!(&a ^ &a, BigUint::zero());
    }
}
