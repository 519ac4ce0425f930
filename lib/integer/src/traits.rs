//! Extension traits for modular arithmetic.

use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::algorithms;
use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

/// Modular multiplicative inverse.
///
/// Returns `None` if the inverse does not exist, i.e. `gcd(self, m) != 1`.
pub trait ModInverse<R: Sized>: Sized {
    /// The output type of the modular inverse.
    type Output: Sized;

    /// Returns the inverse of `self` modulo `m`, in `[0, m)`, or `None` if
    /// it does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is not positive.
    fn mod_inverse(self, m: R) -> Option<Self::Output>;
}

/// The extended Euclidean algorithm.
pub trait ExtendedGcd<R: Sized>: Sized {
    /// Returns `(gcd, x, y)` such that `self * x + other * y = gcd`.
    fn extended_gcd(self, other: R) -> (BigInt, BigInt, BigInt);
}

impl ModInverse<&BigUint> for &BigUint {
    type Output = BigUint;

    fn mod_inverse(self, m: &BigUint) -> Option<BigUint> {
        assert!(!m.is_zero(), "modulus must be positive");
        algorithms::mod_inverse(self, m)
    }
}

impl ModInverse<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        assert!(m.is_positive(), "modulus must be positive");
        // Reduce a negative base into [0, m) first.
        let reduced = self.mod_floor(m);
        let inv = algorithms::mod_inverse(reduced.magnitude(), m.magnitude())?;
        Some(BigInt::from(inv))
    }
}

impl ModInverse<BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        (&self).mod_inverse(&m)
    }
}

impl ModInverse<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        (&self).mod_inverse(m)
    }
}

impl ExtendedGcd<&BigUint> for &BigUint {
    fn extended_gcd(self, other: &BigUint) -> (BigInt, BigInt, BigInt) {
        let (g, x, y) = algorithms::extended_gcd(self, other);
        (BigInt::from(g), x, y)
    }
}

impl ExtendedGcd<&BigInt> for &BigInt {
    fn extended_gcd(self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        let (g, mut x, mut y) = algorithms::extended_gcd(self.magnitude(), other.magnitude());
        // Fold the operand signs into the coefficients.
        if self.sign() == Sign::Minus {
            x = -x;
        }
        if other.sign() == Sign::Minus {
            y = -y;
        }
        (BigInt::from(g), x, y)
    }
}
