//! Randomization of big integers.

#![cfg(feature = "rand")]

use num_integer::Integer;
use num_traits::Zero;
use rand::Rng;

use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

/// A trait for sampling random big integers.
///
/// The `rand` feature must be enabled to use this.
pub trait RandBigInt {
    /// Generates a random [`BigUint`] of the given bit size.
    fn gen_biguint(&mut self, bit_size: u64) -> BigUint;

    /// Generates a random [`BigInt`] of the given bit size.
    fn gen_bigint(&mut self, bit_size: u64) -> BigInt;

    /// Generates a random [`BigUint`] less than the given bound.
    ///
    /// # Panics
    ///
    /// Panics when the bound is zero.
    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint;

    /// Generates a random [`BigUint`] within `[lbound, ubound)`.
    ///
    /// # Panics
    ///
    /// Panics when the range is empty.
    fn gen_biguint_range(&mut self, lbound: &BigUint, ubound: &BigUint) -> BigUint;

    /// Generates a random [`BigInt`] within `[lbound, ubound)`.
    ///
    /// # Panics
    ///
    /// Panics when the range is empty.
    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt;
}

fn gen_bits<R: Rng + ?Sized>(rng: &mut R, data: &mut [u32], rem: u64) {
    // `fill` is faster than many `random::<u32>` calls.
    rng.fill(data);
    if rem > 0 {
        let last = data.len() - 1;
        data[last] >>= 32 - rem;
    }
}

impl<R: Rng + ?Sized> RandBigInt for R {
    fn gen_biguint(&mut self, bit_size: u64) -> BigUint {
        let (digits, rem) = bit_size.div_rem(&32);
        let len = usize::try_from(digits + u64::from(rem > 0)).expect("capacity overflow");
        let mut data = vec![0u32; len];
        gen_bits(self, &mut data, rem);
        BigUint::new(data)
    }

    fn gen_bigint(&mut self, bit_size: u64) -> BigInt {
        loop {
            // Generate a random magnitude and assign it a random sign. A
            // zero magnitude is retried with probability 0.5, so zero is no
            // likelier than any other value.
            let biguint = self.gen_biguint(bit_size);
            let sign = if biguint.is_zero() {
                if self.random() {
                    continue;
                }
                Sign::NoSign
            } else if self.random() {
                Sign::Plus
            } else {
                Sign::Minus
            };
            return BigInt::from_biguint(sign, biguint);
        }
    }

    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(!bound.is_zero(), "cannot sample below zero");

        let bits = bound.bits();
        loop {
            let n = self.gen_biguint(bits);
            if n < *bound {
                return n;
            }
        }
    }

    fn gen_biguint_range(&mut self, lbound: &BigUint, ubound: &BigUint) -> BigUint {
        assert!(lbound < ubound, "empty sampling range");
        if lbound.is_zero() {
            return self.gen_biguint_below(ubound);
        }
        lbound + self.gen_biguint_below(&(ubound - lbound))
    }

    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt {
        assert!(lbound < ubound, "empty sampling range");
        let delta = (ubound - lbound).into_parts().1;
        lbound + BigInt::from(self.gen_biguint_below(&delta))
    }
}

/// A trait for generating probable primes.
///
/// Requires the `prime` feature.
#[cfg(feature = "prime")]
pub trait RandPrime {
    /// Generates a probable prime of exactly `bit_size` bits, with a
    /// false-positive probability of at most `2^-certainty`.
    ///
    /// # Panics
    ///
    /// Panics if `bit_size < 2`.
    fn gen_prime(&mut self, bit_size: u64, certainty: u32) -> BigUint;
}

#[cfg(feature = "prime")]
impl<R: Rng + ?Sized> RandPrime for R {
    fn gen_prime(&mut self, bit_size: u64, certainty: u32) -> BigUint {
        assert!(bit_size >= 2, "prime bit size must be at least 2");

        loop {
            let mut candidate = self.gen_biguint(bit_size);
            // Pin the width and make the candidate odd.
            candidate.set_bit(bit_size - 1, true);
            candidate.set_bit(0, true);
            if crate::prime::probably_prime(&candidate, certainty.max(1)) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::RandBigInt;
    use crate::biguint::BigUint;

    #[test]
    fn requested_bit_size_is_an_upper_bound() {
        let mut rng = XorShiftRng::from_seed([7u8; 16]);
        for bits in [1u64, 31, 32, 33, 200] {
            for _ in 0..20 {
                let n = rng.gen_biguint(bits);
                assert!(n.bits() <= bits);
            }
        }
        assert!(rng.gen_biguint(0).is_zero());
    }

    #[test]
    fn below_and_range_respect_bounds() {
        let mut rng = XorShiftRng::from_seed([9u8; 16]);
        let bound = BigUint::from(10_000u32);
        let low = BigUint::from(5_000u32);
        for _ in 0..100 {
            assert!(rng.gen_biguint_below(&bound) < bound);
            let r = rng.gen_biguint_range(&low, &bound);
            assert!(low <= r && r < bound);
        }
    }

    #[test]
    fn signed_range_sampling() {
        use crate::bigint::BigInt;
        let mut rng = XorShiftRng::from_seed([3u8; 16]);
        let lo = BigInt::from(-50);
        let hi = BigInt::from(7);
        for _ in 0..100 {
            let n = rng.gen_bigint_range(&lo, &hi);
            assert!(lo <= n && n < hi);
        }
    }

    #[cfg(feature = "prime")]
    #[test]
    fn generated_primes_have_exact_width() {
        use super::RandPrime;
        let mut rng = XorShiftRng::from_seed([5u8; 16]);
        let p = rng.gen_prime(64, 20);
        assert_eq!(p.bits(), 64);
        assert!(p.is_probable_prime(20));
    }
}
