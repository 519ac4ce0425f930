//! Exponentiation: plain powers and modular powers.
//!
//! Modular exponentiation splits three ways: a scalar loop for single-limb
//! moduli, Montgomery reduction for odd multi-limb moduli, and a CRT
//! recombination for even multi-limb moduli.

use num_integer::Integer;
use num_traits::{One, Zero};

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::biguint::monty::monty_modpow;
use crate::biguint::BigUint;

impl BigUint {
    /// Raises the value to the power `exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> BigUint {
        if exp == 0 {
            return BigUint::one();
        }
        if self.is_zero() {
            return BigUint::zero();
        }

        let mut base = self.clone();
        let mut result = BigUint::one();
        let mut exp = exp;
        while exp > 1 {
            if exp & 1 == 1 {
                result *= &base;
            }
            base = &base * &base;
            exp >>= 1;
        }
        result * base
    }

    /// Returns `self^exponent mod modulus`.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is zero.
    #[must_use]
    pub fn modpow(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "attempt to calculate with zero modulus");

        if modulus.is_one() {
            return BigUint::zero();
        }
        if exponent.is_zero() {
            return BigUint::one();
        }

        let base = self % modulus;
        if base.is_zero() {
            return BigUint::zero();
        }

        if modulus.data.len() == 1 {
            BigUint::from(modpow_digit(&base, exponent, modulus.data[0]))
        } else if modulus.is_odd() {
            monty_modpow(&base, exponent, modulus)
        } else {
            modpow_even(&base, exponent, modulus)
        }
    }
}

/// Square-and-multiply for a single-limb modulus, carried in 64 bits.
///
/// The base must already be reduced below the modulus.
fn modpow_digit(base: &BigUint, exponent: &BigUint, m: BigDigit) -> BigDigit {
    debug_assert!(base.data.len() <= 1);

    let m = DoubleBigDigit::from(m);
    let b = DoubleBigDigit::from(base.data.first().copied().unwrap_or(0));
    let mut result: DoubleBigDigit = 1;

    for i in (0..exponent.bits()).rev() {
        result = result * result % m;
        if exponent.bit(i) {
            result = result * b % m;
        }
    }
    result as BigDigit
}

/// Keeps the low `bits` bits of `n`.
fn trunc_pow2(mut n: BigUint, bits: usize) -> BigUint {
    let limbs = bits / big_digit::BITS as usize;
    let rem = bits % big_digit::BITS as usize;
    if n.data.len() > limbs {
        n.data.truncate(limbs + 1);
        if let Some(last) = n.data.last_mut() {
            if rem == 0 {
                n.data.pop();
            } else {
                *last &= (1 << rem) - 1;
            }
        }
    }
    n.normalized()
}

/// `base^exponent mod 2^j` by square-and-multiply with masking.
fn modpow_pow2(base: &BigUint, exponent: &BigUint, j: usize) -> BigUint {
    let mut result = BigUint::one();
    let base = trunc_pow2(base.clone(), j);
    for i in (0..exponent.bits()).rev() {
        result = trunc_pow2(&result * &result, j);
        if exponent.bit(i) {
            result = trunc_pow2(result * &base, j);
        }
    }
    result
}

/// Inverse of an odd value modulo `2^j`, by Newton iteration doubling the
/// number of correct bits each round.
fn inv_mod_pow2(q: &BigUint, j: usize) -> BigUint {
    debug_assert!(q.is_odd());

    let two = BigUint::from(2u32);
    let mut x = BigUint::one();
    let mut bits = 1;
    while bits < j {
        bits = Ord::min(bits * 2, j);
        let t = trunc_pow2(q * &x, bits);
        let s = if t <= two {
            &two - t
        } else {
            (BigUint::one() << bits) + &two - t
        };
        x = trunc_pow2(x * s, bits);
    }
    debug_assert!(trunc_pow2(q * &x, j).is_one());
    x
}

/// Even-modulus exponentiation: factor `m = q * 2^j` with `q` odd, solve
/// both halves, then recombine with the inverse of `q mod 2^j`.
fn modpow_even(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let j = modulus.trailing_zeros().unwrap() as usize;
    let q = modulus >> j;

    let x2 = modpow_pow2(base, exponent, j);
    if q.is_one() {
        return x2;
    }

    let x1 = base.modpow(exponent, &q);

    // r = x1 + q * t with t chosen so r is congruent to x2 mod 2^j;
    // x1 < q and t < 2^j keep r below the modulus.
    let qinv = inv_mod_pow2(&q, j);
    let x1_low = trunc_pow2(x1.clone(), j);
    let diff = if x2 >= x1_low {
        x2 - x1_low
    } else {
        x2 + (BigUint::one() << j) - x1_low
    };
    let t = trunc_pow2(diff * qinv, j);
    x1 + q * t
}

#[cfg(test)]
mod tests {
    use num_traits::{One, ToPrimitive, Zero};
    use proptest::prelude::*;

    use super::super::BigUint;
    use super::{inv_mod_pow2, trunc_pow2};

    #[test]
    fn pow_small_cases() {
        assert_eq!(BigUint::from(2u32).pow(10), BigUint::from(1024u32));
        assert_eq!(BigUint::from(3u32).pow(0), BigUint::one());
        assert!(BigUint::zero().pow(5).is_zero());
        assert_eq!(BigUint::zero().pow(0), BigUint::one());
    }

    #[test]
    fn pow_grows_past_limb_width() {
        let n = BigUint::from(10u32).pow(50);
        assert_eq!(n.to_str_radix(10).len(), 51);
    }

    #[test]
    #[should_panic(expected = "zero modulus")]
    fn modpow_zero_modulus_panics() {
        let _ = BigUint::from(2u32).modpow(&BigUint::from(2u32), &BigUint::zero());
    }

    #[test]
    fn trunc_masks_partial_limbs() {
        let n = BigUint::new(vec![u32::MAX, u32::MAX]);
        assert_eq!(trunc_pow2(n.clone(), 4), BigUint::from(0xfu32));
        assert_eq!(trunc_pow2(n.clone(), 33), BigUint::new(vec![u32::MAX, 1]));
        assert_eq!(trunc_pow2(n.clone(), 64), n);
        assert_eq!(trunc_pow2(n, 200), BigUint::new(vec![u32::MAX, u32::MAX]));
    }

    #[test]
    fn inverse_mod_power_of_two() {
        let q = BigUint::from(0x1234_5671u32);
        let inv = inv_mod_pow2(&q, 20);
        assert_eq!(trunc_pow2(q * inv, 20), BigUint::one());
    }

    proptest! {
        #[test]
        fn modpow_agrees_with_naive(base in 0u64..1 << 20, exp in 0u32..40, m in 2u64..1 << 20) {
            let big = BigUint::from(base).modpow(&BigUint::from(exp), &BigUint::from(m));
            // Naive reference in u128.
            let mut want: u128 = 1;
            for _ in 0..exp {
                want = want * u128::from(base) % u128::from(m);
            }
            prop_assert_eq!(big.to_u64().unwrap(), want as u64);
        }

        #[test]
        fn modpow_even_matches_pow_then_rem(base in 0u64..1000, exp in 0u32..12, m in 1u64..1 << 30) {
            // Force an even multi-limb modulus.
            let modulus = BigUint::from(m * 2) << 40;
            let big = BigUint::from(base).modpow(&BigUint::from(exp), &modulus);
            let direct = BigUint::from(base).pow(exp) % &modulus;
            prop_assert_eq!(big, direct);
        }
    }
}
