//! Probabilistic primality testing.
//!
//! Candidates are first screened by trial division against a table of small
//! primes, then subjected to Miller-Rabin rounds. Witnesses come from a
//! generator seeded by the candidate itself, so the verdict for a given
//! value is reproducible.

#![cfg(feature = "prime")]

use num_integer::Integer;
use num_traits::{One, Zero};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::bigint::{BigInt, Sign};
use crate::bigrand::RandBigInt;
use crate::biguint::division::rem_digit;
use crate::biguint::BigUint;

/// Small primes for the trial-division pre-filter.
pub(crate) const SMALL_PRIMES: [u32; 64] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311,
];

/// Reports whether `n` is probably prime, with a false-positive probability
/// of at most `2^-certainty`.
///
/// A `certainty` of zero makes no claim and returns `true` for every input.
#[must_use]
pub fn probably_prime(n: &BigUint, certainty: u32) -> bool {
    if certainty == 0 {
        return true;
    }
    if n.is_zero() || n.is_one() {
        return false;
    }

    for &p in &SMALL_PRIMES {
        if rem_digit(n, p) == 0 {
            return *n == BigUint::from(p);
        }
    }

    // Each Miller-Rabin round keeps a composite alive with probability at
    // most 1/4.
    let rounds = certainty.div_ceil(2);
    miller_rabin(n, rounds)
}

/// A witness generator seeded from the candidate's low bytes, so repeated
/// queries on the same value test the same witnesses.
fn witness_rng(n: &BigUint) -> XorShiftRng {
    let bytes = n.to_bytes_le();
    let mut seed = [0u8; 16];
    for (s, b) in seed.iter_mut().zip(bytes.iter()) {
        *s = *b;
    }
    XorShiftRng::from_seed(seed)
}

/// Miller-Rabin with `rounds` witnesses; the first is always 2.
///
/// The candidate must be odd and free of factors from [`SMALL_PRIMES`].
fn miller_rabin(n: &BigUint, rounds: u32) -> bool {
    debug_assert!(n.is_odd());

    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let nm1 = n - &one;
    // n - 1 = d * 2^s with d odd.
    let s = nm1.trailing_zeros().unwrap();
    let d = &nm1 >> s as usize;
    // Witness range is [2, n - 2].
    let nm3 = n - BigUint::from(3u32);

    let mut rng = witness_rng(n);

    'witness: for round in 0..rounds {
        let a = if round == 0 {
            two.clone()
        } else {
            rng.gen_biguint_below(&nm3) + &two
        };

        let mut x = a.modpow(&d, n);
        if x == one || x == nm1 {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == nm1 {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}

impl BigUint {
    /// Reports whether the value is probably prime; see [`probably_prime`].
    #[must_use]
    pub fn is_probable_prime(&self, certainty: u32) -> bool {
        probably_prime(self, certainty)
    }
}

impl BigInt {
    /// Reports whether the value is probably prime, with a false-positive
    /// probability of at most `2^-certainty`.
    ///
    /// Negative values and zero are never prime; a `certainty` of zero makes
    /// no claim and returns `true`.
    #[must_use]
    pub fn is_probable_prime(&self, certainty: u32) -> bool {
        if certainty == 0 {
            return true;
        }
        if self.sign() == Sign::Minus {
            return false;
        }
        probably_prime(self.magnitude(), certainty)
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::probably_prime;
    use crate::bigint::BigInt;
    use crate::biguint::BigUint;

    fn is_prime_by_trial_division(n: u32) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    #[test]
    fn agrees_with_trial_division_below_1000() {
        for n in 0u32..1000 {
            assert_eq!(
                probably_prime(&BigUint::from(n), 17),
                is_prime_by_trial_division(n),
                "disagreement at {n}"
            );
        }
    }

    #[test]
    fn classifies_edge_inputs() {
        assert!(!probably_prime(&BigUint::zero(), 17));
        assert!(!probably_prime(&BigUint::from(1u32), 17));
        assert!(probably_prime(&BigUint::from(2u32), 17));
        assert!(!BigInt::from(-7).is_probable_prime(17));
        assert!(BigInt::from(-7).is_probable_prime(0));
        assert!(BigInt::from(2).is_probable_prime(17));
    }

    #[test]
    fn rejects_small_semiprime() {
        assert!(!BigInt::from(17 * 13).is_probable_prime(17));
    }

    #[test]
    fn known_large_prime_and_composite() {
        // 2^89 - 1 is a Mersenne prime.
        let p = (BigUint::from(1u32) << 89) - BigUint::from(1u32);
        assert!(probably_prime(&p, 30));
        // 2^67 - 1 = 193707721 * 761838257287.
        let c = (BigUint::from(1u32) << 67) - BigUint::from(1u32);
        assert!(!probably_prime(&c, 30));
    }

    #[test]
    fn carmichael_numbers_are_rejected() {
        for n in [561u32, 1105, 1729, 2465, 2821, 6601, 8911] {
            assert!(!probably_prime(&BigUint::from(n), 20), "carmichael {n}");
        }
    }
}
