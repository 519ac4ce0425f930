/*!
Arbitrary-precision signed integer arithmetic.

Two value types cover the whole surface:

- [`BigUint`] — an unbounded unsigned magnitude, stored as little-endian
  32-bit limbs.
- [`BigInt`] — a sign paired with a [`BigUint`] magnitude.

Both are immutable values: every operation returns a fresh instance, and a
published instance is safe to share across threads for reading.

Arithmetic goes through the standard operator traits, integer semantics
(`div_rem`, `mod_floor`, `gcd`, parity) through [`num_integer::Integer`],
and numeric conversions through [`num_traits`]. Division truncates toward
zero and the remainder takes the dividend's sign, exactly like the machine
integer types; `mod_floor` with a positive modulus is the Euclidean
reduction into `[0, modulus)`.

```
use exactnum_integer::BigInt;
use num_integer::Integer;

let a: BigInt = "-10000000000000000000000000000000000".parse().unwrap();
let b = BigInt::from(3u32);
let (q, r) = a.div_rem(&b);
assert_eq!(q * b + r, a);
```

Optional cargo features: `rand` (random values via [`RandBigInt`]), `prime`
(probabilistic primality testing and [`RandPrime`]), `zeroize` (secret
hygiene), `std` (on by default; the crate is `no_std + alloc` without it).
*/

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

use core::fmt;

#[macro_use]
mod macros;

pub(crate) mod algorithms;
mod big_digit;
pub mod bigint;
#[cfg(feature = "rand")]
pub mod bigrand;
pub mod biguint;
#[cfg(feature = "prime")]
pub mod prime;
pub mod traits;

pub use crate::bigint::{BigInt, Sign};
#[cfg(feature = "rand")]
pub use crate::bigrand::RandBigInt;
#[cfg(all(feature = "rand", feature = "prime"))]
pub use crate::bigrand::RandPrime;
pub use crate::biguint::BigUint;
pub use crate::traits::{ExtendedGcd, ModInverse};

/// An error which can be returned when parsing a big integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigIntError {
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseErrorKind {
    Empty,
    InvalidDigit,
}

impl ParseBigIntError {
    pub(crate) fn empty() -> ParseBigIntError {
        ParseBigIntError { kind: ParseErrorKind::Empty }
    }

    pub(crate) fn invalid_digit() -> ParseBigIntError {
        ParseBigIntError { kind: ParseErrorKind::InvalidDigit }
    }
}

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Empty => f.write_str("cannot parse integer from empty string"),
            ParseErrorKind::InvalidDigit => f.write_str("invalid digit found in string"),
        }
    }
}

impl core::error::Error for ParseBigIntError {}

/// The error type returned when a checked conversion from a big integer to
/// a fixed-width type fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFromBigIntError {
    _priv: (),
}

impl TryFromBigIntError {
    pub(crate) fn new() -> TryFromBigIntError {
        TryFromBigIntError { _priv: () }
    }
}

impl fmt::Display for TryFromBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("out of range conversion regarding big integer attempted")
    }
}

impl core::error::Error for TryFromBigIntError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use num_integer::Integer;
    use num_traits::{Num, One, Signed, Zero};
    use proptest::prelude::*;

    use super::{BigInt, BigUint, Sign};

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    // Cross-module identities from the public surface.

    #[test]
    fn parse_binary_scenario() {
        let a: BigInt = BigInt::from_str_radix("-101010101", 2).unwrap();
        let b: BigInt = "-341".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_hex_shift_scenario() {
        let a = BigUint::from_str_radix("8000000000000000", 16).unwrap();
        assert_eq!(a, BigUint::one() << 63);
    }

    #[test]
    fn division_reconstruction_scenario() {
        let a: BigInt = "100000000000000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        let b = int(3);
        let (q, r) = a.div_rem(&b);
        assert_eq!(q * &b + r, a);
    }

    #[test]
    fn gcd_scenarios() {
        assert_eq!(int(0).gcd(&int(0)), int(0));
        assert_eq!(int(0).gcd(&int(5)), int(5));
        assert_eq!(int(12).gcd(&int(18)), int(6));
        assert_eq!(int(-12).gcd(&int(18)), int(6));
    }

    #[test]
    fn empty_magnitude_andnot_zero() {
        let degenerate = BigInt::from_bytes_be(Sign::NoSign, &[]);
        assert_eq!(degenerate.and_not(&BigInt::zero()), BigInt::zero());
    }

    #[test]
    fn shift_left_one_is_multiply_by_two() {
        let x: BigInt = "-98765432109876543210".parse().unwrap();
        assert_eq!(&x << 1, &x * int(2));
    }

    #[test]
    fn set_then_test_bit_from_zero() {
        for i in [0u64, 1, 31, 32, 200] {
            let mut n = BigInt::zero();
            n.set_bit(i);
            assert!(n.bit(i));
            assert!(!n.bit(i + 1));
        }
    }

    #[test]
    fn display_round_trips() {
        let s = "-12345678901234567890123456789012345678901234567890";
        let n: BigInt = s.parse().unwrap();
        assert_eq!(n.to_string(), s);
    }

    proptest! {
        #[test]
        fn add_sub_round_trip(a in any::<i128>(), b in any::<i128>()) {
            let (x, y) = (BigInt::from(a), BigInt::from(b));
            prop_assert_eq!((&x + &y) - &y, x);
        }

        #[test]
        fn multiplication_commutes(a in any::<i128>(), b in any::<i128>()) {
            let (x, y) = (BigInt::from(a), BigInt::from(b));
            prop_assert_eq!(&x * &y, &y * &x);
        }

        #[test]
        fn double_negation(a in any::<i128>()) {
            let x = BigInt::from(a);
            prop_assert_eq!(-(-x.clone()), x);
        }

        #[test]
        fn division_reconstructs(a in any::<i128>(), b in any::<i128>()) {
            prop_assume!(b != 0);
            let (x, y) = (BigInt::from(a), BigInt::from(b));
            let (q, r) = x.div_rem(&y);
            // Remainder carries the dividend's sign and is smaller than the
            // divisor in magnitude.
            prop_assert!(r.is_zero() || r.sign() == x.sign());
            prop_assert!(r.abs() < y.abs());
            prop_assert_eq!(q * y + r, x);
        }

        #[test]
        fn mod_floor_is_in_range(a in any::<i128>(), m in 1i128..) {
            let (x, modulus) = (BigInt::from(a), BigInt::from(m));
            let r = x.mod_floor(&modulus);
            prop_assert!(!r.is_negative());
            prop_assert!(r < modulus);
        }

        #[test]
        fn parse_round_trips_radix(a in any::<i128>(), radix in 2u32..=36) {
            let x = BigInt::from(a);
            let s = x.to_str_radix(radix);
            prop_assert_eq!(BigInt::from_str_radix(&s, radix).unwrap(), x);
        }

        #[test]
        fn modpow_matches_pow_then_mod(a in -50i64..50, e in 0u32..12, m in 1i64..10_000) {
            let base = BigInt::from(a);
            let modulus = BigInt::from(m);
            let direct = base.pow(e).mod_floor(&modulus);
            let fast = base.modpow(&BigInt::from(e), &modulus);
            prop_assert_eq!(direct, fast);
        }
    }

    #[cfg(feature = "prime")]
    #[test]
    fn modinv_identity_with_random_primes() {
        use crate::{ModInverse, RandBigInt};
        use rand::SeedableRng;
        let mut rng = rand_xorshift::XorShiftRng::from_seed([42u8; 16]);

        // A fixed large prime modulus; all smaller positive values are
        // invertible.
        let p: BigInt = "2305843009213693951".parse().unwrap(); // 2^61 - 1
        for _ in 0..20 {
            let a = BigInt::from(rng.gen_biguint(60)) + BigInt::one();
            let inv = (&a).mod_inverse(&p).unwrap();
            assert!(!inv.is_negative() && inv < p);
            assert_eq!((&a * inv).mod_floor(&p), BigInt::one());
        }
    }
}
