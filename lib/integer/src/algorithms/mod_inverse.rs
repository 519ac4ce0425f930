//! Modular multiplicative inverse.

use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::algorithms::extended_gcd;
use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

/// Computes the inverse of `g` modulo `m`, in `[0, m)`.
///
/// Returns `None` when `gcd(g, m) != 1`, for any positive `m` regardless of
/// parity.
///
/// # Panics
///
/// Panics if `m` is zero.
pub(crate) fn mod_inverse(g: &BigUint, m: &BigUint) -> Option<BigUint> {
    assert!(!m.is_zero(), "attempt to invert with zero modulus");

    let reduced = g % m;
    let (gcd, x, _) = extended_gcd(&reduced, m);
    if !gcd.is_one() {
        return None;
    }

    // Lift the Bezout coefficient into [0, m).
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let inv = x.mod_floor(&modulus);
    debug_assert!(!inv.is_negative());
    Some(inv.into_parts().1)
}
