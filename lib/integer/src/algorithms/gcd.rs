//! Greatest common divisor.
//!
//! The plain GCD strips the shared power of two, then alternates between
//! binary subtract-and-shift steps while the operands are comparable in
//! size and a Euclidean remainder step when they drift far apart, finishing
//! with a machine-word loop once both fit in 64 bits.

use core::cmp::Ordering;
use core::mem;

use num_integer::Integer;
use num_traits::{One, Zero};

use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

/// Length ratio at which a Euclidean remainder step beats repeated binary
/// subtraction: roughly a 20% limb-count gap.
fn disparate(long: usize, short: usize) -> bool {
    long * 5 > short * 6
}

/// Binary GCD on machine words.
fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    let shift = (a | b).trailing_zeros();
    a >>= a.trailing_zeros();
    loop {
        b >>= b.trailing_zeros();
        if a > b {
            mem::swap(&mut a, &mut b);
        }
        b -= a;
        if b == 0 {
            return a << shift;
        }
    }
}

/// Greatest common divisor of two magnitudes. `gcd(0, 0) == 0`.
pub(crate) fn gcd(mut a: BigUint, mut b: BigUint) -> BigUint {
    if a.is_zero() {
        return b;
    }
    if b.is_zero() {
        return a;
    }

    // Factor out the shared power of two, then make both operands odd.
    let a_zeros = a.trailing_zeros().unwrap();
    let b_zeros = b.trailing_zeros().unwrap();
    let shift = Ord::min(a_zeros, b_zeros) as usize;
    a >>= a_zeros as usize;
    b >>= b_zeros as usize;

    loop {
        debug_assert!(a.is_odd() && b.is_odd());

        if a.data.len() <= 2 && b.data.len() <= 2 {
            let result = gcd_u64(to_u64(&a), to_u64(&b));
            return BigUint::from(result) << shift;
        }

        if a.data.len() < b.data.len() {
            mem::swap(&mut a, &mut b);
        }

        if disparate(a.data.len(), b.data.len()) {
            // Far apart: one remainder collapses the gap.
            let r = a % &b;
            if r.is_zero() {
                return b << shift;
            }
            a = b;
            b = r;
            let tz = b.trailing_zeros().unwrap() as usize;
            b >>= tz;
        } else {
            // Comparable: subtract and shift out the fresh factor of two.
            if a < b {
                mem::swap(&mut a, &mut b);
            }
            a -= &b;
            if a.is_zero() {
                return b << shift;
            }
            let tz = a.trailing_zeros().unwrap() as usize;
            a >>= tz;
        }
    }
}

fn to_u64(n: &BigUint) -> u64 {
    debug_assert!(n.data.len() <= 2);
    let mut value = 0u64;
    for &d in n.data.iter().rev() {
        value = (value << 32) | u64::from(d);
    }
    value
}

/// Extended Euclidean algorithm on magnitudes.
///
/// Returns `(g, x, y)` such that `a*x + b*y = g = gcd(a, b)`.
pub(crate) fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let mut old_r = BigInt::from(a.clone());
    let mut r = BigInt::from(b.clone());
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();
    let mut old_t = BigInt::zero();
    let mut t = BigInt::one();

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = r;
        r = rem;

        let new_s = &old_s - &q * &s;
        old_s = s;
        s = new_s;

        let new_t = &old_t - &q * &t;
        old_t = t;
        t = new_t;
    }

    debug_assert!(old_r.sign() != Sign::Minus);
    let (_, g) = old_r.into_parts();
    (g, old_s, old_t)
}
