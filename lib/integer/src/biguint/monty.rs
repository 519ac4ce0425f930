//! Montgomery-reduction modular exponentiation for odd moduli.

use alloc::vec::Vec;

use num_integer::Integer;
use num_traits::One;

use crate::big_digit::{self, BigDigit, DoubleBigDigit};
use crate::biguint::BigUint;

/// Bits consumed per multiplication in the windowed exponentiation loop.
const WINDOW_BITS: u64 = 4;

/// Computes the inverse of an odd limb modulo `2^32` by Newton iteration;
/// each pass doubles the number of correct low bits.
fn inv_mod_digit(b: BigDigit) -> BigDigit {
    debug_assert!(b & 1 == 1);
    let mut inv: BigDigit = 1;
    for _ in 0..5 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(b.wrapping_mul(inv)));
    }
    debug_assert!(b.wrapping_mul(inv) == 1);
    inv
}

/// `z += x * y` over equal-length slices, returning the carry limb.
fn add_mul_vvw(z: &mut [BigDigit], x: &[BigDigit], y: BigDigit) -> BigDigit {
    debug_assert!(z.len() == x.len());

    let mut carry: BigDigit = 0;
    for (zi, xi) in z.iter_mut().zip(x.iter()) {
        let t = DoubleBigDigit::from(*zi)
            + DoubleBigDigit::from(*xi) * DoubleBigDigit::from(y)
            + DoubleBigDigit::from(carry);
        *zi = t as BigDigit;
        carry = (t >> big_digit::BITS) as BigDigit;
    }
    carry
}

/// `z = x - y` over equal-length slices, returning the borrow limb.
fn sub_vv(z: &mut [BigDigit], x: &[BigDigit], y: &[BigDigit]) -> BigDigit {
    debug_assert!(z.len() == x.len() && x.len() == y.len());

    let mut borrow: BigDigit = 0;
    for i in 0..z.len() {
        z[i] = crate::biguint::subtraction::sbb(x[i], y[i], &mut borrow);
    }
    borrow
}

/// One Montgomery product: returns `x * y * R^-1 mod m` where
/// `R = 2^(32 * n)`, for operands already held as `n` limbs.
///
/// `k` is `-m^-1 mod 2^32`.
fn montgomery(x: &[BigDigit], y: &[BigDigit], m: &[BigDigit], k: BigDigit, n: usize) -> Vec<BigDigit> {
    debug_assert!(x.len() == n && y.len() == n && m.len() == n);

    let mut z = vec![0; n * 2];
    let mut c: BigDigit = 0;
    for i in 0..n {
        let c2 = add_mul_vvw(&mut z[i..n + i], x, y[i]);
        let t = z[i].wrapping_mul(k);
        let c3 = add_mul_vvw(&mut z[i..n + i], m, t);
        let cx = c.wrapping_add(c2);
        let cy = cx.wrapping_add(c3);
        z[n + i] = cy;
        c = BigDigit::from(cx < c2 || cy < c3);
    }

    if c == 0 {
        z.drain(..n);
    } else {
        let (lo, hi) = z.split_at_mut(n);
        sub_vv(lo, hi, m);
        z.truncate(n);
    }
    z
}

/// Modular exponentiation by Montgomery reduction with 4-bit windows and a
/// precomputed table of the first sixteen powers.
///
/// Requires an odd `m > 1`.
pub(crate) fn monty_modpow(x: &BigUint, y: &BigUint, m: &BigUint) -> BigUint {
    debug_assert!(m.is_odd());
    debug_assert!(m.data.len() > 1 || m.data[0] > 1);

    let num_words = m.data.len();
    let k = inv_mod_digit(m.data[0]).wrapping_neg();

    // Pad the reduced base out to the modulus width.
    let mut x = x % m;
    x.data.resize(num_words, 0);

    // rr = R^2 mod m, the Montgomery form of R.
    let mut rr = BigUint::one();
    rr = (rr << (2 * num_words * big_digit::BITS as usize)) % m;
    rr.data.resize(num_words, 0);

    let mut one = BigUint::one();
    one.data.resize(num_words, 0);

    // powers[i] holds x^i in Montgomery form.
    let table_len = 1usize << WINDOW_BITS;
    let mut powers: Vec<Vec<BigDigit>> = Vec::with_capacity(table_len);
    powers.push(montgomery(&one.data, &rr.data, &m.data, k, num_words));
    powers.push(montgomery(&x.data, &rr.data, &m.data, k, num_words));
    for i in 2..table_len {
        let next = montgomery(&powers[i - 1], &powers[1], &m.data, k, num_words);
        powers.push(next);
    }

    // Scan the exponent most-significant-nibble first: four squarings then
    // one table multiplication per window.
    let mut z = powers[0].clone();
    let nibbles_per_limb = (big_digit::BITS / WINDOW_BITS) as u32;
    for (i, yi) in y.data.iter().enumerate().rev() {
        let mut yi = *yi;
        for j in 0..nibbles_per_limb {
            if i != y.data.len() - 1 || j != 0 {
                for _ in 0..WINDOW_BITS {
                    z = montgomery(&z, &z, &m.data, k, num_words);
                }
            }
            let window = (yi >> (big_digit::BITS as u32 - WINDOW_BITS as u32)) as usize;
            z = montgomery(&z, &powers[window], &m.data, k, num_words);
            yi <<= WINDOW_BITS as u32;
        }
    }

    // Leave Montgomery form and do the final reduction.
    let z = montgomery(&z, &one.data, &m.data, k, num_words);
    let mut zz = BigUint::new(z);
    if zz >= *m {
        zz -= m;
        if zz >= *m {
            zz %= m;
        }
    }
    zz
}

#[cfg(test)]
mod tests {
    use num_traits::{One, ToPrimitive};

    use super::super::BigUint;
    use super::{inv_mod_digit, monty_modpow};

    #[test]
    fn limb_inverse_is_exact() {
        for b in [1u32, 3, 5, 0xdead_beef | 1, u32::MAX] {
            assert_eq!(b.wrapping_mul(inv_mod_digit(b)), 1);
        }
    }

    #[test]
    fn matches_scalar_exponentiation() {
        let m = BigUint::new(vec![0x9424_0505, 0x0000_0011]); // odd, 2 limbs
        let base = BigUint::from(0x1234_5678u32);
        let exp = BigUint::from(1000u32);
        let got = monty_modpow(&base, &exp, &m);

        // Scalar reference, m fits in u64.
        let m64 = m.to_u64().unwrap() as u128;
        let mut want: u128 = 1;
        let mut b = 0x1234_5678u128 % m64;
        let mut e = 1000u32;
        while e > 0 {
            if e & 1 == 1 {
                want = want * b % m64;
            }
            b = b * b % m64;
            e >>= 1;
        }
        assert_eq!(got.to_u64().unwrap() as u128, want);
    }

    #[test]
    fn exponent_zero_yields_one() {
        let m = BigUint::new(vec![1, 0, 1]); // odd 3-limb modulus
        let base = BigUint::from(7u32);
        assert_eq!(monty_modpow(&base, &BigUint::from(0u32), &m), BigUint::one());
    }
}
