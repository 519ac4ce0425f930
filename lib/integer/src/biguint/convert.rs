//! Conversions between magnitudes and bytes, strings and machine integers.

use alloc::string::String;
use alloc::vec::Vec;

use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::big_digit::{self, BigDigit};
use crate::biguint::addition::__add2;
use crate::biguint::division::div_rem_digit;
use crate::biguint::multiplication::scalar_mul;
use crate::biguint::BigUint;
use crate::ParseBigIntError;

impl BigUint {
    /// Creates a value from big-endian magnitude bytes.
    #[must_use]
    pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        BigUint::from_bytes_le(&reversed)
    }

    /// Creates a value from little-endian magnitude bytes.
    #[must_use]
    pub fn from_bytes_le(bytes: &[u8]) -> BigUint {
        let mut data = Vec::with_capacity(bytes.len().div_ceil(4));
        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            data.push(BigDigit::from_le_bytes(chunk.try_into().unwrap()));
        }
        let rem = chunks.remainder();
        if !rem.is_empty() {
            let mut buf = [0u8; 4];
            buf[..rem.len()].copy_from_slice(rem);
            data.push(BigDigit::from_le_bytes(buf));
        }
        BigUint::new(data)
    }

    /// Returns the magnitude as big-endian bytes with no leading zero byte.
    ///
    /// Zero is encoded as a single `0x00` byte.
    #[must_use]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.to_bytes_le();
        bytes.reverse();
        bytes
    }

    /// Returns the magnitude as little-endian bytes with no trailing zero
    /// byte.
    ///
    /// Zero is encoded as a single `0x00` byte.
    #[must_use]
    pub fn to_bytes_le(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![0];
        }
        let mut bytes: Vec<u8> =
            self.data.iter().flat_map(|d| d.to_le_bytes()).collect();
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        bytes
    }
}

/// The largest power of `radix` that fits in one limb, and its exponent.
fn radix_chunk(radix: u32) -> (BigDigit, usize) {
    debug_assert!((2..=36).contains(&radix));
    let mut base: u64 = u64::from(radix);
    let mut len = 1;
    while base * u64::from(radix) < big_digit::BASE {
        base *= u64::from(radix);
        len += 1;
    }
    (base as BigDigit, len)
}

/// `n = n * mul + add` for limb-sized `mul` and `add`.
fn mul_add_digit(n: &mut BigUint, mul: BigDigit, add: BigDigit) {
    let carry = scalar_mul(&mut n.data, mul);
    if carry != 0 {
        n.data.push(carry);
    }
    if add != 0 {
        if n.data.is_empty() {
            n.data.push(add);
        } else {
            let carry = __add2(&mut n.data, &[add]);
            if carry != 0 {
                n.data.push(carry);
            }
        }
    }
}

pub(crate) fn from_str_radix(s: &str, radix: u32) -> Result<BigUint, ParseBigIntError> {
    assert!((2..=36).contains(&radix), "radix must be within 2..=36");

    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return Err(ParseBigIntError::empty());
    }

    let mut digits = Vec::with_capacity(s.len());
    for b in s.bytes() {
        match char::from(b).to_digit(radix) {
            Some(d) => digits.push(d as BigDigit),
            None => return Err(ParseBigIntError::invalid_digit()),
        }
    }

    // Fold most-significant-first chunks of digits, each chunk small enough
    // that `radix^chunk` fits in one limb.
    let (_, chunk_len) = radix_chunk(radix);
    let mut result = BigUint::zero();
    let first = digits.len() % chunk_len;
    let (head, tail) = digits.split_at(first);
    for chunk in core::iter::once(head).chain(tail.chunks(chunk_len)) {
        if chunk.is_empty() {
            continue;
        }
        let mut chunk_value: BigDigit = 0;
        for &d in chunk {
            chunk_value = chunk_value * radix + d;
        }
        mul_add_digit(&mut result, radix.pow(chunk.len() as u32), chunk_value);
    }
    Ok(result)
}

pub(crate) fn to_str_radix(u: &BigUint, radix: u32) -> String {
    assert!((2..=36).contains(&radix), "radix must be within 2..=36");

    if u.is_zero() {
        return String::from("0");
    }

    let (big_base, chunk_len) = radix_chunk(radix);
    let mut digits: Vec<u32> = Vec::new();
    let mut n = u.clone();
    while !n.is_zero() {
        let (q, mut r) = div_rem_digit(n, big_base);
        n = q;
        if n.is_zero() {
            // Most significant chunk: no leading-zero padding.
            while r != 0 {
                digits.push(r % radix);
                r /= radix;
            }
        } else {
            for _ in 0..chunk_len {
                digits.push(r % radix);
                r /= radix;
            }
        }
    }

    digits
        .iter()
        .rev()
        .map(|&d| char::from_digit(d, radix).unwrap())
        .collect()
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigUint {
                #[inline]
                fn from(n: $t) -> BigUint {
                    let mut data = Vec::new();
                    let mut n = u128::from(n);
                    while n != 0 {
                        data.push(n as BigDigit);
                        n >>= big_digit::BITS;
                    }
                    BigUint { data }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128);

impl From<usize> for BigUint {
    #[inline]
    fn from(n: usize) -> BigUint {
        BigUint::from(n as u64)
    }
}

impl ToPrimitive for BigUint {
    fn to_u64(&self) -> Option<u64> {
        if self.data.len() > 2 {
            return None;
        }
        let mut value: u64 = 0;
        for &d in self.data.iter().rev() {
            value = (value << big_digit::BITS) | u64::from(d);
        }
        Some(value)
    }

    fn to_i64(&self) -> Option<i64> {
        self.to_u64().and_then(|n| i64::try_from(n).ok())
    }

    fn to_u128(&self) -> Option<u128> {
        if self.data.len() > 4 {
            return None;
        }
        let mut value: u128 = 0;
        for &d in self.data.iter().rev() {
            value = (value << big_digit::BITS) | u128::from(d);
        }
        Some(value)
    }

    fn to_i128(&self) -> Option<i128> {
        self.to_u128().and_then(|n| i128::try_from(n).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        // Folding most-significant-first rounds once per limb and overflows
        // cleanly to infinity, matching the documented conversion contract.
        let mut value = 0.0f64;
        for &d in self.data.iter().rev() {
            value = value * (big_digit::BASE as f64) + f64::from(d);
        }
        Some(value)
    }

    fn to_f32(&self) -> Option<f32> {
        self.to_f64().map(|f| f as f32)
    }
}

impl FromPrimitive for BigUint {
    fn from_i64(n: i64) -> Option<BigUint> {
        u64::try_from(n).ok().map(BigUint::from)
    }

    fn from_u64(n: u64) -> Option<BigUint> {
        Some(BigUint::from(n))
    }

    fn from_i128(n: i128) -> Option<BigUint> {
        u128::try_from(n).ok().map(BigUint::from)
    }

    fn from_u128(n: u128) -> Option<BigUint> {
        Some(BigUint::from(n))
    }
}
