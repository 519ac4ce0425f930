//! Conversions between signed values and bytes, strings and machine
//! integers.

use alloc::vec::Vec;

use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;
use crate::{ParseBigIntError, TryFromBigIntError};

impl BigInt {
    /// Creates a value from a sign and big-endian magnitude bytes.
    #[must_use]
    pub fn from_bytes_be(sign: Sign, bytes: &[u8]) -> BigInt {
        BigInt::from_biguint(sign, BigUint::from_bytes_be(bytes))
    }

    /// Creates a value from a sign and little-endian magnitude bytes.
    #[must_use]
    pub fn from_bytes_le(sign: Sign, bytes: &[u8]) -> BigInt {
        BigInt::from_biguint(sign, BigUint::from_bytes_le(bytes))
    }

    /// Creates a value from big-endian two's-complement bytes.
    ///
    /// An empty slice is zero; a set top bit means the value is negative.
    #[must_use]
    pub fn from_signed_bytes_be(bytes: &[u8]) -> BigInt {
        let mut reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        twos_complement_le_to_bigint(&mut reversed)
    }

    /// Creates a value from little-endian two's-complement bytes.
    #[must_use]
    pub fn from_signed_bytes_le(bytes: &[u8]) -> BigInt {
        let mut bytes = bytes.to_vec();
        twos_complement_le_to_bigint(&mut bytes)
    }

    /// Returns the sign and big-endian magnitude bytes.
    #[must_use]
    pub fn to_bytes_be(&self) -> (Sign, Vec<u8>) {
        (self.sign, self.data.to_bytes_be())
    }

    /// Returns the sign and little-endian magnitude bytes.
    #[must_use]
    pub fn to_bytes_le(&self) -> (Sign, Vec<u8>) {
        (self.sign, self.data.to_bytes_le())
    }

    /// Returns the minimal big-endian two's-complement encoding.
    ///
    /// Exactly one sign byte is added when the top bit would otherwise
    /// misreport the sign.
    #[must_use]
    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.to_signed_bytes_le();
        bytes.reverse();
        bytes
    }

    /// Returns the minimal little-endian two's-complement encoding.
    #[must_use]
    pub fn to_signed_bytes_le(&self) -> Vec<u8> {
        match self.sign {
            Sign::NoSign => vec![0],
            Sign::Plus => {
                let mut bytes = self.data.to_bytes_le();
                // Disambiguate from a negative encoding.
                if bytes.last().unwrap() & 0x80 != 0 {
                    bytes.push(0);
                }
                bytes
            }
            Sign::Minus => {
                let mut bytes = self.data.to_bytes_le();
                // Two's-complement negate the magnitude bytes.
                let mut carry = true;
                for b in bytes.iter_mut() {
                    *b = !*b;
                    if carry {
                        let (v, overflow) = b.overflowing_add(1);
                        *b = v;
                        carry = overflow;
                    }
                }
                // The top byte must carry the sign bit.
                if bytes.last().unwrap() & 0x80 == 0 {
                    bytes.push(0xff);
                } else {
                    // Drop redundant 0xff sign bytes: the encoding stays
                    // negative as long as the next byte keeps the top bit.
                    while bytes.len() > 1
                        && bytes[bytes.len() - 1] == 0xff
                        && bytes[bytes.len() - 2] & 0x80 != 0
                    {
                        bytes.pop();
                    }
                }
                bytes
            }
        }
    }
}

/// Interprets little-endian two's-complement bytes, consuming the buffer.
fn twos_complement_le_to_bigint(bytes: &mut [u8]) -> BigInt {
    match bytes.last() {
        None => BigInt::zero(),
        Some(&top) if top & 0x80 == 0 => {
            BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_le(bytes))
        }
        _ => {
            // Negative: negate in place to recover the magnitude.
            let mut carry = true;
            for b in bytes.iter_mut() {
                *b = !*b;
                if carry {
                    let (v, overflow) = b.overflowing_add(1);
                    *b = v;
                    carry = overflow;
                }
            }
            BigInt::from_biguint(Sign::Minus, BigUint::from_bytes_le(bytes))
        }
    }
}

pub(crate) fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
    if let Some(tail) = s.strip_prefix('-') {
        let mag = crate::biguint::convert::from_str_radix(tail, radix)?;
        if mag.is_zero() {
            return Ok(BigInt::zero());
        }
        return Ok(BigInt::from_biguint(Sign::Minus, mag));
    }
    let mag = crate::biguint::convert::from_str_radix(s, radix)?;
    if mag.is_zero() {
        return Ok(BigInt::zero());
    }
    Ok(BigInt::from_biguint(Sign::Plus, mag))
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(n: $t) -> BigInt {
                    let i = i128::from(n);
                    if i < 0 {
                        BigInt::from_biguint(Sign::Minus, BigUint::from(i.unsigned_abs()))
                    } else if i == 0 {
                        BigInt::zero()
                    } else {
                        BigInt::from_biguint(Sign::Plus, BigUint::from(i.unsigned_abs()))
                    }
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, i128);

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(n: $t) -> BigInt {
                    let mag = BigUint::from(n);
                    if mag.is_zero() {
                        BigInt::zero()
                    } else {
                        BigInt::from_biguint(Sign::Plus, mag)
                    }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<isize> for BigInt {
    #[inline]
    fn from(n: isize) -> BigInt {
        BigInt::from(n as i64)
    }
}

impl From<BigUint> for BigInt {
    fn from(mag: BigUint) -> BigInt {
        if mag.is_zero() {
            BigInt::zero()
        } else {
            BigInt::from_biguint(Sign::Plus, mag)
        }
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.data.to_u64().and_then(|n| i64::try_from(n).ok()),
            Sign::Minus => {
                let mag = self.data.to_u64()?;
                // i64::MIN has no positive counterpart; handle it directly.
                match mag.cmp(&(1u64 << 63)) {
                    core::cmp::Ordering::Greater => None,
                    core::cmp::Ordering::Equal => Some(i64::MIN),
                    core::cmp::Ordering::Less => Some(-(mag as i64)),
                }
            }
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.data.to_u64(),
            Sign::Minus => None,
        }
    }

    fn to_i128(&self) -> Option<i128> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.data.to_u128().and_then(|n| i128::try_from(n).ok()),
            Sign::Minus => {
                let mag = self.data.to_u128()?;
                match mag.cmp(&(1u128 << 127)) {
                    core::cmp::Ordering::Greater => None,
                    core::cmp::Ordering::Equal => Some(i128::MIN),
                    core::cmp::Ordering::Less => Some(-(mag as i128)),
                }
            }
        }
    }

    fn to_u128(&self) -> Option<u128> {
        match self.sign {
            Sign::NoSign => Some(0),
            Sign::Plus => self.data.to_u128(),
            Sign::Minus => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        let mag = self.data.to_f64()?;
        Some(match self.sign {
            Sign::Minus => -mag,
            _ => mag,
        })
    }

    fn to_f32(&self) -> Option<f32> {
        self.to_f64().map(|f| f as f32)
    }
}

impl FromPrimitive for BigInt {
    #[inline]
    fn from_i64(n: i64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }
}

macro_rules! impl_try_from_bigint {
    ($($t:ty, $to:ident;)*) => {
        $(
            impl TryFrom<&BigInt> for $t {
                type Error = TryFromBigIntError;

                fn try_from(value: &BigInt) -> Result<$t, TryFromBigIntError> {
                    value.$to().ok_or(TryFromBigIntError::new())
                }
            }
        )*
    };
}

impl_try_from_bigint! {
    i8, to_i8;
    i16, to_i16;
    i32, to_i32;
    i64, to_i64;
    i128, to_i128;
    u8, to_u8;
    u16, to_u16;
    u32, to_u32;
    u64, to_u64;
    u128, to_u128;
}

#[cfg(test)]
mod tests {
    use num_traits::{ToPrimitive, Zero};
    use proptest::prelude::*;

    use super::super::{BigInt, Sign};

    #[test]
    fn signed_byte_round_trips_known_values() {
        assert_eq!(BigInt::from(0).to_signed_bytes_be(), [0x00]);
        assert_eq!(BigInt::from(127).to_signed_bytes_be(), [0x7f]);
        // 128 needs a sign byte to stay positive.
        assert_eq!(BigInt::from(128).to_signed_bytes_be(), [0x00, 0x80]);
        assert_eq!(BigInt::from(-128).to_signed_bytes_be(), [0x80]);
        assert_eq!(BigInt::from(-129).to_signed_bytes_be(), [0xff, 0x7f]);
        assert_eq!(BigInt::from(-256).to_signed_bytes_be(), [0xff, 0x00]);
        assert_eq!(BigInt::from(-1).to_signed_bytes_be(), [0xff]);
    }

    #[test]
    fn signed_byte_parse_known_values() {
        assert!(BigInt::from_signed_bytes_be(&[]).is_zero());
        assert_eq!(BigInt::from_signed_bytes_be(&[0xff]), BigInt::from(-1));
        assert_eq!(BigInt::from_signed_bytes_be(&[0xff, 0x00]), BigInt::from(-256));
        assert_eq!(BigInt::from_signed_bytes_be(&[0x00, 0x80]), BigInt::from(128));
    }

    #[test]
    fn magnitude_byte_constructor() {
        let n = BigInt::from_bytes_be(Sign::Minus, &[0x01, 0x00]);
        assert_eq!(n, BigInt::from(-256));
        assert!(BigInt::from_bytes_be(Sign::Plus, &[]).is_zero());
    }

    #[test]
    fn primitive_conversion_boundaries() {
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(i64::MAX).to_i64(), Some(i64::MAX));
        assert_eq!((BigInt::from(i64::MAX) + BigInt::from(1)).to_i64(), None);
        assert_eq!((BigInt::from(i64::MIN) - BigInt::from(1)).to_i64(), None);
        assert_eq!(BigInt::from(-1).to_u64(), None);
        assert_eq!(BigInt::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(BigInt::from(-2.5f64 as i64).to_i64(), Some(-2));
    }

    #[test]
    fn try_from_reports_out_of_range() {
        let big = BigInt::from(300);
        assert!(u8::try_from(&big).is_err());
        assert_eq!(i16::try_from(&big), Ok(300i16));
        assert!(u32::try_from(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn float_conversion_signs_and_infinity() {
        assert_eq!(BigInt::from(-3).to_f64(), Some(-3.0));
        let huge = -(BigInt::from(1) << 3000usize);
        assert_eq!(huge.to_f64(), Some(f64::NEG_INFINITY));
    }

    proptest! {
        #[test]
        fn signed_bytes_round_trip(n in any::<i128>()) {
            let big = BigInt::from(n);
            let be = big.to_signed_bytes_be();
            prop_assert_eq!(BigInt::from_signed_bytes_be(&be), big.clone());
            // Minimality: matches the primitive encoding width.
            let expected: Vec<u8> = {
                let full = n.to_be_bytes();
                let mut start = 0;
                while start < 15 {
                    let b = full[start];
                    let next_top = full[start + 1] & 0x80 != 0;
                    if (b == 0x00 && !next_top) || (b == 0xff && next_top) {
                        start += 1;
                    } else {
                        break;
                    }
                }
                full[start..].to_vec()
            };
            prop_assert_eq!(be, expected);

            let le = big.to_signed_bytes_le();
            prop_assert_eq!(BigInt::from_signed_bytes_le(&le), big);
        }

        #[test]
        fn i64_round_trips(n in any::<i64>()) {
            prop_assert_eq!(BigInt::from(n).to_i64(), Some(n));
        }
    }
}
