//! Signed arbitrary-precision integers.

use alloc::string::String;
use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use core::str::FromStr;

use num_integer::Integer;
use num_traits::{Num, One, Signed, Zero};

use crate::algorithms;
use crate::biguint::BigUint;
use crate::ParseBigIntError;

pub(crate) mod bits;
pub(crate) mod convert;
pub(crate) mod shift;

/// The sign of a [`BigInt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    /// Negative value.
    Minus,
    /// Zero.
    NoSign,
    /// Positive value.
    Plus,
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::NoSign => Sign::NoSign,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl Mul<Sign> for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::NoSign, _) | (_, Sign::NoSign) => Sign::NoSign,
            (Sign::Plus, Sign::Plus) | (Sign::Minus, Sign::Minus) => Sign::Plus,
            (Sign::Plus, Sign::Minus) | (Sign::Minus, Sign::Plus) => Sign::Minus,
        }
    }
}

/// A signed integer of unbounded magnitude, stored as a sign paired with a
/// [`BigUint`] magnitude.
///
/// The sign is [`Sign::NoSign`] if and only if the magnitude is zero.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub(crate) sign: Sign,
    pub(crate) data: BigUint,
}

impl Default for BigInt {
    #[inline]
    fn default() -> BigInt {
        BigInt::zero()
    }
}

impl BigInt {
    /// Creates a [`BigInt`] from a sign and a magnitude.
    ///
    /// A zero magnitude canonicalizes the sign to [`Sign::NoSign`].
    ///
    /// # Panics
    ///
    /// Panics if [`Sign::NoSign`] is paired with a nonzero magnitude.
    #[must_use]
    pub fn from_biguint(sign: Sign, data: BigUint) -> BigInt {
        if data.is_zero() {
            return BigInt { sign: Sign::NoSign, data };
        }
        assert!(
            sign != Sign::NoSign,
            "sign-magnitude mismatch: NoSign with a nonzero magnitude"
        );
        BigInt { sign, data }
    }

    /// Creates a [`BigInt`] from a sign and little-endian 32-bit digits.
    #[must_use]
    pub fn new(sign: Sign, digits: alloc::vec::Vec<u32>) -> BigInt {
        BigInt::from_biguint(sign, BigUint::new(digits))
    }

    /// Returns the sign of the value.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the magnitude of the value.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> &BigUint {
        &self.data
    }

    /// Splits the value into its sign and magnitude.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Sign, BigUint) {
        (self.sign, self.data)
    }

    /// Converts to a [`BigUint`], if the value is not negative.
    #[must_use]
    pub fn to_biguint(&self) -> Option<BigUint> {
        match self.sign {
            Sign::Minus => None,
            _ => Some(self.data.clone()),
        }
    }

    /// Returns the two's-complement bit length: the highest set bit of the
    /// magnitude for positive values, of `magnitude - 1` for negative ones.
    ///
    /// Zero has length 0.
    #[must_use]
    pub fn bits(&self) -> u64 {
        match self.sign {
            Sign::NoSign => 0,
            Sign::Plus => self.data.bits(),
            Sign::Minus => {
                // bits(m - 1) differs from bits(m) only when m is a power
                // of two.
                let b = self.data.bits();
                if self.data.trailing_zeros() == Some(b - 1) {
                    b - 1
                } else {
                    b
                }
            }
        }
    }

    /// Returns the number of bits that differ from the sign bit in the
    /// two's-complement representation: set bits for a non-negative value,
    /// zero bits below the sign extension for a negative one.
    #[must_use]
    pub fn bit_count(&self) -> u64 {
        match self.sign {
            Sign::NoSign => 0,
            Sign::Plus => self.data.count_ones(),
            Sign::Minus => (&self.data - BigUint::one()).count_ones(),
        }
    }

    /// Returns the index of the lowest set bit of the two's-complement
    /// representation, or `None` for zero.
    ///
    /// A negative value shares its lowest set bit with its magnitude.
    #[must_use]
    pub fn trailing_zeros(&self) -> Option<u64> {
        self.data.trailing_zeros()
    }

    /// Checked division, returning `None` when `other` is zero.
    #[must_use]
    pub fn checked_div(&self, other: &BigInt) -> Option<BigInt> {
        if other.is_zero() {
            return None;
        }
        Some(self / other)
    }

    /// Raises the value to the power `exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> BigInt {
        let sign = if self.sign == Sign::Minus && exp & 1 == 1 {
            Sign::Minus
        } else {
            Sign::Plus
        };
        BigInt::from_biguint(sign, self.data.pow(exp))
    }

    /// Returns `self^exponent mod modulus`, in `[0, modulus)`.
    ///
    /// A negative exponent first replaces the base with its modular inverse.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is not positive, or if the exponent is negative
    /// and the base is not invertible modulo the modulus.
    #[must_use]
    pub fn modpow(&self, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        assert!(modulus.is_positive(), "modulus must be positive");

        if exponent.sign == Sign::Minus {
            let base = self.mod_floor(modulus);
            let inv = algorithms::mod_inverse(&base.data, &modulus.data)
                .expect("base is not invertible modulo the modulus");
            let result = inv.modpow(&exponent.data, &modulus.data);
            return BigInt::from_biguint(Sign::Plus, result);
        }

        let base = self.mod_floor(modulus);
        let result = base.data.modpow(&exponent.data, &modulus.data);
        BigInt::from_biguint(Sign::Plus, result)
    }

    /// Converts the value to a string in the given radix.
    ///
    /// # Panics
    ///
    /// Panics if the radix is outside `2..=36`.
    #[must_use]
    pub fn to_str_radix(&self, radix: u32) -> String {
        let mut s = String::new();
        if self.sign == Sign::Minus {
            s.push('-');
        }
        s.push_str(&self.data.to_str_radix(radix));
        s
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Equal => match self.sign {
                Sign::Plus => self.data.cmp(&other.data),
                Sign::Minus => other.data.cmp(&self.data),
                Sign::NoSign => Equal,
            },
            order => order,
        }
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zero for BigInt {
    #[inline]
    fn zero() -> BigInt {
        BigInt { sign: Sign::NoSign, data: BigUint::zero() }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.sign == Sign::NoSign
    }
}

impl One for BigInt {
    #[inline]
    fn one() -> BigInt {
        BigInt { sign: Sign::Plus, data: BigUint::one() }
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.sign == Sign::Plus && self.data.is_one()
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(mut self) -> BigInt {
        self.sign = -self.sign;
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl Add<&BigInt> for BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        match (self.sign, other.sign) {
            (_, Sign::NoSign) => self,
            (Sign::NoSign, _) => other.clone(),
            (x, y) if x == y => BigInt { sign: x, data: self.data + &other.data },
            // Opposite signs: subtract the smaller magnitude from the larger
            // and keep the larger side's sign.
            _ => match self.data.cmp(&other.data) {
                Greater => BigInt::from_biguint(self.sign, self.data - &other.data),
                Less => BigInt::from_biguint(other.sign, &other.data - self.data),
                Equal => BigInt::zero(),
            },
        }
    }
}

forward_binop!(impl Add for BigInt, add);

impl Sub<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn sub(self, other: &BigInt) -> BigInt {
        self + (-other.clone())
    }
}

forward_binop!(impl Sub for BigInt, sub);

impl Mul<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(self.sign * other.sign, self.data * &other.data)
    }
}

forward_binop!(impl Mul for BigInt, mul);

impl Div<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn div(self, other: &BigInt) -> BigInt {
        self.div_rem(other).0
    }
}

forward_binop!(impl Div for BigInt, div);

impl Rem<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn rem(self, other: &BigInt) -> BigInt {
        self.div_rem(other).1
    }
}

forward_binop!(impl Rem for BigInt, rem);

impl Signed for BigInt {
    #[inline]
    fn abs(&self) -> BigInt {
        match self.sign {
            Sign::Minus => BigInt { sign: Sign::Plus, data: self.data.clone() },
            _ => self.clone(),
        }
    }

    fn abs_sub(&self, other: &BigInt) -> BigInt {
        if self <= other {
            BigInt::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> BigInt {
        match self.sign {
            Sign::Plus => BigInt::one(),
            Sign::NoSign => BigInt::zero(),
            Sign::Minus => -BigInt::one(),
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.sign == Sign::Plus
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }
}

impl Num for BigInt {
    type FromStrRadixErr = ParseBigIntError;

    fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        convert::from_str_radix(s, radix)
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    #[inline]
    fn from_str(s: &str) -> Result<BigInt, ParseBigIntError> {
        BigInt::from_str_radix(s, 10)
    }
}

impl Integer for BigInt {
    /// Truncating division: the quotient rounds toward zero and the
    /// remainder takes the sign of the dividend.
    fn div_rem(&self, other: &BigInt) -> (BigInt, BigInt) {
        let (q, r) = self.data.div_rem(&other.data);
        (
            BigInt::from_biguint(self.sign * other.sign, q),
            BigInt::from_biguint(self.sign, r),
        )
    }

    #[inline]
    fn div_floor(&self, other: &BigInt) -> BigInt {
        self.div_mod_floor(other).0
    }

    #[inline]
    fn mod_floor(&self, other: &BigInt) -> BigInt {
        self.div_mod_floor(other).1
    }

    /// Floored division: the remainder takes the sign of the divisor, so a
    /// positive modulus always yields a result in `[0, modulus)`.
    fn div_mod_floor(&self, other: &BigInt) -> (BigInt, BigInt) {
        let (q, r) = self.div_rem(other);
        if r.is_zero() || r.sign == other.sign {
            (q, r)
        } else {
            (q - BigInt::one(), r + other)
        }
    }

    fn gcd(&self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(Sign::Plus, self.data.gcd(&other.data))
    }

    fn lcm(&self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(Sign::Plus, self.data.lcm(&other.data))
    }

    fn is_multiple_of(&self, other: &BigInt) -> bool {
        self.data.is_multiple_of(&other.data)
    }

    #[inline]
    fn is_even(&self) -> bool {
        self.data.is_even()
    }

    #[inline]
    fn is_odd(&self) -> bool {
        self.data.is_odd()
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign != Sign::Minus, "", &self.data.to_str_radix(10))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign != Sign::Minus, "0x", &self.data.to_str_radix(16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.data.to_str_radix(16);
        s.make_ascii_uppercase();
        f.pad_integral(self.sign != Sign::Minus, "0x", &s)
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign != Sign::Minus, "0o", &self.data.to_str_radix(8))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign != Sign::Minus, "0b", &self.data.to_str_radix(2))
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.sign = Sign::NoSign;
        self.data.zeroize();
    }
}
