/*!
Arbitrary-precision signed decimals with explicit scale.

A [`BigDecimal`] is an unscaled [`BigInt`] paired with a scale: the value is
`unscaled * 10^(-scale)`. Arithmetic is exact wherever the result is
representable; only division and explicit re-scaling round, under a caller
chosen [`RoundingMode`].

```
use exactnum_decimal::BigDecimal;

let a: BigDecimal = "1.10".parse().unwrap();
let b: BigDecimal = "2.2".parse().unwrap();
assert_eq!((a + b).to_string(), "3.30");
```

Equality and ordering are numeric: `1.0 == 1.00` even though their scales
differ.
*/

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use exactnum_integer::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

#[macro_use]
mod macros;
mod rounding;

pub use rounding::RoundingMode;

/// Extra fractional digits the `/` operator keeps beyond the operands'
/// scale difference before rounding half-even.
const DEFAULT_DIV_EXTRA_SCALE: i64 = 34;

/// An arbitrary-precision decimal: an unscaled integer and a scale.
///
/// `scale` counts digits to the right of the decimal point and may be
/// negative, in which case the value is an integer multiple of a power of
/// ten.
#[derive(Clone)]
pub struct BigDecimal {
    int_val: BigInt,
    scale: i64,
    /// Decimal digit count of the unscaled magnitude, computed on first
    /// use. Racing initializations compute the same value, so the write is
    /// idempotent.
    digits: OnceLock<u64>,
}

fn pow10(exp: u64) -> BigInt {
    BigInt::from(10u32).pow(u32::try_from(exp).expect("scale difference overflow"))
}

fn count_digits(n: &BigUint) -> u64 {
    if n.is_zero() {
        return 1;
    }
    let bits = n.bits();
    // log10(n) estimated from the bit length; at most one short, never over.
    let mut digits = ((bits - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
    let bound = BigUint::from(10u32).pow(u32::try_from(digits).expect("digit count overflow"));
    if *n >= bound {
        digits += 1;
    }
    digits
}

/// Nudges a quotient truncated toward zero one step away from zero when the
/// rounding mode asks for it.
///
/// `r` is the discarded remainder and `den` the divisor, with `sign` the
/// sign of the exact result.
fn apply_rounding(q: BigInt, r: &BigInt, den: &BigInt, mode: RoundingMode, sign: Sign) -> BigInt {
    if r.is_zero() {
        return q;
    }
    let half = (r.magnitude() << 1usize).cmp(den.magnitude());
    if !rounding::round_up(mode, sign, half, q.is_odd()) {
        return q;
    }
    match sign {
        Sign::Minus => q - BigInt::one(),
        _ => q + BigInt::one(),
    }
}

impl BigDecimal {
    /// Creates a decimal from an unscaled integer and a scale.
    #[must_use]
    pub fn new(int_val: BigInt, scale: i64) -> BigDecimal {
        BigDecimal { int_val, scale, digits: OnceLock::new() }
    }

    /// Returns the unscaled integer value.
    #[inline]
    #[must_use]
    pub fn unscaled(&self) -> &BigInt {
        &self.int_val
    }

    /// Returns the scale: the number of digits to the right of the decimal
    /// point.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Splits the decimal into its unscaled integer and scale.
    #[must_use]
    pub fn into_parts(self) -> (BigInt, i64) {
        (self.int_val, self.scale)
    }

    /// Returns the sign of the value.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.int_val.sign()
    }

    /// Returns the number of decimal digits in the unscaled magnitude.
    ///
    /// Memoized on first use; zero counts as one digit.
    #[must_use]
    pub fn digits(&self) -> u64 {
        *self.digits.get_or_init(|| count_digits(self.int_val.magnitude()))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> BigDecimal {
        BigDecimal::new(self.int_val.abs(), self.scale)
    }

    /// Reports whether the value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        if self.scale <= 0 || self.int_val.is_zero() {
            return true;
        }
        self.int_val.is_multiple_of(&pow10(self.scale as u64))
    }

    /// Returns an equal value with all trailing zeros moved out of the
    /// unscaled integer; zero normalizes to scale 0.
    #[must_use]
    pub fn normalized(&self) -> BigDecimal {
        let (int_val, scale) = self.normalized_parts();
        BigDecimal::new(int_val, scale)
    }

    fn normalized_parts(&self) -> (BigInt, i64) {
        if self.int_val.is_zero() {
            return (BigInt::zero(), 0);
        }
        let mut int_val = self.int_val.clone();
        let mut scale = self.scale;
        // Strip in billion-sized chunks first, then digit by digit.
        let ten9 = BigInt::from(1_000_000_000u32);
        loop {
            let (q, r) = int_val.div_rem(&ten9);
            if !r.is_zero() {
                break;
            }
            int_val = q;
            scale -= 9;
        }
        let ten = BigInt::from(10u32);
        loop {
            let (q, r) = int_val.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            int_val = q;
            scale -= 1;
        }
        (int_val, scale)
    }

    /// Re-scales the value, rounding any discarded fraction under `mode`.
    ///
    /// # Panics
    ///
    /// Panics when digits would be discarded under
    /// [`RoundingMode::Unnecessary`].
    #[must_use]
    pub fn with_scale(&self, new_scale: i64, mode: RoundingMode) -> BigDecimal {
        let diff = new_scale - self.scale;
        if diff >= 0 {
            return BigDecimal::new(&self.int_val * pow10(diff as u64), new_scale);
        }
        let den = pow10(diff.unsigned_abs());
        let (q, r) = self.int_val.div_rem(&den);
        BigDecimal::new(apply_rounding(q, &r, &den, mode, self.sign()), new_scale)
    }

    /// Rounds to `round_digits` digits after the decimal point, half-even.
    #[must_use]
    pub fn round(&self, round_digits: i64) -> BigDecimal {
        self.with_scale(round_digits, RoundingMode::HalfEven)
    }

    /// Divides at an explicit result scale under an explicit rounding mode.
    ///
    /// # Panics
    ///
    /// Panics when the divisor is zero, or when the quotient is inexact at
    /// `scale` under [`RoundingMode::Unnecessary`].
    #[must_use]
    pub fn div_round(&self, rhs: &BigDecimal, scale: i64, mode: RoundingMode) -> BigDecimal {
        assert!(!rhs.is_zero(), "attempt to divide by zero");
        if self.is_zero() {
            return BigDecimal::new(BigInt::zero(), scale);
        }

        // result = int_a * 10^(scale - scale_a + scale_b) / int_b
        let e = scale - self.scale + rhs.scale;
        let (num, den) = if e >= 0 {
            (&self.int_val * pow10(e as u64), rhs.int_val.clone())
        } else {
            (self.int_val.clone(), &rhs.int_val * pow10(e.unsigned_abs()))
        };

        let sign = num.sign() * den.sign();
        let (q, r) = num.div_rem(&den);
        BigDecimal::new(apply_rounding(q, &r, &den, mode, sign), scale)
    }

    fn aligned_int(self, to_scale: i64) -> BigInt {
        debug_assert!(to_scale >= self.scale);
        if to_scale == self.scale {
            self.int_val
        } else {
            self.int_val * pow10((to_scale - self.scale) as u64)
        }
    }
}

impl Default for BigDecimal {
    #[inline]
    fn default() -> BigDecimal {
        BigDecimal::zero()
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &BigDecimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl Hash for BigDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Numeric equality ignores trailing zeros, so hashing must too.
        let (int_val, scale) = self.normalized_parts();
        int_val.hash(state);
        scale.hash(state);
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &BigDecimal) -> Ordering {
        let sign_rank = |s: Sign| match s {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        };
        match sign_rank(self.sign()).cmp(&sign_rank(other.sign())) {
            Ordering::Equal => {}
            order => return order,
        }
        if self.scale == other.scale {
            return self.int_val.cmp(&other.int_val);
        }
        let scale = Ord::max(self.scale, other.scale);
        let a = self.clone().aligned_int(scale);
        let b = other.clone().aligned_int(scale);
        a.cmp(&b)
    }
}

impl PartialOrd for BigDecimal {
    #[inline]
    fn partial_cmp(&self, other: &BigDecimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zero for BigDecimal {
    #[inline]
    fn zero() -> BigDecimal {
        BigDecimal::new(BigInt::zero(), 0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.int_val.is_zero()
    }
}

impl One for BigDecimal {
    #[inline]
    fn one() -> BigDecimal {
        BigDecimal::new(BigInt::one(), 0)
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        BigDecimal::new(-self.int_val, self.scale)
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        self.clone().neg()
    }
}

impl Add<&BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    fn add(self, other: &BigDecimal) -> BigDecimal {
        let scale = Ord::max(self.scale, other.scale);
        let lhs = self.aligned_int(scale);
        let rhs = other.clone().aligned_int(scale);
        BigDecimal::new(lhs + rhs, scale)
    }
}

forward_binop!(impl Add for BigDecimal, add);

impl Sub<&BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn sub(self, other: &BigDecimal) -> BigDecimal {
        self + (-other.clone())
    }
}

forward_binop!(impl Sub for BigDecimal, sub);

impl Mul<&BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    fn mul(self, other: &BigDecimal) -> BigDecimal {
        let scale = self.scale.checked_add(other.scale).expect("scale overflow");
        BigDecimal::new(self.int_val * &other.int_val, scale)
    }
}

forward_binop!(impl Mul for BigDecimal, mul);

impl Div<&BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    /// Rounds half-even at `DEFAULT_DIV_EXTRA_SCALE` digits past the
    /// operands' scale difference; use [`BigDecimal::div_round`] for
    /// explicit control.
    fn div(self, other: &BigDecimal) -> BigDecimal {
        let scale = Ord::max(self.scale.saturating_sub(other.scale), 0)
            .saturating_add(DEFAULT_DIV_EXTRA_SCALE);
        self.div_round(other, scale, RoundingMode::HalfEven)
    }
}

forward_binop!(impl Div for BigDecimal, div);

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDecimal {
                #[inline]
                fn from(n: $t) -> BigDecimal {
                    BigDecimal::new(BigInt::from(n), 0)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for BigDecimal {
    #[inline]
    fn from(n: BigInt) -> BigDecimal {
        BigDecimal::new(n, 0)
    }
}

/// An error which can be returned when parsing a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBigDecimalError {
    /// The input had no digits.
    Empty,
    /// The input contained a character that is not part of a decimal.
    InvalidDigit,
    /// The exponent does not fit the scale range.
    ExponentOverflow,
}

impl fmt::Display for ParseBigDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBigDecimalError::Empty => f.write_str("cannot parse decimal from empty string"),
            ParseBigDecimalError::InvalidDigit => f.write_str("invalid digit found in string"),
            ParseBigDecimalError::ExponentOverflow => f.write_str("exponent out of range"),
        }
    }
}

impl std::error::Error for ParseBigDecimalError {}

impl FromStr for BigDecimal {
    type Err = ParseBigDecimalError;

    /// Accepts an optional sign, digits with an optional decimal point and
    /// an optional `e`/`E` exponent: `-12.34e-5`.
    fn from_str(s: &str) -> Result<BigDecimal, ParseBigDecimalError> {
        if s.is_empty() {
            return Err(ParseBigDecimalError::Empty);
        }

        let (base, exp) = match s.find(['e', 'E']) {
            None => (s, 0i64),
            Some(pos) => {
                let exp: i64 = s[pos + 1..]
                    .parse()
                    .map_err(|_| ParseBigDecimalError::InvalidDigit)?;
                (&s[..pos], exp)
            }
        };

        let (negative, unsigned) = match base.strip_prefix('-') {
            Some(tail) => (true, tail),
            None => (false, base.strip_prefix('+').unwrap_or(base)),
        };

        let (int_part, frac_part) = match unsigned.find('.') {
            None => (unsigned, ""),
            Some(pos) => (&unsigned[..pos], &unsigned[pos + 1..]),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseBigDecimalError::Empty);
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let magnitude = <BigUint as num_traits::Num>::from_str_radix(&digits, 10)
            .map_err(|_| ParseBigDecimalError::InvalidDigit)?;

        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|n| n.checked_sub(exp))
            .ok_or(ParseBigDecimalError::ExponentOverflow)?;

        let int_val = if negative {
            -BigInt::from(magnitude)
        } else {
            BigInt::from(magnitude)
        };
        Ok(BigDecimal::new(int_val, scale))
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.int_val.magnitude().to_str_radix(10);

        let body = if self.scale <= 0 {
            if self.int_val.is_zero() {
                String::from("0")
            } else {
                let mut s = abs;
                s.extend(std::iter::repeat('0').take(self.scale.unsigned_abs() as usize));
                s
            }
        } else {
            let scale = self.scale as usize;
            if abs.len() > scale {
                let mut s = abs;
                s.insert(s.len() - scale, '.');
                s
            } else {
                let mut s = String::from("0.");
                s.extend(std::iter::repeat('0').take(scale - abs.len()));
                s.push_str(&abs);
                s
            }
        };

        f.pad_integral(self.sign() != Sign::Minus, "", &body)
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigDecimal({:?}, scale={})", self.int_val, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::str::FromStr;

    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use super::{BigDecimal, ParseBigDecimalError, RoundingMode, DEFAULT_DIV_EXTRA_SCALE};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn parse_and_display_round_trip() {
        for s in ["0", "1", "-1", "12.34", "-0.001", "1000", "0.00", "123.456"] {
            assert_eq!(dec(s).to_string(), s);
        }
    }

    #[test]
    fn parse_exponent_forms() {
        assert_eq!(dec("12e2"), dec("1200"));
        assert_eq!(dec("12.34e-2"), dec("0.1234"));
        assert_eq!(dec("-1.5E3"), dec("-1500"));
        assert_eq!(dec("+2.5"), dec("2.5"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(BigDecimal::from_str(""), Err(ParseBigDecimalError::Empty));
        assert_eq!(BigDecimal::from_str("."), Err(ParseBigDecimalError::Empty));
        assert_eq!(BigDecimal::from_str("-"), Err(ParseBigDecimalError::Empty));
        assert_eq!(BigDecimal::from_str("1.2.3"), Err(ParseBigDecimalError::InvalidDigit));
        assert_eq!(BigDecimal::from_str("12a"), Err(ParseBigDecimalError::InvalidDigit));
        assert_eq!(BigDecimal::from_str("1e"), Err(ParseBigDecimalError::InvalidDigit));
    }

    #[test]
    fn addition_aligns_scales() {
        assert_eq!(dec("1.10") + dec("2.2"), dec("3.30"));
        assert_eq!((dec("1.10") + dec("2.2")).scale(), 2);
        assert_eq!(dec("0.1") + dec("-0.1"), BigDecimal::zero());
    }

    #[test]
    fn multiplication_adds_scales() {
        let p = dec("1.5") * dec("0.20");
        assert_eq!(p, dec("0.3"));
        assert_eq!(p.scale(), 3);
    }

    #[test]
    fn division_is_exact_when_terminating() {
        assert_eq!(dec("1") / dec("4"), dec("0.25"));
        assert_eq!(dec("-1") / dec("8"), dec("-0.125"));
    }

    #[test]
    fn division_rounds_half_even_by_default() {
        let third = dec("1") / dec("3");
        let s = third.to_string();
        assert!(s.starts_with("0.33333"));
        // 34 fractional digits by default.
        assert_eq!(third.scale(), 34);
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn division_by_zero_panics() {
        let _ = dec("1") / BigDecimal::zero();
    }

    #[test]
    fn rounding_mode_table() {
        let cases = [
            // (value, scale, mode, expected)
            ("2.5", 0, RoundingMode::HalfUp, "3"),
            ("2.5", 0, RoundingMode::HalfDown, "2"),
            ("2.5", 0, RoundingMode::HalfEven, "2"),
            ("3.5", 0, RoundingMode::HalfEven, "4"),
            ("-2.5", 0, RoundingMode::HalfUp, "-3"),
            ("-2.5", 0, RoundingMode::HalfEven, "-2"),
            ("2.1", 0, RoundingMode::Up, "3"),
            ("2.9", 0, RoundingMode::Down, "2"),
            ("-2.1", 0, RoundingMode::Up, "-3"),
            ("-2.9", 0, RoundingMode::Down, "-2"),
            ("2.1", 0, RoundingMode::Ceiling, "3"),
            ("-2.1", 0, RoundingMode::Ceiling, "-2"),
            ("2.1", 0, RoundingMode::Floor, "2"),
            ("-2.1", 0, RoundingMode::Floor, "-3"),
            ("1.25", 1, RoundingMode::HalfEven, "1.2"),
            ("1.35", 1, RoundingMode::HalfEven, "1.4"),
        ];
        for (value, scale, mode, expected) in cases {
            assert_eq!(
                dec(value).with_scale(scale, mode),
                dec(expected),
                "{value} at scale {scale} under {mode:?}"
            );
        }
    }

    #[test]
    fn with_scale_extends_exactly() {
        let n = dec("1.5").with_scale(3, RoundingMode::Unnecessary);
        assert_eq!(n.to_string(), "1.500");
    }

    #[test]
    #[should_panic(expected = "rounding necessary")]
    fn unnecessary_rounding_panics() {
        let _ = dec("1.55").with_scale(1, RoundingMode::Unnecessary);
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(dec("1.0"), dec("1.00"));
        assert_eq!(dec("1200"), dec("1.2e3"));
        assert_ne!(dec("1.0"), dec("1.01"));
        assert!(dec("-2") < dec("1.5"));
        assert!(dec("0.001") < dec("0.01"));
    }

    #[test]
    fn hash_agrees_with_equality() {
        fn hash_of(d: &BigDecimal) -> u64 {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        }
        assert_eq!(hash_of(&dec("1.0")), hash_of(&dec("1.00")));
        assert_eq!(hash_of(&dec("0")), hash_of(&dec("0.000")));
    }

    #[test]
    fn digit_count_is_memoized_and_correct() {
        assert_eq!(BigDecimal::zero().digits(), 1);
        assert_eq!(dec("9.99").digits(), 3);
        assert_eq!(dec("1000").digits(), 4);
        let big = dec("123456789012345678901234567890.5");
        assert_eq!(big.digits(), 31);
        // Second call hits the cache.
        assert_eq!(big.digits(), 31);
    }

    #[test]
    fn normalized_strips_trailing_zeros() {
        let n = dec("1.2300000000");
        let norm = n.normalized();
        assert_eq!(norm.scale(), 2);
        assert_eq!(norm, n);
        assert_eq!(BigDecimal::zero().normalized().scale(), 0);
    }

    #[test]
    fn integer_detection() {
        assert!(dec("5").is_integer());
        assert!(dec("5.000").is_integer());
        assert!(dec("5e3").is_integer());
        assert!(!dec("5.001").is_integer());
        assert!(BigDecimal::zero().is_integer());
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let x = dec("123.456");
        assert_eq!(&x * BigDecimal::one(), x);
    }

    proptest! {
        #[test]
        fn add_sub_round_trip(a in -1_000_000_000i64..1_000_000_000,
                              b in -1_000_000_000i64..1_000_000_000,
                              sa in 0i64..6, sb in 0i64..6) {
            let x = BigDecimal::new(a.into(), sa);
            let y = BigDecimal::new(b.into(), sb);
            prop_assert_eq!((&x + &y) - &y, x);
        }

        #[test]
        fn multiplication_commutes(a in any::<i64>(), b in any::<i64>(),
                                   sa in -3i64..6, sb in -3i64..6) {
            let x = BigDecimal::new(a.into(), sa);
            let y = BigDecimal::new(b.into(), sb);
            prop_assert_eq!(&x * &y, &y * &x);
        }

        #[test]
        fn display_parse_round_trip(a in any::<i64>(), scale in -5i64..20) {
            let x = BigDecimal::new(a.into(), scale);
            let parsed: BigDecimal = x.to_string().parse().unwrap();
            prop_assert_eq!(parsed, x);
        }

        #[test]
        fn division_times_divisor_is_close(a in 1i64..1_000_000, b in 1i64..1_000_000) {
            let x = BigDecimal::from(a);
            let y = BigDecimal::from(b);
            let q = &x / &y;
            // q * y differs from x by less than one unit in the last place
            // of the quotient scale.
            let diff = (q * &y - &x).abs();
            let ulp = BigDecimal::new(1.into(), DEFAULT_DIV_EXTRA_SCALE - 1);
            prop_assert!(diff < ulp * y.abs());
        }
    }
}
