//! Rounding modes and the single increment decision they drive.

use core::cmp::Ordering;

use exactnum_integer::Sign;

/// How to round when a result cannot be represented exactly at the target
/// scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To the nearest neighbor; ties away from zero.
    HalfUp,
    /// To the nearest neighbor; ties toward zero.
    HalfDown,
    /// To the nearest neighbor; ties to the even neighbor.
    HalfEven,
    /// Assert exactness: any discarded fraction is an error.
    Unnecessary,
}

/// Decides whether a quotient truncated toward zero must be nudged one step
/// away from zero.
///
/// `sign` is the sign of the exact result, `half` compares twice the
/// discarded remainder against the divisor (both by magnitude), and
/// `quotient_is_odd` refers to the truncated quotient.
///
/// Only called when a nonzero fraction was discarded.
///
/// # Panics
///
/// Panics for [`RoundingMode::Unnecessary`].
pub(crate) fn round_up(
    mode: RoundingMode,
    sign: Sign,
    half: Ordering,
    quotient_is_odd: bool,
) -> bool {
    match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => sign == Sign::Plus,
        RoundingMode::Floor => sign == Sign::Minus,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => {
            half == Ordering::Greater || (half == Ordering::Equal && quotient_is_odd)
        }
        RoundingMode::Unnecessary => panic!("rounding necessary"),
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering::{Equal, Greater, Less};

    use exactnum_integer::Sign;

    use super::{round_up, RoundingMode};

    #[test]
    fn directed_modes_ignore_the_fraction_size() {
        for half in [Less, Equal, Greater] {
            assert!(round_up(RoundingMode::Up, Sign::Plus, half, false));
            assert!(!round_up(RoundingMode::Down, Sign::Minus, half, true));
            assert!(round_up(RoundingMode::Ceiling, Sign::Plus, half, false));
            assert!(!round_up(RoundingMode::Ceiling, Sign::Minus, half, false));
            assert!(round_up(RoundingMode::Floor, Sign::Minus, half, false));
            assert!(!round_up(RoundingMode::Floor, Sign::Plus, half, false));
        }
    }

    #[test]
    fn half_modes_split_on_the_tie() {
        assert!(round_up(RoundingMode::HalfUp, Sign::Plus, Equal, false));
        assert!(!round_up(RoundingMode::HalfDown, Sign::Plus, Equal, false));
        assert!(!round_up(RoundingMode::HalfEven, Sign::Plus, Equal, false));
        assert!(round_up(RoundingMode::HalfEven, Sign::Plus, Equal, true));
        for mode in [RoundingMode::HalfUp, RoundingMode::HalfDown, RoundingMode::HalfEven] {
            assert!(round_up(mode, Sign::Plus, Greater, false));
            assert!(!round_up(mode, Sign::Plus, Less, true));
        }
    }

    #[test]
    #[should_panic(expected = "rounding necessary")]
    fn unnecessary_panics() {
        round_up(RoundingMode::Unnecessary, Sign::Plus, Less, false);
    }
}
