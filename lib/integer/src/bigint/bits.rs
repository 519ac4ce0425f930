//! Bitwise operations over the conceptual two's-complement form.
//!
//! Magnitudes are stored sign-magnitude, so every logical operation runs
//! through one shared combinator that streams each operand as
//! two's-complement limbs (with 0 or all-ones sign extension) and converts
//! the combined pattern back to sign-magnitude at the end.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use num_traits::One;

use crate::big_digit::{self, BigDigit};
use crate::bigint::{BigInt, Sign};
use crate::biguint::BigUint;

/// The per-limb combining rule a logical operation applies.
#[derive(Clone, Copy)]
enum BitOp {
    And,
    Or,
    Xor,
    AndNot,
}

impl BitOp {
    #[inline]
    fn apply(self, a: BigDigit, b: BigDigit) -> BigDigit {
        match self {
            BitOp::And => a & b,
            BitOp::Or => a | b,
            BitOp::Xor => a ^ b,
            BitOp::AndNot => a & !b,
        }
    }
}

/// Streams the limbs of a value in two's-complement form, then its sign
/// extension forever.
struct TwosComplement<'a> {
    limbs: &'a [BigDigit],
    index: usize,
    /// Still propagating the `+1` of the negation.
    carry: bool,
    negative: bool,
}

impl<'a> TwosComplement<'a> {
    fn new(n: &'a BigInt) -> Self {
        TwosComplement {
            limbs: &n.data.data,
            index: 0,
            carry: true,
            negative: n.sign == Sign::Minus,
        }
    }

    /// The limb used once the stored limbs are exhausted.
    #[inline]
    fn fill(&self) -> BigDigit {
        if self.negative {
            BigDigit::MAX
        } else {
            0
        }
    }

    fn next_limb(&mut self) -> BigDigit {
        if self.index >= self.limbs.len() {
            return self.fill();
        }
        let limb = self.limbs[self.index];
        self.index += 1;
        if !self.negative {
            return limb;
        }
        // Negative: invert and add one, rippling the +1 until a nonzero
        // limb absorbs it.
        if self.carry {
            let (neg, overflow) = (!limb).overflowing_add(1);
            self.carry = overflow;
            neg
        } else {
            !limb
        }
    }
}

/// Rebuilds a sign-magnitude value from materialized two's-complement limbs
/// whose final limb is pure sign extension.
fn from_twos_complement(mut limbs: alloc::vec::Vec<BigDigit>) -> BigInt {
    let negative = limbs.last().is_some_and(|&top| top & (1 << (big_digit::BITS - 1)) != 0);
    if !negative {
        return BigInt::from_biguint(Sign::Plus, BigUint::new(limbs));
    }

    // Negate in place: invert all limbs and add one.
    let mut carry = true;
    for limb in limbs.iter_mut() {
        let inverted = !*limb;
        if carry {
            let (v, overflow) = inverted.overflowing_add(1);
            *limb = v;
            carry = overflow;
        } else {
            *limb = inverted;
        }
    }
    BigInt::from_biguint(Sign::Minus, BigUint::new(limbs))
}

/// The shared limb-wise combinator behind every logical operation.
fn bitop(a: &BigInt, b: &BigInt, op: BitOp) -> BigInt {
    // One limb beyond the longer operand is pure sign extension on both
    // sides, which pins down the result's sign.
    let len = Ord::max(a.data.data.len(), b.data.data.len()) + 1;
    let mut ita = TwosComplement::new(a);
    let mut itb = TwosComplement::new(b);

    let mut limbs = alloc::vec::Vec::with_capacity(len);
    for _ in 0..len {
        limbs.push(op.apply(ita.next_limb(), itb.next_limb()));
    }
    from_twos_complement(limbs)
}

impl BigInt {
    /// Returns `self & !other`, evaluated over the two's-complement form.
    #[must_use]
    pub fn and_not(&self, other: &BigInt) -> BigInt {
        bitop(self, other, BitOp::AndNot)
    }

    /// Returns bit `bit` of the two's-complement representation.
    ///
    /// Negative values are conceptually 1-extended, so for every value the
    /// answer stabilizes above the bit length.
    #[must_use]
    pub fn bit(&self, bit: u64) -> bool {
        match self.sign {
            Sign::NoSign => false,
            Sign::Plus => self.data.bit(bit),
            Sign::Minus => {
                // Bit i of -m is the inverse of bit i of (m - 1). Rather than
                // materializing m - 1: below the lowest nonzero limb the
                // borrowed limbs are all ones, at it the limb is one less,
                // above it the limbs are unchanged.
                let limb_index = (bit / big_digit::BITS) as usize;
                let first_nonzero = self
                    .data
                    .data
                    .iter()
                    .position(|&d| d != 0)
                    .expect("nonzero magnitude");
                let m1_limb = match limb_index.cmp(&first_nonzero) {
                    core::cmp::Ordering::Less => BigDigit::MAX,
                    core::cmp::Ordering::Equal => self.data.data[limb_index] - 1,
                    core::cmp::Ordering::Greater => {
                        self.data.data.get(limb_index).copied().unwrap_or(0)
                    }
                };
                m1_limb & (1 << (bit % big_digit::BITS)) == 0
            }
        }
    }

    /// Sets bit `bit` of the two's-complement representation.
    pub fn set_bit(&mut self, bit: u64) {
        let mask = BigInt::one() << usize::try_from(bit).expect("bit index overflow");
        *self = &*self | &mask;
    }

    /// Clears bit `bit` of the two's-complement representation.
    pub fn clear_bit(&mut self, bit: u64) {
        let mask = BigInt::one() << usize::try_from(bit).expect("bit index overflow");
        *self = self.and_not(&mask);
    }

    /// Flips bit `bit` of the two's-complement representation.
    pub fn flip_bit(&mut self, bit: u64) {
        let mask = BigInt::one() << usize::try_from(bit).expect("bit index overflow");
        *self = &*self ^ &mask;
    }
}

impl BitAnd<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn bitand(self, other: &BigInt) -> BigInt {
        bitop(&self, other, BitOp::And)
    }
}

forward_binop!(impl BitAnd for BigInt, bitand);

impl BitAndAssign<&BigInt> for BigInt {
    #[inline]
    fn bitand_assign(&mut self, other: &BigInt) {
        *self = bitop(self, other, BitOp::And);
    }
}

forward_assign!(impl BitAndAssign for BigInt, bitand_assign);

impl BitOr<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn bitor(self, other: &BigInt) -> BigInt {
        bitop(&self, other, BitOp::Or)
    }
}

forward_binop!(impl BitOr for BigInt, bitor);

impl BitOrAssign<&BigInt> for BigInt {
    #[inline]
    fn bitor_assign(&mut self, other: &BigInt) {
        *self = bitop(self, other, BitOp::Or);
    }
}

forward_assign!(impl BitOrAssign for BigInt, bitor_assign);

impl BitXor<&BigInt> for BigInt {
    type Output = BigInt;

    #[inline]
    fn bitxor(self, other: &BigInt) -> BigInt {
        bitop(&self, other, BitOp::Xor)
    }
}

forward_binop!(impl BitXor for BigInt, bitxor);

impl BitXorAssign<&BigInt> for BigInt {
    #[inline]
    fn bitxor_assign(&mut self, other: &BigInt) {
        *self = bitop(self, other, BitOp::Xor);
    }
}

forward_assign!(impl BitXorAssign for BigInt, bitxor_assign);

impl Not for BigInt {
    type Output = BigInt;

    /// `!x == -x - 1`, with no limb materialization required.
    #[inline]
    fn not(self) -> BigInt {
        -(self + BigInt::one())
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        !self.clone()
    }
}
