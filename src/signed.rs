// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::Int128Error,
    limbs::{self, U128},
    macros::construct_int128,
    UInt128,
};
use core::cmp::Ordering;
use core::fmt;

construct_int128! {
    /// Signed 128-bit integer in two's complement, over the same two-limb
    /// storage as [`UInt128`].
    ///
    /// ## Fields
    ///
    /// * `0` - The `lo`/`hi` 64-bit limbs; bit 63 of `hi` is the sign
    pub struct Int128;
}

impl Int128 {
    /// `-2^127`, the one value whose negation is not representable.
    pub const MIN: Self = Self(limbs::SIGNED_MIN);
    /// `2^127 - 1`
    pub const MAX: Self = Self(limbs::SIGNED_MAX);
    /// All bits set
    pub const MINUS_ONE: Self = Self(U128::MAX);

    #[inline]
    pub const fn min_bound() -> Self {
        Self::MIN
    }

    #[inline]
    pub const fn max_bound() -> Self {
        Self::MAX
    }

    /// Reinterpret unsigned bits as two's complement.
    #[inline]
    pub const fn from_bits(bits: UInt128) -> Self {
        Self(bits.0)
    }

    /// Reinterpret as unsigned bits.
    #[inline]
    pub const fn to_bits(self) -> UInt128 {
        UInt128(self.0)
    }

    #[inline]
    pub const fn cast_unsigned(self) -> UInt128 {
        self.to_bits()
    }

    /// Check if the sign bit is set
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0.sign_bit()
    }

    /// Check if this number is positive (> 0)
    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// `-1`, `0` or `1` following the sign.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    // ---- negation ----

    /// `0 - self`. Fails for [`Int128::MIN`].
    pub fn negate(self) -> Result<Self, Int128Error> {
        if self == Self::MIN {
            return Err(Int128Error::UnrepresentableNegation);
        }
        Ok(self.wrapping_neg())
    }

    /// Checked negation
    #[inline]
    pub fn checked_neg(self) -> Option<Self> {
        self.negate().ok()
    }

    /// Two's-complement negation; `MIN` maps to itself.
    #[inline]
    pub fn wrapping_neg(self) -> Self {
        Self(self.0.twos_negation())
    }

    /// `self` when non-negative, otherwise [`negate`](Self::negate).
    pub fn abs(self) -> Result<Self, Int128Error> {
        if self.is_negative() { self.negate() } else { Ok(self) }
    }

    /// Checked absolute value
    #[inline]
    pub fn checked_abs(self) -> Option<Self> {
        self.abs().ok()
    }

    /// Wrapping absolute value; `MIN` maps to itself.
    #[inline]
    pub fn wrapping_abs(self) -> Self {
        if self.is_negative() { self.wrapping_neg() } else { self }
    }

    /// Magnitude as an unsigned value; total, `|MIN|` is `2^127`.
    #[inline]
    pub fn unsigned_abs(self) -> UInt128 {
        UInt128(self.wrapping_abs().0)
    }

    // ---- overflow-aware arithmetic ----

    /// Wrapped sum and whether the signed result overflowed.
    #[inline]
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let sum = self.wrapping_add(rhs);
        let same_sign = self.is_negative() == rhs.is_negative();
        (sum, same_sign && sum.is_negative() != self.is_negative())
    }

    /// Wrapped difference and whether the signed result overflowed.
    #[inline]
    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let diff = self.wrapping_sub(rhs);
        let signs_differ = self.is_negative() != rhs.is_negative();
        (diff, signs_differ && diff.is_negative() != self.is_negative())
    }

    /// Wrapped product and whether the signed result overflowed.
    ///
    /// The wrapped bits are the same as for the unsigned product; overflow is
    /// decided on the magnitudes.
    pub fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let product = self.wrapping_mul(rhs);
        let (magnitude, unsigned_overflow) =
            self.unsigned_abs().overflowing_mul(rhs.unsigned_abs());
        let negative = self.is_negative() != rhs.is_negative();
        let limit = if negative { Self::MIN.to_bits() } else { Self::MAX.to_bits() };
        (product, unsigned_overflow || magnitude > limit)
    }

    /// Checked addition
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_add(rhs);
        if overflow { None } else { Some(v) }
    }

    /// Checked subtraction
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_sub(rhs);
        if overflow { None } else { Some(v) }
    }

    /// Checked multiplication
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_mul(rhs);
        if overflow { None } else { Some(v) }
    }

    /// Quotient truncated toward zero and a remainder carrying the sign of
    /// `self`.
    ///
    /// The magnitudes are divided as unsigned values and the signs put back
    /// afterwards.
    pub fn div_mod(self, rhs: Self) -> Result<(Self, Self), Int128Error> {
        if rhs.is_zero() {
            return Err(Int128Error::DivideByZero);
        }
        if self == Self::MIN && rhs == Self::MINUS_ONE {
            return Err(Int128Error::UnrepresentableDivision);
        }

        let (q, r) = self.unsigned_abs().div_mod(rhs.unsigned_abs())?;

        let q = if self.is_negative() != rhs.is_negative() { q.0.twos_negation() } else { q.0 };
        let r = if self.is_negative() { r.0.twos_negation() } else { r.0 };

        Ok((Self(q), Self(r)))
    }

    // ---- shifts ----

    /// Arithmetic right shift: vacated bits take the sign. Counts above 127
    /// collapse to `0` or `-1`.
    #[inline]
    pub fn shift_right_bits(self, n: u32) -> Self {
        Self(self.0.sar_bits(n))
    }

    /// Logical right shift, always zero-filling; a negative `count` shifts
    /// left by `|count|`. Counts above 127 give zero.
    #[inline]
    pub fn shift_right_fill_zero(self, count: i32) -> Self {
        if count >= 0 {
            Self(self.0.shr_bits(count as u32))
        } else {
            self.shift_left_bits(count.unsigned_abs())
        }
    }

    fn fmt_decimal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unsigned_abs().0.to_string();
        f.pad_integral(!self.is_negative(), "", &digits)
    }

    /// Parse an optionally signed number in the given radix (2 to 36).
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, Int128Error> {
        let (negative, digits) = match src.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, src.strip_prefix('+').unwrap_or(src)),
        };

        let magnitude = crate::convert::parse_magnitude(digits, radix)?;
        let limit = if negative { limbs::SIGNED_MIN } else { limbs::SIGNED_MAX };
        if magnitude > limit {
            return Err(Int128Error::ParseError);
        }

        Ok(Self(if negative { magnitude.twos_negation() } else { magnitude }))
    }
}

impl core::ops::Neg for Int128 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn neg(self) -> Self {
        self.negate().unwrap_or_else(|e| panic!("{}", e))
    }
}

impl PartialOrd for Int128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_signed(&other.0)
    }
}
