// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{error::Int128Error, limbs::U128, macros::construct_int128, Int128};
use core::fmt;

construct_int128! {
    /// Unsigned 128-bit integer, the ring of integers modulo 2^128 with
    /// unsigned ordering.
    ///
    /// ## Fields
    ///
    /// * `0` - The `lo`/`hi` 64-bit limbs
    pub struct UInt128;
}

impl UInt128 {
    /// Smallest value, zero
    pub const MIN: Self = Self(U128::from_limbs(0, 0));
    /// Largest value, `2^128 - 1`
    pub const MAX: Self = Self(U128::MAX);

    #[inline]
    pub const fn min_bound() -> Self {
        Self::MIN
    }

    #[inline]
    pub const fn max_bound() -> Self {
        Self::MAX
    }

    /// Always `false`; present so both variants answer the same queries.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        false
    }

    /// `0` for zero, `1` otherwise.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.is_zero() { 0 } else { 1 }
    }

    /// Identity; an unsigned value is its own magnitude.
    #[inline]
    pub const fn wrapping_abs(self) -> Self {
        self
    }

    /// Reinterpret the bits as two's complement.
    #[inline]
    pub const fn cast_signed(self) -> Int128 {
        Int128(self.0)
    }

    // ---- overflow-aware arithmetic ----

    /// Sum modulo 2^128 and whether a carry left bit 127.
    #[inline]
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (v, carry) = self.0.overflowing_add(rhs.0);
        (Self(v), carry)
    }

    /// Difference modulo 2^128 and whether a borrow was needed.
    #[inline]
    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (v, borrow) = self.0.overflowing_sub(rhs.0);
        (Self(v), borrow)
    }

    #[inline]
    pub fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let (v, overflow) = self.0.overflowing_mul(rhs.0);
        (Self(v), overflow)
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_add(rhs);
        if overflow { None } else { Some(v) }
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_sub(rhs);
        if overflow { None } else { Some(v) }
    }

    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let (v, overflow) = self.overflowing_mul(rhs);
        if overflow { None } else { Some(v) }
    }

    /// Quotient and remainder, with `0 <= remainder < rhs`.
    pub fn div_mod(self, rhs: Self) -> Result<(Self, Self), Int128Error> {
        if rhs.is_zero() {
            return Err(Int128Error::DivideByZero);
        }

        let (q, r) = self.0.div_mod(rhs.0);
        Ok((Self(q), Self(r)))
    }

    /// Logical right shift; counts above 127 give zero.
    #[inline]
    pub fn shift_right_bits(self, n: u32) -> Self {
        Self(self.0.shr_bits(n))
    }

    fn fmt_decimal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.0.to_string())
    }

    /// Parse an optionally `+`-prefixed number in the given radix (2 to 36).
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, Int128Error> {
        let digits = src.strip_prefix('+').unwrap_or(src);
        crate::convert::parse_magnitude(digits, radix).map(Self)
    }
}

impl PartialOrd for UInt128 {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UInt128 {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
