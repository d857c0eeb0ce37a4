// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Two-word storage shared by [`UInt128`](crate::UInt128) and
//! [`Int128`](crate::Int128).
//!
//! [`U128`] comes from `uint` and supplies carries, borrows, the overflowing
//! multiply, multi-bit shifts and unsigned division. The helpers here add what
//! the two readings need on top of it: limb access, wrapping ring operations,
//! the sign bit, an arithmetic right shift and two's-complement ordering.

use core::cmp::Ordering;
use uint::construct_uint;

// the macro codegens the start of the doc comment
construct_uint! {
    /// with 128-bits of precision, consisting of two 64-bit words.
    /// `.0[0]` is the low limb, `.0[1]` the high one.
    pub struct U128(2);
}

/// Only the sign bit set: the minimum two's-complement value.
pub const SIGNED_MIN: U128 = U128([0, 1 << 63]);

/// Everything but the sign bit set: the maximum two's-complement value.
pub const SIGNED_MAX: U128 = U128([u64::MAX, u64::MAX >> 1]);

impl U128 {
    #[inline]
    pub const fn from_limbs(hi: u64, lo: u64) -> U128 {
        U128([lo, hi])
    }

    #[inline]
    pub const fn lo_limb(&self) -> u64 {
        self.0[0]
    }

    #[inline]
    pub const fn hi_limb(&self) -> u64 {
        self.0[1]
    }

    #[inline]
    pub fn wrapping_add(&self, other: U128) -> U128 {
        let (result, _) = self.overflowing_add(other);

        result
    }

    #[inline]
    pub fn wrapping_sub(&self, other: U128) -> U128 {
        let (result, _) = self.overflowing_sub(other);

        result
    }

    #[inline]
    pub fn wrapping_mul(&self, other: U128) -> U128 {
        let (result, _) = self.overflowing_mul(other);

        result
    }

    /// Two's-complement negation; [`SIGNED_MIN`] maps to itself.
    #[inline]
    pub fn twos_negation(&self) -> U128 {
        (!*self).wrapping_add(U128::one())
    }

    /// Bit 127, the sign under a two's-complement reading.
    #[inline]
    pub const fn sign_bit(&self) -> bool {
        self.0[1] >> 63 == 1
    }

    /// Logical left shift. Counts of 128 or more clear the value.
    #[inline]
    pub fn shl_bits(self, n: u32) -> U128 {
        if n >= 128 {
            return U128::zero();
        }

        self << n as usize
    }

    /// Logical (zero-filling) right shift. Counts of 128 or more clear the value.
    #[inline]
    pub fn shr_bits(self, n: u32) -> U128 {
        if n >= 128 {
            return U128::zero();
        }

        self >> n as usize
    }

    /// Arithmetic right shift: vacated bits copy the sign bit. Counts of 128
    /// or more collapse the value to all sign bits.
    pub fn sar_bits(self, n: u32) -> U128 {
        if !self.sign_bit() {
            return self.shr_bits(n);
        }
        if n == 0 {
            return self;
        }
        if n >= 128 {
            return U128::MAX;
        }

        // fill the top `n` bits with 1s to keep the sign
        let mask = U128::MAX << (128 - n) as usize;
        (self >> n as usize) | mask
    }

    /// Two's-complement ordering. Flipping the sign bit maps the signed range
    /// monotonically onto the unsigned one.
    #[inline]
    pub fn cmp_signed(&self, other: &U128) -> Ordering {
        (*self ^ SIGNED_MIN).cmp(&(*other ^ SIGNED_MIN))
    }

    /// Index of the highest set bit, or -1 for zero.
    #[inline]
    pub fn leading_bit(&self) -> i32 {
        self.bits() as i32 - 1
    }

    #[inline]
    pub fn popcount(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }
}
