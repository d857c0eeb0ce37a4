// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! The capability set shared by [`UInt128`](crate::UInt128) and
//! [`Int128`](crate::Int128).
//!
//! Each type supplies the handful of primitives whose meaning depends on
//! signedness (ordering, division, right shift, sign queries); `gcd`, `lcm`,
//! `pow` and the wrappers on top are written once here in terms of them.

use crate::error::Int128Error;
use rand::Rng;

pub trait IntegerAlgebra: Copy + Eq + Ord + core::fmt::Debug {
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    fn min_bound() -> Self;
    fn max_bound() -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Truncating quotient and remainder.
    fn div_mod(self, rhs: Self) -> Result<(Self, Self), Int128Error>;

    /// Right shift with the type's own fill rule; negative counts shift left.
    fn shift_right(self, count: i32) -> Self;

    fn is_odd(&self) -> bool;
    fn is_negative(&self) -> bool;
    /// `-1`, `0` or `1`; never negative for unsigned types.
    fn signum(&self) -> i32;
    /// Magnitude, wrapping for the one signed value without a positive counterpart.
    fn wrapping_abs(self) -> Self;

    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self;

    #[inline]
    fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[inline]
    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    #[inline]
    fn compare(&self, other: &Self) -> i32 {
        match self.cmp(other) {
            core::cmp::Ordering::Less => -1,
            core::cmp::Ordering::Equal => 0,
            core::cmp::Ordering::Greater => 1,
        }
    }

    #[inline]
    fn pred(self) -> Self {
        self.wrapping_sub(Self::ONE)
    }

    #[inline]
    fn succ(self) -> Self {
        self.wrapping_add(Self::ONE)
    }

    /// `self^exponent` modulo 2^128 by square-and-multiply.
    ///
    /// `0^0` is rejected with [`Int128Error::UndefinedPower`] rather than
    /// defined as one.
    fn pow(self, exponent: Self) -> Result<Self, Int128Error> {
        if self.is_zero() && exponent.is_zero() {
            return Err(Int128Error::UndefinedPower);
        }
        if exponent.is_negative() {
            return Err(Int128Error::NegativeExponent);
        }

        let mut base = self;
        let mut exp = exponent;
        let mut acc = Self::ONE;

        while !exp.is_zero() {
            if exp.is_odd() {
                acc = acc.wrapping_mul(base);
            }
            exp = exp.shift_right(1);
            if !exp.is_zero() {
                base = base.wrapping_mul(base);
            }
        }

        Ok(acc)
    }

    /// Euclid over truncating remainders. The result is non-negative except
    /// for `gcd(MIN, 0)` and `gcd(MIN, MIN)` of a signed type, whose magnitude
    /// wraps back to `MIN`.
    fn gcd(self, other: Self) -> Self {
        let (mut a, mut b) = (self, other);
        while !b.is_zero() {
            let r = match a.div_mod(b) {
                Ok((_, r)) => r,
                // MIN % -1 has no quotient but its remainder is zero
                Err(Int128Error::UnrepresentableDivision) => Self::ZERO,
                Err(e) => unreachable!("euclid step with non-zero divisor failed: {}", e),
            };
            a = b;
            b = r;
        }
        a.wrapping_abs()
    }

    /// `|a| / gcd(a, b) * |b|`, wrapping. Zero if either operand is zero.
    fn lcm(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }

        // g divides |self| and is neither zero nor -1
        let g = self.gcd(other);
        let q = match self.wrapping_abs().div_mod(g) {
            Ok((q, _)) => q,
            Err(e) => unreachable!("gcd {:?} of non-zero operands failed as a divisor: {}", g, e),
        };
        q.wrapping_mul(other.wrapping_abs()).wrapping_abs()
    }
}

macro_rules! impl_integer_algebra {
    ($name:ident) => {
        impl IntegerAlgebra for crate::$name {
            const ZERO: Self = crate::$name::ZERO;
            const ONE: Self = crate::$name::ONE;

            #[inline] fn min_bound() -> Self { crate::$name::MIN }
            #[inline] fn max_bound() -> Self { crate::$name::MAX }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                crate::$name::wrapping_add(self, rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                crate::$name::wrapping_sub(self, rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                crate::$name::wrapping_mul(self, rhs)
            }

            #[inline]
            fn div_mod(self, rhs: Self) -> Result<(Self, Self), Int128Error> {
                crate::$name::div_mod(self, rhs)
            }

            #[inline]
            fn shift_right(self, count: i32) -> Self {
                crate::$name::shift_right(self, count)
            }
            #[inline] fn is_odd(&self) -> bool { crate::$name::is_odd(self) }
            #[inline] fn is_negative(&self) -> bool { crate::$name::is_negative(self) }
            #[inline] fn signum(&self) -> i32 { crate::$name::signum(self) }
            #[inline] fn wrapping_abs(self) -> Self { crate::$name::wrapping_abs(self) }

            #[inline]
            fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
                crate::$name::random_with(rng)
            }
        }
    };
}

impl_integer_algebra!(UInt128);
impl_integer_algebra!(Int128);
