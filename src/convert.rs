// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Conversions between the 128-bit types and native integers, floats, text
//! and arbitrary-precision integers.

use crate::{error::Int128Error, limbs::U128, Int128, UInt128};
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, One};

/// Unsigned digits in `radix`, rejecting anything that does not fit in 128 bits.
///
/// `U128::from_str_radix` only takes radix 10 and 16, so the digits are folded
/// in here with the checked limb arithmetic.
pub(crate) fn parse_magnitude(digits: &str, radix: u32) -> Result<U128, Int128Error> {
    if !(2..=36).contains(&radix) || digits.is_empty() {
        return Err(Int128Error::ParseError);
    }

    let base = U128::from(radix);
    let mut acc = U128::zero();

    for c in digits.chars() {
        let d = c.to_digit(radix).ok_or(Int128Error::ParseError)?;
        acc = acc
            .checked_mul(base)
            .and_then(|scaled| scaled.checked_add(U128::from(d)))
            .ok_or(Int128Error::ParseError)?;
    }

    Ok(acc)
}

// ---- native 128-bit interop ----

impl From<u128> for UInt128 {
    #[inline]
    fn from(v: u128) -> Self {
        UInt128::from_parts((v >> 64) as u64, v as u64)
    }
}

impl From<UInt128> for u128 {
    #[inline]
    fn from(v: UInt128) -> Self {
        ((v.hi() as u128) << 64) | v.lo() as u128
    }
}

impl From<i128> for Int128 {
    #[inline]
    fn from(v: i128) -> Self {
        let bits = v as u128;
        Int128::from_parts((bits >> 64) as u64, bits as u64)
    }
}

impl From<Int128> for i128 {
    #[inline]
    fn from(v: Int128) -> Self {
        (((v.hi() as u128) << 64) | v.lo() as u128) as i128
    }
}

// ---- sign extension from narrower signed types ----

macro_rules! impl_from_signed_native {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Int128 {
                #[inline]
                fn from(value: $t) -> Self {
                    let v = value as i64;
                    let hi = if v < 0 { u64::MAX } else { 0 };
                    Int128::from_parts(hi, v as u64)
                }
            }
        )*
    };
}

impl_from_signed_native!(i8, i16, i32, i64);

impl Int128 {
    #[inline]
    pub fn low_i8(&self) -> i8 {
        self.lo() as i8
    }

    #[inline]
    pub fn low_i16(&self) -> i16 {
        self.lo() as i16
    }

    #[inline]
    pub fn low_i32(&self) -> i32 {
        self.lo() as i32
    }

    #[inline]
    pub fn low_i64(&self) -> i64 {
        self.lo() as i64
    }
}

// ---- strict narrowing ----

macro_rules! impl_try_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<UInt128> for $t {
                type Error = Int128Error;

                fn try_from(v: UInt128) -> Result<Self, Self::Error> {
                    if v.hi() != 0 {
                        return Err(Int128Error::IntegerConversionError);
                    }
                    <$t>::try_from(v.lo()).map_err(|_| Int128Error::IntegerConversionError)
                }
            }
        )*
    };
}

impl_try_from_unsigned!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Int128> for $t {
                type Error = Int128Error;

                fn try_from(v: Int128) -> Result<Self, Self::Error> {
                    // fits in an i64 only if hi is the sign extension of lo
                    let lo = v.lo() as i64;
                    let extension = if lo < 0 { u64::MAX } else { 0 };
                    if v.hi() != extension {
                        return Err(Int128Error::IntegerConversionError);
                    }
                    <$t>::try_from(lo).map_err(|_| Int128Error::IntegerConversionError)
                }
            }
        )*
    };
}

impl_try_from_signed!(i8, i16, i32, i64, u8, u16, u32, u64);

impl TryFrom<Int128> for UInt128 {
    type Error = Int128Error;

    fn try_from(v: Int128) -> Result<Self, Self::Error> {
        if v.is_negative() {
            return Err(Int128Error::IntegerConversionError);
        }
        Ok(v.cast_unsigned())
    }
}

impl TryFrom<UInt128> for Int128 {
    type Error = Int128Error;

    fn try_from(v: UInt128) -> Result<Self, Self::Error> {
        let signed = v.cast_signed();
        if signed.is_negative() {
            return Err(Int128Error::IntegerConversionError);
        }
        Ok(signed)
    }
}

// ---- arbitrary precision ----

fn two_pow_128() -> BigInt {
    BigInt::one() << 128u32
}

/// Low 128 bits of `x` in two's complement.
fn low_128_bits(x: &BigInt) -> U128 {
    let modulus = two_pow_128();
    let mut r = x % &modulus;
    if r.sign() == Sign::Minus {
        r += &modulus;
    }

    let (_, digits) = r.to_u64_digits();
    let lo = digits.first().copied().unwrap_or(0);
    let hi = digits.get(1).copied().unwrap_or(0);
    U128::from_limbs(hi, lo)
}

fn truncated_f64(v: f64) -> Result<BigInt, Int128Error> {
    if !v.is_finite() {
        return Err(Int128Error::IntegerConversionError);
    }
    BigInt::from_f64(v.trunc()).ok_or(Int128Error::IntegerConversionError)
}

impl UInt128 {
    /// Exact value as an arbitrary-precision integer.
    pub fn to_big_int(&self) -> BigInt {
        (BigInt::from(self.hi()) << 64u32) + BigInt::from(self.lo())
    }

    /// The low 128 bits of `x`; negative inputs wrap modulo 2^128.
    pub fn from_big_int(x: &BigInt) -> Self {
        UInt128(low_128_bits(x))
    }

    /// Truncate toward zero, then keep the low 128 bits.
    pub fn from_f64(v: f64) -> Result<Self, Int128Error> {
        truncated_f64(v).map(|b| Self::from_big_int(&b))
    }
}

impl Int128 {
    /// Exact value as an arbitrary-precision integer.
    pub fn to_big_int(&self) -> BigInt {
        let unsigned = self.cast_unsigned().to_big_int();
        if self.is_negative() {
            unsigned - two_pow_128()
        } else {
            unsigned
        }
    }

    /// The low 128 bits of `x` read as two's complement.
    pub fn from_big_int(x: &BigInt) -> Self {
        Int128(low_128_bits(x))
    }

    /// Truncate toward zero, then keep the low 128 bits.
    pub fn from_f64(v: f64) -> Result<Self, Int128Error> {
        truncated_f64(v).map(|b| Self::from_big_int(&b))
    }
}

impl From<UInt128> for BigInt {
    fn from(v: UInt128) -> Self {
        v.to_big_int()
    }
}

impl From<Int128> for BigInt {
    fn from(v: Int128) -> Self {
        v.to_big_int()
    }
}

impl From<&BigInt> for UInt128 {
    fn from(x: &BigInt) -> Self {
        UInt128::from_big_int(x)
    }
}

impl From<&BigInt> for Int128 {
    fn from(x: &BigInt) -> Self {
        Int128::from_big_int(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decimal_display() {
        assert_eq!(UInt128::ZERO.to_string(), "0");
        assert_eq!(UInt128::MAX.to_string(), u128::MAX.to_string());
        assert_eq!(Int128::MIN.to_string(), i128::MIN.to_string());
        assert_eq!(Int128::MINUS_ONE.to_string(), "-1");
        assert_eq!(
            UInt128::from(10_000_000_000_000_000_000u64).to_string(),
            "10000000000000000000"
        );
        assert_eq!(format!("{:>6}", UInt128::from(42u8)), "    42");
        assert_eq!(format!("{:+}", Int128::from(42i8)), "+42");
        assert_eq!(format!("{:?}", Int128::from(-7i8)), "-7");
    }

    #[test]
    fn hex_and_binary_print_raw_bits() {
        assert_eq!(format!("{:x}", UInt128::from_parts(1, 0xab)), "100000000000000ab");
        assert_eq!(format!("{:X}", UInt128::from(0xabu8)), "AB");
        assert_eq!(format!("{:x}", Int128::MINUS_ONE), format!("{:x}", -1i128));
        assert_eq!(format!("{:#x}", UInt128::from(255u8)), "0xff");
        assert_eq!(format!("{:b}", UInt128::from(5u8)), "101");
        assert_eq!(format!("{:b}", UInt128::from_parts(1, 1)), format!("{:b}", (1u128 << 64) | 1));
    }

    #[test]
    fn parse_decimal() {
        assert_eq!("0".parse::<UInt128>(), Ok(UInt128::ZERO));
        assert_eq!("+17".parse::<UInt128>(), Ok(UInt128::from(17u8)));
        assert_eq!(u128::MAX.to_string().parse::<UInt128>(), Ok(UInt128::MAX));
        assert_eq!(i128::MIN.to_string().parse::<Int128>(), Ok(Int128::MIN));
        assert_eq!(i128::MAX.to_string().parse::<Int128>(), Ok(Int128::MAX));
        assert_eq!("-10".parse::<Int128>(), Ok(Int128::from(-10i8)));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("".parse::<UInt128>(), Err(Int128Error::ParseError));
        assert_eq!("-".parse::<Int128>(), Err(Int128Error::ParseError));
        assert_eq!("-1".parse::<UInt128>(), Err(Int128Error::ParseError));
        assert_eq!("12a".parse::<UInt128>(), Err(Int128Error::ParseError));
        assert_eq!("--1".parse::<Int128>(), Err(Int128Error::ParseError));
        assert_eq!(
            "340282366920938463463374607431768211456".parse::<UInt128>(),
            Err(Int128Error::ParseError)
        );
        assert_eq!(
            "170141183460469231731687303715884105728".parse::<Int128>(),
            Err(Int128Error::ParseError)
        );
        assert_eq!(
            "-170141183460469231731687303715884105729".parse::<Int128>(),
            Err(Int128Error::ParseError)
        );
        assert_eq!(UInt128::from_str_radix("10", 37), Err(Int128Error::ParseError));
    }

    #[test]
    fn parse_other_radices() {
        assert_eq!(UInt128::from_str_radix("ff", 16), Ok(UInt128::from(255u8)));
        assert_eq!(Int128::from_str_radix("-101", 2), Ok(Int128::from(-5i8)));
        assert_eq!(UInt128::from_str_radix(&"f".repeat(32), 16), Ok(UInt128::MAX));
    }

    #[test]
    fn sign_and_zero_extension() {
        assert_eq!(Int128::from(-1i8), Int128::MINUS_ONE);
        assert_eq!(Int128::from(i16::MIN), Int128::from(i16::MIN as i128));
        assert_eq!(Int128::from(i32::MIN), Int128::from_parts(u64::MAX, i32::MIN as i64 as u64));
        assert_eq!(Int128::from(i64::MIN), Int128::from(i64::MIN as i128));
        assert_eq!(Int128::from(u64::MAX), Int128::from_parts(0, u64::MAX));
        assert_eq!(UInt128::from(u8::MAX), UInt128::from_parts(0, 255));
        assert_eq!(UInt128::from(u16::MAX), UInt128::from_parts(0, 65535));
    }

    #[test]
    fn low_bit_exports() {
        let v = UInt128::from_parts(0xffff, 0x1234_5678_9abc_def0);
        assert_eq!(v.low_u8(), 0xf0);
        assert_eq!(v.low_u16(), 0xdef0);
        assert_eq!(v.low_u32(), 0x9abc_def0);
        assert_eq!(v.low_u64(), 0x1234_5678_9abc_def0);

        let s = Int128::from(-2i8);
        assert_eq!(s.low_i8(), -2);
        assert_eq!(s.low_i16(), -2);
        assert_eq!(s.low_i32(), -2);
        assert_eq!(s.low_i64(), -2);
        assert_eq!(Int128::from(300i64).low_i8(), 300i64 as i8);
    }

    #[test]
    fn strict_narrowing() {
        assert_eq!(u64::try_from(UInt128::from(7u8)), Ok(7));
        assert_eq!(
            u64::try_from(UInt128::from_parts(1, 0)),
            Err(Int128Error::IntegerConversionError)
        );
        assert_eq!(u8::try_from(UInt128::from(256u16)), Err(Int128Error::IntegerConversionError));
        assert_eq!(i64::try_from(Int128::from(i64::MIN)), Ok(i64::MIN));
        assert_eq!(
            i64::try_from(Int128::from(i64::MIN as i128 - 1)),
            Err(Int128Error::IntegerConversionError)
        );
        assert_eq!(u32::try_from(Int128::from(-1i8)), Err(Int128Error::IntegerConversionError));
        assert_eq!(UInt128::try_from(Int128::MINUS_ONE), Err(Int128Error::IntegerConversionError));
        assert_eq!(Int128::try_from(UInt128::MAX), Err(Int128Error::IntegerConversionError));
        assert_eq!(Int128::try_from(UInt128::from(5u8)), Ok(Int128::from(5i8)));
    }

    #[test]
    fn component_arrays() {
        let expected = UInt128::from(0x0f0e_0d0c_0b0a_0908_0706_0504_0302_0100u128);
        let bytes: Vec<u8> = (0u8..16).collect();
        assert_eq!(UInt128::from_bytes_le(&bytes), Ok(expected));
        assert_eq!(
            UInt128::from_u16_words(&[
                0x0100, 0x0302, 0x0504, 0x0706, 0x0908, 0x0b0a, 0x0d0c, 0x0f0e
            ]),
            Ok(expected)
        );
        assert_eq!(
            UInt128::from_u32_words(&[0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c]),
            Ok(expected)
        );
        assert_eq!(
            UInt128::from_u64_words(&[0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908]),
            Ok(expected)
        );
    }

    #[test]
    fn component_count_mismatch() {
        assert_eq!(
            UInt128::from_bytes_le(&[0u8; 15]),
            Err(Int128Error::ArgumentCountMismatch { expected: 16, actual: 15 })
        );
        assert_eq!(
            Int128::from_u16_words(&[0u16; 9]),
            Err(Int128Error::ArgumentCountMismatch { expected: 8, actual: 9 })
        );
        assert_eq!(
            UInt128::from_u32_words(&[0u32; 3]),
            Err(Int128Error::ArgumentCountMismatch { expected: 4, actual: 3 })
        );
        assert_eq!(
            Int128::from_u64_words(&[]),
            Err(Int128Error::ArgumentCountMismatch { expected: 2, actual: 0 })
        );
    }

    #[test]
    fn floats_truncate() {
        assert_eq!(UInt128::from_f64(3.99), Ok(UInt128::from(3u8)));
        assert_eq!(Int128::from_f64(-3.99), Ok(Int128::from(-3i8)));
        assert_eq!(Int128::from_f64(-0.5), Ok(Int128::ZERO));
        assert_eq!(UInt128::from_f64(2f64.powi(100)), Ok(UInt128::ONE << 100));
        assert_eq!(UInt128::from_f64(2f64.powi(128)), Ok(UInt128::ZERO));
        assert_eq!(UInt128::from_f64(f64::NAN), Err(Int128Error::IntegerConversionError));
        assert_eq!(Int128::from_f64(f64::NEG_INFINITY), Err(Int128Error::IntegerConversionError));
    }

    #[test]
    fn big_int_narrowing_takes_low_bits() {
        let big = (BigInt::one() << 130u32) + BigInt::from(5);
        assert_eq!(UInt128::from_big_int(&big), UInt128::from(5u8));
        assert_eq!(UInt128::from_big_int(&BigInt::from(-1)), UInt128::MAX);
        assert_eq!(Int128::from_big_int(&BigInt::from(-1)), Int128::MINUS_ONE);
        assert_eq!(Int128::from_big_int(&(BigInt::one() << 127u32)), Int128::MIN);
        assert_eq!(BigInt::from(Int128::MIN), BigInt::from(i128::MIN));
        assert_eq!(BigInt::from(UInt128::MAX), BigInt::from(u128::MAX));
    }

    proptest! {
        #[test]
        fn big_int_round_trip(a: u128, b: i128) {
            let ua = UInt128::from(a);
            let sb = Int128::from(b);
            prop_assert_eq!(ua.to_big_int(), BigInt::from(a));
            prop_assert_eq!(sb.to_big_int(), BigInt::from(b));
            prop_assert_eq!(UInt128::from_big_int(&ua.to_big_int()), ua);
            prop_assert_eq!(Int128::from_big_int(&sb.to_big_int()), sb);
        }

        #[test]
        fn text_round_trip(a: u128, b: i128) {
            prop_assert_eq!(UInt128::from(a).to_string(), a.to_string());
            prop_assert_eq!(Int128::from(b).to_string(), b.to_string());
            prop_assert_eq!(a.to_string().parse::<UInt128>(), Ok(UInt128::from(a)));
            prop_assert_eq!(b.to_string().parse::<Int128>(), Ok(Int128::from(b)));
        }

        #[test]
        fn hex_matches_native(a: u128) {
            prop_assert_eq!(format!("{:x}", UInt128::from(a)), format!("{:x}", a));
        }
    }
}
