// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

/// Generates a two-limb 128-bit integer type and everything about it that does
/// not depend on signedness.
///
/// The invoking module must provide, as inherent methods on the generated type:
/// `shift_right_bits(self, u32) -> Self`, `div_mod(self, Self)` and
/// `fmt_decimal(&self, &mut fmt::Formatter)`.
///
/// Usage example:
///
/// construct_int128! {
///     /// docs
///     pub struct UInt128;
/// }
macro_rules! construct_int128 {
    ( $(#[$attr:meta])* $vis:vis struct $name:ident; ) => {
        #[repr(transparent)]
        $(#[$attr])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        $vis struct $name(pub(crate) $crate::limbs::U128);

        impl $name {
            /// The number of bits in this integer type
            pub const BITS: u32 = 128;
            /// Number of bytes in the binary encoding
            pub const ENCODED_LEN: usize = 16;
            /// Additive identity
            pub const ZERO: Self = Self($crate::limbs::U128::from_limbs(0, 0));
            /// Multiplicative identity
            pub const ONE: Self = Self($crate::limbs::U128::from_limbs(0, 1));

            /// Build a value from its high (bits 64..127) and low (bits 0..63) limbs.
            #[inline]
            pub const fn from_parts(hi: u64, lo: u64) -> Self {
                Self($crate::limbs::U128::from_limbs(hi, lo))
            }

            /// High limb, bits 64..127
            #[inline]
            pub const fn hi(&self) -> u64 {
                self.0.hi_limb()
            }

            /// Low limb, bits 0..63
            #[inline]
            pub const fn lo(&self) -> u64 {
                self.0.lo_limb()
            }

            /// Check if every bit is clear
            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Check if bit 0 is clear
            #[inline]
            pub fn is_even(&self) -> bool {
                self.0.lo_limb() & 1 == 0
            }

            /// Check if bit 0 is set
            #[inline]
            pub fn is_odd(&self) -> bool {
                self.0.lo_limb() & 1 == 1
            }

            /// Bit at `index`; `false` past bit 127.
            #[inline]
            pub fn bit(&self, index: u32) -> bool {
                index < Self::BITS && self.0.bit(index as usize)
            }

            // ---- ring operations, modulo 2^128 ----

            /// Wrapping addition
            #[inline]
            pub fn wrapping_add(self, rhs: Self) -> Self {
                Self(self.0.wrapping_add(rhs.0))
            }

            /// Wrapping subtraction
            #[inline]
            pub fn wrapping_sub(self, rhs: Self) -> Self {
                Self(self.0.wrapping_sub(rhs.0))
            }

            /// Wrapping multiplication; the low 128 bits of the product, which
            /// are the same under either reading.
            #[inline]
            pub fn wrapping_mul(self, rhs: Self) -> Self {
                Self(self.0.wrapping_mul(rhs.0))
            }

            /// `self - 1`; the predecessor of the minimum wraps to the maximum.
            #[inline]
            pub fn pred(self) -> Self {
                self.wrapping_sub(Self::ONE)
            }

            /// `self + 1`; the successor of the maximum wraps to the minimum.
            #[inline]
            pub fn succ(self) -> Self {
                self.wrapping_add(Self::ONE)
            }

            /// Quotient of [`div_mod`](Self::div_mod).
            #[inline]
            pub fn divide(self, rhs: Self) -> Result<Self, $crate::error::Int128Error> {
                self.div_mod(rhs).map(|(q, _)| q)
            }

            /// Remainder of [`div_mod`](Self::div_mod).
            #[inline]
            pub fn modulo(self, rhs: Self) -> Result<Self, $crate::error::Int128Error> {
                self.div_mod(rhs).map(|(_, r)| r)
            }

            /// Checked division. Returns None wherever `divide` fails.
            #[inline]
            pub fn checked_div(self, rhs: Self) -> Option<Self> {
                self.divide(rhs).ok()
            }

            /// Checked remainder. Returns None wherever `modulo` fails.
            #[inline]
            pub fn checked_rem(self, rhs: Self) -> Option<Self> {
                self.modulo(rhs).ok()
            }

            /// `-1`, `0` or `1` as `self` is less than, equal to or greater than `other`.
            #[inline]
            pub fn compare(&self, other: &Self) -> i32 {
                match core::cmp::Ord::cmp(self, other) {
                    core::cmp::Ordering::Less => -1,
                    core::cmp::Ordering::Equal => 0,
                    core::cmp::Ordering::Greater => 1,
                }
            }

            /// See [`IntegerAlgebra::pow`]($crate::algebra::IntegerAlgebra::pow).
            #[inline]
            pub fn pow(self, exponent: Self) -> Result<Self, $crate::error::Int128Error> {
                $crate::algebra::IntegerAlgebra::pow(self, exponent)
            }

            /// See [`IntegerAlgebra::gcd`]($crate::algebra::IntegerAlgebra::gcd).
            #[inline]
            pub fn gcd(self, other: Self) -> Self {
                $crate::algebra::IntegerAlgebra::gcd(self, other)
            }

            /// See [`IntegerAlgebra::lcm`]($crate::algebra::IntegerAlgebra::lcm).
            #[inline]
            pub fn lcm(self, other: Self) -> Self {
                $crate::algebra::IntegerAlgebra::lcm(self, other)
            }

            // ---- bitwise ----

            /// Bitwise and
            #[inline]
            pub fn bit_and(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }

            /// Bitwise or
            #[inline]
            pub fn bit_or(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }

            /// Bitwise exclusive or
            #[inline]
            pub fn bit_xor(self, rhs: Self) -> Self {
                Self(self.0 ^ rhs.0)
            }

            /// Bitwise complement
            #[inline]
            pub fn bit_not(self) -> Self {
                Self(!self.0)
            }

            /// `self & !rhs`
            #[inline]
            pub fn bit_and_not(self, rhs: Self) -> Self {
                Self(self.0 & !rhs.0)
            }

            /// Index of the highest set bit, `-1` for zero.
            #[inline]
            pub fn leading_bit(&self) -> i32 {
                self.0.leading_bit()
            }

            /// Number of zero bits above the highest set bit
            #[inline]
            pub fn leading_zeros(&self) -> u32 {
                self.0.leading_zeros()
            }

            /// Number of zero bits below the lowest set bit
            #[inline]
            pub fn trailing_zeros(&self) -> u32 {
                self.0.trailing_zeros()
            }

            /// Number of set bits
            #[inline]
            pub fn count_ones(&self) -> u32 {
                self.0.popcount()
            }

            /// Left shift by `n` bits, taken modulo 128.
            #[inline]
            pub fn shift_left_bits(self, n: u32) -> Self {
                Self(self.0.shl_bits(n % Self::BITS))
            }

            /// Left shift; a negative `count` shifts right by `|count|`.
            #[inline]
            pub fn shift_left(self, count: i32) -> Self {
                if count >= 0 {
                    self.shift_left_bits(count as u32)
                } else {
                    self.shift_right_bits(count.unsigned_abs())
                }
            }

            /// Right shift; a negative `count` shifts left by `|count|`.
            #[inline]
            pub fn shift_right(self, count: i32) -> Self {
                if count >= 0 {
                    self.shift_right_bits(count as u32)
                } else {
                    self.shift_left_bits(count.unsigned_abs())
                }
            }

            // ---- randomness ----

            /// Uniform over all 2^128 bit patterns, from the thread-local generator.
            #[inline]
            pub fn random() -> Self {
                Self::random_with(&mut rand::thread_rng())
            }

            /// Uniform over all 2^128 bit patterns, drawing the low limb first.
            #[inline]
            pub fn random_with<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
                let lo = rng.next_u64();
                let hi = rng.next_u64();
                Self::from_parts(hi, lo)
            }

            // ---- binary encoding: lo then hi, each little-endian ----

            /// The 16-byte encoding
            #[inline]
            pub fn to_le_bytes(self) -> [u8; 16] {
                let mut out = [0u8; 16];
                self.0.to_little_endian(&mut out);
                out
            }

            /// Inverse of [`to_le_bytes`](Self::to_le_bytes)
            #[inline]
            pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
                Self($crate::limbs::U128::from_little_endian(&bytes))
            }

            /// Write the 16-byte encoding into `out`, which must be exactly 16 bytes long.
            pub fn encode_into(self, out: &mut [u8]) -> Result<(), $crate::error::Int128Error> {
                if out.len() != Self::ENCODED_LEN {
                    return Err($crate::error::Int128Error::ArgumentCountMismatch {
                        expected: Self::ENCODED_LEN,
                        actual: out.len(),
                    });
                }
                out.copy_from_slice(&self.to_le_bytes());
                Ok(())
            }

            /// Read a value from its 16-byte encoding.
            pub fn decode(bytes: &[u8]) -> Result<Self, $crate::error::Int128Error> {
                $crate::utils::expect_len(bytes.len(), Self::ENCODED_LEN)?;
                let lo: [u8; 8] = $crate::utils::extract_from_raw_bytes(bytes, 0..8)?;
                let hi: [u8; 8] = $crate::utils::extract_from_raw_bytes(bytes, 8..16)?;
                Ok(Self::from_parts(u64::from_le_bytes(hi), u64::from_le_bytes(lo)))
            }

            // ---- component-array constructors, least significant component first ----

            /// From exactly 16 bytes
            pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, $crate::error::Int128Error> {
                Self::decode(bytes)
            }

            /// From exactly 8 16-bit words
            pub fn from_u16_words(words: &[u16]) -> Result<Self, $crate::error::Int128Error> {
                $crate::utils::expect_len(words.len(), 8)?;
                let limb = |ws: &[u16]| {
                    ws.iter().rev().fold(0u64, |acc, &w| (acc << 16) | w as u64)
                };
                Ok(Self::from_parts(limb(&words[4..]), limb(&words[..4])))
            }

            /// From exactly 4 32-bit words
            pub fn from_u32_words(words: &[u32]) -> Result<Self, $crate::error::Int128Error> {
                $crate::utils::expect_len(words.len(), 4)?;
                let lo = ((words[1] as u64) << 32) | words[0] as u64;
                let hi = ((words[3] as u64) << 32) | words[2] as u64;
                Ok(Self::from_parts(hi, lo))
            }

            /// From exactly 2 64-bit words
            pub fn from_u64_words(words: &[u64]) -> Result<Self, $crate::error::Int128Error> {
                $crate::utils::expect_len(words.len(), 2)?;
                Ok(Self::from_parts(words[1], words[0]))
            }

            // ---- narrowing exports, low bits only ----

            /// Low 8 bits
            #[inline]
            pub fn low_u8(&self) -> u8 {
                self.0.low_u64() as u8
            }

            /// Low 16 bits
            #[inline]
            pub fn low_u16(&self) -> u16 {
                self.0.low_u64() as u16
            }

            /// Low 32 bits
            #[inline]
            pub fn low_u32(&self) -> u32 {
                self.0.low_u64() as u32
            }

            /// Low 64 bits, the low limb
            #[inline]
            pub fn low_u64(&self) -> u64 {
                self.0.low_u64()
            }
        }

        // zero extension is correct for both readings
        $crate::macros::__impl_from_unsigned_native!($name, u8, u16, u32, u64);

        // ---- operators: + - * wrap, / % panic on the same conditions as div_mod ----

        impl core::ops::Add for $name {
            type Output = Self;
            #[inline] fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
        }

        impl core::ops::Sub for $name {
            type Output = Self;
            #[inline] fn sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
        }

        impl core::ops::Mul for $name {
            type Output = Self;
            #[inline] fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
        }

        impl core::ops::Div for $name {
            type Output = Self;

            #[track_caller]
            #[inline]
            fn div(self, rhs: Self) -> Self {
                self.divide(rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl core::ops::Rem for $name {
            type Output = Self;

            #[track_caller]
            #[inline]
            fn rem(self, rhs: Self) -> Self {
                self.modulo(rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl core::ops::AddAssign for $name {
            #[inline] fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
        }
        impl core::ops::SubAssign for $name {
            #[inline] fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
        }
        impl core::ops::MulAssign for $name {
            #[inline] fn mul_assign(&mut self, rhs: Self) { *self = *self * rhs; }
        }
        impl core::ops::DivAssign for $name {
            #[track_caller]
            #[inline] fn div_assign(&mut self, rhs: Self) { *self = *self / rhs; }
        }
        impl core::ops::RemAssign for $name {
            #[track_caller]
            #[inline] fn rem_assign(&mut self, rhs: Self) { *self = *self % rhs; }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            #[inline] fn bitand(self, rhs: Self) -> Self { self.bit_and(rhs) }
        }

        impl core::ops::BitAndAssign for $name {
            #[inline] fn bitand_assign(&mut self, rhs: Self) { *self = self.bit_and(rhs); }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            #[inline] fn bitor(self, rhs: Self) -> Self { self.bit_or(rhs) }
        }

        impl core::ops::BitOrAssign for $name {
            #[inline] fn bitor_assign(&mut self, rhs: Self) { *self = self.bit_or(rhs); }
        }

        impl core::ops::BitXor for $name {
            type Output = Self;
            #[inline] fn bitxor(self, rhs: Self) -> Self { self.bit_xor(rhs) }
        }

        impl core::ops::BitXorAssign for $name {
            #[inline] fn bitxor_assign(&mut self, rhs: Self) { *self = self.bit_xor(rhs); }
        }

        impl core::ops::Not for $name {
            type Output = Self;
            #[inline] fn not(self) -> Self { self.bit_not() }
        }

        impl core::ops::Shl<u32> for $name {
            type Output = Self;
            #[inline] fn shl(self, rhs: u32) -> Self { self.shift_left_bits(rhs) }
        }

        impl core::ops::ShlAssign<u32> for $name {
            #[inline] fn shl_assign(&mut self, rhs: u32) { *self = self.shift_left_bits(rhs); }
        }

        impl core::ops::Shr<u32> for $name {
            type Output = Self;
            #[inline] fn shr(self, rhs: u32) -> Self { self.shift_right_bits(rhs) }
        }

        impl core::ops::ShrAssign<u32> for $name {
            #[inline] fn shr_assign(&mut self, rhs: u32) { *self = self.shift_right_bits(rhs); }
        }

        // ---- formatting ----

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                self.fmt_decimal(f)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(self, f)
            }
        }

        // hex and binary print the raw two's-complement bits, like the native integers
        impl core::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let digits = if self.hi() == 0 {
                    format!("{:x}", self.lo())
                } else {
                    format!("{:x}{:016x}", self.hi(), self.lo())
                };
                f.pad_integral(true, "0x", &digits)
            }
        }

        impl core::fmt::UpperHex for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let digits = if self.hi() == 0 {
                    format!("{:X}", self.lo())
                } else {
                    format!("{:X}{:016X}", self.hi(), self.lo())
                };
                f.pad_integral(true, "0x", &digits)
            }
        }

        impl core::fmt::Binary for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let digits = if self.hi() == 0 {
                    format!("{:b}", self.lo())
                } else {
                    format!("{:b}{:064b}", self.hi(), self.lo())
                };
                f.pad_integral(true, "0b", &digits)
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::Int128Error;

            fn from_str(src: &str) -> Result<Self, Self::Err> {
                Self::from_str_radix(src, 10)
            }
        }

        impl rand::distributions::Distribution<$name> for rand::distributions::Standard {
            #[inline]
            fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> $name {
                $name::random_with(rng)
            }
        }

        // Optional: bytemuck. Layout is `lo, hi`.
        #[cfg(feature = "bytemuck")]
        unsafe impl bytemuck::Zeroable for $name {}
        #[cfg(feature = "bytemuck")]
        unsafe impl bytemuck::Pod for $name {}

        // Optional: serde. Decimal text for human-readable formats, the 16-byte encoding otherwise.
        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where S: serde::Serializer
            {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    serializer.serialize_bytes(&self.to_le_bytes())
                }
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where D: serde::Deserializer<'de>
            {
                struct Int128Visitor;

                impl<'de> serde::de::Visitor<'de> for Int128Visitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                        f.write_str(concat!(
                            "a decimal string or 16 bytes encoding a ",
                            stringify!($name)
                        ))
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse::<$name>().map_err(E::custom)
                    }

                    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<$name, E> {
                        $name::decode(v).map_err(E::custom)
                    }
                }

                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(Int128Visitor)
                } else {
                    deserializer.deserialize_bytes(Int128Visitor)
                }
            }
        }

        // Optional: borsh, same 16 bytes as `to_le_bytes`.
        #[cfg(feature = "borsh")]
        impl borsh::BorshSerialize for $name {
            fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
                writer.write_all(&self.to_le_bytes())
            }
        }

        #[cfg(feature = "borsh")]
        impl borsh::BorshDeserialize for $name {
            fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
                let mut buf = [0u8; 16];
                reader.read_exact(&mut buf)?;
                Ok(Self::from_le_bytes(buf))
            }
        }
    };
}

macro_rules! __impl_from_unsigned_native {
    ($name:ident, $($t:ty),*) => {
        $(
            impl core::convert::From<$t> for $name {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_parts(0, value as u64)
                }
            }
        )*
    };
}

pub(crate) use __impl_from_unsigned_native;
pub(crate) use construct_int128;

#[cfg(test)]
mod tests {
    use crate::{Int128, Int128Error, UInt128};
    use proptest::prelude::*;

    #[test]
    fn encoding_is_lo_then_hi_little_endian() {
        let v = UInt128::from_parts(0x0f0e_0d0c_0b0a_0908, 0x0706_0504_0302_0100);
        let expected: Vec<u8> = (0u8..16).collect();
        assert_eq!(v.to_le_bytes().to_vec(), expected);
        assert_eq!(UInt128::decode(&expected), Ok(v));
        assert_eq!(v.to_le_bytes(), u128::from(v).to_le_bytes());
    }

    #[test]
    fn encode_into_checks_the_slot() {
        let mut buf = [0u8; 16];
        Int128::MINUS_ONE.encode_into(&mut buf).unwrap();
        assert_eq!(buf, [0xff; 16]);

        let mut short = [0u8; 8];
        assert_eq!(
            Int128::ONE.encode_into(&mut short),
            Err(Int128Error::ArgumentCountMismatch { expected: 16, actual: 8 })
        );
        assert_eq!(
            UInt128::decode(&[0u8; 17]),
            Err(Int128Error::ArgumentCountMismatch { expected: 16, actual: 17 })
        );
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(UInt128::default(), UInt128::ZERO);
        assert_eq!(Int128::default(), Int128::ZERO);
    }

    #[test]
    fn random_distribution() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let a: UInt128 = rng.gen();
        let b: Int128 = rng.gen();
        // two draws of 128 random bits colliding would mean a broken generator
        assert_ne!(a, rng.gen::<UInt128>());
        assert_ne!(b, rng.gen::<Int128>());
    }

    proptest! {
        #[test]
        fn encoding_round_trips(hi: u64, lo: u64) {
            let u = UInt128::from_parts(hi, lo);
            let s = Int128::from_parts(hi, lo);
            prop_assert_eq!(UInt128::from_le_bytes(u.to_le_bytes()), u);
            prop_assert_eq!(Int128::decode(&s.to_le_bytes()), Ok(s));
            prop_assert_eq!(u.to_le_bytes(), s.to_le_bytes());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_uses_decimal_text() {
        let v = Int128::MIN;
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, format!("\"{}\"", i128::MIN));
        assert_eq!(serde_json::from_str::<Int128>(&json).unwrap(), v);
        assert!(serde_json::from_str::<UInt128>("\"-1\"").is_err());
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn bytemuck_layout_is_lo_then_hi() {
        let v = UInt128::from_parts(2, 1);
        let words: &[u64; 2] = bytemuck::cast_ref(&v);
        assert_eq!(words, &[1, 2]);
    }

    #[cfg(feature = "borsh")]
    #[test]
    fn borsh_matches_the_binary_encoding() {
        let v = UInt128::from_parts(0xdead_beef, 42);
        let bytes = borsh::to_vec(&v).unwrap();
        assert_eq!(bytes, v.to_le_bytes().to_vec());
        assert_eq!(borsh::from_slice::<UInt128>(&bytes).unwrap(), v);
    }
}
