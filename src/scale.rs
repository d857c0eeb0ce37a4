// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Scaling by arbitrary-precision factors.
//!
//! The product is formed exactly, truncated toward zero to an integer and
//! then narrowed to the low 128 bits the same way `from_big_int` does.

use crate::{Int128, UInt128};
use num_bigint::BigInt;
use num_rational::BigRational;

/// `unscaled * 10^-scale` as an exact rational.
fn decimal_factor(unscaled: &BigInt, scale: u32) -> BigRational {
    let denominator = num_traits::pow(BigInt::from(10u8), scale as usize);
    BigRational::new(unscaled.clone(), denominator)
}

macro_rules! impl_scale {
    ($name:ident) => {
        impl $name {
            /// `self * factor`, truncated toward zero and wrapped to 128 bits.
            pub fn scale_by_rational(&self, factor: &BigRational) -> Self {
                let product = BigRational::from_integer(self.to_big_int()) * factor;
                Self::from_big_int(&product.to_integer())
            }

            /// `self * unscaled * 10^-scale`, i.e. scaling by a decimal with
            /// `scale` fractional digits, truncated toward zero.
            pub fn scale_by_decimal(&self, unscaled: &BigInt, scale: u32) -> Self {
                self.scale_by_rational(&decimal_factor(unscaled, scale))
            }
        }
    };
}

impl_scale!(UInt128);
impl_scale!(Int128);
