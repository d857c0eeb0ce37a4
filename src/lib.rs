// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Signed and unsigned 128-bit integers stored as two 64-bit limbs.
//!
//! [`UInt128`] is the ring of integers modulo 2^128 under unsigned ordering,
//! [`Int128`] the same bits read as two's complement. Addition, subtraction
//! and multiplication wrap; division, negation and exponentiation report the
//! cases they cannot represent through [`Int128Error`].
//!
//! ```
//! use limb128::{Int128, Int128Error, UInt128};
//!
//! let a = UInt128::from_parts(0, u64::MAX);
//! assert_eq!(a + UInt128::ONE, UInt128::from_parts(1, 0));
//!
//! let q = Int128::from(-10i64).divide(Int128::from(3i64)).unwrap();
//! assert_eq!(q, Int128::from(-3i64));
//!
//! assert_eq!(Int128::MIN.negate(), Err(Int128Error::UnrepresentableNegation));
//! ```

pub mod algebra;
pub mod convert;
pub mod error;
pub mod limbs;
mod macros;
pub mod scale;
pub mod signed;
pub mod unsigned;
mod utils;

pub use algebra::IntegerAlgebra;
pub use error::Int128Error;
pub use signed::Int128;
pub use unsigned::UInt128;
