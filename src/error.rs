// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failures raised by the 128-bit integer operations.
///
/// Every variant is an argument/domain error. Nothing is retried or saturated;
/// the operation that detects the condition returns it immediately.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int128Error {
    #[error("division by zero")]
    DivideByZero,

    /// The operand was the minimum signed value, whose negation does not fit.
    #[error("negation of the minimum value is not representable")]
    UnrepresentableNegation,

    /// The minimum signed value divided by minus one.
    #[error("division of the minimum value by -1 is not representable")]
    UnrepresentableDivision,

    /// `0^0`.
    #[error("zero raised to the zeroth power is undefined")]
    UndefinedPower,

    #[error("negative exponent")]
    NegativeExponent,

    #[error("expected {expected} components, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    #[error("integer conversion error")]
    IntegerConversionError,

    #[error("invalid integer literal")]
    ParseError,
}
