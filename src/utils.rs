// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::error::Int128Error;

#[inline]
pub(crate) fn extract_from_raw_bytes<T>(
    bytes: &[u8],
    range: std::ops::Range<usize>,
) -> Result<T, Int128Error>
where
    T: Sized + for<'a> TryFrom<&'a [u8]>,
{
    let actual = bytes.len();
    let slice = bytes
        .get(range.clone())
        .ok_or(Int128Error::ArgumentCountMismatch { expected: range.end, actual })?;
    T::try_from(slice).map_err(|_| Int128Error::ArgumentCountMismatch {
        expected: range.len(),
        actual: slice.len(),
    })
}

#[inline]
pub(crate) fn expect_len(actual: usize, expected: usize) -> Result<(), Int128Error> {
    if actual != expected {
        return Err(Int128Error::ArgumentCountMismatch { expected, actual });
    }
    Ok(())
}
