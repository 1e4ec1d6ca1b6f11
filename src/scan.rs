//! Delimiter scanning over raw byte slices.

use crate::error::ScanError;

/// Whether the delimiter itself belongs to the returned prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Include,
    Exclude,
}

/// Return the prefix of `buf` up to the first `delimiter`.
///
/// Fails with [`ScanError::DelimiterNotFound`] when the byte does not occur;
/// a partial prefix is never returned.
pub fn read_until(buf: &[u8], delimiter: u8, boundary: Boundary) -> Result<&[u8], ScanError> {
    let idx = buf
        .iter()
        .position(|byte| *byte == delimiter)
        .ok_or(ScanError::DelimiterNotFound(delimiter))?;

    Ok(match boundary {
        Boundary::Include => &buf[..=idx],
        Boundary::Exclude => &buf[..idx],
    })
}

/// Return the prefix of `buf` up to the first line terminator.
///
/// `\r\n` counts as one terminator; a `\r` that is not followed by `\n` is
/// ordinary content.
pub fn read_until_newline(buf: &[u8], boundary: Boundary) -> Result<&[u8], ScanError> {
    let lf = buf
        .iter()
        .position(|byte| *byte == b'\n')
        .ok_or(ScanError::NoNewlineFound)?;

    Ok(match boundary {
        Boundary::Include => &buf[..=lf],
        Boundary::Exclude if lf > 0 && buf[lf - 1] == b'\r' => &buf[..lf - 1],
        Boundary::Exclude => &buf[..lf],
    })
}
