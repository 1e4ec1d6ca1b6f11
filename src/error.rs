use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the loaders.
#[derive(Debug, Error)]
pub enum Error {
    /// The env file could not be opened or read.
    ///
    /// The message leaves out the OS error; it is still
    /// reachable through [`std::error::Error::source`].
    #[error("failed to open {} file", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A non-blank line without a `=` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing separator on line {line}: {source}")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: u32,
    pub source: ScanError,
}

impl ParseError {
    pub(crate) fn missing_separator(line: u32, source: ScanError) -> Self {
        Self { line, source }
    }
}

/// Failure to find a delimiter while scanning a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{}", describe_missing(.0))]
    DelimiterNotFound(u8),
    #[error("no \"\\n\" or \"\\r\\n\" found")]
    NoNewlineFound,
}

fn describe_missing(byte: &u8) -> String {
    let quoted = quote_byte(*byte);
    match friendly_name(*byte) {
        Some(name) => format!("no {name} ({quoted}) found"),
        None => format!("no instance of {quoted} found"),
    }
}

fn friendly_name(byte: u8) -> Option<&'static str> {
    match byte {
        b'\n' => Some("newline"),
        b'\r' => Some("carriage return"),
        b' ' => Some("space"),
        b'\t' => Some("tab"),
        _ => None,
    }
}

/// Double-quoted, escaped rendering of a single byte, e.g. `"\n"` or `"="`.
fn quote_byte(byte: u8) -> String {
    let mut buf = [0u8; 4];
    format!("{:?}", char::from(byte).encode_utf8(&mut buf))
}
