//! Parse plain `NAME=VALUE` env files and apply them to an environment.
//!
//! The format is small: one assignment per line, split at the first `=`,
//! `\n` or `\r\n` line endings, blank lines ignored. There is no quoting,
//! escaping, comment or interpolation syntax, and no whitespace trimming.
//! Invalid UTF-8 is replaced with U+FFFD; everything else passes through
//! unchanged.
//!
//! [`apply_bytes`] and [`EnvLoader::load`] write into any [`EnvSink`], and
//! [`EnvLoader`] defaults to a process-isolated in-memory map.
//!
//! Loaders that mutate the process environment (`process_env`, `from_path`,
//! `from_paths`) are `unsafe`, because callers must guarantee no concurrent
//! process-environment access.

mod env;
mod error;
mod loader;
mod model;
mod parser;
pub mod scan;

pub use env::{EnvSink, TargetEnv};
pub use error::{Error, ParseError, ScanError};
pub use loader::{EnvLoader, apply_to, from_path, from_paths, process_env};
pub use model::{Entry, LoadReport};
pub use parser::{apply_bytes, parse_bytes, parse_str};
