use std::borrow::Cow;
use std::path::Path;

use crate::env::EnvSink;
use crate::error::ParseError;
use crate::model::{Entry, LoadReport};
use crate::scan::{Boundary, read_until, read_until_newline};

/// Parse env entries from text.
///
/// Entries are returned in file order; a repeated name appears once per
/// assignment.
pub fn parse_str(input: &str) -> Result<Vec<Entry>, ParseError> {
    parse_bytes(input.as_bytes())
}

/// Parse env entries from raw bytes.
///
/// Invalid UTF-8 in names or values is replaced with U+FFFD.
pub fn parse_bytes(input: &[u8]) -> Result<Vec<Entry>, ParseError> {
    parse_bytes_with_source(input, None)
}

/// Parse `input` and deliver every pair to `sink` in file order.
///
/// Parsing stops at the first non-blank line without `=`. Pairs applied
/// before that line stay applied.
pub fn apply_bytes<S>(input: &[u8], sink: &mut S) -> Result<LoadReport, ParseError>
where
    S: EnvSink + ?Sized,
{
    let mut report = LoadReport::default();

    for line in Lines::new(input) {
        match line? {
            Line::Blank => report.blank_lines += 1,
            Line::Pair { number, name, value } => {
                let key = decode(name);
                tracing::trace!(key = %key, line = number, "applying entry");
                sink.set_var(&key, &decode(value));
                report.loaded += 1;
            }
        }
    }

    Ok(report)
}

pub(crate) fn parse_bytes_with_source(
    input: &[u8],
    source: Option<&Path>,
) -> Result<Vec<Entry>, ParseError> {
    let mut entries = Vec::new();

    for line in Lines::new(input) {
        let Line::Pair { number, name, value } = line? else {
            continue;
        };
        entries.push(Entry {
            key: decode(name).into_owned(),
            value: decode(value).into_owned(),
            source: source.map(Path::to_path_buf),
            line: number,
        });
    }

    Ok(entries)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Pair {
        number: u32,
        name: &'a [u8],
        value: &'a [u8],
    },
}

/// Splits a buffer into lines, consuming it from the front.
///
/// Every step consumes at least one byte. After an error the iterator is
/// exhausted.
struct Lines<'a> {
    remaining: &'a [u8],
    number: u32,
}

impl<'a> Lines<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            remaining: input,
            number: 1,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<Line<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let number = self.number;
        // Without a terminator the rest of the buffer is the final line.
        let (line, last) = read_until_newline(self.remaining, Boundary::Include)
            .map_or((self.remaining, true), |line| (line, false));
        self.remaining = &self.remaining[line.len()..];
        self.number += 1;

        if is_blank(line, last) {
            return Some(Ok(Line::Blank));
        }

        let name = match read_until(line, b'=', Boundary::Exclude) {
            Ok(name) => name,
            Err(source) => {
                tracing::debug!(line = number, "line has no `=` separator");
                self.remaining = &[];
                return Some(Err(ParseError::missing_separator(number, source)));
            }
        };

        let rest = &line[name.len() + 1..];
        let value = read_until_newline(rest, Boundary::Exclude).unwrap_or(rest);

        Some(Ok(Line::Pair {
            number,
            name,
            value,
        }))
    }
}

fn is_blank(line: &[u8], last: bool) -> bool {
    match line {
        b"\n" | b"\r\n" => true,
        b"\r" => last,
        _ => false,
    }
}
