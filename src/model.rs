use std::path::PathBuf;

/// A parsed `NAME=VALUE` entry from an env file or input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: Option<PathBuf>,
    pub line: u32,
}

/// Summary of a parse-and-apply pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Number of assignments delivered to the sink.
    pub loaded: usize,
    pub blank_lines: usize,
    pub files_read: usize,
}

impl LoadReport {
    pub(crate) fn absorb(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.blank_lines += other.blank_lines;
        self.files_read += other.files_read;
    }
}
