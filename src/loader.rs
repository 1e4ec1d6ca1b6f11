use std::path::{Path, PathBuf};

use crate::env::{EnvSink, TargetEnv};
use crate::error::Error;
use crate::model::{Entry, LoadReport};
use crate::parser::{apply_bytes, parse_bytes_with_source};

const DEFAULT_FILE: &str = ".env";

/// Load `.env` from the current working directory into the process
/// environment.
///
/// Fails with [`Error::FileUnavailable`] if the file cannot be read, or with
/// [`Error::Parse`] at the first non-blank line without `=`. Assignments made
/// before a parse failure are kept.
///
/// # Safety
///
/// The caller must ensure no other threads concurrently read or write the
/// process environment while this runs.
pub unsafe fn process_env() -> Result<LoadReport, Error> {
    // SAFETY: forwarded to the caller.
    unsafe { from_path(DEFAULT_FILE) }
}

/// Load an env file from a specific path into the process environment.
///
/// # Safety
///
/// Same contract as [`process_env`].
pub unsafe fn from_path(path: impl AsRef<Path>) -> Result<LoadReport, Error> {
    // SAFETY: forwarded to the caller.
    let target = unsafe { TargetEnv::process() };
    EnvLoader::new().path(path).target(target).load()
}

/// Load several env files, in order, into the process environment.
///
/// # Safety
///
/// Same contract as [`process_env`].
pub unsafe fn from_paths<I, P>(paths: I) -> Result<LoadReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    // SAFETY: forwarded to the caller.
    let target = unsafe { TargetEnv::process() };
    EnvLoader::new().paths(paths).target(target).load()
}

/// Read one env file and apply it to `sink`.
pub fn apply_to<S>(path: impl AsRef<Path>, sink: &mut S) -> Result<LoadReport, Error>
where
    S: EnvSink + ?Sized,
{
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let mut report = apply_bytes(&bytes, sink)?;
    report.files_read = 1;
    tracing::debug!(
        path = %path.display(),
        loaded = report.loaded,
        blank_lines = report.blank_lines,
        "applied env file"
    );
    Ok(report)
}

/// Builder-style env file loader.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    paths: Vec<PathBuf>,
    target: TargetEnv,
}

impl EnvLoader {
    /// Create a loader reading `.env` into an in-memory target.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    pub fn target(mut self, target: TargetEnv) -> Self {
        self.target = target;
        self
    }

    pub fn target_env(&self) -> &TargetEnv {
        &self.target
    }

    pub fn target_env_mut(&mut self) -> &mut TargetEnv {
        &mut self.target
    }

    pub fn into_target(self) -> TargetEnv {
        self.target
    }

    /// Parse every file without touching the target.
    ///
    /// Entries keep file order across files, duplicates included.
    pub fn parse_only(&self) -> Result<Vec<Entry>, Error> {
        let mut entries = Vec::new();
        for path in self.effective_paths() {
            let bytes = read_file(&path)?;
            entries.extend(parse_bytes_with_source(&bytes, Some(&path))?);
        }
        Ok(entries)
    }

    /// Apply every file, in order, to the target.
    ///
    /// Later files win for repeated names. The first failure aborts; earlier
    /// assignments stay applied.
    pub fn load(&mut self) -> Result<LoadReport, Error> {
        let mut report = LoadReport::default();
        for path in self.effective_paths() {
            report.absorb(apply_to(&path, &mut self.target)?);
        }
        Ok(report)
    }

    fn effective_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(DEFAULT_FILE)]
        } else {
            self.paths.clone()
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    tracing::debug!(path = %path.display(), "reading env file");
    std::fs::read(path).map_err(|source| {
        tracing::debug!(path = %path.display(), error = %source, "env file unavailable");
        Error::FileUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })
}
