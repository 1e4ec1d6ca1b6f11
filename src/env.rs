use std::collections::{BTreeMap, HashMap};

/// Receiver of parsed `NAME=VALUE` pairs.
///
/// Assignments are infallible and the last write for a name wins.
pub trait EnvSink {
    fn set_var(&mut self, key: &str, value: &str);
}

impl EnvSink for BTreeMap<String, String> {
    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl EnvSink for HashMap<String, String> {
    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl<S: EnvSink + ?Sized> EnvSink for &mut S {
    fn set_var(&mut self, key: &str, value: &str) {
        (**self).set_var(key, value);
    }
}

/// Destination for loaded environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// Apply entries to the current process environment.
    ///
    /// This writes through [`std::env::set_var`], which mutates global process
    /// state and is not thread-safe for concurrent environment access.
    Process,
    /// Apply entries to an in-memory map.
    Memory(BTreeMap<String, String>),
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Create a process-environment target.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write the
    /// process environment for the duration of operations that may mutate this
    /// target.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Create an empty in-memory target.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory target seeded with existing values.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    pub fn is_process(&self) -> bool {
        matches!(self.kind, TargetEnvKind::Process)
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn as_memory_mut(&mut self) -> Option<&mut BTreeMap<String, String>> {
        match &mut self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    /// Look up a variable in this target.
    ///
    /// Non-UTF-8 process values are converted lossily.
    pub fn get_var(&self, key: &str) -> Option<String> {
        match &self.kind {
            TargetEnvKind::Process => {
                std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
            }
            TargetEnvKind::Memory(map) => map.get(key).cloned(),
        }
    }
}

impl EnvSink for TargetEnv {
    fn set_var(&mut self, key: &str, value: &str) {
        match &mut self.kind {
            TargetEnvKind::Process => {
                // `std::env::set_var` panics on these instead of reporting.
                if key.is_empty() || key.contains('\0') || value.contains('\0') {
                    tracing::warn!(key, "skipping name the process environment cannot hold");
                    return;
                }
                // SAFETY: a process target can only be built through the unsafe
                // `TargetEnv::process`, whose caller upholds exclusive access.
                unsafe { std::env::set_var(key, value) }
            }
            TargetEnvKind::Memory(map) => map.set_var(key, value),
        }
    }
}
