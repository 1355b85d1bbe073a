use crate::invoker::{InvokeError, ToolInvoker};
use crate::parser::{FormatError, RecordParser};
use crate::record::{Record, RecordFields};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Sets an environment variable for the lifetime of the guard.
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        // The process environment is global. Lock it so tests don't race even
        // if a #[serial] annotation is missed.
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::var_os(key);
        // SAFETY: ENV_LOCK and #[serial] keep other test threads out of the environment.
        unsafe { std::env::set_var(key, value) };
        Self {
            key,
            original,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: still holding ENV_LOCK.
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// `n` distinct valid records.
pub(crate) fn sample_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::new(RecordFields {
                brand: format!("Brand{}", i),
                material_type: "PLA".to_string(),
                color: format!("Color{}", i),
                temp_hotend: "200-220".to_string(),
                temp_bed: "60".to_string(),
                ..Default::default()
            })
            .unwrap()
        })
        .collect()
}

/// CSV text for `sample_records(n)`, with a header line.
pub(crate) fn sample_csv(n: usize) -> String {
    let mut text = String::from("Brand,Type,Color,Hotend,Bed\n");
    for i in 0..n {
        text.push_str(&format!("Brand{},PLA,Color{},200-220,60\n", i, i));
    }
    text
}

/// Deterministic in-memory [`ToolInvoker`].
///
/// Records every `generate` call. Jobs whose output file name is in the
/// failing set return an error; names in the panicking set panic.
#[derive(Default)]
pub(crate) struct FakeInvoker {
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    unavailable: bool,
    version_checks: Mutex<usize>,
}

impl FakeInvoker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.failing.extend(names);
        self
    }

    pub(crate) fn panicking(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.panicking.extend(names);
        self
    }

    pub(crate) fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub(crate) fn version_checks(&self) -> usize {
        *self
            .version_checks
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl ToolInvoker for FakeInvoker {
    fn generate(&self, output: &Path, arguments: &[String]) -> Result<(), InvokeError> {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push((output.to_path_buf(), arguments.to_vec()));

        let name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.panicking.contains(&name) {
            panic!("fake invoker panic for {}", name);
        }
        if self.failing.contains(&name) {
            return Err(InvokeError::Failed {
                program: "fake-openscad".to_string(),
                status: "exit code 1".to_string(),
                stderr: format!("cannot render {}", name),
            });
        }
        Ok(())
    }

    fn check_available(&self) -> Result<(), InvokeError> {
        if self.unavailable {
            return Err(InvokeError::Unavailable("fake OpenSCAD missing".to_string()));
        }
        Ok(())
    }

    fn version(&self) -> Result<String, InvokeError> {
        *self
            .version_checks
            .lock()
            .unwrap_or_else(|poison| poison.into_inner()) += 1;
        Ok("FakeSCAD version 1.0".to_string())
    }
}

/// Parser that returns a fixed result regardless of input.
pub(crate) struct FixedParser {
    pub(crate) result: Result<Vec<Record>, FormatError>,
}

impl RecordParser for FixedParser {
    fn parse(&self, _text: &str) -> Result<Vec<Record>, FormatError> {
        self.result.clone()
    }
}
