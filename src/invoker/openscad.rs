//! OpenSCAD command runner.
//!
//! Locates the OpenSCAD binary, builds the per-job command line
//! (`openscad -o <output> -D ... <template>`), and maps process failures to
//! [`InvokeError`]. Output is captured so concurrent jobs do not interleave on
//! the terminal.

use super::{InvokeError, ToolInvoker};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};
use tracing::debug;

/// Executable name looked up on `PATH`.
const OPENSCAD_BINARY: &str = "openscad";

/// OpenSCAD invoker bound to a single `.scad` template.
#[derive(Debug, Clone)]
pub struct OpenScadInvoker {
    /// Program followed by any fixed leading arguments.
    program: Vec<String>,
    template: PathBuf,
}

impl OpenScadInvoker {
    /// Create an invoker from an already-split command.
    pub fn new(program: Vec<String>, template: impl Into<PathBuf>) -> Result<Self, InvokeError> {
        if program.is_empty() {
            return Err(InvokeError::Unavailable(
                "OpenSCAD command is empty".to_string(),
            ));
        }

        Ok(Self {
            program,
            template: template.into(),
        })
    }

    /// Create an invoker from a command string such as
    /// `flatpak run org.openscad.OpenSCAD`, split with shell quoting rules.
    pub fn from_command(command: &str, template: impl Into<PathBuf>) -> Result<Self, InvokeError> {
        let program = shell_words::split(command).map_err(|e| {
            InvokeError::Unavailable(format!(
                "failed to parse OpenSCAD command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        Self::new(program, template)
    }

    /// Locate OpenSCAD on this host.
    ///
    /// An explicit command wins. Otherwise the platform's standard install
    /// locations are tried, then `openscad` on `PATH`.
    pub fn discover(command: Option<&str>, template: impl Into<PathBuf>) -> Result<Self, InvokeError> {
        if let Some(command) = command.filter(|c| !c.trim().is_empty()) {
            return Self::from_command(command, template);
        }

        let found = platform_candidates()
            .into_iter()
            .find(|candidate| candidate.is_file())
            .or_else(|| find_on_path(OPENSCAD_BINARY));

        match found {
            Some(path) => {
                debug!(path = %path.display(), "located OpenSCAD");
                Self::new(vec![path.to_string_lossy().into_owned()], template)
            }
            None => Err(InvokeError::Unavailable(
                "OpenSCAD not found in standard locations or PATH\n\
                 Fix: install OpenSCAD or set `openscad_path` in the config."
                    .to_string(),
            )),
        }
    }

    pub fn program(&self) -> &[String] {
        &self.program
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Full argv for one generation call, program first. The template must be
    /// the last argument.
    pub fn command_line(&self, output: &Path, arguments: &[String]) -> Vec<String> {
        let mut argv = self.program.clone();
        argv.push("-o".to_string());
        argv.push(output.to_string_lossy().into_owned());
        argv.extend(arguments.iter().cloned());
        argv.push(self.template.to_string_lossy().into_owned());
        argv
    }

    fn program_name(&self) -> &str {
        &self.program[0]
    }

    fn run<I, S>(&self, args: I) -> Result<Output, InvokeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(self.program_name())
            .args(&self.program[1..])
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| InvokeError::Spawn {
                program: self.program_name().to_string(),
                reason: format!("{}\nFix: ensure OpenSCAD is installed and in PATH.", e),
            })
    }

    fn failure(&self, output: &Output) -> InvokeError {
        InvokeError::Failed {
            program: self.program_name().to_string(),
            status: describe_status(output.status),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl ToolInvoker for OpenScadInvoker {
    fn generate(&self, output: &Path, arguments: &[String]) -> Result<(), InvokeError> {
        let argv = self.command_line(output, arguments);
        debug!(command = %shell_words::join(&argv), "running OpenSCAD");

        let result = self.run(&argv[self.program.len()..])?;
        if result.status.success() {
            Ok(())
        } else {
            Err(self.failure(&result))
        }
    }

    fn check_available(&self) -> Result<(), InvokeError> {
        let program = Path::new(self.program_name());
        let is_path = program.is_absolute() || program.components().count() > 1;

        if is_path {
            if !program.is_file() {
                return Err(InvokeError::Unavailable(format!(
                    "OpenSCAD not found at {}",
                    program.display()
                )));
            }
        } else if find_on_path(self.program_name()).is_none() {
            return Err(InvokeError::Unavailable(format!(
                "'{}' not found in PATH",
                self.program_name()
            )));
        }

        if !self.template.is_file() {
            return Err(InvokeError::Unavailable(format!(
                "OpenSCAD template not found at {}",
                self.template.display()
            )));
        }

        Ok(())
    }

    fn version(&self) -> Result<String, InvokeError> {
        let output = self.run(["--version"])?;
        if !output.status.success() {
            return Err(self.failure(&output));
        }

        // OpenSCAD prints its version on stderr.
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !stdout.is_empty() {
            return Ok(stdout);
        }
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn platform_candidates() -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        let mut candidates = vec![PathBuf::from(
            "/Applications/OpenSCAD.app/Contents/MacOS/OpenSCAD",
        )];
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home).join("Applications/OpenSCAD.app/Contents/MacOS/OpenSCAD"),
            );
        }
        candidates
    } else if cfg!(windows) {
        vec![PathBuf::from(r"C:\Program Files\OpenSCAD\openscad.exe")]
    } else {
        Vec::new()
    }
}

/// Find an executable by name on `PATH`.
pub(crate) fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in_dirs(name, std::env::split_paths(&path))
}

fn find_in_dirs<I>(name: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let names: Vec<String> = if cfg!(windows) && Path::new(name).extension().is_none() {
        vec![format!("{}.exe", name), name.to_string()]
    } else {
        vec![name.to_string()]
    };

    dirs.into_iter()
        .flat_map(|dir| names.iter().map(move |n| dir.join(n)))
        .find(|candidate| candidate.is_file())
}
