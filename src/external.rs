//! Resolving bare command names against the search path and launching them.
//!
//! Resolution and launching are two separate phases: [`resolve_executable`]
//! is a pure lookup that ordinary unit tests can cover, while
//! [`ExternalCommand::spawn`] performs the irreversible part (opening the
//! redirection target and creating the child process).

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Search the directories of `search_path`, in order, for an executable
/// named `command`.
///
/// The first directory whose `dir/command` candidate is an executable
/// regular file wins. An empty search path resolves nothing, which is
/// exactly what the `path` builtin with no arguments produces.
pub fn resolve_executable(search_path: &[PathBuf], command: &str) -> Option<PathBuf> {
    for dir in search_path {
        let candidate = dir.join(command);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// A resolved external command, ready to be spawned.
///
/// `program` is the full path chosen by [`resolve_executable`]; `argv` is
/// the original argument vector, with `argv[0]` still the bare command name
/// the user typed. The spawned process sees the bare name as its own
/// argv[0] while the OS executes the resolved path.
#[derive(Debug)]
pub struct ExternalCommand {
    program: PathBuf,
    argv: Vec<String>,
    redirect: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: PathBuf, argv: Vec<String>, redirect: Option<PathBuf>) -> Self {
        Self {
            program,
            argv,
            redirect,
        }
    }

    /// Create the child process, binding its standard output to the
    /// redirection target first when one is present.
    ///
    /// The target file is created if missing and truncated if present. Both
    /// an unopenable target and a failed spawn are resource errors the
    /// session treats as fatal.
    pub fn spawn(self) -> Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv.iter().skip(1));

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.argv[0]);
        }

        if let Some(target) = &self.redirect {
            let file = File::create(target)
                .with_context(|| format!("can't open redirection target {}", target.display()))?;
            cmd.stdout(Stdio::from(file));
        }

        cmd.spawn()
            .with_context(|| format!("can't spawn {}", self.program.display()))
    }
}
