//! Built-in commands executed directly in the shell's own process.
//!
//! Builtins exist precisely because they must mutate session state (the
//! search path, the working directory, the exit flag) in the caller's own
//! context; running them in a spawned child would make their effects
//! invisible. Argument validation goes through the [`argh`] crate
//! (`FromArgs`), so wrong arity surfaces as a parse failure rather than
//! hand-rolled counting.

use crate::env::Environment;
use anyhow::{Context, Result};
use argh::FromArgs;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "path".
    fn name() -> &'static str;

    /// Executes the command against the session state.
    ///
    /// An `Err` is a usage error: the caller reports it and the session
    /// continues.
    fn execute(self, env: &mut Environment) -> Result<()>;
}

/// Object-safe form of a parsed builtin, ready to run.
pub trait ExecutableBuiltin {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableBuiltin for T {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<()> {
        T::execute(*self, env)
    }
}

/// Result of an argh early exit: wrong argument count, an unknown flag, or
/// an intercepted `--help`. The builtin surface is fixed, so anything beyond
/// the declared positionals is a usage error.
struct InvalidArgs;

impl ExecutableBuiltin for InvalidArgs {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<()> {
        Err(anyhow::anyhow!("invalid builtin arguments"))
    }
}

fn create<T: BuiltinCommand + 'static>(
    name: &str,
    args: &[&str],
) -> Option<Box<dyn ExecutableBuiltin>> {
    if name != T::name() {
        return None;
    }
    Some(match T::from_args(&[name], args) {
        Ok(cmd) => Box::new(cmd),
        Err(_) => Box::new(InvalidArgs),
    })
}

/// Match argv[0] against the built-in command set.
///
/// Returns `None` when the name is not a builtin, in which case the caller
/// falls through to external resolution.
pub fn try_create(argv: &[String]) -> Option<Box<dyn ExecutableBuiltin>> {
    let name = argv.first()?.as_str();
    let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
    create::<Exit>(name, &args)
        .or_else(|| create::<Cd>(name, &args))
        .or_else(|| create::<SetPath>(name, &args))
}

#[derive(FromArgs)]
/// Terminate the session. Takes no arguments.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.should_exit = true;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the working directory of the shell process.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _env: &mut Environment) -> Result<()> {
        // Mutating the real process working directory means every child
        // spawned afterwards inherits it.
        std::env::set_current_dir(&self.target)
            .with_context(|| format!("cd: can't chdir to {}", self.target))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Replace the executable search path with the given directories, in order.
/// With no arguments the search path becomes empty and no external command
/// resolves until path is reissued.
pub struct SetPath {
    #[argh(positional, greedy)]
    /// directories to search for executables, consulted left to right.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for SetPath {
    fn name() -> &'static str {
        "path"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.set_search_path(self.dirs.into_iter().map(PathBuf::from));
        Ok(())
    }
}
