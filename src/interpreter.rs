//! The session coordinator: drives one line of input from raw text to
//! reaped children.
//!
//! Each line goes through tokenize → group → dispatch-all → wait-all.
//! Built-ins run synchronously in this process; external commands are
//! spawned without waiting, so `&`-separated commands on one line run
//! concurrently. The end-of-line barrier reaps every child before the
//! caller reads the next line, which keeps successive lines strictly
//! sequential.

use crate::builtin::{self, ExecutableBuiltin};
use crate::env::Environment;
use crate::external::{self, ExternalCommand};
use crate::parser::{self, CommandGroup};
use crate::{lexer, report_error};
use anyhow::Result;
use log::debug;
use std::process::Child;

/// How a single command group is to be executed.
enum Dispatch {
    /// A builtin, executed synchronously in the shell's own process so its
    /// session-state mutations are visible afterwards.
    InProcess(Box<dyn ExecutableBuiltin>),
    /// An external command, resolved to a full path and ready to spawn.
    Spawned(ExternalCommand),
}

/// A minimal shell session: owns the search path and executes lines.
///
/// Example
/// ```no_run
/// use wish::Interpreter;
/// let mut sh = Interpreter::new();
/// sh.run_line("echo hello > greeting.txt & echo bye").unwrap();
/// assert!(!sh.should_exit());
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// True once a valid `exit` builtin has run; the read loop checks this
    /// after every line.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Execute one line of input to completion.
    ///
    /// Recoverable errors (malformed redirection, unresolvable commands,
    /// builtin usage errors) are reported on stderr and abandon only the
    /// offending command group. An `Err` from this function is a resource
    /// fault (failed spawn, unopenable redirection target) the caller
    /// treats as fatal.
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let tokens = lexer::split_into_tokens(line);
        let groups = parser::split_groups(tokens);

        let mut children: Vec<Child> = Vec::new();
        let mut fatal = None;
        for group in groups {
            if self.env.should_exit {
                break;
            }
            let command = match parser::extract_redirect(group) {
                Ok(command) => command,
                Err(err) => {
                    debug!("abandoning group: {}", err);
                    report_error();
                    continue;
                }
            };
            match self.dispatch(command) {
                Ok(Some(child)) => children.push(child),
                Ok(None) => {}
                Err(err) => {
                    fatal = Some(err);
                    break;
                }
            }
        }

        // End-of-line barrier: every child spawned from this line is reaped
        // before the next line is read, even when a later group failed
        // fatally. Exit statuses are not inspected.
        for mut child in children {
            let _ = child.wait();
        }
        match fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, command: CommandGroup) -> Result<Option<Child>> {
        match self.classify(command) {
            Some(Dispatch::InProcess(cmd)) => {
                if let Err(err) = cmd.execute(&mut self.env) {
                    debug!("builtin failed: {:#}", err);
                    report_error();
                }
                Ok(None)
            }
            Some(Dispatch::Spawned(cmd)) => {
                let child = cmd.spawn()?;
                debug!("spawned child {}", child.id());
                Ok(Some(child))
            }
            None => {
                report_error();
                Ok(None)
            }
        }
    }

    /// Decide between in-process and spawned execution for one group.
    ///
    /// Returns `None` when the command is neither a builtin nor resolvable
    /// through the current search path.
    fn classify(&self, command: CommandGroup) -> Option<Dispatch> {
        if let Some(cmd) = builtin::try_create(&command.argv) {
            return Some(Dispatch::InProcess(cmd));
        }
        match external::resolve_executable(&self.env.search_path, &command.argv[0]) {
            Some(program) => {
                debug!("resolved {} to {}", command.argv[0], program.display());
                Some(Dispatch::Spawned(ExternalCommand::new(
                    program,
                    command.argv,
                    command.redirect,
                )))
            }
            None => {
                debug!("no executable match for {}", command.argv[0]);
                None
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
