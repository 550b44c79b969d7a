//! A tiny command interpreter with parallel command execution.
//!
//! This crate implements the execution core of a minimal POSIX-style shell:
//! it tokenizes a line of input, splits it into independent command groups at
//! the `&` operator, extracts trailing output redirection, executes the
//! built-in commands `exit`, `cd` and `path` in-process, and resolves
//! everything else against a session-owned search path before spawning it as
//! a child process. All children spawned from one line run concurrently and
//! are reaped before the next line is read.
//!
//! The main entry point is [`Interpreter`], which owns the session state and
//! drives one line's worth of work per [`Interpreter::run_line`] call. The
//! public modules expose the individual pipeline stages so they can be
//! exercised on their own.

pub mod builtin;
pub mod env;
pub mod external;
pub mod interpreter;
pub mod lexer;
pub mod parser;

/// Just a convenient re-export of the session coordinator.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;

/// The single diagnostic line used for every user-visible error.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Write the standard diagnostic to stderr.
///
/// Every recoverable error condition funnels through here so the error
/// surface stays byte-identical regardless of the underlying cause.
pub fn report_error() {
    eprint!("{}", ERROR_MESSAGE);
}
