use anyhow::{Context, Result};
use argh::FromArgs;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use wish::{Interpreter, report_error};

#[derive(FromArgs)]
/// A minimal command interpreter. Reads commands from an interactive prompt,
/// or from a batch file when one is given.
struct Cli {
    #[argh(positional)]
    /// batch file to read commands from; interactive mode when omitted.
    script: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let cli = match Cli::from_args(&["wish"], &arg_refs) {
        Ok(cli) => cli,
        Err(_) => {
            // Anything but exactly zero or one argument is a fatal usage
            // error; an intercepted `--help` gets no special treatment
            // since one argument always means a batch file.
            report_error();
            std::process::exit(1);
        }
    };

    let mut interpreter = Interpreter::new();
    let result = match cli.script {
        Some(script) => {
            debug!("batch mode: {}", script.display());
            run_batch(&mut interpreter, &script)
        }
        None => {
            debug!("interactive mode");
            run_interactive(&mut interpreter)
        }
    };

    if let Err(err) = result {
        debug!("fatal: {:#}", err);
        report_error();
        std::process::exit(1);
    }
}

/// Prompt-read-execute loop for interactive mode.
///
/// Ends gracefully on EOF or interrupt; `exit` inside a line ends it through
/// the interpreter's exit flag.
fn run_interactive(interpreter: &mut Interpreter) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("wish> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                interpreter.run_line(&line)?;
                if interpreter.should_exit() {
                    break;
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Execute every line of a command file, without printing a prompt.
fn run_batch(interpreter: &mut Interpreter, script: &Path) -> Result<()> {
    let file = File::open(script)
        .with_context(|| format!("can't open batch file {}", script.display()))?;

    for line in BufReader::new(file).lines() {
        let line = line?;
        interpreter.run_line(&line)?;
        if interpreter.should_exit() {
            break;
        }
    }
    Ok(())
}
