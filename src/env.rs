use std::path::PathBuf;

/// Directory consulted for executables when no `path` command has run yet.
const DEFAULT_SEARCH_PATH: &str = "/bin";

/// Session state owned by the interpreter for the lifetime of the program.
///
/// The environment contains:
/// - `search_path`: the ordered list of directories consulted to resolve a
///   bare command name; replaced wholesale by the `path` built-in.
/// - `should_exit`: a flag the read loop checks to know when to terminate.
///
/// The working directory is deliberately not mirrored here: `cd` mutates the
/// process working directory directly so spawned children inherit it.
///
/// Note: fields are public for simplicity to keep the crate small.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Ordered executable search path. May be empty, in which case no
    /// external command resolves until `path` is reissued.
    pub search_path: Vec<PathBuf>,
    /// When set to true, indicates that the read loop should exit.
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            search_path: vec![PathBuf::from(DEFAULT_SEARCH_PATH)],
            should_exit: false,
        }
    }

    /// Replace the search path wholesale, in the order given.
    pub fn set_search_path<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        self.search_path = dirs.into_iter().map(Into::into).collect();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
