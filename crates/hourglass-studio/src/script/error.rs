use std::fmt;

/// A problem in a studio script, parsing or running it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub message: String,
    /// Command the error belongs to, once it is known.
    pub command: Option<&'static str>,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub col: usize,
}

impl ScriptError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), command: None, line, col }
    }

    /// Attributes the error to `command` unless it already names one.
    pub(crate) fn in_command(mut self, command: &'static str) -> Self {
        self.command.get_or_insert(command);
        self
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script error at {}:{}", self.line, self.col)?;
        if let Some(command) = self.command {
            write!(f, " in `{command}`")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ScriptError {}
