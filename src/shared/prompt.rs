//! Line-oriented prompts for the interactive session.

use std::io::{self, BufRead, IsTerminal, Write};

/// Source of interactive answers.
pub trait Prompt {
    /// Print `message` and read one line without its line terminator.
    /// Returns `None` at end of input.
    fn read_line(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Like `read_line`, but the answer is not echoed when that is possible.
    fn read_secret(&mut self, message: &str) -> io::Result<Option<String>> {
        self.read_line(message)
    }
}

/// Prompt over any reader/writer pair.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{message}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Prompt on the process's stdin/stdout.
pub struct TerminalPrompt {
    inner: LinePrompt<io::StdinLock<'static>, io::Stdout>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            inner: LinePrompt::new(io::stdin().lock(), io::stdout()),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, message: &str) -> io::Result<Option<String>> {
        self.inner.read_line(message)
    }

    fn read_secret(&mut self, message: &str) -> io::Result<Option<String>> {
        if !io::stdin().is_terminal() {
            return self.inner.read_line(message);
        }
        match rpassword::prompt_password(message) {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Split a comma-separated answer into trimmed, non-empty items.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
