//! Line-oriented prompting over any reader and writer.
//!
//! Every answer is read as a whole line, so a bad numeric answer never leaves
//! stray input behind for the next prompt.

use std::{
    fmt::Display,
    io::{BufRead, Write},
    str::FromStr,
};

use crate::error::InputError;

/// A prompt/answer channel, usually stdin and stdout
#[derive(Debug)]
pub struct Console<R, W> {
    /// Where answers come from
    input: R,
    /// Where prompts and messages go
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap a reader and a writer
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and read one line, without its line ending
    ///
    /// # Errors
    ///
    /// Returns `InputError::Closed` at end of input, `InputError::Encoding`
    /// if the line is not UTF-8 (it is consumed all the same), or
    /// `InputError::Io` if the console cannot be used.
    pub fn prompt(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(InputError::Closed);
        }
        let mut line = String::from_utf8(raw).map_err(|err| {
            let lossy = String::from_utf8_lossy(err.as_bytes());
            InputError::Encoding(lossy.trim_end_matches(['\r', '\n']).to_string())
        })?;
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Show `prompt` and read one line holding a single number
    ///
    /// Surrounding whitespace is ignored. Anything else on the line makes the
    /// whole line invalid; it has already been consumed either way.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Format` with the raw line if it is not a number,
    /// plus the errors of [`Console::prompt`].
    pub fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> Result<T, InputError> {
        let line = self.prompt(prompt)?;
        line.trim().parse().map_err(|_| InputError::Format(line))
    }

    /// Write one line of output
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the output cannot be written.
    pub fn say(&mut self, message: impl Display) -> Result<(), InputError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Direct access to the output, for multi-line renderings
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give the reader and writer back
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
