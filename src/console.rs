//! Line-oriented text boundary between the ATM and whoever drives it.

use std::io::{self, BufRead, StdinLock, StdoutLock, Write};

/// Minimal capability the ATM needs from its user: lines in, text out.
pub trait Console {
    /// Next input line with surrounding whitespace removed, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.write(label)?;
        self.read_line()
    }
}

/// [`Console`] over any buffered reader and writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Terminal<StdinLock<'static>, StdoutLock<'static>> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout().lock())
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();

        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        // undecodable bytes become U+FFFD and fail validation like any other bad input
        Ok(Some(String::from_utf8_lossy(&line).trim().to_owned()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}
