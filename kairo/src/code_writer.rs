use std::io;

use thiserror::Error;

const INDENT: &str = "    ";

/// Line-oriented writer that tracks the indentation of nested VHDL blocks.
pub struct CodeWriter<W: io::Write> {
    w: W,
    indent_level: u32,
}

impl<W: io::Write> CodeWriter<W> {
    pub fn new(w: W) -> CodeWriter<W> {
        CodeWriter { w, indent_level: 0 }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn unindent(&mut self) -> Result<(), Error> {
        if self.indent_level == 0 {
            return Err(Error::IndentUnderflow);
        }
        self.indent_level -= 1;
        Ok(())
    }

    pub fn append_indent(&mut self) -> Result<(), Error> {
        for _ in 0..self.indent_level {
            self.w.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }

    pub fn append_newline(&mut self) -> Result<(), Error> {
        self.w.write_all(b"\n")?;
        Ok(())
    }

    pub fn append(&mut self, s: &str) -> Result<(), Error> {
        self.w.write_all(s.as_bytes())?;
        Ok(())
    }

    pub fn append_line(&mut self, s: &str) -> Result<(), Error> {
        self.append_indent()?;
        self.append(s)?;
        self.append_newline()
    }

    /// Writes `header`, then the lines produced by `body` one level deeper.
    pub fn block<F>(&mut self, header: &str, body: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        self.append_line(header)?;
        self.indent();
        body(self)?;
        self.unindent()
    }

    pub fn finish(mut self) -> Result<W, Error> {
        if self.indent_level != 0 {
            return Err(Error::UnbalancedIndent(self.indent_level));
        }
        self.w.flush()?;
        Ok(self.w)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("indent level underflow")]
    IndentUnderflow,
    #[error("{0} indent level(s) left open at end of output")]
    UnbalancedIndent(u32),
    #[error(transparent)]
    Io(#[from] io::Error),
}
