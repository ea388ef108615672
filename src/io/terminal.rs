//! Line-based terminal over any buffered reader and writer
//!
//! The binary wraps locked stdin and stdout. Tests use an in-memory cursor
//! and a `Vec<u8>` so that a whole session can be scripted.
//!
//! ```
//! use atm_terminal::core::traits::Terminal;
//! use atm_terminal::io::LineTerminal;
//! use std::io::Cursor;
//!
//! let mut terminal = LineTerminal::new(Cursor::new("A1\r\nq\n"), Vec::new());
//! assert_eq!(terminal.read_line().unwrap(), Some("A1".to_string()));
//! terminal.print_line("hello").unwrap();
//! assert_eq!(terminal.into_output(), b"hello\n");
//! ```

use crate::core::traits::Terminal;
use crate::types::BankError;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub struct LineTerminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineTerminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineTerminal { input, output }
    }

    /// Consume the terminal and return the output writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for LineTerminal<R, W> {
    fn read_line(&mut self) -> Result<Option<String>, BankError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| BankError::Terminal {
                message: e.to_string(),
            })?;

        if read == 0 {
            return Ok(None);
        }

        // Only the terminator is stripped; IDs are matched exactly
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn print_line(&mut self, line: &str) -> Result<(), BankError> {
        writeln!(self.output, "{}", line)
            .and_then(|_| self.output.flush())
            .map_err(|e| BankError::Terminal {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_until_closed() {
        let mut terminal = LineTerminal::new(Cursor::new("one\n two \nthree"), Vec::new());

        assert_eq!(terminal.read_line().unwrap(), Some("one".to_string()));
        assert_eq!(terminal.read_line().unwrap(), Some(" two ".to_string()));
        assert_eq!(terminal.read_line().unwrap(), Some("three".to_string()));
        assert_eq!(terminal.read_line().unwrap(), None);
    }

    #[test]
    fn test_empty_line_is_not_closed() {
        let mut terminal = LineTerminal::new(Cursor::new("\n"), Vec::new());

        assert_eq!(terminal.read_line().unwrap(), Some(String::new()));
        assert_eq!(terminal.read_line().unwrap(), None);
    }

    #[test]
    fn test_print_line_appends_newline() {
        let mut terminal = LineTerminal::new(Cursor::new(""), Vec::new());
        terminal.print_line("a").unwrap();
        terminal.print_line("b\tc").unwrap();

        assert_eq!(String::from_utf8(terminal.into_output()).unwrap(), "a\nb\tc\n");
    }
}
