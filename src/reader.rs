//! Line acquisition.
//!
//! Bytes are pulled one at a time until a newline or the end of the stream.
//! The buffer starts at [`LINE_BUFSIZE`] bytes and grows by the same fixed
//! amount each time it fills up; growth goes through `try_reserve_exact` so an
//! allocation failure comes back as [`ShellError::Allocation`].

use crate::error::{Result, ShellError};
use std::io::{self, BufRead, BufReader, Read};

/// Initial capacity and growth increment of the line buffer.
pub const LINE_BUFSIZE: usize = 1024;

/// One line of user input, without its newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The collected text.
    pub text: String,
    /// Whether the line ended because the stream ran out rather than on a newline.
    pub hit_eof: bool,
}

impl Line {
    /// True for an end-of-stream with nothing read before it.
    pub fn is_end_of_input(&self) -> bool {
        self.hit_eof && self.text.is_empty()
    }
}

/// Reads newline-terminated lines from any byte stream.
pub struct LineReader<R> {
    input: BufReader<R>,
}

impl<R: Read> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: BufReader::new(input),
        }
    }

    /// Read the next line.
    ///
    /// End-of-input with zero bytes read yields an empty line with `hit_eof` set;
    /// end-of-input after some bytes yields those bytes, also with `hit_eof` set.
    pub fn read_line(&mut self) -> Result<Line> {
        let mut buffer: Vec<u8> = Vec::new();
        buffer.try_reserve_exact(LINE_BUFSIZE)?;

        let hit_eof = loop {
            let byte = match self.next_byte()? {
                Some(b'\n') => break false,
                Some(byte) => byte,
                None => break true,
            };

            if buffer.len() == buffer.capacity() {
                buffer.try_reserve_exact(LINE_BUFSIZE)?;
            }
            buffer.push(byte);
        };

        let text = match String::from_utf8(buffer) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        log::trace!("read {} bytes (eof: {})", text.len(), hit_eof);
        Ok(Line { text, hit_eof })
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        loop {
            let available = match self.input.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Io(e)),
            };
            let Some(&byte) = available.first() else {
                return Ok(None);
            };
            self.input.consume(1);
            return Ok(Some(byte));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_reads_up_to_newline() {
        let mut r = reader("ls -la\npwd\n");
        assert_eq!(r.read_line().unwrap().text, "ls -la");
        assert_eq!(r.read_line().unwrap().text, "pwd");
    }

    #[test]
    fn test_empty_line_is_empty_string() {
        let mut r = reader("\nnext\n");
        let line = r.read_line().unwrap();
        assert_eq!(line.text, "");
        assert!(!line.hit_eof);
        assert!(!line.is_end_of_input());
    }

    #[test]
    fn test_eof_without_data() {
        let mut r = reader("");
        let line = r.read_line().unwrap();
        assert_eq!(line.text, "");
        assert!(line.is_end_of_input());
    }

    #[test]
    fn test_eof_after_partial_line() {
        let mut r = reader("echo hi");
        let line = r.read_line().unwrap();
        assert_eq!(line.text, "echo hi");
        assert!(line.hit_eof);
        assert!(!line.is_end_of_input());
        assert!(r.read_line().unwrap().is_end_of_input());
    }

    #[test]
    fn test_growth_keeps_every_byte() {
        for len in [
            LINE_BUFSIZE - 1,
            LINE_BUFSIZE,
            LINE_BUFSIZE + 1,
            3 * LINE_BUFSIZE + 17,
        ] {
            let long: String = (0..len)
                .map(|i| char::from(b'a' + (i % 26) as u8))
                .collect();
            let mut r = reader(&format!("{long}\ntail\n"));
            assert_eq!(r.read_line().unwrap().text, long);
            assert_eq!(r.read_line().unwrap().text, "tail");
        }
    }

    #[test]
    fn test_keeps_other_delimiters() {
        let mut r = reader("a\tb\r\n");
        assert_eq!(r.read_line().unwrap().text, "a\tb\r");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut r = LineReader::new(Cursor::new(vec![b'o', 0xff, b'k', b'\n']));
        assert_eq!(r.read_line().unwrap().text, "o\u{fffd}k");
    }
}
