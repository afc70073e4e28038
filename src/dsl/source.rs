//! Line sources.
//!
//! The loader never touches bytes directly; it pulls one line at a time from a
//! [`LineSource`] and asks it for the current line number when reporting.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Supplies text lines one by one.
pub trait LineSource {
    /// The next line without its terminator, or `None` when the source is
    /// exhausted or has failed.
    fn next_line(&mut self) -> Option<String>;

    /// `false` once the underlying medium reported an error.
    fn is_ok(&self) -> bool;

    /// 1-based number of the last line returned; 0 before the first read.
    fn line_number(&self) -> usize;

    /// The error that stopped the source. Health stays `false` afterwards.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

/// [`LineSource`] over any buffered reader.
///
/// `\n` and `\r\n` terminators are stripped. Bytes that are not valid UTF-8
/// are replaced with U+FFFD rather than failing the line. A read error ends the
/// stream.
#[derive(Debug)]
pub struct BufLines<R> {
    reader: R,
    line_number: usize,
    failed: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> BufLines<R> {
    pub fn new(reader: R) -> Self {
        BufLines { reader, line_number: 0, failed: false, error: None }
    }
}

impl<'a> BufLines<&'a [u8]> {
    /// Lines of an in-memory program.
    pub fn from_text(text: &'a str) -> Self {
        BufLines::new(text.as_bytes())
    }
}

impl BufLines<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(BufLines::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for BufLines<R> {
    fn next_line(&mut self) -> Option<String> {
        if self.failed {
            return None;
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                self.line_number += 1;
                let line = String::from_utf8(buf).unwrap_or_else(|err| {
                    tracing::warn!(line = self.line_number, "line is not valid UTF-8; invalid bytes replaced");
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                });
                Some(line)
            }
            Err(err) => {
                tracing::warn!(line = self.line_number + 1, error = %err, "failed to read line");
                self.failed = true;
                self.error = Some(err);
                None
            }
        }
    }

    fn is_ok(&self) -> bool {
        !self.failed
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn strips_terminators_and_counts_lines() {
        let mut lines = BufLines::from_text("first\r\nsecond\n\nlast");
        assert_eq!(lines.line_number(), 0);
        assert_eq!(lines.next_line().as_deref(), Some("first"));
        assert_eq!(lines.next_line().as_deref(), Some("second"));
        assert_eq!(lines.next_line().as_deref(), Some(""));
        assert_eq!(lines.next_line().as_deref(), Some("last"));
        assert_eq!(lines.line_number(), 4);
        assert_eq!(lines.next_line(), None);
        assert_eq!(lines.line_number(), 4);
        assert!(lines.is_ok());
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_error_marks_source_unhealthy() {
        let mut lines = BufLines::new(BufReader::new(Broken));
        assert_eq!(lines.next_line(), None);
        assert!(!lines.is_ok());
        assert_eq!(lines.next_line(), None);
        assert_eq!(lines.take_error().map(|e| e.to_string()).as_deref(), Some("disk on fire"));
        assert!(!lines.is_ok());
        assert_eq!(lines.next_line(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let bytes: &[u8] = b"T = {a}\r\n// caf\xe9\nlast";
        let mut lines = BufLines::new(bytes);
        assert_eq!(lines.next_line().as_deref(), Some("T = {a}"));
        assert_eq!(lines.next_line().as_deref(), Some("// caf\u{FFFD}"));
        assert_eq!(lines.next_line().as_deref(), Some("last"));
        assert_eq!(lines.next_line(), None);
        assert!(lines.is_ok());
        assert_eq!(lines.line_number(), 3);
    }
}
