//! Line providers feeding the character cursor.

use std::borrow::Cow;
use std::io::{self, BufRead};

/// Supplies source text one line at a time.
///
/// Each line includes its trailing `'\n'` when one is present. An empty
/// line signals exhaustion, and once exhausted every later call must
/// keep returning an empty line.
pub trait LineProvider<'src> {
    fn next_line(&mut self) -> Cow<'src, str>;
}

/// Lines borrowed from an in-memory source.
///
/// The slice bound is the end of input. An embedded NUL also ends the
/// input; nothing at or after it is ever returned.
#[derive(Debug, Clone)]
pub struct MemoryLines<'src> {
    rest: &'src str,
}

impl<'src> MemoryLines<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let end = source.find('\0').unwrap_or(source.len());
        Self {
            rest: &source[..end],
        }
    }

    /// The text not yet handed out.
    #[must_use]
    pub const fn remaining(&self) -> &'src str {
        self.rest
    }
}

impl<'src> LineProvider<'src> for MemoryLines<'src> {
    fn next_line(&mut self) -> Cow<'src, str> {
        let end = self.rest.find('\n').map_or(self.rest.len(), |i| i + 1);
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Cow::Borrowed(line)
    }
}

/// Owned lines read from any buffered reader.
///
/// The first I/O error (invalid UTF-8 included) ends the stream and is
/// kept for [`ReaderLines::take_error`].
#[derive(Debug)]
pub struct ReaderLines<R> {
    reader: R,
    done: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderLines<R> {
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
            error: None,
        }
    }

    /// The error that ended the stream early, if any.
    pub const fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<'src, R: BufRead> LineProvider<'src> for ReaderLines<R> {
    fn next_line(&mut self) -> Cow<'src, str> {
        if self.done {
            return Cow::Borrowed("");
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.done = true;
            }
            Ok(_) => {
                // Lines cut at a NUL behave like the in-memory source.
                if let Some(nul) = line.find('\0') {
                    line.truncate(nul);
                    self.done = true;
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "line provider stopped on read error");
                line.clear();
                self.done = true;
                self.error = Some(err);
            }
        }

        if line.is_empty() {
            self.done = true;
        }
        Cow::Owned(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<'a>(provider: &mut impl LineProvider<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = provider.next_line();
            if line.is_empty() {
                return lines;
            }
            lines.push(line.into_owned());
        }
    }

    #[test]
    fn memory_lines_keep_newlines() {
        let mut lines = MemoryLines::new("def f\n  return 1;\nlast");
        assert_eq!(drain(&mut lines), ["def f\n", "  return 1;\n", "last"]);
    }

    #[test]
    fn memory_lines_are_borrowed() {
        let source = String::from("a\nb\n");
        let mut lines = MemoryLines::new(&source);
        assert!(matches!(lines.next_line(), Cow::Borrowed("a\n")));
    }

    #[test]
    fn memory_lines_exhaustion_is_stable() {
        let mut lines = MemoryLines::new("x\n");
        assert_eq!(lines.next_line(), "x\n");
        for _ in 0..3 {
            assert_eq!(lines.next_line(), "");
        }
    }

    #[test]
    fn memory_lines_stop_at_nul() {
        let mut lines = MemoryLines::new("ab\0cd\nef");
        assert_eq!(lines.remaining(), "ab");
        assert_eq!(drain(&mut lines), ["ab"]);
        assert_eq!(lines.next_line(), "");
    }

    #[test]
    fn reader_lines_match_memory_lines() {
        let source = "var a = 1;\n\nprint(a)\n";
        let mut reader = ReaderLines::new(source.as_bytes());
        let mut memory = MemoryLines::new(source);
        assert_eq!(drain(&mut reader), drain(&mut memory));
        assert!(reader.take_error().is_none());
    }

    #[test]
    fn reader_lines_keep_first_error() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let mut reader = ReaderLines::new(bytes);
        assert_eq!(reader.next_line(), "ok\n");
        assert_eq!(reader.next_line(), "");
        assert_eq!(reader.next_line(), "");
        let err = reader.take_error().expect("invalid utf-8 should be kept");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
