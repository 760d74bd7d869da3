use std::borrow::Cow;

use crate::source::LineProvider;

/// Pulls single characters out of a [`LineProvider`], tracking the
/// line and column of the last character pulled.
///
/// The line buffer is refilled as soon as its last character is taken,
/// so end of input shows up on the call after the final character.
#[derive(Debug)]
pub struct CharCursor<'src, P> {
    provider: P,
    line_buf: Cow<'src, str>,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src, P: LineProvider<'src>> CharCursor<'src, P> {
    /// The buffer starts as a lone newline so the first real line is
    /// fetched, and counted as line 1, by the first pull.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            line_buf: Cow::Borrowed("\n"),
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub const fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Next character, or `None` once the provider is exhausted.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.line_buf[self.offset..].chars().next()?;
        self.column += 1;
        self.offset += ch.len_utf8();

        if self.offset == self.line_buf.len() {
            self.line_buf = self.provider.next_line();
            self.offset = 0;
            tracing::trace!(
                line = self.line + 1,
                len = self.line_buf.len(),
                "fetched source line"
            );
        }

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        }
        Some(ch)
    }
}
