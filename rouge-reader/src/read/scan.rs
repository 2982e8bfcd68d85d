//! Cursor over source text.

use regex::Regex;

use super::error::{Error, ErrorCode, Location};

/// Number of characters shown on either side of the cursor in an error
/// excerpt.
const EXCERPT_RADIUS: usize = 3;

/// A cursor over the source text.
///
/// The `peek` and `consume` operations skip insignificant text first:
/// whitespace, commas and `;` comments running to the end of the line. The
/// `*_raw` variants look at the very next character instead, for use inside
/// tokens.
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_insignificant(&mut self) {
        loop {
            match self.peek_raw() {
                Some(';') => {
                    let rest = self.rest();
                    self.pos += rest.find('\n').unwrap_or(rest.len());
                }
                Some(c) if c == ',' || c.is_whitespace() => self.pos += c.len_utf8(),
                _ => return,
            }
        }
    }

    /// Returns the next significant character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_insignificant();
        self.peek_raw()
    }

    /// Returns the next significant character and advances past it.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns the character at the cursor, without skipping anything.
    pub fn peek_raw(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character after the one at the cursor, without skipping
    /// anything.
    pub fn peek_raw_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Returns the character at the cursor and advances past it, without
    /// skipping anything.
    pub fn next_raw(&mut self) -> Option<char> {
        let c = self.peek_raw()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Matches `pattern` at the cursor and advances past the match.
    ///
    /// Patterns must be anchored with `^`; the search starts at the cursor,
    /// so `^` pins the match there.
    pub fn match_at(&mut self, pattern: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let m = pattern.find(rest)?;
        debug_assert_eq!(m.start(), 0);
        self.pos += m.end();
        Some(&rest[..m.end()])
    }

    /// Line and column of the byte offset `pos`, both 1-based.
    pub fn location(&self, pos: usize) -> Location {
        let before = &self.src[..pos];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Location::new(line, column)
    }

    /// The text around `pos`, with a caret line pointing at `pos`.
    pub fn excerpt(&self, pos: usize) -> String {
        let before: String = {
            let mut chars: Vec<char> = self.src[..pos]
                .chars()
                .rev()
                .take(EXCERPT_RADIUS)
                .collect();
            chars.reverse();
            chars.into_iter().collect()
        };
        let after: String = self.src[pos..]
            .chars()
            .take(EXCERPT_RADIUS + 1)
            .take_while(|&c| c != '\n')
            .collect();
        let window: String = before
            .chars()
            .chain(after.chars())
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        const LABEL: &str = "around: ";
        format!(
            "{}{}\n{}^",
            LABEL,
            window,
            " ".repeat(LABEL.len() + before.chars().count())
        )
    }

    /// An error located at byte offset `pos`.
    pub fn error_at(&self, code: ErrorCode, pos: usize) -> Error {
        Error::new(code, self.location(pos), self.excerpt(pos))
    }

    /// An error located at the cursor.
    pub fn error(&self, code: ErrorCode) -> Error {
        self.error_at(code, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_whitespace_commas_and_comments() {
        let mut scan = Scanner::new(" ,, ; comment\n  ;; another\n\tx");
        assert_eq!(scan.peek(), Some('x'));
        assert_eq!(scan.consume(), Some('x'));
        assert_eq!(scan.peek(), None);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let mut scan = Scanner::new("; nothing else");
        assert_eq!(scan.peek(), None);
    }

    #[test]
    fn test_raw_does_not_skip() {
        let mut scan = Scanner::new(" a");
        assert_eq!(scan.peek_raw(), Some(' '));
        assert_eq!(scan.next_raw(), Some(' '));
        assert_eq!(scan.next_raw(), Some('a'));
    }

    #[test]
    fn test_second_raw() {
        let mut scan = Scanner::new("  -1");
        assert_eq!(scan.peek(), Some('-'));
        assert_eq!(scan.peek_raw_second(), Some('1'));
        assert_eq!(scan.next_raw(), Some('-'));
        assert_eq!(scan.peek_raw_second(), None);
    }

    #[test]
    fn test_location() {
        let scan = Scanner::new("ab\ncd\nef");
        assert_eq!(scan.location(0), Location::new(1, 1));
        assert_eq!(scan.location(4), Location::new(2, 2));
        assert_eq!(scan.location(6), Location::new(3, 1));
    }

    #[test]
    fn test_excerpt() {
        let scan = Scanner::new("(foo bar)");
        assert_eq!(scan.excerpt(5), "around: oo bar)\n           ^");
    }
}
