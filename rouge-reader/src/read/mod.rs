//! Reader for Rouge source text.
//!
//! The [`Reader`] turns source text into [`Form`]s, one top-level form at a
//! time. Besides literals it handles the reader macros: quote, syntax-quote
//! with unquote and unquote-splicing, metadata, deref, and the `#` dispatch
//! forms (anonymous functions, sets, var-quote, discard and regex literals).
//!
//! Symbols inside syntax-quote are qualified against a [`Namespace`] supplied
//! by the caller.
//!
//! ```
//! # use rouge_reader::{read_all, Form, Table};
//! let ns = Table::new("user");
//! let forms = read_all(&ns, "(def x 1) ; one\n'x").unwrap();
//! assert_eq!(forms.len(), 2);
//! assert_eq!(forms[1], Form::quote(Form::symbol("x")));
//! ```

use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::form::Regex as RegexForm;
use crate::{Form, Map, Namespace, Number, Symbol};

use self::error::ErrorCode;
use self::quasi::Expander;
use self::scan::Scanner;

#[doc(inline)]
pub use self::error::{Category, Error, Location, Result};

/// Loose shape of a number: consumed greedily, then checked against
/// `NUMBER`.
static MAYBE_NUMBER: Lazy<Regex> = Lazy::new(|| anchored(r"[+-]?[0-9][0-9a-fA-FxX._+-]*"));

/// Strict number grammar.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[+-]?(?:",
        r"0[xX][0-9a-fA-F]+",
        r"|0[bB][01]+",
        r"|[0-9]+(?:_[0-9]+)*(?:\.[0-9]+(?:_[0-9]+)*)?(?:[eE][+-]?[0-9]+(?:_[0-9]+)*)?",
        r")$"
    ))
    .expect("number grammar is a valid regex")
});

static SYMBOL: Lazy<Regex> =
    Lazy::new(|| anchored(r"(?:\.\[\]|\.?[-+]@|[a-zA-Z0-9\-_!&?*/.+|=%$<>#]+)"));

static KEYWORD: Lazy<Regex> = Lazy::new(|| anchored(r"[a-zA-Z0-9\-_!?*/.+=<>$&%]+"));

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{}", pattern)).expect("reader pattern is a valid regex")
}

/// Returns true if `name` can be written as a plain `:name` keyword.
pub(crate) fn is_keyword_name(name: &str) -> bool {
    KEYWORD.find(name).map_or(false, |m| m.end() == name.len())
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_!&?*/.+|=%$<>#".contains(c)
}

/// Various options to influence reader behavior.
#[derive(Debug, Clone)]
pub struct Options {
    max_depth: usize,
    max_anon_fn_arity: usize,
    regex_size_limit: Option<usize>,
    deref_symbol: Box<str>,
}

impl Options {
    /// Construct the default set of options.
    pub fn new() -> Self {
        Options {
            max_depth: 256,
            max_anon_fn_arity: 20,
            regex_size_limit: None,
            deref_symbol: "rouge.core/deref".into(),
        }
    }

    /// Set the maximum nesting of collections and reader macros.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the highest `%N` placeholder allowed in `#(...)`.
    pub fn with_max_anon_fn_arity(mut self, arity: usize) -> Self {
        self.max_anon_fn_arity = arity;
        self
    }

    /// Limit the compiled size of regex literals, in bytes.
    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = Some(limit);
        self
    }

    /// Set the symbol that `@x` expands to a call of.
    pub fn with_deref_symbol(mut self, symbol: impl Into<Box<str>>) -> Self {
        self.deref_symbol = symbol.into();
        self
    }

    /// Query the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Query the highest allowed anonymous function placeholder.
    pub fn max_anon_fn_arity(&self) -> usize {
        self.max_anon_fn_arity
    }

    /// Query the regex size limit; `None` uses the regex crate's default.
    pub fn regex_size_limit(&self) -> Option<usize> {
        self.regex_size_limit
    }

    /// Query the deref symbol.
    pub fn deref_symbol(&self) -> &str {
        &self.deref_symbol
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

/// Reader for Rouge source text.
///
/// A reader owns a cursor into the source and reads one form per call of
/// [`read`] or [`read_form`]. Reading is synchronous; a failed read leaves
/// the cursor where the error was detected.
///
/// [`read`]: struct.Reader.html#method.read
/// [`read_form`]: struct.Reader.html#method.read_form
pub struct Reader<'a, N: ?Sized> {
    ns: &'a N,
    scan: Scanner<'a>,
    options: Options,
    unquote_depth: usize,
    remaining_depth: usize,
    failed: bool,
}

impl<'a, N: Namespace + ?Sized> Reader<'a, N> {
    /// Creates a reader for `src`, qualifying symbols against `ns`.
    pub fn new(ns: &'a N, src: &'a str) -> Self {
        Reader::with_options(ns, src, Options::default())
    }

    /// Creates a reader with custom options.
    pub fn with_options(ns: &'a N, src: &'a str, options: Options) -> Self {
        Reader {
            ns,
            scan: Scanner::new(src),
            remaining_depth: options.max_depth,
            options,
            unquote_depth: 0,
            failed: false,
        }
    }

    /// Byte offset of the cursor in the source text.
    pub fn offset(&self) -> usize {
        self.scan.offset()
    }

    /// Validates that only whitespace and comments remain in the input.
    pub fn end(&mut self) -> Result<()> {
        match self.scan.peek() {
            Some(_) => Err(self.scan.error(ErrorCode::TrailingCharacters)),
            None => Ok(()),
        }
    }

    /// Reads the next form, or returns `Ok(None)` at the end of input.
    ///
    /// ```
    /// # use rouge_reader::{Form, Reader, Table};
    /// let ns = Table::new("user");
    /// let mut reader = Reader::new(&ns, "a :b");
    /// assert_eq!(reader.read().unwrap(), Some(Form::symbol("a")));
    /// assert_eq!(reader.read().unwrap(), Some(Form::keyword("b")));
    /// assert_eq!(reader.read().unwrap(), None);
    /// ```
    pub fn read(&mut self) -> Result<Option<Form>> {
        match self.scan.peek() {
            Some(_) => self.read_form().map(Some),
            None => Ok(None),
        }
    }

    /// Reads exactly one form; end of input is an error.
    pub fn read_form(&mut self) -> Result<Form> {
        let c = match self.scan.peek() {
            Some(c) => c,
            None => return Err(self.scan.error(ErrorCode::EofWhileReadingForm)),
        };
        match c {
            '0'..='9' => self.read_number(),
            '+' | '-' if self.scan.peek_raw_second().map_or(false, |d| d.is_ascii_digit()) => {
                self.read_number()
            }
            ':' => self.read_keyword(),
            '"' => {
                self.scan.consume();
                Ok(Form::String(self.read_string_body()?.into()))
            }
            '(' => self.nested(Self::read_list),
            '[' => self.nested(Self::read_vector),
            '#' => self.nested(Self::read_dispatch),
            c if is_symbol_start(c) => self.read_symbol(),
            '{' => self.nested(Self::read_map),
            '\'' => self.nested(Self::read_quote),
            '`' => self.nested(Self::read_syntax_quote),
            '~' => self.nested(Self::read_unquote),
            '^' => self.nested(Self::read_metadata),
            '@' => self.nested(Self::read_deref),
            found => Err(self.scan.error(ErrorCode::UnexpectedCharacter {
                found,
                production: "a form",
            })),
        }
    }

    fn nested(&mut self, read: fn(&mut Self) -> Result<Form>) -> Result<Form> {
        if self.remaining_depth == 0 {
            return Err(self.scan.error(ErrorCode::RecursionLimitExceeded));
        }
        self.remaining_depth -= 1;
        let ret = read(self);
        self.remaining_depth += 1;
        ret
    }

    /// The error for a character not continuing `production`, or for
    /// running out of input where it expected one.
    fn unexpected(&self, production: &'static str) -> Error {
        match self.scan.peek_raw() {
            Some(found) => self
                .scan
                .error(ErrorCode::UnexpectedCharacter { found, production }),
            None => self.scan.error(ErrorCode::EofWhileReadingForm),
        }
    }

    fn read_number(&mut self) -> Result<Form> {
        let start = self.scan.offset();
        match self.scan.match_at(&MAYBE_NUMBER) {
            Some(text) => self.parse_number(text, start),
            None => Err(self.unexpected("a number")),
        }
    }

    fn parse_number(&self, text: &str, start: usize) -> Result<Form> {
        let invalid = || self.scan.error_at(ErrorCode::InvalidNumber(text.into()), start);
        if !NUMBER.is_match(text) {
            return Err(invalid());
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let prefixed = |lower: &str, upper: &str| {
            unsigned
                .strip_prefix(lower)
                .or_else(|| unsigned.strip_prefix(upper))
        };

        let number = if let Some(hex) = prefixed("0x", "0X") {
            Number::from_digits(negative, hex, 16)
        } else if let Some(bin) = prefixed("0b", "0B") {
            Number::from_digits(negative, bin, 2)
        } else {
            let digits: String = text.chars().filter(|&c| c != '_').collect();
            if digits.contains(|c| matches!(c, '.' | 'e' | 'E')) {
                let f: f64 = digits.parse().map_err(|_| invalid())?;
                let n = Number::from_f64(f).ok_or_else(|| {
                    self.scan
                        .error_at(ErrorCode::NumberOutOfRange(text.into()), start)
                })?;
                return Ok(Form::Number(n));
            }
            let digits = digits.trim_start_matches(|c| c == '+' || c == '-');
            let radix = if digits.len() > 1 && digits.starts_with('0') {
                8
            } else {
                10
            };
            Number::from_digits(negative, digits, radix)
        };
        number.map(Form::Number).ok_or_else(invalid)
    }

    fn read_keyword(&mut self) -> Result<Form> {
        self.scan.consume();
        if self.scan.peek_raw() == Some('"') {
            self.scan.next_raw();
            return Ok(Form::keyword(self.read_string_body()?));
        }
        match self.scan.match_at(&KEYWORD) {
            Some(name) => Ok(Form::keyword(name)),
            None => Err(self.unexpected("a keyword")),
        }
    }

    /// Reads the rest of a string whose opening quote was consumed.
    fn read_string_body(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.scan.next_raw() {
                None => return Err(self.scan.error(ErrorCode::EofWhileReadingString)),
                Some('"') => return Ok(s),
                Some('\\') => match self.scan.next_raw() {
                    None => return Err(self.scan.error(ErrorCode::EofWhileReadingString)),
                    Some(c) => s.push(unescape(c)),
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn read_list(&mut self) -> Result<Form> {
        self.scan.consume();
        let items = self.read_seq(')')?;
        Ok(Form::List(items.into_iter().collect()))
    }

    fn read_vector(&mut self) -> Result<Form> {
        self.scan.consume();
        let items = self.read_seq(']')?;
        Ok(Form::Vector(items.into()))
    }

    /// Reads forms up to and including `close`.
    fn read_seq(&mut self, close: char) -> Result<Vec<Form>> {
        let mut items = Vec::new();
        loop {
            match self.scan.peek() {
                Some(c) if c == close => {
                    self.scan.consume();
                    return Ok(items);
                }
                Some(_) => items.push(self.read_form()?),
                None => {
                    let code = match close {
                        ')' => ErrorCode::EofWhileReadingList,
                        ']' => ErrorCode::EofWhileReadingVector,
                        _ => ErrorCode::EofWhileReadingSet,
                    };
                    return Err(self.scan.error(code));
                }
            }
        }
    }

    fn read_map(&mut self) -> Result<Form> {
        self.scan.consume();
        let mut map = Map::new();
        loop {
            match self.scan.peek() {
                Some('}') => {
                    self.scan.consume();
                    return Ok(Form::Map(map));
                }
                Some(_) => {
                    let key = self.read_form()?;
                    match self.scan.peek() {
                        Some('}') => return Err(self.scan.error(ErrorCode::OddMapEntries)),
                        Some(_) => {
                            let value = self.read_form()?;
                            map.insert(key, value);
                        }
                        None => return Err(self.scan.error(ErrorCode::EofWhileReadingMap)),
                    }
                }
                None => return Err(self.scan.error(ErrorCode::EofWhileReadingMap)),
            }
        }
    }

    fn read_symbol(&mut self) -> Result<Form> {
        match self.scan.match_at(&SYMBOL) {
            Some(text) => Ok(Form::symbol(text)),
            None => Err(self.unexpected("a symbol")),
        }
    }

    fn read_quote(&mut self) -> Result<Form> {
        self.scan.consume();
        Ok(Form::quote(self.read_form()?))
    }

    fn read_syntax_quote(&mut self) -> Result<Form> {
        self.scan.consume();
        // Nested syntax-quotes are expanded before the enclosing one
        // finishes, so each body sees only its own gensym scope.
        let scope = quasi::next_scope();
        self.unquote_depth += 1;
        let body = self.read_form();
        self.unquote_depth -= 1;
        Ok(Expander::new(self.ns, scope).expand(body?))
    }

    fn read_unquote(&mut self) -> Result<Form> {
        let start = self.scan.offset();
        self.scan.consume();
        let splice = self.scan.peek_raw() == Some('@');
        if splice {
            self.scan.next_raw();
        }
        if self.unquote_depth == 0 {
            return Err(self
                .scan
                .error_at(ErrorCode::UnquoteOutsideSyntaxQuote, start));
        }

        self.unquote_depth -= 1;
        let inner = self.read_form();
        self.unquote_depth += 1;

        let inner = Box::new(inner?);
        Ok(if splice {
            Form::Splice(inner)
        } else {
            Form::Dequote(inner)
        })
    }

    fn read_metadata(&mut self) -> Result<Form> {
        self.scan.consume();
        self.scan.peek();
        let meta_start = self.scan.offset();

        // Unquotes may not hide in metadata, where expansion does not reach.
        let depth = mem::replace(&mut self.unquote_depth, 0);
        let meta = self.read_form();
        self.unquote_depth = depth;

        let meta: Map = match meta? {
            meta @ (Form::Keyword(_) | Form::Symbol(_)) => {
                Map::from_iter(vec![(meta, Form::Bool(true))])
            }
            meta @ Form::String(_) => Map::from_iter(vec![(Form::keyword("tag"), meta)]),
            Form::Map(map) => map,
            other => {
                return Err(self
                    .scan
                    .error_at(ErrorCode::InvalidMetadata(other.kind()), meta_start))
            }
        };

        self.scan.peek();
        let target_start = self.scan.offset();
        let mut target = self.read_form()?;
        if !target.supports_meta() {
            return Err(self.scan.error_at(
                ErrorCode::MetadataNotSupported(target.kind()),
                target_start,
            ));
        }
        if let Some(target_meta) = target.meta_mut() {
            target_meta.merge_meta(meta);
        }
        Ok(target)
    }

    fn read_deref(&mut self) -> Result<Form> {
        self.scan.consume();
        let deref = Form::Symbol(Symbol::parse(&self.options.deref_symbol));
        Ok(Form::list(vec![deref, self.read_form()?]))
    }

    fn read_dispatch(&mut self) -> Result<Form> {
        self.scan.consume();
        match self.scan.peek_raw() {
            Some('(') => {
                let start = self.scan.offset() - 1;
                let body = self.read_list()?;
                anon_fn::rewrite(body, self.options.max_anon_fn_arity)
                    .map_err(|code| self.scan.error_at(code, start))
            }
            Some('{') => {
                self.scan.next_raw();
                let items = self.read_seq('}')?;
                Ok(Form::set(items))
            }
            Some('\'') => {
                self.scan.next_raw();
                Ok(Form::list(vec![Form::symbol("var"), self.read_form()?]))
            }
            Some('_') => {
                self.scan.next_raw();
                self.read_form()?;
                self.read_form()
            }
            Some('"') => {
                self.scan.next_raw();
                self.read_regex()
            }
            _ => Err(self.unexpected("a dispatch form")),
        }
    }

    /// Reads the rest of a regex literal whose opening quote was consumed.
    ///
    /// A backslash and the character after it are kept as written, so `\"`
    /// does not end the literal and the pattern reaches the regex compiler
    /// unmodified.
    fn read_regex(&mut self) -> Result<Form> {
        let start = self.scan.offset();
        let mut pattern = String::new();
        loop {
            match self.scan.next_raw() {
                None => return Err(self.scan.error(ErrorCode::EofWhileReadingRegex)),
                Some('"') => break,
                Some('\\') => {
                    pattern.push('\\');
                    match self.scan.next_raw() {
                        None => return Err(self.scan.error(ErrorCode::EofWhileReadingRegex)),
                        Some(c) => pattern.push(c),
                    }
                }
                Some(c) => pattern.push(c),
            }
        }

        let mut builder = regex::RegexBuilder::new(&pattern);
        if let Some(limit) = self.options.regex_size_limit {
            builder.size_limit(limit);
        }
        match builder.build() {
            Ok(re) => Ok(Form::Regex(RegexForm::new(re))),
            Err(err) => Err(self.scan.error_at(ErrorCode::InvalidRegex(err), start)),
        }
    }
}

/// Iterating a reader yields the remaining top-level forms. Iteration stops
/// after the first error.
impl<'a, N: Namespace + ?Sized> Iterator for Reader<'a, N> {
    type Item = Result<Form>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let ret = self.read().transpose();
        self.failed = matches!(ret, Some(Err(_)));
        ret
    }
}

fn unescape(c: char) -> char {
    match c {
        'a' => '\x07',
        'b' => '\x08',
        'e' => '\x1b',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        's' => ' ',
        't' => '\t',
        'v' => '\x0b',
        c => c,
    }
}

/// Reads a single form from `src`. Anything but whitespace and comments
/// after the form is an error.
///
/// ```
/// # use rouge_reader::{read_str, Form, Table};
/// let ns = Table::new("user");
/// assert_eq!(read_str(&ns, "0x1F").unwrap(), Form::from(31));
/// assert!(read_str(&ns, "1 2").is_err());
/// ```
pub fn read_str<N: Namespace + ?Sized>(ns: &N, src: &str) -> Result<Form> {
    read_str_custom(ns, src, Options::default())
}

/// Reads a single form from `src` using custom options.
pub fn read_str_custom<N: Namespace + ?Sized>(
    ns: &N,
    src: &str,
    options: Options,
) -> Result<Form> {
    let mut reader = Reader::with_options(ns, src, options);
    let form = reader.read_form()?;
    reader.end()?;
    Ok(form)
}

/// Reads all top-level forms of `src`.
pub fn read_all<N: Namespace + ?Sized>(ns: &N, src: &str) -> Result<Vec<Form>> {
    Reader::new(ns, src).collect()
}

mod anon_fn;
mod error;
mod quasi;
mod scan;

#[cfg(test)]
mod tests;
