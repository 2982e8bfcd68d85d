//! When reading Rouge source goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::result;

/// This type represents the possible errors when reading Rouge source.
pub struct Error {
    /// Boxed so that `Result<Form>` stays small.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `rouge_reader::read::Error`.
pub type Result<T> = result::Result<T, Error>;

/// Location of a read error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Location {
    pub(crate) fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    /// One-based line number at which the error was detected.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number at which the error was detected.
    ///
    /// The first character in the input and any characters immediately
    /// following a newline character are in column 1.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Error {
    /// Location of the error in the source text.
    pub fn location(&self) -> Option<Location> {
        self.err.location
    }

    /// The source text around the error position, followed by a line with a
    /// caret pointing at the position.
    ///
    /// ```
    /// # use rouge_reader::{read_str, Table};
    /// let err = read_str(&Table::new("user"), "(a b 1abc)").unwrap_err();
    /// assert!(err.excerpt().unwrap().contains('^'));
    /// ```
    pub fn excerpt(&self) -> Option<&str> {
        self.err.excerpt.as_deref()
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::UnexpectedCharacter` - input that does not match any
    ///   production at the position it was found
    /// - `Category::EndOfData` - the input ended while a form was still
    ///   being read
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::EofWhileReadingForm
            | ErrorCode::EofWhileReadingString
            | ErrorCode::EofWhileReadingRegex
            | ErrorCode::EofWhileReadingList
            | ErrorCode::EofWhileReadingVector
            | ErrorCode::EofWhileReadingMap
            | ErrorCode::EofWhileReadingSet => Category::EndOfData,
            ErrorCode::UnexpectedCharacter { .. }
            | ErrorCode::InvalidNumber(_)
            | ErrorCode::NumberOutOfRange(_)
            | ErrorCode::OddMapEntries
            | ErrorCode::UnquoteOutsideSyntaxQuote
            | ErrorCode::MetadataNotSupported(_)
            | ErrorCode::InvalidMetadata(_)
            | ErrorCode::InvalidRegex(_)
            | ErrorCode::AnonFnArityExceeded { .. }
            | ErrorCode::RecursionLimitExceeded
            | ErrorCode::TrailingCharacters => Category::UnexpectedCharacter,
        }
    }

    /// Returns true if this error was caused by input that does not match
    /// the grammar at the position it was found.
    pub fn is_unexpected(&self) -> bool {
        self.classify() == Category::UnexpectedCharacter
    }

    /// Returns true if this error was caused by prematurely reaching the end
    /// of the input.
    ///
    /// Interactive callers may want to ask for more input and retry.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::EndOfData
    }
}

/// Categorizes the cause of a `rouge_reader::read::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by input that does not match the grammar.
    UnexpectedCharacter,

    /// The error was caused by prematurely reaching the end of the input.
    EndOfData,
}

impl Error {
    pub(crate) fn new(code: ErrorCode, location: Location, excerpt: String) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                location: Some(location),
                excerpt: Some(excerpt.into_boxed_str()),
            }),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    location: Option<Location>,
    excerpt: Option<Box<str>>,
}

pub(crate) enum ErrorCode {
    /// EOF where a form was required.
    EofWhileReadingForm,

    /// EOF while reading a string.
    EofWhileReadingString,

    /// EOF while reading a regex literal.
    EofWhileReadingRegex,

    /// EOF while reading a list.
    EofWhileReadingList,

    /// EOF while reading a vector.
    EofWhileReadingVector,

    /// EOF while reading a map.
    EofWhileReadingMap,

    /// EOF while reading a set.
    EofWhileReadingSet,

    /// The character does not start or continue the named production.
    UnexpectedCharacter {
        found: char,
        production: &'static str,
    },

    /// Text that looked like a number but fails the number grammar.
    InvalidNumber(Box<str>),

    /// A float literal too large to represent.
    NumberOutOfRange(Box<str>),

    /// A map literal with a key lacking its value.
    OddMapEntries,

    /// `~` or `~@` without an enclosing syntax-quote.
    UnquoteOutsideSyntaxQuote,

    /// `^` applied to a form of the named kind, which takes no metadata.
    MetadataNotSupported(&'static str),

    /// Metadata given as a form of the named kind.
    InvalidMetadata(&'static str),

    /// The regex compiler rejected a regex literal.
    InvalidRegex(regex::Error),

    /// A `#(...)` literal using a placeholder above the configured maximum.
    AnonFnArityExceeded { arity: usize, limit: usize },

    /// Nesting deeper than the configured maximum.
    RecursionLimitExceeded,

    /// Input left over after a single form was read.
    TrailingCharacters,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::EofWhileReadingForm => f.write_str("EOF while reading a form"),
            ErrorCode::EofWhileReadingString => f.write_str("EOF while reading a string"),
            ErrorCode::EofWhileReadingRegex => f.write_str("EOF while reading a regex"),
            ErrorCode::EofWhileReadingList => f.write_str("EOF while reading a list"),
            ErrorCode::EofWhileReadingVector => f.write_str("EOF while reading a vector"),
            ErrorCode::EofWhileReadingMap => f.write_str("EOF while reading a map"),
            ErrorCode::EofWhileReadingSet => f.write_str("EOF while reading a set"),
            ErrorCode::UnexpectedCharacter { found, production } => {
                write!(f, "unexpected {:?} while reading {}", found, production)
            }
            ErrorCode::InvalidNumber(text) => write!(f, "invalid number `{}`", text),
            ErrorCode::NumberOutOfRange(text) => write!(f, "number out of range `{}`", text),
            ErrorCode::OddMapEntries => f.write_str("map literal has a key without a value"),
            ErrorCode::UnquoteOutsideSyntaxQuote => f.write_str("unquote outside of syntax-quote"),
            ErrorCode::MetadataNotSupported(kind) => {
                write!(f, "metadata can not be applied to {}", kind)
            }
            ErrorCode::InvalidMetadata(kind) => write!(
                f,
                "metadata must be a symbol, keyword, string or map, not {}",
                kind
            ),
            ErrorCode::InvalidRegex(err) => write!(f, "invalid regex literal: {}", err),
            ErrorCode::AnonFnArityExceeded { arity, limit } => write!(
                f,
                "anonymous function takes {} arguments, at most {} are allowed",
                arity, limit
            ),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err.code {
            ErrorCode::InvalidRegex(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "{} at line {} column {}",
                self.code, loc.line, loc.column
            )?,
            None => Display::fmt(&self.code, f)?,
        }
        if let Some(excerpt) = &self.excerpt {
            write!(f, "\n{}", excerpt)?;
        }
        Ok(())
    }
}

// Keep the debug representation on one line; it is what `unwrap()` shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.err.location {
            write!(
                f,
                "Error({:?}, line: {}, column: {})",
                self.err.code.to_string(),
                loc.line,
                loc.column,
            )
        } else {
            write!(f, "Error({:?})", self.err.code.to_string())
        }
    }
}
