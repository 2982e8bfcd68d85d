//! Converting forms into text.
//!
//! The output is source text the reader accepts, so reading a printed form
//! yields an equal form. Metadata is not printed, and vars, macros and
//! builtins print in the unreadable `#<...>` notation.
//!
//! # Terminology
//!
//! The process of serializing forms to their textual representation is
//! referred to as "writing" in Lisp. To avoid confusion with Rust's `Write`
//! trait, this crate uses "printing" instead.

use std::io;

use num_bigint::BigInt;

use crate::number::{self, Number};
use crate::read::is_keyword_name;
use crate::{Form, List, Symbol};

/// Represents a character escape code in a type-safe manner.
pub enum CharEscape {
    /// An escaped quote `"`
    Quote,
    /// An escaped reverse solidus `\`
    ReverseSolidus,
    /// Alert, also known as "bell" (`\a`)
    Alert,
    /// An escaped backspace character (`\b`)
    Backspace,
    /// An escaped escape character (`\e`)
    Escape,
    /// An escaped form feed character (`\f`)
    FormFeed,
    /// An escaped line feed character (`\n`)
    LineFeed,
    /// An escaped carriage return character (`\r`)
    CarriageReturn,
    /// An escaped tab character (`\t`)
    Tab,
    /// An escaped vertical tab character (`\v`)
    VerticalTab,
}

impl CharEscape {
    #[inline]
    fn from_escape_table(escape: u8) -> CharEscape {
        match escape {
            self::AA => CharEscape::Alert,
            self::BB => CharEscape::Backspace,
            self::EE => CharEscape::Escape,
            self::FF => CharEscape::FormFeed,
            self::TT => CharEscape::Tab,
            self::NN => CharEscape::LineFeed,
            self::RR => CharEscape::CarriageReturn,
            self::VV => CharEscape::VerticalTab,
            self::QU => CharEscape::Quote,
            _ => CharEscape::ReverseSolidus,
        }
    }
}

/// The unreadable kinds of forms, printed as `#<Kind ...>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opaque {
    /// A var, printed with its name.
    Var,
    /// A macro, printed with the form it wraps.
    Macro,
    /// A builtin, printed with the form it wraps.
    Builtin,
}

impl Opaque {
    fn name(self) -> &'static str {
        match self {
            Opaque::Var => "Var",
            Opaque::Macro => "Macro",
            Opaque::Builtin => "Builtin",
        }
    }
}

/// This trait abstracts away serializing the pieces of a form, which allows
/// the implementer to optionally pretty print the output.
///
/// The default implementation produces compact, single-line text.
pub trait Formatter {
    /// Writes `nil` to the specified writer.
    #[inline]
    fn write_nil<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"nil")
    }

    /// Writes `true` or `false` to the specified writer.
    #[inline]
    fn write_bool<W: ?Sized>(&mut self, writer: &mut W, value: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(if value { b"true" } else { b"false" })
    }

    /// Writes a number like `-123` or `1.5` to the specified writer.
    ///
    /// Floating point numbers always contain a `.` or an exponent, so they
    /// are read back as floats.
    #[inline]
    fn write_number<W: ?Sized>(&mut self, writer: &mut W, value: &Number) -> io::Result<()>
    where
        W: io::Write,
    {
        struct Write<'a, W: io::Write + ?Sized> {
            writer: &'a mut W,
        }
        impl<'a, W: io::Write + ?Sized> number::Visitor for Write<'a, W> {
            type Value = ();
            type Error = io::Error;

            fn visit_i64(self, n: i64) -> io::Result<()> {
                let mut buffer = itoa::Buffer::new();
                self.writer.write_all(buffer.format(n).as_bytes())
            }
            fn visit_bigint(self, n: &BigInt) -> io::Result<()> {
                write!(self.writer, "{}", n)
            }
            fn visit_f64(self, n: f64) -> io::Result<()> {
                if n.is_finite() {
                    let mut buffer = ryu::Buffer::new();
                    self.writer.write_all(buffer.format_finite(n).as_bytes())
                } else {
                    write!(self.writer, "{}", n)
                }
            }
        }
        value.visit(Write { writer })
    }

    /// Called before each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn begin_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Called after each series of `write_string_fragment` and
    /// `write_char_escape`.  Writes a `"` to the specified writer.
    #[inline]
    fn end_string<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"\"")
    }

    /// Writes a string fragment that doesn't need any escaping to the
    /// specified writer.
    #[inline]
    fn write_string_fragment<W: ?Sized>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(fragment.as_bytes())
    }

    /// Writes a character escape code to the specified writer.
    #[inline]
    fn write_char_escape<W: ?Sized>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()>
    where
        W: io::Write,
    {
        use self::CharEscape::*;

        let s = match char_escape {
            Quote => b"\\\"",
            ReverseSolidus => b"\\\\",
            Alert => b"\\a",
            Backspace => b"\\b",
            Escape => b"\\e",
            FormFeed => b"\\f",
            LineFeed => b"\\n",
            CarriageReturn => b"\\r",
            Tab => b"\\t",
            VerticalTab => b"\\v",
        };
        writer.write_all(s)
    }

    /// Writes a symbol, qualified with its namespace if it has one.
    #[inline]
    fn write_symbol<W: ?Sized>(&mut self, writer: &mut W, symbol: &Symbol) -> io::Result<()>
    where
        W: io::Write,
    {
        if let Some(ns) = symbol.ns() {
            writer.write_all(ns.as_bytes())?;
            writer.write_all(b"/")?;
        }
        writer.write_all(symbol.name().as_bytes())
    }

    /// Writes a keyword to the specified writer.
    ///
    /// Names outside the keyword character set are written in the quoted
    /// `:"..."` notation.
    #[inline]
    fn write_keyword<W: ?Sized>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b":")?;
        if is_keyword_name(name) {
            writer.write_all(name.as_bytes())
        } else {
            format_escaped_str(writer, self, name)
        }
    }

    /// Writes a regex literal, `#"pattern"`, to the specified writer.
    ///
    /// The pattern is written as is, except that a `"` not already preceded
    /// by a backslash is escaped.
    fn write_regex<W: ?Sized>(&mut self, writer: &mut W, pattern: &str) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#\"")?;
        let mut escaped = false;
        for c in pattern.chars() {
            if c == '"' && !escaped {
                writer.write_all(b"\\")?;
            }
            escaped = c == '\\' && !escaped;
            let mut buf = [0; 4];
            writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        }
        writer.write_all(b"\"")
    }

    /// Writes the prefix of an unquote marker: `~`, or `~@` when splicing.
    #[inline]
    fn write_unquote<W: ?Sized>(&mut self, writer: &mut W, splice: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(if splice { b"~@" } else { b"~" })
    }

    /// Called before the contents of an unreadable form.  Writes `#<Kind `.
    #[inline]
    fn begin_opaque<W: ?Sized>(&mut self, writer: &mut W, kind: Opaque) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#<")?;
        writer.write_all(kind.name().as_bytes())?;
        writer.write_all(b" ")
    }

    /// Called after the contents of an unreadable form.  Writes `>`.
    #[inline]
    fn end_opaque<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b">")
    }

    /// Called before any list elements.  Writes a `(` to the specified
    /// writer.
    #[inline]
    fn begin_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"(")
    }

    /// Called after all list elements have been written.  Writes a `)` to the
    /// specified writer.
    #[inline]
    fn end_list<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b")")
    }

    /// Called before any vector elements.  Writes a `[`.
    #[inline]
    fn begin_vector<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"[")
    }

    /// Called after all vector elements have been written.  Writes a `]`.
    #[inline]
    fn end_vector<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"]")
    }

    /// Called before any set elements.  Writes a `#{`.
    #[inline]
    fn begin_set<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"#{")
    }

    /// Called after all set elements have been written.  Writes a `}`.
    #[inline]
    fn end_set<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"}")
    }

    /// Called before starting to write a list, vector or set element. Writes
    /// a space to the specified writer, if needed.
    #[inline]
    fn begin_seq_element<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b" ")
        }
    }

    /// Called after every list, vector or set element.
    #[inline]
    fn end_seq_element<W: ?Sized>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        Ok(())
    }

    /// Called before any map entries.  Writes a `{`.
    #[inline]
    fn begin_map<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"{")
    }

    /// Called after all map entries have been written.  Writes a `}`.
    #[inline]
    fn end_map<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b"}")
    }

    /// Called before every map key. Writes `, ` between entries.
    #[inline]
    fn begin_map_key<W: ?Sized>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    /// Called between a map key and its value. Writes a space.
    #[inline]
    fn begin_map_value<W: ?Sized>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(b" ")
    }
}

/// This structure compacts a form on a single line.
#[derive(Clone, Debug, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A printer for forms.
#[derive(Debug)]
pub struct Printer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
}

impl<W, F> Printer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Creates a new printer whose output will be written to the writer
    /// specified.
    #[inline]
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Printer { writer, formatter }
    }

    /// Unwrap the `Writer` from the `Printer`.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of the specified form to the underlying
    /// writer.
    pub fn print(&mut self, form: &Form) -> io::Result<()> {
        match form {
            Form::Nil => self.formatter.write_nil(&mut self.writer),
            Form::Bool(b) => self.formatter.write_bool(&mut self.writer, *b),
            Form::Number(n) => self.formatter.write_number(&mut self.writer, n),
            Form::String(s) => format_escaped_str(&mut self.writer, &mut self.formatter, s),
            Form::Keyword(name) => self.formatter.write_keyword(&mut self.writer, name),
            Form::Symbol(sym) => self.formatter.write_symbol(&mut self.writer, sym),
            Form::List(list) => self.print_list(list),
            Form::Vector(items) => {
                self.formatter.begin_vector(&mut self.writer)?;
                self.print_elements(items.iter())?;
                self.formatter.end_vector(&mut self.writer)
            }
            Form::Set(items) => {
                self.formatter.begin_set(&mut self.writer)?;
                self.print_elements(items.iter())?;
                self.formatter.end_set(&mut self.writer)
            }
            Form::Map(map) => {
                self.formatter.begin_map(&mut self.writer)?;
                for (i, (key, value)) in map.iter().enumerate() {
                    self.formatter.begin_map_key(&mut self.writer, i == 0)?;
                    self.print(key)?;
                    self.formatter.begin_map_value(&mut self.writer)?;
                    self.print(value)?;
                }
                self.formatter.end_map(&mut self.writer)
            }
            Form::Regex(re) => self.formatter.write_regex(&mut self.writer, re.as_str()),
            Form::Dequote(inner) => {
                self.formatter.write_unquote(&mut self.writer, false)?;
                self.print(inner)
            }
            Form::Splice(inner) => {
                self.formatter.write_unquote(&mut self.writer, true)?;
                self.print(inner)
            }
            Form::Var(var) => {
                self.formatter.begin_opaque(&mut self.writer, Opaque::Var)?;
                self.writer.write_all(var.name().as_bytes())?;
                self.formatter.end_opaque(&mut self.writer)
            }
            Form::Macro(inner) => self.print_opaque(Opaque::Macro, inner),
            Form::Builtin(inner) => self.print_opaque(Opaque::Builtin, inner),
        }
    }

    fn print_list(&mut self, list: &List) -> io::Result<()> {
        self.formatter.begin_list(&mut self.writer)?;
        self.print_elements(list.iter())?;
        self.formatter.end_list(&mut self.writer)
    }

    fn print_elements<'a, I>(&mut self, elements: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Form>,
    {
        for (i, element) in elements.into_iter().enumerate() {
            self.formatter.begin_seq_element(&mut self.writer, i == 0)?;
            self.print(element)?;
            self.formatter.end_seq_element(&mut self.writer)?;
        }
        Ok(())
    }

    fn print_opaque(&mut self, kind: Opaque, inner: &Form) -> io::Result<()> {
        self.formatter.begin_opaque(&mut self.writer, kind)?;
        self.print(inner)?;
        self.formatter.end_opaque(&mut self.writer)
    }
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a new printer using the default formatter.
    #[inline]
    pub fn new(writer: W) -> Self {
        Printer::with_formatter(writer, DefaultFormatter)
    }
}

impl<W, F> io::Write for Printer<W, F>
where
    W: io::Write,
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn format_escaped_str<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    formatter.begin_string(writer)?;
    format_escaped_str_contents(writer, formatter, value)?;
    formatter.end_string(writer)
}

fn format_escaped_str_contents<W: ?Sized, F: ?Sized>(
    writer: &mut W,
    formatter: &mut F,
    value: &str,
) -> io::Result<()>
where
    W: io::Write,
    F: Formatter,
{
    let bytes = value.as_bytes();

    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }

        if start < i {
            formatter.write_string_fragment(writer, &value[start..i])?;
        }

        formatter.write_char_escape(writer, CharEscape::from_escape_table(escape))?;

        start = i + 1;
    }

    if start != bytes.len() {
        formatter.write_string_fragment(writer, &value[start..])?;
    }

    Ok(())
}

const AA: u8 = b'a'; // \x07
const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const VV: u8 = b'v'; // \x0B
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const EE: u8 = b'e'; // \x1B
const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const __: u8 = 0;

// Lookup table of escape sequences. A value of b'x' at index i means that byte
// i is escaped as "\x". A value of 0 means that byte i is written as is; this
// includes the control characters without a mnemonic escape.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, AA, BB, TT, NN, VV, FF, RR, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, EE, __, __, __, __, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Print the given form as text into the IO stream.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, form: &Form) -> io::Result<()> {
    let mut printer = Printer::new(writer);
    printer.print(form)?;
    Ok(())
}

/// Print the given form into a byte vector.
#[inline]
pub fn to_vec(form: &Form) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, form)?;
    Ok(writer)
}

/// Print the given form into a string.
///
/// ```
/// # use rouge_reader::{to_string, Form};
/// let form = Form::map(vec![(Form::keyword("a"), Form::from("x\ny"))]);
/// assert_eq!(to_string(&form).unwrap(), r#"{:a "x\ny"}"#);
/// ```
#[inline]
pub fn to_string(form: &Form) -> io::Result<String> {
    let vec = to_vec(form)?;
    String::from_utf8(vec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
