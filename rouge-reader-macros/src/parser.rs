use crate::form::Form;

use proc_macro2::{Delimiter, Literal, Spacing, TokenStream, TokenTree};

#[derive(Debug)]
struct Parser {
    tokens: Vec<TokenTree>,
    index: usize,
}

#[derive(Debug)]
pub enum ParseError {
    ExpectedStringLiteral(Literal),
    UnexpectedToken(TokenTree),
    UnexpectedChar(char),
    OddMapEntries,
    UnexpectedEnd,
}

impl Parser {
    fn new(tokens: TokenStream) -> Self {
        Parser {
            tokens: tokens.into_iter().collect(),
            index: 0,
        }
    }

    fn next_token(&mut self) -> Option<&TokenTree> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn token(&mut self) -> Result<&TokenTree, ParseError> {
        self.next_token().ok_or(ParseError::UnexpectedEnd)
    }

    fn peek(&self) -> Option<&TokenTree> {
        self.tokens.get(self.index)
    }

    fn eat_token(&mut self) {
        assert!(self.index < self.tokens.len());
        self.index += 1;
    }

    fn is_done(&self) -> bool {
        self.index == self.tokens.len()
    }

    fn parse(&mut self) -> Result<Form, ParseError> {
        match self.token()?.clone() {
            TokenTree::Punct(punct) => match punct.as_char() {
                '#' => self.parse_octothorpe(),
                ',' => Ok(Form::Unquoted(self.token()?.clone())),
                c @ ('!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '='
                | '>' | '?' | '|') => match punct.spacing() {
                    Spacing::Joint => Ok(Form::Symbol(self.parse_identifier(c.to_string()))),
                    Spacing::Alone => match c {
                        '-' => match self.peek() {
                            Some(TokenTree::Literal(lit)) => {
                                let lit = lit.clone();
                                self.eat_token();
                                Ok(Form::Negated(lit))
                            }
                            _ => Ok(Form::Symbol(c.to_string())),
                        },
                        ':' => self.parse_keyword(),
                        _ => Ok(Form::Symbol(c.to_string())),
                    },
                },
                c => Err(ParseError::UnexpectedChar(c)),
            },
            TokenTree::Literal(literal) => Ok(Form::Literal(literal)),
            TokenTree::Ident(ident) => {
                let name = ident.to_string();
                Ok(match name.as_str() {
                    "true" => Form::Bool(true),
                    "false" => Form::Bool(false),
                    "nil" => Form::Nil,
                    _ => Form::Symbol(name),
                })
            }
            TokenTree::Group(group) => match group.delimiter() {
                Delimiter::Parenthesis => Ok(Form::List(parse_elements(group.stream())?)),
                Delimiter::Bracket => Ok(Form::Vector(parse_elements(group.stream())?)),
                Delimiter::Brace => parse_map(group.stream()),
                Delimiter::None => parse(group.stream()),
            },
        }
    }

    /// Collects a run of joint punctuation, optionally ending in an
    /// identifier, into a symbol name.
    fn parse_identifier(&mut self, prefix: String) -> String {
        let mut identifier = prefix;
        while let Some(token) = self.peek() {
            match token {
                TokenTree::Punct(punct) => match punct.as_char() {
                    '!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '=' | '>'
                    | '?' | '|' => {
                        identifier.push(punct.as_char());
                        let spacing = punct.spacing();
                        self.eat_token();
                        match spacing {
                            Spacing::Joint => {}
                            Spacing::Alone => break,
                        }
                    }
                    _ => break,
                },
                TokenTree::Ident(part) => {
                    identifier.push_str(&part.to_string());
                    self.eat_token();
                    break;
                }
                _ => break,
            }
        }
        identifier
    }

    /// Parses the name after a `:`, either an identifier or a string literal.
    fn parse_keyword(&mut self) -> Result<Form, ParseError> {
        match self.peek() {
            Some(TokenTree::Literal(lit)) => {
                let name = string_literal(lit)?;
                self.eat_token();
                Ok(Form::Keyword(name))
            }
            Some(TokenTree::Ident(ident)) => {
                let name = ident.to_string();
                self.eat_token();
                Ok(Form::Keyword(name))
            }
            _ => Ok(Form::Symbol(":".into())),
        }
    }

    fn parse_octothorpe(&mut self) -> Result<Form, ParseError> {
        let token = self.token()?.clone();
        match &token {
            TokenTree::Literal(lit) => Ok(Form::Symbol(string_literal(lit)?)),
            TokenTree::Group(group) if group.delimiter() == Delimiter::Brace => {
                Ok(Form::Set(parse_elements(group.stream())?))
            }
            _ => Err(ParseError::UnexpectedToken(token)),
        }
    }
}

fn string_literal(lit: &Literal) -> Result<String, ParseError> {
    let s = lit.to_string();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Ok(s[1..s.len() - 1].to_string())
    } else {
        Err(ParseError::ExpectedStringLiteral(lit.clone()))
    }
}

fn parse_elements(tokens: TokenStream) -> Result<Vec<Form>, ParseError> {
    let mut elements = vec![];
    let mut parser = Parser::new(tokens);
    while !parser.is_done() {
        elements.push(parser.parse()?);
    }
    Ok(elements)
}

fn parse_map(tokens: TokenStream) -> Result<Form, ParseError> {
    let mut elements = parse_elements(tokens)?.into_iter();
    let mut entries = vec![];
    while let Some(key) = elements.next() {
        let value = elements.next().ok_or(ParseError::OddMapEntries)?;
        entries.push((key, value));
    }
    Ok(Form::Map(entries))
}

pub fn parse(tokens: TokenStream) -> Result<Form, ParseError> {
    let mut parser = Parser::new(tokens);
    let form = parser.parse()?;
    match parser.next_token() {
        None => Ok(form),
        Some(token) => Err(ParseError::UnexpectedToken(token.clone())),
    }
}
