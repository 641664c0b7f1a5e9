//! The RFC 5424 lexer.
//!
//! [`Lexer`] is a pull-based state machine: every call to
//! [`next_token`](Lexer::next_token) runs the transition loop from the stored
//! [`State`] until exactly one token is produced. Nothing is scanned ahead of
//! the consumer, so abandoning a lexer part-way through costs nothing.
//!
//! # Grammar
//!
//! ```text
//! [TEXT] "<" *(SPACE / NUMBER) ">" VERSION SP TIMESTAMP SP HOSTNAME
//!     SP APP-NAME SP PROCID SP MSGID SP STRUCTURED-DATA [SP MSG]
//! ```
//!
//! Structured-data elements are also recognized in leading text, so fragments
//! such as `[ex@1 iut="3"]` can be lexed on their own.
//!
//! # Example
//!
//! ```ignore
//! use syslex_core::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("udp", "<86>");
//! loop {
//!     let token = lexer.next_token();
//!     println!("{:?} {:?}", token.kind, token.text);
//!     if token.is_terminal() {
//!         break;
//!     }
//! }
//! ```

mod structured;

use crate::{ErrorKind, Field, LexConfig, LexError, NestingGuard, Span, Token, TokenKind};
use std::borrow::Cow;
use std::iter::FusedIterator;
use std::sync::Arc;
use structured::{Quoted, Scanned, SdLexeme};

/// Where an SD-ELEMENT was opened, which decides where lexing resumes after
/// its `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Opened in free text before any PRI.
    Fragment,
    /// Opened in the STRUCTURED-DATA header field.
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Free text before any PRI; `[` opens a fragment element.
    Text,
    /// Free text after a PRI in PRI-only mode. Only the left delimiter
    /// interrupts it.
    Body,
    LeftAngle,
    InsideAngle,
    PriSpace,
    PriNumber,
    Version,
    /// Blanks after the given field.
    Separator(Field),
    Timestamp,
    /// HOSTNAME, APP-NAME, PROCID or MSGID.
    Field(Field),
    StructuredData,
    AfterStructuredData { nil: bool },
    Element(Origin),
    Quoted(Origin),
    Message,
    Eof,
}

/// One transition of the state machine.
enum Step {
    /// Move to another state without producing a token.
    Goto(State),
    /// Produce a token from the scanned span, then move on.
    Emit(TokenKind, State),
    /// Stop with an error at the cursor.
    Fail(ErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Delim,
    Open,
    Close,
}

/// A streaming tokenizer over one RFC 5424 message.
///
/// Created from an immutable input, driven until it returns an `Eof` or
/// `Error` token, then discarded. After the terminal token every call to
/// [`next_token`](Self::next_token) returns that same token again.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    name: Arc<str>,
    input: &'a str,
    config: LexConfig,
    state: State,
    pos: usize,
    start: usize,
    depth: NestingGuard,
    terminal: Option<Token<'a>>,
    error: Option<LexError>,
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with the RFC 5424 defaults.
    ///
    /// `name` identifies the input in error reports only.
    pub fn new(name: impl Into<Arc<str>>, input: &'a str) -> Self {
        Self::with_config(name, input, LexConfig::DEFAULT)
    }

    /// Creates a lexer with custom PRI delimiters. Empty delimiters fall back
    /// to `<` and `>`.
    pub fn with_delimiters(
        name: impl Into<Arc<str>>,
        input: &'a str,
        left: impl Into<Cow<'static, str>>,
        right: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_config(name, input, LexConfig::new().with_delimiters(left, right))
    }

    /// Creates a lexer from a full [`LexConfig`].
    pub fn with_config(name: impl Into<Arc<str>>, input: &'a str, config: LexConfig) -> Self {
        Self {
            name: name.into(),
            input,
            config,
            state: State::Text,
            pos: 0,
            start: 0,
            depth: NestingGuard::new(),
            terminal: None,
            error: None,
            exhausted: false,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The configuration this lexer was built with.
    #[inline]
    pub fn config(&self) -> &LexConfig {
        &self.config
    }

    /// Current cursor position, in bytes.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of structured-data brackets currently open.
    #[inline]
    pub fn nesting_depth(&self) -> usize {
        self.depth.depth()
    }

    /// The error that ended lexing, once an `Error` token has been returned.
    #[inline]
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    #[cfg(feature = "futures")]
    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Scans and returns the next token.
    ///
    /// Once an `Eof` or `Error` token has been returned, returns it again on
    /// every call.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(token) = self.terminal {
            return token;
        }
        loop {
            match self.step() {
                Step::Goto(state) => self.state = state,
                Step::Emit(kind, state) => {
                    self.state = state;
                    return self.emit(kind);
                }
                Step::Fail(kind) => return self.fail(kind),
            }
        }
    }

    fn step(&mut self) -> Step {
        match self.state {
            State::Text => self.scan_text(true),
            State::Body => self.scan_text(false),
            State::LeftAngle => {
                self.pos += self.config.left_delim().len();
                Step::Emit(TokenKind::LeftAngle, State::InsideAngle)
            }
            State::InsideAngle => self.scan_inside_angle(),
            State::PriSpace => {
                self.eat_while(is_space);
                Step::Emit(TokenKind::Space, State::InsideAngle)
            }
            State::PriNumber => {
                self.eat_while(|c| c.is_ascii_digit());
                Step::Emit(TokenKind::Number, State::InsideAngle)
            }
            State::Version => self.scan_version(),
            State::Separator(after) => self.scan_separator(after),
            State::Timestamp => self.scan_timestamp(),
            State::Field(field) => self.scan_field(field),
            State::StructuredData => self.scan_structured_data(),
            State::AfterStructuredData { nil } => self.scan_after_structured_data(nil),
            State::Element(origin) => self.scan_element(origin),
            State::Quoted(origin) => self.scan_quoted(origin),
            State::Message => {
                if self.pos == self.input.len() {
                    return Step::Goto(State::Eof);
                }
                self.pos = self.input.len();
                Step::Emit(TokenKind::Text, State::Eof)
            }
            State::Eof => Step::Emit(TokenKind::Eof, State::Eof),
        }
    }

    fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let span = Span::new(self.start, self.pos);
        let token = Token::new(kind, span, &self.input[span.range()]);
        self.start = self.pos;
        tracing::trace!(kind = %kind, start = span.start(), end = span.end(), "emit token");
        if kind.is_terminal() {
            self.terminal = Some(token);
        }
        token
    }

    fn fail(&mut self, kind: ErrorKind) -> Token<'a> {
        let context = &self.input[self.start..self.pos];
        tracing::debug!(name = %self.name, position = self.pos, kind = %kind, "lexing failed");
        self.error = Some(LexError::new(
            kind,
            self.pos,
            context,
            Arc::clone(&self.name),
        ));
        self.emit(TokenKind::Error)
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        let rest = self.rest();
        self.pos += rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
    }

    fn scan_text(&mut self, brackets: bool) -> Step {
        let rest = self.rest();
        let left = self.config.left_delim();
        let stop = rest.char_indices().find_map(|(i, c)| {
            if rest[i..].starts_with(left) {
                Some((i, Stop::Delim))
            } else if brackets && c == '[' {
                Some((i, Stop::Open))
            } else if brackets && c == ']' {
                Some((i, Stop::Close))
            } else {
                None
            }
        });
        let here = if brackets { State::Text } else { State::Body };

        match stop {
            Some((0, Stop::Delim)) => Step::Goto(State::LeftAngle),
            Some((0, Stop::Open)) => self.open_bracket(Origin::Fragment),
            Some((0, Stop::Close)) => Step::Fail(ErrorKind::UnbalancedBracketNesting),
            Some((i, _)) => {
                self.pos += i;
                Step::Emit(TokenKind::Text, here)
            }
            None if rest.is_empty() => Step::Goto(State::Eof),
            None => {
                self.pos = self.input.len();
                Step::Emit(TokenKind::Text, State::Eof)
            }
        }
    }

    fn scan_inside_angle(&mut self) -> Step {
        let rest = self.rest();
        match rest.chars().next() {
            None | Some('\r' | '\n') => Step::Fail(ErrorKind::UnclosedBracket(Field::Pri)),
            Some(c) if is_space(c) => Step::Goto(State::PriSpace),
            Some(c) if c.is_ascii_digit() => Step::Goto(State::PriNumber),
            Some(_) if rest.starts_with(self.config.right_delim()) => {
                self.pos += self.config.right_delim().len();
                let next = if self.config.tokenize_header() {
                    State::Version
                } else {
                    State::Body
                };
                Step::Emit(TokenKind::RightAngle, next)
            }
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: Field::Pri,
            }),
        }
    }

    fn scan_version(&mut self) -> Step {
        match self.peek() {
            None => Step::Goto(State::Eof),
            Some(c) if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_ascii_digit());
                Step::Emit(TokenKind::Number, State::Separator(Field::Version))
            }
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: Field::Version,
            }),
        }
    }

    fn scan_separator(&mut self, after: Field) -> Step {
        match self.peek() {
            None => Step::Goto(State::Eof),
            Some(c) if is_space(c) => {
                self.eat_while(is_space);
                let next = match after.next() {
                    Some(Field::Timestamp) => State::Timestamp,
                    Some(Field::StructuredData) => State::StructuredData,
                    Some(field) => State::Field(field),
                    None => State::Message,
                };
                Step::Emit(TokenKind::Space, next)
            }
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: after,
            }),
        }
    }

    // FULL-DATE "T" FULL-TIME, or NIL. Only the lexical skeleton is checked.
    fn scan_timestamp(&mut self) -> Step {
        let Some(c) = self.peek() else {
            return Step::Goto(State::Eof);
        };
        match c {
            c if is_space(c) => Step::Goto(State::Separator(Field::Timestamp)),
            '0'..='9' => {
                self.eat_while(|c| c.is_ascii_digit());
                Step::Emit(TokenKind::Number, State::Timestamp)
            }
            '-' => {
                self.pos += 1;
                Step::Emit(TokenKind::Hyphen, State::Timestamp)
            }
            ':' => {
                self.pos += 1;
                Step::Emit(TokenKind::Colon, State::Timestamp)
            }
            c if is_print_ascii(c) => {
                self.eat_while(|c| is_print_ascii(c) && !matches!(c, '0'..='9' | '-' | ':'));
                Step::Emit(TokenKind::Text, State::Timestamp)
            }
            found => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: Field::Timestamp,
            }),
        }
    }

    fn scan_field(&mut self, field: Field) -> Step {
        let rest = self.rest();
        match rest.chars().next() {
            None => Step::Goto(State::Eof),
            Some('-') if matches!(rest.as_bytes().get(1), None | Some(b' ' | b'\t')) => {
                self.pos += 1;
                Step::Emit(TokenKind::Hyphen, State::Separator(field))
            }
            Some(c) if is_print_ascii(c) => {
                self.eat_while(is_print_ascii);
                Step::Emit(TokenKind::Text, State::Separator(field))
            }
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter { found, field }),
        }
    }

    fn scan_structured_data(&mut self) -> Step {
        match self.peek() {
            None => Step::Goto(State::Eof),
            Some('-') => {
                self.pos += 1;
                Step::Emit(
                    TokenKind::Hyphen,
                    State::AfterStructuredData { nil: true },
                )
            }
            Some('[') => self.open_bracket(Origin::Header),
            Some(']') => Step::Fail(ErrorKind::UnbalancedBracketNesting),
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: Field::StructuredData,
            }),
        }
    }

    // Exactly one blank separates STRUCTURED-DATA from MSG; any further
    // blanks belong to the message.
    fn scan_after_structured_data(&mut self, nil: bool) -> Step {
        match self.peek() {
            None => Step::Goto(State::Eof),
            Some('[') if !nil => self.open_bracket(Origin::Header),
            Some(']') if !nil => Step::Fail(ErrorKind::UnbalancedBracketNesting),
            Some(c) if is_space(c) => {
                self.pos += 1;
                Step::Emit(TokenKind::Space, State::Message)
            }
            Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                found,
                field: Field::StructuredData,
            }),
        }
    }

    fn open_bracket(&mut self, origin: Origin) -> Step {
        if !self.depth.enter(self.config.max_nesting_depth()) {
            return Step::Fail(ErrorKind::UnrecognizedCharacter {
                found: '[',
                field: Field::StructuredData,
            });
        }
        self.pos += 1;
        Step::Emit(TokenKind::LeftBracket, State::Element(origin))
    }

    fn close_bracket(&mut self, origin: Origin) -> Step {
        if !self.depth.exit() {
            return Step::Fail(ErrorKind::UnbalancedBracketNesting);
        }
        self.pos += 1;
        let next = match (self.depth.depth(), origin) {
            (0, Origin::Fragment) => State::Text,
            (0, Origin::Header) => State::AfterStructuredData { nil: false },
            _ => State::Element(origin),
        };
        Step::Emit(TokenKind::RightBracket, next)
    }

    fn scan_element(&mut self, origin: Origin) -> Step {
        let rest = self.rest();
        let (lexeme, len) = match structured::next_lexeme(rest) {
            Scanned::Lexeme(lexeme, len) => (lexeme, len),
            Scanned::End => {
                return Step::Fail(ErrorKind::UnclosedBracket(Field::StructuredData));
            }
            Scanned::Invalid => {
                return match rest.chars().next() {
                    None | Some('\r' | '\n') => {
                        Step::Fail(ErrorKind::UnclosedBracket(Field::StructuredData))
                    }
                    Some(found) => Step::Fail(ErrorKind::UnrecognizedCharacter {
                        found,
                        field: Field::StructuredData,
                    }),
                };
            }
        };

        let kind = match lexeme {
            SdLexeme::Open => return self.open_bracket(origin),
            SdLexeme::Close => return self.close_bracket(origin),
            SdLexeme::Quote => return Step::Goto(State::Quoted(origin)),
            SdLexeme::Space => TokenKind::Space,
            SdLexeme::At => TokenKind::At,
            SdLexeme::Equals => TokenKind::Equals,
            SdLexeme::Name if rest[..len].bytes().all(|b| b.is_ascii_digit()) => {
                TokenKind::Number
            }
            SdLexeme::Name => TokenKind::Text,
        };
        self.pos += len;
        Step::Emit(kind, State::Element(origin))
    }

    fn scan_quoted(&mut self, origin: Origin) -> Step {
        match structured::scan_quoted(self.rest()) {
            Quoted::Closed(len) => {
                self.pos += len;
                Step::Emit(TokenKind::QuotedString, State::Element(origin))
            }
            Quoted::Unterminated(len) => {
                self.pos += len;
                Step::Fail(ErrorKind::UnterminatedQuotedString)
            }
        }
    }
}

/// Yields every token up to, but not including, `Eof`.
///
/// An error is yielded once as `Err`, after which iteration ends.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        match token.kind {
            TokenKind::Eof => {
                self.exhausted = true;
                None
            }
            TokenKind::Error => {
                self.exhausted = true;
                self.error.clone().map(Err)
            }
            _ => Some(Ok(token)),
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lexes a whole message, returning every token before `Eof`.
pub fn tokenize<'a>(name: &str, input: &'a str) -> Result<Vec<Token<'a>>, LexError> {
    Lexer::new(name, input).collect()
}

#[inline]
fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

// PRINTUSASCII, %d33-126
#[inline]
fn is_print_ascii(c: char) -> bool {
    matches!(c, '!'..='~')
}
