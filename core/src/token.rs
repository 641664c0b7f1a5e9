//! Token types produced by the [`Lexer`](crate::Lexer).
//!
//! A [`Token`] is a zero-copy view into the lexed message: its `text` borrows
//! the input and its [`Span`] records where that text lives. [`OwnedToken`]
//! is the owned counterpart used when tokens cross task boundaries.

use crate::Span;
use std::borrow::Cow;
use std::fmt;

/// The lexical class of a token.
///
/// This is a closed set: every byte of a valid message is covered by exactly
/// one token of one of these kinds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The PRI opening delimiter, `<` by default.
    LeftAngle,
    /// The PRI closing delimiter, `>` by default.
    RightAngle,
    /// A maximal run of ASCII digits.
    Number,
    /// A run of spaces or tabs.
    Space,
    /// A `-`, either the NIL value or a date separator.
    Hyphen,
    /// A `:` inside a timestamp.
    Colon,
    /// `[` opening an SD-ELEMENT.
    LeftBracket,
    /// `]` closing an SD-ELEMENT.
    RightBracket,
    /// `@` separating an SD-ID name from its enterprise number.
    At,
    /// `=` between a PARAM-NAME and its value.
    Equals,
    /// A quoted PARAM-VALUE, quotes and escapes included verbatim.
    QuotedString,
    /// Any other run of text: header fields, SD names, the MSG body.
    Text,
    /// End of input. Terminal.
    Eof,
    /// Lexing failed. Terminal.
    Error,
}

impl TokenKind {
    /// Whether this kind ends the token sequence.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Eof | Self::Error)
    }

    /// A short description used in diagnostics, e.g. "`[`" or "quoted string".
    pub const fn describe(self) -> &'static str {
        match self {
            Self::LeftAngle => "left angle",
            Self::RightAngle => "right angle",
            Self::Number => "number",
            Self::Space => "space",
            Self::Hyphen => "`-`",
            Self::Colon => "`:`",
            Self::LeftBracket => "`[`",
            Self::RightBracket => "`]`",
            Self::At => "`@`",
            Self::Equals => "`=`",
            Self::QuotedString => "quoted string",
            Self::Text => "text",
            Self::Eof => "EOF",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token: its kind, where it sits in the input, and its raw text.
///
/// For an `Error` token, `text` is the raw substring from the start of the
/// failed token up to the offending rune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, text: &'a str) -> Self {
        Self { kind, span, text }
    }

    /// Byte offset of the first byte of this token.
    #[inline]
    pub const fn start(&self) -> usize {
        self.span.start()
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// The interpreted value of a `QuotedString` token.
    ///
    /// Strips the surrounding quotes and collapses the `\"`, `\\` and `\]`
    /// escapes. Returns `None` for any other kind.
    pub fn param_value(&self) -> Option<Cow<'a, str>> {
        if self.kind != TokenKind::QuotedString {
            return None;
        }
        let inner = self.text.strip_prefix('"')?.strip_suffix('"')?;
        Some(unescape_param_value(inner))
    }

    pub fn to_owned_token(&self) -> OwnedToken {
        OwnedToken {
            kind: self.kind,
            span: self.span,
            text: self.text.to_owned(),
        }
    }
}

/// An owned [`Token`], detached from the input buffer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnedToken {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl OwnedToken {
    #[inline]
    pub fn as_token(&self) -> Token<'_> {
        Token::new(self.kind, self.span, &self.text)
    }
}

impl From<Token<'_>> for OwnedToken {
    fn from(token: Token<'_>) -> Self {
        token.to_owned_token()
    }
}

/// Collapses the PARAM-VALUE escapes `\"`, `\\` and `\]`.
///
/// A backslash before any other character is kept as a literal backslash.
/// Borrows when there is nothing to collapse.
pub fn unescape_param_value(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&escaped @ ('"' | '\\' | ']')) = chars.peek() {
                out.push(escaped);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}
