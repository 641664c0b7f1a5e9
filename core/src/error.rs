//! Error types for syslex.
//!
//! Lexing stops at the first malformed construct. The lexer reports it once,
//! as a terminal `Error` token plus a [`LexError`] describing what went wrong
//! and where.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A region of an RFC 5424 message, used to say where an error occurred.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The `<PRIVAL>` bracket.
    Pri,
    Version,
    Timestamp,
    Hostname,
    AppName,
    ProcId,
    MsgId,
    /// An SD-ELEMENT or the STRUCTURED-DATA section between elements.
    StructuredData,
}

impl Field {
    /// The header field that follows this one, if any.
    pub(crate) const fn next(self) -> Option<Self> {
        match self {
            Self::Pri => Some(Self::Version),
            Self::Version => Some(Self::Timestamp),
            Self::Timestamp => Some(Self::Hostname),
            Self::Hostname => Some(Self::AppName),
            Self::AppName => Some(Self::ProcId),
            Self::ProcId => Some(Self::MsgId),
            Self::MsgId => Some(Self::StructuredData),
            Self::StructuredData => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pri => "PRI bracket",
            Self::Version => "VERSION",
            Self::Timestamp => "TIMESTAMP",
            Self::Hostname => "HOSTNAME",
            Self::AppName => "APP-NAME",
            Self::ProcId => "PROCID",
            Self::MsgId => "MSGID",
            Self::StructuredData => "STRUCTURED-DATA element",
        })
    }
}

/// What went wrong. All kinds are fatal to the current lexing run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A PRI or structured-data bracket was still open at end of input or at
    /// a line ending.
    #[error("unclosed {0}")]
    UnclosedBracket(Field),

    /// A rune that is not valid at this position of the grammar.
    #[error("unrecognized character {found:?} in {field}")]
    UnrecognizedCharacter { found: char, field: Field },

    /// A quoted PARAM-VALUE is missing its closing quote.
    #[error("unterminated quoted string")]
    UnterminatedQuotedString,

    /// A `]` with no matching `[`.
    #[error("unbalanced bracket nesting: `]` without matching `[`")]
    UnbalancedBracketNesting,
}

/// The terminal error of a lexing run.
///
/// `position` is the byte offset of the offending rune (or the input length
/// when input ended early). `context` is the raw text from the start of the
/// token being scanned up to `position`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}:{position}: {kind}")]
pub struct LexError {
    pub kind: ErrorKind,
    pub position: usize,
    pub context: String,
    pub name: Arc<str>,
}

impl LexError {
    pub fn new(
        kind: ErrorKind,
        position: usize,
        context: impl Into<String>,
        name: Arc<str>,
    ) -> Self {
        Self {
            kind,
            position,
            context: context.into(),
            name,
        }
    }

    /// The human-readable message, without name or position.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
