//! Lexemes inside an SD-ELEMENT.
//!
//! The element interior is context free apart from quoted values, so it is
//! classified with a Logos lexer one lexeme at a time. Quoted values are
//! scanned by hand because of their escapes.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SdLexeme {
    #[regex(r"[ \t]+")]
    Space,

    #[token("[")]
    Open,

    #[token("]")]
    Close,

    #[token("@")]
    At,

    #[token("=")]
    Equals,

    #[token("\"")]
    Quote,

    // SD-NAME: PRINTUSASCII except `=`, `]`, `"`, plus `@` and `[`
    #[regex(r"[!#-<>?A-Z\\^-~]+")]
    Name,
}

/// Result of classifying the start of the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scanned {
    End,
    Invalid,
    Lexeme(SdLexeme, usize),
}

/// Classifies the lexeme at the start of `rest` and returns its byte length.
pub(super) fn next_lexeme(rest: &str) -> Scanned {
    let mut lex = SdLexeme::lexer(rest);
    match lex.next() {
        None => Scanned::End,
        Some(Err(_)) => Scanned::Invalid,
        Some(Ok(lexeme)) => Scanned::Lexeme(lexeme, lex.span().end),
    }
}

/// Outcome of scanning a quoted PARAM-VALUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Quoted {
    /// Closed; the value, both quotes included, is this many bytes long.
    Closed(usize),
    /// Input ended or a line ending appeared this many bytes in.
    Unterminated(usize),
}

/// Scans a quoted value; `rest` must start at the opening `"`.
///
/// `\"`, `\\` and `\]` are consumed as pairs. Every delimiter is ASCII, so a
/// byte scan never stops inside a multi-byte character.
pub(super) fn scan_quoted(rest: &str) -> Quoted {
    let bytes = rest.as_bytes();
    let mut i = 1;
    loop {
        match bytes.get(i) {
            None | Some(b'\r' | b'\n') => return Quoted::Unterminated(i),
            Some(b'\\') if matches!(bytes.get(i + 1), Some(b'"' | b'\\' | b']')) => i += 2,
            Some(b'"') => return Quoted::Closed(i + 1),
            Some(_) => i += 1,
        }
    }
}
