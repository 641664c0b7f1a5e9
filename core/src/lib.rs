#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Core of syslex: a pull-based tokenizer for RFC 5424 syslog messages.
//!
//! The [`Lexer`] turns one message into a sequence of [`Token`]s describing
//! its lexical shape (PRI bracket, header fields, structured data, message
//! body), ending in either `Eof` or a single `Error`.

pub mod config;
mod error;
mod lexer;
mod span;
mod token;

#[cfg(any(feature = "tokio", feature = "futures"))]
pub mod async_stream;

pub use config::{DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM, LexConfig, NestingGuard};
pub use error::{ErrorKind, Field, LexError};
pub use lexer::{Lexer, tokenize};
pub use span::Span;
pub use token::{OwnedToken, Token, TokenKind, unescape_param_value};
