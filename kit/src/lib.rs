#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! A fast, pull-based streaming tokenizer for RFC 5424 syslog messages.
//!
//! This crate re-exports [`syslex_core`]. Enable the `tokio` or `futures`
//! feature for the async adapters in `async_stream`, and `serde` for
//! serializable tokens and errors.
pub use syslex_core::*;
