//! Lexer configuration.
//!
//! This module provides [`LexConfig`] for controlling lexer behavior: the PRI
//! delimiters, how deeply structured-data brackets may nest, and whether the
//! header fields after the PRI bracket are tokenized.
//!
//! # Example
//!
//! ```ignore
//! use syslex_core::LexConfig;
//!
//! // RFC 5424 defaults: `<` / `>`, no nested SD brackets, full header
//! let config = LexConfig::default();
//!
//! // Custom PRI delimiters, PRI bracket only
//! let config = LexConfig::new()
//!     .with_delimiters("{{", "}}")
//!     .pri_only();
//! ```

use std::borrow::Cow;

/// Default PRI opening delimiter.
pub const DEFAULT_LEFT_DELIM: &str = "<";
/// Default PRI closing delimiter.
pub const DEFAULT_RIGHT_DELIM: &str = ">";

/// Configuration for lexer behavior.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `left_delim` | `<` | RFC 5424 PRI |
/// | `right_delim` | `>` | RFC 5424 PRI |
/// | `max_nesting_depth` | 1 | SD-ELEMENTs do not nest |
/// | `tokenize_header` | `true` | Tokenize VERSION through MSG |
///
/// Delimiters are never empty: empty values passed to
/// [`with_delimiters`](Self::with_delimiters) fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexConfig {
    left_delim: Cow<'static, str>,
    right_delim: Cow<'static, str>,
    max_nesting_depth: usize,
    tokenize_header: bool,
}

impl Default for LexConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LexConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        left_delim: Cow::Borrowed(DEFAULT_LEFT_DELIM),
        right_delim: Cow::Borrowed(DEFAULT_RIGHT_DELIM),
        max_nesting_depth: 1,
        tokenize_header: true,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the PRI delimiters.
    ///
    /// An empty `left` or `right` keeps the RFC 5424 default for that side.
    pub fn with_delimiters(
        mut self,
        left: impl Into<Cow<'static, str>>,
        right: impl Into<Cow<'static, str>>,
    ) -> Self {
        let (left, right) = (left.into(), right.into());
        self.left_delim = if left.is_empty() {
            Cow::Borrowed(DEFAULT_LEFT_DELIM)
        } else {
            left
        };
        self.right_delim = if right.is_empty() {
            Cow::Borrowed(DEFAULT_RIGHT_DELIM)
        } else {
            right
        };
        self
    }

    /// Sets how many structured-data brackets may be open at once.
    ///
    /// Opening a bracket beyond this depth is an unrecognized character.
    #[inline]
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Stops after the PRI bracket: everything after `>` is scanned as text.
    #[inline]
    pub const fn pri_only(mut self) -> Self {
        self.tokenize_header = false;
        self
    }

    #[inline]
    pub fn left_delim(&self) -> &str {
        &self.left_delim
    }

    #[inline]
    pub fn right_delim(&self) -> &str {
        &self.right_delim
    }

    #[inline]
    pub const fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    #[inline]
    pub const fn tokenize_header(&self) -> bool {
        self.tokenize_header
    }
}

/// Tracks structured-data bracket depth during lexing.
///
/// The depth never goes negative: closing at depth 0 is reported to the
/// caller instead of underflowing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestingGuard {
    depth: usize,
}

impl NestingGuard {
    /// Creates a new guard with depth 0.
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Open a bracket.
    ///
    /// Returns `false`, leaving the depth unchanged, if the new depth would
    /// exceed `limit`.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> bool {
        if self.depth >= limit {
            return false;
        }
        self.depth += 1;
        true
    }

    /// Close a bracket.
    ///
    /// Returns `false` if no bracket was open.
    #[inline]
    pub fn exit(&mut self) -> bool {
        match self.depth.checked_sub(1) {
            Some(depth) => {
                self.depth = depth;
                true
            }
            None => false,
        }
    }
}
