//! Async adapters around the pull-based [`Lexer`](crate::Lexer).
//!
//! Lexing itself never needs a runtime or a background task. These adapters
//! exist for integrating with async pipelines:
//!
//! - **`futures`**: [`Lexer`](crate::Lexer) implements
//!   `futures_core::Stream`, yielding the same items as its `Iterator`. The
//!   stream is always ready and owns no task.
//! - **`tokio`**: [`tokio_impl::spawn`] runs a lexer on a tokio task and hands
//!   tokens over a single-slot channel. The producer parks until the consumer
//!   takes each token (backpressure), and stops as soon as the consumer
//!   cancels or drops its [`tokio_impl::TokenReceiver`].
//!
//! # Example
//!
//! ```ignore
//! use syslex_core::{LexConfig, async_stream::tokio_impl};
//!
//! async fn first_tokens(message: String) {
//!     let mut rx = tokio_impl::spawn("udp", message, LexConfig::default());
//!     let pri_open = rx.next_token().await?;
//!     let prival = rx.next_token().await?;
//!     // Not interested in the rest: stop the producer.
//!     rx.cancel().await;
//! }
//! ```

use crate::LexError;
use thiserror::Error;

/// Error type for async streaming operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The lexer reported a malformed message.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The producer went away before sending a terminal token.
    #[error("token channel closed before a terminal token")]
    ChannelClosed,
}

#[cfg(feature = "tokio")]
pub mod tokio_impl {
    //! Tokio-based push adapter with a single-slot handoff.

    use super::StreamError;
    use crate::{LexConfig, LexError, Lexer, OwnedToken, TokenKind};
    use ::tokio::sync::mpsc;
    use ::tokio::task::JoinHandle;
    use std::sync::Arc;

    type Handoff = Result<OwnedToken, LexError>;

    /// Spawns a task that lexes `input` and hands tokens to the returned
    /// receiver one at a time.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        name: impl Into<Arc<str>>,
        input: impl Into<String>,
        config: LexConfig,
    ) -> TokenReceiver {
        let (tx, rx) = mpsc::channel(1);
        let task = ::tokio::spawn(produce(name.into(), input.into(), config, tx));
        TokenReceiver {
            rx,
            task,
            terminal: None,
        }
    }

    async fn produce(name: Arc<str>, input: String, config: LexConfig, tx: mpsc::Sender<Handoff>) {
        let mut lexer = Lexer::with_config(name, &input, config);
        loop {
            // Checked before every handoff so a cancelled consumer never
            // costs another token.
            if tx.is_closed() {
                tracing::debug!(
                    name = lexer.name(),
                    position = lexer.position(),
                    "token receiver closed, stopping lexer"
                );
                return;
            }

            let token = lexer.next_token();
            let terminal = token.is_terminal();
            let item = match (token.kind, lexer.error()) {
                (TokenKind::Error, Some(err)) => Err(err.clone()),
                _ => Ok(token.to_owned_token()),
            };

            if tx.send(item).await.is_err() || terminal {
                return;
            }
        }
    }

    /// Consumer side of [`spawn`].
    #[derive(Debug)]
    pub struct TokenReceiver {
        rx: mpsc::Receiver<Handoff>,
        task: JoinHandle<()>,
        terminal: Option<Result<OwnedToken, StreamError>>,
    }

    impl TokenReceiver {
        /// Waits for the next token.
        ///
        /// `Eof` is returned as `Ok`, a lexing error as
        /// [`StreamError::Lex`]. Either outcome is returned again on every
        /// later call.
        pub async fn next_token(&mut self) -> Result<OwnedToken, StreamError> {
            if let Some(terminal) = &self.terminal {
                return terminal.clone();
            }

            let result = match self.rx.recv().await {
                Some(Ok(token)) if !token.kind.is_terminal() => return Ok(token),
                Some(Ok(token)) => Ok(token),
                Some(Err(err)) => Err(StreamError::Lex(err)),
                None => Err(StreamError::ChannelClosed),
            };
            self.terminal = Some(result.clone());
            result
        }

        /// Stops the producer and waits for its task to finish.
        pub async fn cancel(mut self) {
            self.rx.close();
            if let Err(err) = self.task.await {
                tracing::warn!(error = %err, "lexer task did not finish cleanly");
            }
        }
    }

}

#[cfg(feature = "futures")]
mod futures_impl {
    use crate::{LexError, Lexer, Token};
    use core::pin::Pin;
    use core::task::{Context, Poll};
    use futures_core::{FusedStream, Stream};

    impl<'a> Stream for Lexer<'a> {
        type Item = Result<Token<'a>, LexError>;

        fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            Poll::Ready(Iterator::next(self.get_mut()))
        }
    }

    impl FusedStream for Lexer<'_> {
        fn is_terminated(&self) -> bool {
            self.is_exhausted()
        }
    }
}
