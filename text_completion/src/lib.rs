//! An interface for handling streamed text completion requests
//!
//! This crate holds everything that does not depend on a concrete inference
//! endpoint: the request model, the error taxonomy, the stream event type and
//! the loop that turns stream events into a growing answer on screen.
//!
//! The UI only talks to a [`CompletionClient`], so the Bedrock code and the
//! web code never depend on each other.

mod assembler;
mod error;
mod models;
mod submission;

pub use assembler::{assemble, ChunkRecord, Delta, Renderer, StreamEvent, StreamedAnswer};
pub use error::{CompletionError, DecodeError, ErrorKind};
pub use models::{
    Message, ModelId, PromptRequest, ANTHROPIC_VERSION, MAX_TOKENS, USER_ROLE,
};
pub use submission::{
    handle_submission, Submission, EMPTY_PROMPT_WARNING, ERROR_PREFIX, SUCCESS_MESSAGE,
};

use async_trait::async_trait;
use futures::stream::BoxStream;

/// A finite, forward-only sequence of events coming back from the endpoint.
///
/// Pulling the next item suspends until the next frame arrives or the
/// stream ends. It cannot be restarted.
pub type EventStream = BoxStream<'static, Result<StreamEvent, CompletionError>>;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submits `request` to `model` and returns the stream of response events.
    ///
    /// Errors before the first event (connection, authentication, HTTP
    /// status) are reported here; errors while reading arrive through the
    /// stream.
    async fn invoke_stream(
        &self,
        model: ModelId,
        request: &PromptRequest,
    ) -> Result<EventStream, CompletionError>;
}
