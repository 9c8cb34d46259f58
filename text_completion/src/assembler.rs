use futures::{Stream, StreamExt};
use serde::Deserialize;
use tracing::trace;

use crate::{CompletionError, DecodeError};

/// One item pulled from the endpoint's response stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Wraps the raw bytes of a payload chunk.
    Chunk(Vec<u8>),
    /// Anything without a chunk (heartbeats, metadata). Carries the event
    /// type for logging only.
    Other(String),
}

impl StreamEvent {
    pub fn chunk(&self) -> Option<&[u8]> {
        match self {
            StreamEvent::Chunk(bytes) => Some(bytes),
            StreamEvent::Other(_) => None,
        }
    }
}

/// Decoded payload of a chunk. Only `delta.text` is looked at; every other
/// field is ignored so start/stop/metadata records pass through untouched.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    #[serde(default)]
    pub delta: Option<Delta>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Delta {
    #[serde(default)]
    pub text: Option<String>,
}

impl ChunkRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(serde_json::from_str(text)?)
    }

    pub fn delta_text(&self) -> Option<&str> {
        self.delta.as_ref()?.text.as_deref()
    }
}

/// The answer being assembled for one submission.
///
/// Only ever grows, by appending non-empty fragments in arrival order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamedAnswer {
    text: String,
}

impl StreamedAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragment`, returning whether anything was added.
    pub fn push(&mut self, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        self.text.push_str(fragment);
        true
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Where the answer and the outcome banners are shown.
///
/// `render` always receives the whole answer so far; the display replaces
/// what it showed before.
pub trait Renderer {
    fn render(&mut self, text: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Drains `events` into `answer`, re-rendering after every fragment.
///
/// Stops at the first failing event or undecodable chunk; whatever was
/// appended before that point stays in `answer`.
pub async fn assemble<S, R>(
    mut events: S,
    answer: &mut StreamedAnswer,
    renderer: &mut R,
) -> Result<(), CompletionError>
where
    S: Stream<Item = Result<StreamEvent, CompletionError>> + Unpin,
    R: Renderer + ?Sized,
{
    while let Some(event) = events.next().await {
        let event = event?;
        let Some(bytes) = event.chunk() else {
            trace!("assemble skipping event without chunk: {:?}", event);
            continue;
        };

        let record = ChunkRecord::decode(bytes)?;
        match record.delta_text() {
            Some(text) if answer.push(text) => renderer.render(answer.as_str()),
            _ => trace!("assemble skipping chunk without text: {:?}", record),
        }
    }
    Ok(())
}
