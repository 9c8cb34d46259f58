use axum::response::sse::Event;
use futures::channel::mpsc::UnboundedSender;
use serde_json::json;
use std::convert::Infallible;
use text_completion::Renderer;
use tracing::{debug, warn};

pub const EVENT_RENDER: &str = "render";
pub const EVENT_SUCCESS: &str = "success";
pub const EVENT_WARNING: &str = "warning";
pub const EVENT_ERROR: &str = "error";

/// Forwards everything the submission draws to the browser.
///
/// Sending never fails the submission: once the browser is gone, events
/// are dropped and the endpoint stream is still read to the end.
pub struct SseRenderer {
    tx: UnboundedSender<Result<Event, Infallible>>,
}

impl SseRenderer {
    pub fn new(tx: UnboundedSender<Result<Event, Infallible>>) -> Self {
        SseRenderer { tx }
    }

    fn send(&self, name: &str, data: serde_json::Value) {
        // JSON keeps newlines in the answer from breaking SSE framing.
        let event = match Event::default().event(name).json_data(data) {
            Ok(event) => event,
            Err(e) => {
                warn!("SseRenderer could not encode {} event: {}", name, e);
                return;
            }
        };
        if self.tx.unbounded_send(Ok(event)).is_err() {
            debug!("SseRenderer browser gone, dropping {} event", name);
        }
    }
}

impl Renderer for SseRenderer {
    fn render(&mut self, text: &str) {
        self.send(EVENT_RENDER, json!({ "text": text }));
    }

    fn success(&mut self, message: &str) {
        self.send(EVENT_SUCCESS, json!({ "message": message }));
    }

    fn warning(&mut self, message: &str) {
        self.send(EVENT_WARNING, json!({ "message": message }));
    }

    fn error(&mut self, message: &str) {
        self.send(EVENT_ERROR, json!({ "message": message }));
    }
}
