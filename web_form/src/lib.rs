//! The browser-facing side of the demo.
//!
//! One page with the form, and one `/generate` endpoint that runs a
//! submission and streams what would be drawn on screen back as
//! Server-Sent Events.

mod generate;
mod page;
mod server;
mod sse_renderer;
pub use generate::GenerateForm;
pub use page::render_page;
pub use server::{init, router};
pub use sse_renderer::{SseRenderer, EVENT_ERROR, EVENT_RENDER, EVENT_SUCCESS, EVENT_WARNING};

use std::sync::Arc;
use text_completion::CompletionClient;

#[derive(Clone)]
pub struct WebFormHandler {
    completion_client: Arc<dyn CompletionClient>,
}

impl WebFormHandler {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        WebFormHandler { completion_client }
    }
}
