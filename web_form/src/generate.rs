use axum::{
    extract::{Json, State},
    response::sse::{Event, Sse},
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use text_completion::{handle_submission, ModelId};
use tracing::{debug, info};

use crate::{SseRenderer, WebFormHandler};

/// What the form posts. An unknown `model_id` fails deserialization, so only
/// the dropdown's values get through.
#[derive(Deserialize, Serialize, Debug)]
pub struct GenerateForm {
    pub model_id: ModelId,
    pub prompt: String,
}

/// One click, one submission. The submission runs in its own task so it is
/// read to completion even if the browser disconnects.
pub(crate) async fn generate(
    State(handler): State<WebFormHandler>,
    Json(form): Json<GenerateForm>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("generate receive: model={} prompt_len={}", form.model_id, form.prompt.len());

    let (tx, rx) = futures::channel::mpsc::unbounded();
    let client = handler.completion_client.clone();
    tokio::spawn(async move {
        let mut renderer = SseRenderer::new(tx);
        let submission =
            handle_submission(client.as_ref(), form.model_id, &form.prompt, &mut renderer).await;
        debug!(
            "generate done: model={} ok={} answer_len={}",
            form.model_id,
            submission.outcome.is_ok(),
            submission.answer.as_str().len()
        );
    });

    Sse::new(rx)
}
