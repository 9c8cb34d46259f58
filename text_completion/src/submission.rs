use tracing::{debug, warn};

use crate::{assemble, CompletionClient, CompletionError, ModelId, PromptRequest, Renderer, StreamedAnswer};

pub const SUCCESS_MESSAGE: &str = "Response generated successfully!";
pub const EMPTY_PROMPT_WARNING: &str = "Please enter a prompt.";
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// What one button click produced.
#[derive(Debug)]
pub struct Submission {
    /// Everything rendered so far, including text shown before a failure.
    pub answer: StreamedAnswer,
    pub outcome: Result<(), CompletionError>,
}

/// Runs one submission end to end: gate, invoke, assemble, report.
///
/// A blank prompt only produces a warning and never reaches `client`.
/// Any other failure is reported once through `renderer.error`, and the text
/// already rendered stays where it is.
pub async fn handle_submission<C, R>(
    client: &C,
    model: ModelId,
    prompt: &str,
    renderer: &mut R,
) -> Submission
where
    C: CompletionClient + ?Sized,
    R: Renderer + ?Sized,
{
    let mut answer = StreamedAnswer::new();

    let request = match PromptRequest::new(prompt) {
        Ok(request) => request,
        Err(e) => {
            debug!("handle_submission rejected prompt: {}", e);
            renderer.warning(&e.to_string());
            return Submission {
                answer,
                outcome: Err(e),
            };
        }
    };

    debug!("handle_submission model={} prompt={}", model, prompt);
    let outcome = invoke_and_assemble(client, model, &request, &mut answer, renderer).await;
    match &outcome {
        Ok(()) => {
            debug!(
                "handle_submission model={} done, {} bytes",
                model,
                answer.as_str().len()
            );
            renderer.success(SUCCESS_MESSAGE);
        }
        Err(e) => {
            warn!("handle_submission model={} failed ({:?}): {}", model, e.kind(), e);
            renderer.error(&format!("{}{}", ERROR_PREFIX, e));
        }
    }

    Submission { answer, outcome }
}

async fn invoke_and_assemble<C, R>(
    client: &C,
    model: ModelId,
    request: &PromptRequest,
    answer: &mut StreamedAnswer,
    renderer: &mut R,
) -> Result<(), CompletionError>
where
    C: CompletionClient + ?Sized,
    R: Renderer + ?Sized,
{
    let events = client.invoke_stream(model, request).await?;
    assemble(events, answer, renderer).await
}
