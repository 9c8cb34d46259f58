use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::ResponseStream;
use futures::StreamExt;
use text_completion::{CompletionError, DecodeError, EventStream, ModelId, PromptRequest, StreamEvent};
use tracing::*;

const CONTENT_TYPE: &str = "application/json";

pub(crate) async fn invoke_stream(
    client: &aws_sdk_bedrockruntime::Client,
    model: ModelId,
    req: &PromptRequest,
) -> Result<EventStream, CompletionError> {
    let body = req
        .to_json()
        .map_err(|e| CompletionError::Transport(format!("Error encoding request: {}", e)))?;

    trace!("invoke_model_with_response_stream model={} body_len={}", model, body.len());

    let output = client
        .invoke_model_with_response_stream()
        .model_id(model.as_str())
        .content_type(CONTENT_TYPE)
        .accept(CONTENT_TYPE)
        .body(Blob::new(body))
        .send()
        .await
        .map_err(|e| {
            CompletionError::Transport(format!(
                "Error invoking {}: {}",
                model,
                DisplayErrorContext(&e)
            ))
        })?;

    debug!("invoke_stream model={} streaming", model);

    // Pull one event per item; the receiver is dropped after the first error.
    let events = futures::stream::unfold(Some(output.body), |receiver| async move {
        let mut receiver = receiver?;
        match receiver.recv().await {
            Ok(Some(event)) => {
                let event = to_stream_event(event);
                let next = event.is_ok().then_some(receiver);
                Some((event, next))
            }
            Ok(None) => {
                debug!("invoke_stream end of stream");
                None
            }
            Err(e) => Some((
                Err(CompletionError::Transport(DisplayErrorContext(&e).to_string())),
                None,
            )),
        }
    });
    Ok(events.boxed())
}

/// Maps one SDK event onto the endpoint-neutral event type.
pub fn to_stream_event(event: ResponseStream) -> Result<StreamEvent, CompletionError> {
    match event {
        ResponseStream::Chunk(part) => match part.bytes() {
            Some(bytes) => Ok(StreamEvent::Chunk(bytes.as_ref().to_vec())),
            None => Err(DecodeError::Payload("chunk without bytes".to_string()).into()),
        },
        other => {
            trace!("invoke_stream non-chunk event {:?}", other);
            Ok(StreamEvent::Other(format!("{:?}", other)))
        }
    }
}
