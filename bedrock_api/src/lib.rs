//! A client for Amazon Bedrock Runtime streaming invocations.
//!
//! [`BedrockHandler`] implements [`text_completion::CompletionClient`] on top
//! of the AWS SDK: `invoke_model_with_response_stream`, with each
//! `ResponseStream` event turned into a [`text_completion::StreamEvent`].

mod config;
pub use config::{load_sdk_config, DEFAULT_REGION};
mod invoke_stream;
pub use invoke_stream::to_stream_event;

use async_trait::async_trait;
use aws_config::SdkConfig;
use text_completion::{CompletionClient, CompletionError, EventStream, ModelId, PromptRequest};

/// Immutable Bedrock client. Build once, share behind an `Arc`.
pub struct BedrockHandler {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockHandler {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        BedrockHandler {
            client: aws_sdk_bedrockruntime::Client::new(sdk_config),
        }
    }

    pub fn from_conf(config: aws_sdk_bedrockruntime::Config) -> Self {
        BedrockHandler {
            client: aws_sdk_bedrockruntime::Client::from_conf(config),
        }
    }

    /// Resolves region and credentials from the environment.
    pub async fn from_env() -> Self {
        Self::new(&load_sdk_config().await)
    }
}

#[async_trait]
impl CompletionClient for BedrockHandler {
    async fn invoke_stream(
        &self,
        model: ModelId,
        request: &PromptRequest,
    ) -> Result<EventStream, CompletionError> {
        invoke_stream::invoke_stream(&self.client, model, request).await
    }
}
