use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CompletionError;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const MAX_TOKENS: u32 = 1000;
pub const USER_ROLE: &str = "user";

/// The models offered in the dropdown. Anything else cannot be expressed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelId {
    #[default]
    #[serde(rename = "anthropic.claude-3-sonnet-20240229-v1:0")]
    Claude3Sonnet,
    #[serde(rename = "anthropic.claude-v2:1")]
    ClaudeV2_1,
}

impl ModelId {
    /// Dropdown order, default first.
    pub const ALL: [ModelId; 2] = [ModelId::Claude3Sonnet, ModelId::ClaudeV2_1];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Claude3Sonnet => "anthropic.claude-3-sonnet-20240229-v1:0",
            ModelId::ClaudeV2_1 => "anthropic.claude-v2:1",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Body of one invocation. Built fresh per submission and never mutated.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    anthropic_version: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

impl PromptRequest {
    /// Builds the request for `prompt`, or refuses a blank one.
    ///
    /// The prompt is kept verbatim; whitespace only matters for the
    /// emptiness check.
    pub fn new(prompt: &str) -> Result<Self, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::Validation(
                crate::EMPTY_PROMPT_WARNING.to_string(),
            ));
        }
        Ok(PromptRequest {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: USER_ROLE.to_string(),
                content: prompt.to_string(),
            }],
        })
    }

    pub fn anthropic_version(&self) -> &str {
        &self.anthropic_version
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
