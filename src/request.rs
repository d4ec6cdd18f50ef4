//! Chat request shared by both vendors

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

/// One chat request: a single user message carrying the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest
{   /// Model name
    pub model: String
  , /// Conversation, in order
    pub messages: Vec<ChatMessage>
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
}

impl ChatRequest
{   /// Build the request for a prompt from vendor settings
    pub fn from_prompt(
      config: &crate::config::VendorConfig
    , prompt: &str
    ) -> Self
    {   ChatRequest
        {   model: config.model.clone()
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt.to_string()
              }
            ]
          , max_tokens: config.max_tokens
          , temperature: config.temperature
        }
    }

    /// Serialize to the JSON body
    pub fn to_body(&self) -> Result<Vec<u8>, crate::error::Error>
    {   serde_json::to_vec(self)
          .map_err(|e| crate::error::Error::Encoding(e.to_string()))
    }
}
