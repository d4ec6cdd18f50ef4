use serde::Deserialize;
use log::{debug, error, trace};
use crate::request::ChatRequest;

/// Messages endpoint
pub const API_URL: &str
  = "https://api.anthropic.com/v1/messages";

pub const API_VERSION: &str = "2023-06-01";

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

// ===== Response Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicMessageResponse
{   #[serde(default)]
    pub content: Vec<ContentBlock>
  , #[serde(default)]
    pub stop_reason: Option<String>
  , #[serde(default)]
    pub error: Option<ApiErrorBody>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   #[serde(rename = "type", default)]
    pub kind: String
  , #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody
{   #[serde(rename = "type", default)]
    pub kind: String
  , #[serde(default)]
    pub message: String
}

/// Extract the first content block's text from a response body
pub fn parse_response(
  status: reqwest::StatusCode
, body: &str
) -> Result<String, crate::error::Error>
{   let response: AnthropicMessageResponse = serde_json::from_str(body)
      .map_err(|e| super::unparsed_body_error(status, body, e))?;

    if let Some(block) = response.content.into_iter().next()
    {   debug!(
          "Anthropic stop_reason: {:?}, block type: {}",
          response.stop_reason, block.kind
        );
        return Ok(block.text);
    }

    match response.error
    {   Some(err) if !err.message.is_empty() => {
          error!("Anthropic API error ({}): {}", err.kind, err.message);
          Err(crate::error::Error::Remote(err.message))
        }
      , _ => {
          error!("No content in response");
          Err(crate::error::Error::EmptyResponse)
        }
    }
}

/// Send the prompt to the messages endpoint
pub async fn send_prompt(
  http: &reqwest::Client
, config: &crate::config::VendorConfig
, api_key: &str
, prompt: &str
) -> Result<String, crate::error::Error>
{   debug!("Sending prompt to Anthropic model: {}", config.model);

    let request = ChatRequest::from_prompt(config, prompt);
    trace!("Anthropic request: {:?}", request);
    let body = request.to_body()?;

    let (status, text) = super::post_json(
      http
        .post(&config.api_base)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
    , body
    ).await?;

    parse_response(status, &text)
}
