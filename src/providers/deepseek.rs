use serde::Deserialize;
use log::{debug, error, trace};
use crate::request::{ChatMessage, ChatRequest};

/// Chat completions endpoint
pub const API_URL: &str
  = "https://api.deepseek.com/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "deepseek-coder";

// ===== Response Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekChatResponse
{   #[serde(default)]
    pub id: Option<String>
  , #[serde(default)]
    pub choices: Vec<Choice>
  , #[serde(default)]
    pub error: Option<ApiErrorBody>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody
{   #[serde(default)]
    pub message: String
}

/// Extract the first choice's text from a response body
pub fn parse_response(
  status: reqwest::StatusCode
, body: &str
) -> Result<String, crate::error::Error>
{   let response: DeepSeekChatResponse = serde_json::from_str(body)
      .map_err(|e| super::unparsed_body_error(status, body, e))?;

    if let Some(choice) = response.choices.into_iter().next()
    {   debug!(
          "DeepSeek finish_reason: {:?}",
          choice.finish_reason
        );
        return Ok(choice.message.content);
    }

    match response.error
    {   Some(err) if !err.message.is_empty() => {
          error!("DeepSeek API error: {}", err.message);
          Err(crate::error::Error::Remote(err.message))
        }
      , _ => {
          error!("No choices in response");
          Err(crate::error::Error::EmptyResponse)
        }
    }
}

/// Send the prompt to the chat completions endpoint
pub async fn send_prompt(
  http: &reqwest::Client
, config: &crate::config::VendorConfig
, api_key: &str
, prompt: &str
) -> Result<String, crate::error::Error>
{   debug!("Sending prompt to DeepSeek model: {}", config.model);

    let request = ChatRequest::from_prompt(config, prompt);
    trace!("DeepSeek request: {:?}", request);
    let body = request.to_body()?;

    let (status, text) = super::post_json(
      http
        .post(&config.api_base)
        .bearer_auth(api_key)
    , body
    ).await?;

    parse_response(status, &text)
}
