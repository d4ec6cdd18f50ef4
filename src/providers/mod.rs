//! Vendor API implementations

pub mod anthropic;
pub mod deepseek;

use log::{error, trace};

/// POST a JSON body and return the status with the raw response text
pub(crate) async fn post_json(
  request: reqwest::RequestBuilder
, body: Vec<u8>
) -> Result<(reqwest::StatusCode, String), crate::error::Error>
{   let response = request
      .header("Content-Type", "application/json")
      .body(body)
      .send()
      .await
      .map_err(|e| {
        error!("HTTP error: {}", e);
        crate::error::Error::Transport(e.to_string())
      })?;

    let status = response.status();
    trace!("Response status: {}", status);

    let text = response.text().await.map_err(|e| {
      error!("Failed to read response body: {}", e);
      crate::error::Error::Transport(
        format!("error reading response: {}", e)
      )
    })?;
    trace!("Response body: {}", text);

    Ok((status, text))
}

/// Error for a body that did not parse as the vendor envelope
pub(crate) fn unparsed_body_error(
  status: reqwest::StatusCode
, body: &str
, parse_error: serde_json::Error
) -> crate::error::Error
{   if status.is_success()
    {   error!("Parse error: {}", parse_error);
        crate::error::Error::Protocol(parse_error.to_string())
    } else
    {   error!("Vendor returned {} with unparseable body", status);
        crate::error::Error::Remote(format!("{}: {}", status, body.trim()))
    }
}
