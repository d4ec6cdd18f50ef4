use std::time::Duration;
use log::{debug, error};
use crate::config::VendorConfig;

/// Chat client for the configured vendor.
/// One HTTP client, one request per `send_prompt`, no retries.
pub struct ConvertClient
{   config: VendorConfig
  , http: reqwest::Client
}

impl ConvertClient
{   /// Build a client for the given vendor settings
    pub fn new(config: VendorConfig)
      -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating ConvertClient for {:?} ({})",
          config.vendor, config.api_base
        );
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   debug!("Request timeout set to {}s", secs);
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(ConvertClient { config, http })
    }

    pub fn config(&self) -> &VendorConfig
    {   &self.config
    }

    /// Send the prompt and return the model's text
    pub async fn send_prompt(
      &self
    , api_key: &str
    , prompt: &str
    ) -> Result<String, crate::error::Error>
    {   match self.config.vendor
        {   crate::Vendor::DeepSeek => {
              crate::providers::deepseek::send_prompt(
                &self.http, &self.config, api_key, prompt
              ).await
            }
          , crate::Vendor::Anthropic => {
              crate::providers::anthropic::send_prompt(
                &self.http, &self.config, api_key, prompt
              ).await
            }
        }
    }
}
