//! Configuration for vendors and the conversion run

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::Vendor;

/// Default output file name
pub const OUTPUT_FILE: &str = "zeabur-template.yaml";

/// Vendor request configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorConfig
{   /// Which vendor API to call
    pub vendor: Vendor
  , /// Full endpoint URL the request is POSTed to
    pub api_base: String
  , /// Model name sent with the request
    pub model: String
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Sampling temperature, omitted from the request when None
    pub temperature: Option<f32>
  , /// Request timeout in seconds, transport default when None
    pub timeout_secs: Option<u64>
}

impl VendorConfig
{   /// Defaults for the given vendor
    pub fn for_vendor(vendor: Vendor) -> Self
    {   match vendor
        {   Vendor::DeepSeek => VendorConfig
            {   vendor
              , api_base: crate::providers::deepseek::API_URL.to_string()
              , model: crate::providers::deepseek::DEFAULT_MODEL.to_string()
              , max_tokens: 4096
              , temperature: Some(0.7)
              , timeout_secs: None
            }
          , Vendor::Anthropic => VendorConfig
            {   vendor
              , api_base: crate::providers::anthropic::API_URL.to_string()
              , model: crate::providers::anthropic::DEFAULT_MODEL.to_string()
              , max_tokens: 4096
              , temperature: None
              , timeout_secs: None
            }
        }
    }
}

impl Default for VendorConfig
{   fn default() -> Self
    {   VendorConfig::for_vendor(Vendor::DeepSeek)
    }
}

/// Where a run reads its inputs and writes its output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig
{   /// Directory holding docker-compose and schema.json
    pub work_dir: PathBuf
  , /// Output path; relative paths resolve against work_dir
    pub output: PathBuf
  , /// Optional directory of instruction snippets replacing the bundled set
    pub instructions_dir: Option<PathBuf>
}

impl RunConfig
{   /// Resolved output location
    pub fn output_path(&self) -> PathBuf
    {   if self.output.is_absolute()
        {   self.output.clone()
        } else
        {   self.work_dir.join(&self.output)
        }
    }
}

impl Default for RunConfig
{   fn default() -> Self
    {   RunConfig
        {   work_dir: PathBuf::from(".")
          , output: PathBuf::from(OUTPUT_FILE)
          , instructions_dir: None
        }
    }
}

/// Read the vendor's API key from the environment
pub fn api_key_from_env(vendor: Vendor)
  -> Result<String, crate::error::Error>
{   let var = vendor.api_key_env();
    match std::env::var(var)
    {   Ok(key) if !key.trim().is_empty() => {
          debug!("Found API key in {}", var);
          Ok(key.trim().to_string())
        }
      , _ => Err(crate::error::Error::MissingApiKey(var.to_string()))
    }
}

/// Load `<dir>/.env` into the process environment if it exists.
/// Returns whether a file was loaded.
pub fn load_dotenv(dir: &Path) -> bool
{   let path = dir.join(".env");
    match dotenv::from_path(&path)
    {   Ok(()) => {
          debug!("Loaded environment from {}", path.display());
          true
        }
      , Err(e) => {
          warn!("No usable .env at {}: {}", path.display(), e);
          false
        }
    }
}
