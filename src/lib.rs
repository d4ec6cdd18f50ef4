pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod templates;
pub mod prompt;
pub mod client;
pub mod convert;
use serde::{Deserialize, Serialize};

/*

compose2zeabur turns a docker-compose project into a Zeabur template by
asking an LLM to do the conversion.

compose2zeabur/
├── Cargo.toml
├── instructions/       # Bundled per-service Zeabur snippets (<key>.md)
├── src/
│   ├── lib.rs          # Re-exports and the Vendor enum
│   ├── error.rs        # Error type shared by every step
│   ├── config.rs       # Vendor + run configuration, env / .env loading
│   ├── templates.rs    # Template store and compose matching
│   ├── prompt.rs       # Prompt assembly
│   ├── request.rs      # Chat request shared by both vendors
│   ├── providers/      # Vendor-specific endpoints and envelopes
│   │   ├── mod.rs
│   │   ├── deepseek.rs
│   │   └── anthropic.rs
│   ├── client.rs       # Routes a prompt to the configured vendor
│   ├── convert.rs      # read inputs -> prompt -> send -> write output
│   └── main.rs         # CLI
└── tests/

*/

pub use client::ConvertClient;
pub use config::{RunConfig, VendorConfig};
pub use error::Error;
pub use templates::{TemplateEntry, TemplateStore};

/// Supported LLM vendors.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash
, Deserialize, Serialize, clap::ValueEnum
)]
pub enum Vendor
{   /// DeepSeek (OpenAI-compatible chat completions)
    #[value(name = "deepseek")]
    DeepSeek
  , /// Anthropic (Claude messages API)
    #[value(name = "anthropic", alias = "claude")]
    Anthropic
}

impl Vendor
{   /// Environment variable holding this vendor's API key
    pub fn api_key_env(&self) -> &'static str
    {   match self
        {   Vendor::DeepSeek => "DEEPSEEK_API_KEY"
          , Vendor::Anthropic => "CLAUDE_API_KEY"
        }
    }
}
