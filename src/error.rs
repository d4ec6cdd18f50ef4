use std::fmt;

/// Error type for every step of a conversion run
/// Implements Clone so results can be compared in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing for a vendor (carries the env var name)
    MissingApiKey(String)
  , /// A required input file is not present
    MissingInput(String)
  , /// Reading or writing a local file failed
    Io(String)
  , /// Request body could not be serialized
    Encoding(String)
  , /// Network call could not be made or failed mid-flight
    Transport(String)
  , /// Response body is not the expected envelope
    Protocol(String)
  , /// Vendor reported an error message
    Remote(String)
  , /// Well-formed response without any content
    EmptyResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(var) => {
              write!(f, "Please set {} in the environment or .env file", var)
            }
          , Error::MissingInput(msg) => {
              write!(f, "{}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Encoding(msg) => {
              write!(f, "error marshaling request: {}", msg)
            }
          , Error::Transport(msg) => {
              write!(f, "error making request: {}", msg)
            }
          , Error::Protocol(msg) => {
              write!(f, "error unmarshaling response: {}", msg)
            }
          , Error::Remote(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::EmptyResponse => {
              write!(f, "no response choices returned")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
