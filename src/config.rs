//! Configuration for the conversion client and the Telegram bot.
//!
//! Credentials are read once at startup and passed down explicitly; nothing
//! in the library reads the process environment. The CLI maps its flags and
//! environment variables onto [`ConverterConfigBuilder`].

use crate::error::ConvertError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Default base URL of the Cloudmersive API.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudmersive.com";

/// Default per-request timeout for the conversion API, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for [`crate::client::CloudmersiveClient`].
///
/// Built via [`ConverterConfig::builder()`].
///
/// # Example
/// ```rust
/// use pdfword_bot::ConverterConfig;
///
/// let config = ConverterConfig::builder()
///     .api_key("my-api-key")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Clone)]
pub struct ConverterConfig {
    /// Value sent in the `Apikey` header.
    pub api_key: SecretString,

    /// Scheme + host of the conversion API, without a trailing slash.
    /// Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Whole-request timeout (upload, conversion and download). Default: 120.
    ///
    /// Large Word documents can take the remote service tens of seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConverterConfig {
    /// Create a new builder for `ConverterConfig`.
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Full URL of a remote endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builder for [`ConverterConfig`].
pub struct ConverterConfigBuilder {
    api_key: Option<SecretString>,
    base_url: String,
    timeout_secs: u64,
}

impl fmt::Debug for ConverterConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConverterConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConverterConfig, ConvertError> {
        let api_key = match self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ => {
                return Err(ConvertError::InvalidConfig(
                    "Conversion API key is missing. Set CLOUDMERSIVE_API_KEY.".into(),
                ))
            }
        };
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConvertError::InvalidConfig(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConvertError::InvalidConfig("Timeout must be ≥ 1 second".into()));
        }
        Ok(ConverterConfig {
            api_key,
            base_url: self.base_url,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Everything the Telegram bot needs to start.
#[derive(Clone)]
pub struct BotConfig {
    /// Bot API token issued by @BotFather.
    pub token: SecretString,
    pub converter: ConverterConfig,
}

impl BotConfig {
    pub fn new(token: impl Into<String>, converter: ConverterConfig) -> Result<Self, ConvertError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Telegram bot token is missing. Set TELEGRAM_API_TOKEN.".into(),
            ));
        }
        Ok(Self {
            token: SecretString::new(token),
            converter,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("converter", &self.converter)
            .finish()
    }
}
