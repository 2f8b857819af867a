//! View and engine configuration
//!
//! The host sends one creation payload per view. Only the `url` key is read;
//! anything else in the map is ignored so newer hosts can add keys freely.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Creation payload of a player view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Media URL, `None` when missing or blank
    pub url: Option<String>,
}

impl ViewConfig {
    /// Extract the configuration from a host payload.
    ///
    /// Never fails: a non-object payload, a non-string `url` or a blank `url`
    /// all yield an empty configuration.
    pub fn from_args(args: &Value) -> Self {
        let url = args
            .as_object()
            .and_then(|map| map.get("url"))
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string);

        Self { url }
    }

    /// Parse a JSON-encoded payload
    pub fn from_json(json: &str) -> Result<Self> {
        let args: Value = serde_json::from_str(json)?;
        Ok(Self::from_args(&args))
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Extension decoder preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionRendererMode {
    /// Platform decoders only
    Off,
    /// Extension decoders after platform decoders
    On,
    /// Extension decoders before platform decoders
    Prefer,
}

/// Playback engine construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Follow redirects that switch between http and https
    pub allow_cross_protocol_redirects: bool,
    /// User-Agent sent on every HTTP request
    pub user_agent: String,
    /// Fall back to another decoder when initialization fails
    pub enable_decoder_fallback: bool,
    pub extension_renderer_mode: ExtensionRendererMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_cross_protocol_redirects: true,
            user_agent: "Mozilla/5.0".to_string(),
            enable_decoder_fallback: true,
            extension_renderer_mode: ExtensionRendererMode::Prefer,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(Error::InvalidConfig("user agent must not be blank".into()));
        }
        Ok(())
    }
}
