// Configuration structs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::constants::{
    DEFAULT_GATEWAY_URL, DEFAULT_MODEL, DEFAULT_RELAY_ADDR, DEFAULT_RELAY_URL, ENV_API_KEY,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Relay server settings (`po-agent serve`)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream AI gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Client settings (the CLI commands that call a relay)
    #[serde(default)]
    pub client: ClientConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8787")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_RELAY_ADDR.to_string()
}

/// Upstream gateway configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the OpenAI-compatible gateway (without `/v1/...`)
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer credential. Usually supplied through the environment.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional request timeout. None leaves timing to the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// The credential, or an error explaining how to provide it
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => bail!(
                "{ENV_API_KEY} is not configured.\n\n\
                Set it in the environment:\n\
                export {ENV_API_KEY}=\"...\"\n\n\
                or add `api_key` under [gateway] in ~/.po-agent/config.toml"
            ),
        }
    }
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Client configuration (connecting to a relay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the relay endpoint
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
        }
    }
}

fn default_relay_url() -> String {
    DEFAULT_RELAY_URL.to_string()
}

impl Config {
    /// Structural checks. The API key is not checked here: only `serve` needs it.
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid bind address: {}", self.server.bind_address))?;

        if self.gateway.base_url.trim().is_empty() {
            bail!("gateway.base_url must not be empty");
        }
        if self.gateway.model.trim().is_empty() {
            bail!("gateway.model must not be empty");
        }
        if self.client.relay_url.trim().is_empty() {
            bail!("client.relay_url must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway.model, "google/gemini-3-flash-preview");
        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn test_require_api_key() {
        let mut gateway = GatewayConfig::default();
        let err = gateway.require_api_key().unwrap_err();
        assert!(err.to_string().contains("LOVABLE_API_KEY is not configured"));

        gateway.api_key = Some("   ".to_string());
        assert!(gateway.require_api_key().is_err());

        gateway.api_key = Some("sk-test".to_string());
        assert_eq!(gateway.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_debug_redacts_key() {
        let gateway = GatewayConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{gateway:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = Config::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}
