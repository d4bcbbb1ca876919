// Project-wide constants
//
// Centralised here so addresses, URLs and env var names have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the relay server (localhost only).
pub const DEFAULT_RELAY_ADDR: &str = "127.0.0.1:8787";

/// URL the client library posts to when nothing else is configured.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787/po-agent";

/// OpenAI-compatible AI gateway.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";

/// Model requested from the gateway.
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// Config file location, relative to the home directory.
pub const CONFIG_DIR: &str = ".po-agent";
pub const CONFIG_FILE: &str = "config.toml";

// Environment variables
pub const ENV_API_KEY: &str = "LOVABLE_API_KEY";
pub const ENV_GATEWAY_URL: &str = "PO_AGENT_GATEWAY_URL";
pub const ENV_MODEL: &str = "PO_AGENT_MODEL";
pub const ENV_BIND: &str = "PO_AGENT_BIND";
pub const ENV_RELAY_URL: &str = "PO_AGENT_RELAY_URL";
