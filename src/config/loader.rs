// Configuration loader
// Loads ~/.po-agent/config.toml (optional), then applies environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{
    CONFIG_DIR, CONFIG_FILE, ENV_API_KEY, ENV_BIND, ENV_GATEWAY_URL, ENV_MODEL, ENV_RELAY_URL,
};
use super::settings::Config;

/// Load configuration from the default config file and the process environment
pub fn load_config() -> Result<Config> {
    let path = default_config_path();
    load_config_with(path.as_deref(), |name| std::env::var(name).ok())
}

/// Location of the config file, if a home directory can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path` (skipped when absent) and an environment lookup.
///
/// The lookup is injected so callers and tests decide where variables come from.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) if path.exists() => read_config_file(path)?,
        _ => Config::default(),
    };

    apply_env_overrides(&mut config, env);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Non-empty environment values win over the config file
fn apply_env_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    if let Some(key) = var(ENV_API_KEY) {
        config.gateway.api_key = Some(key);
    }
    if let Some(url) = var(ENV_GATEWAY_URL) {
        config.gateway.base_url = url;
    }
    if let Some(model) = var(ENV_MODEL) {
        config.gateway.model = model;
    }
    if let Some(bind) = var(ENV_BIND) {
        config.server.bind_address = bind;
    }
    if let Some(url) = var(ENV_RELAY_URL) {
        config.client.relay_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let config = load_config_with(Some(absent.as_path()), env_from(&[])).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8787");
        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn test_file_values_are_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_address = "0.0.0.0:9000"

[gateway]
model = "openai/gpt-5-mini"
api_key = "from-file"
timeout_secs = 30
"#
        )
        .unwrap();

        let config = load_config_with(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.gateway.model, "openai/gpt-5-mini");
        assert_eq!(config.gateway.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.gateway.timeout_secs, Some(30));
        assert_eq!(config.gateway.base_url, "https://ai.gateway.lovable.dev");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\napi_key = \"from-file\"").unwrap();

        let env = env_from(&[
            ("LOVABLE_API_KEY", "from-env"),
            ("PO_AGENT_RELAY_URL", "http://relay.local/po-agent"),
            ("PO_AGENT_MODEL", ""),
        ]);
        let config = load_config_with(Some(file.path()), env).unwrap();
        assert_eq!(config.gateway.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.client.relay_url, "http://relay.local/po-agent");
        // Empty values are ignored
        assert_eq!(config.gateway.model, "google/gemini-3-flash-preview");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind_address = ").unwrap();
        assert!(load_config_with(Some(file.path()), env_from(&[])).is_err());
    }

    #[test]
    fn test_invalid_bind_from_env_fails_validation() {
        let err = load_config_with(None, env_from(&[("PO_AGENT_BIND", "nowhere")])).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid bind address"));
    }
}
