use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// `OPENAI_API_KEY` is optional here: sessions may bring their own key, and a
/// generation without any key fails with `MissingCredential` at request time.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Seconds a session may sit unused before it is dropped.
    pub session_idle_ttl_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("session_idle_ttl_secs", &self.session_idle_ttl_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            session_idle_ttl_secs: lookup("SESSION_IDLE_TTL_SECS")
                .unwrap_or_else(|| "3600".to_string())
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("SESSION_IDLE_TTL_SECS must be a positive number of seconds")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.session_idle_ttl_secs, 3600);
    }

    #[test]
    fn test_session_idle_ttl_is_read_and_checked() {
        let config =
            Config::from_lookup(lookup_from(&[("SESSION_IDLE_TTL_SECS", "90")])).unwrap();
        assert_eq!(config.session_idle_ttl_secs, 90);

        assert!(Config::from_lookup(lookup_from(&[("SESSION_IDLE_TTL_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("SESSION_IDLE_TTL_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
