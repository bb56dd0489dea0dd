use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_RECONNECT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid server url `{value}`: {source}")]
    Url {
        value: String,
        source: url::ParseError,
    },
    #[error("Server url must be http or https, got `{0}`")]
    Scheme(String),
    #[error("Invalid {var}: {source}")]
    Number {
        var: &'static str,
        source: std::num::ParseIntError,
    },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: Url,
    /// Folder single-file submissions write into.
    pub output_dir: String,
    pub reconnect_delay: Duration,
    /// Command used to play previews, e.g. `mpv`.
    pub player: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = parse_server_url(
            &lookup("FORGE_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned()),
        )?;
        let output_dir = lookup("FORGE_OUTPUT_DIR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_owned());
        let reconnect_secs = match lookup("FORGE_RECONNECT_SECS") {
            Some(v) => v.trim().parse().map_err(|source| ConfigError::Number {
                var: "FORGE_RECONNECT_SECS",
                source,
            })?,
            None => DEFAULT_RECONNECT_SECS,
        };
        if reconnect_secs == 0 {
            return Err(ConfigError::Zero("FORGE_RECONNECT_SECS"));
        }
        let player = lookup("FORGE_PLAYER").filter(|s| !s.trim().is_empty());

        tracing::debug!(%server_url, %output_dir, reconnect_secs, ?player, "loaded client config");

        Ok(ClientConfig {
            server_url,
            output_dir,
            reconnect_delay: Duration::from_secs(reconnect_secs),
            player,
        })
    }

    pub fn with_server_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.server_url = parse_server_url(url)?;
        Ok(self)
    }

    /// Push channel endpoint: same host and path prefix as the server url,
    /// `ws`/`wss` scheme, `ws` appended.
    pub fn push_url(&self) -> String {
        let scheme = if self.server_url.scheme() == "https" {
            "wss"
        } else {
            "ws"
        };
        let host = self.server_url.host_str().unwrap_or("localhost");
        let prefix = self.server_url.path().trim_end_matches('/');
        match self.server_url.port() {
            Some(port) => format!("{scheme}://{host}:{port}{prefix}/ws"),
            None => format!("{scheme}://{host}{prefix}/ws"),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default url is valid"),
            output_dir: DEFAULT_OUTPUT_DIR.to_owned(),
            reconnect_delay: Duration::from_secs(DEFAULT_RECONNECT_SECS),
            player: None,
        }
    }
}

fn parse_server_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::Url {
        value: value.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Scheme(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.push_url(), "ws://127.0.0.1:8080/ws");
    }

    #[test]
    fn https_uses_wss() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FORGE_URL", "https://media.example.org/"),
            ("FORGE_PLAYER", "mpv"),
        ]))
        .unwrap();
        assert_eq!(config.push_url(), "wss://media.example.org/ws");
        assert_eq!(config.player.as_deref(), Some("mpv"));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = ClientConfig::from_lookup(lookup(&[("FORGE_URL", "ftp://host")])).unwrap_err();
        assert!(matches!(err, ConfigError::Scheme(s) if s == "ftp"));
    }

    #[test]
    fn rejects_bad_reconnect_delay() {
        let err = ClientConfig::from_lookup(lookup(&[("FORGE_RECONNECT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Number { .. }));
    }

    #[test]
    fn rejects_zero_reconnect_delay() {
        let err = ClientConfig::from_lookup(lookup(&[("FORGE_RECONNECT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Zero("FORGE_RECONNECT_SECS")));
    }

    #[test]
    fn push_url_keeps_path_prefix() {
        let config = ClientConfig::default()
            .with_server_url("https://media.example.org/forge/")
            .unwrap();
        assert_eq!(config.push_url(), "wss://media.example.org/forge/ws");

        let config = ClientConfig::default()
            .with_server_url("http://10.0.0.2:9000/forge")
            .unwrap();
        assert_eq!(config.push_url(), "ws://10.0.0.2:9000/forge/ws");
    }

    #[test]
    fn server_override() {
        let config = ClientConfig::default()
            .with_server_url("http://10.0.0.2:9000")
            .unwrap();
        assert_eq!(config.push_url(), "ws://10.0.0.2:9000/ws");
    }
}
