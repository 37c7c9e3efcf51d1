use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/counter.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub allowed_origin: Option<String>,
    pub external_form_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = get("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = get("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Self {
            port,
            data_path,
            allowed_origin: get("ALLOWED_ORIGIN"),
            external_form_url: get("EXTERNAL_FORM_URL"),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/counter.json"));
        assert!(config.allowed_origin.is_none());
        assert!(config.external_form_url.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/c.json"),
            ("ALLOWED_ORIGIN", "https://example.org"),
            ("EXTERNAL_FORM_URL", "https://forms.example.org/signup"),
        ]);
        assert_eq!(config.listen_addr().port(), 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.allowed_origin.as_deref(), Some("https://example.org"));
        assert_eq!(
            config.external_form_url.as_deref(),
            Some("https://forms.example.org/signup")
        );
    }

    #[test]
    fn bad_port_and_blank_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("ALLOWED_ORIGIN", "  ")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.allowed_origin.is_none());
    }
}
