/// Listen address for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `SERVER_HOST` and `SERVER_PORT`; an unparseable port falls back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("SERVER_HOST").unwrap_or(defaults.host);
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "SERVER_PORT is not a port number, using {}", defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };
        Self { host, port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "SERVER_HOST" => Some("127.0.0.1".into()),
            "SERVER_PORT" => Some("8080".into()),
            _ => None,
        });
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(|key| (key == "SERVER_PORT").then(|| "http".into()));
        assert_eq!(config.port, 3000);
    }
}
