use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_GRID_SIZE: usize = 12;
pub const DEFAULT_MAX_CONNECTIONS: usize = 1000;

/// Runtime settings, filled from command-line arguments by the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Word list on disk; the bundled list is used when unset
    pub dictionary_path: Option<PathBuf>,
    /// Largest board a client may request
    pub max_grid_size: usize,
    pub max_connections: usize,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dictionary_path: None,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.max_grid_size, 12);
        assert!(config.dictionary_path.is_none());
    }

    #[test]
    fn test_address_formatting() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9001,
            ..ServerConfig::default()
        };
        assert_eq!(config.address(), "0.0.0.0:9001");
        assert!(config.address().parse::<std::net::SocketAddr>().is_ok());
    }
}
