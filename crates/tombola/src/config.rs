//! Server configuration.

use std::path::{Path, PathBuf};

/// Address the server binds to unless told otherwise.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Everything needed to start a server.
///
/// Built with chained `with_*` calls on top of [`Default`]:
///
/// ```
/// use tombola::ServerConfig;
///
/// let config = ServerConfig::default()
///     .with_bind("0.0.0.0:9000")
///     .with_data_path("/var/lib/tombola/rooms.json");
/// assert!(!config.materialize_on_read);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,

    /// JSON file holding every room. `None` keeps rooms in memory and
    /// loses them on restart.
    pub data_path: Option<PathBuf>,

    /// When set, reading a room that was never saved creates, stores and
    /// returns the default room instead of reporting it as absent.
    pub materialize_on_read: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_path: None,
            materialize_on_read: false,
        }
    }
}

impl ServerConfig {
    /// Sets the listen address.
    pub fn with_bind(mut self, addr: impl Into<String>) -> Self {
        self.bind = addr.into();
        self
    }

    /// Sets the data file, switching to the durable store.
    pub fn with_data_path(mut self, path: impl AsRef<Path>) -> Self {
        self.data_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the read policy for unknown rooms.
    pub fn with_materialize_on_read(mut self, enabled: bool) -> Self {
        self.materialize_on_read = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.data_path, None);
        assert!(!config.materialize_on_read);
    }

    #[test]
    fn test_chained_setters() {
        let config = ServerConfig::default()
            .with_bind("0.0.0.0:1")
            .with_data_path("data/rooms.json")
            .with_materialize_on_read(true);
        assert_eq!(config.bind, "0.0.0.0:1");
        assert_eq!(config.data_path, Some(PathBuf::from("data/rooms.json")));
        assert!(config.materialize_on_read);
    }
}
