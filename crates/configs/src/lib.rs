use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Indent JSON response bodies.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), pretty_json: true }
    }
}

fn default_pretty_json() -> bool { true }

/// Which repository implementation backs the map API.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    JsonFile,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json_file" | "json-file" | "file" => Ok(Self::JsonFile),
            other => Err(anyhow!("unknown storage backend '{other}' (expected memory or json_file)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::default(), path: default_store_path() }
    }
}

fn default_store_path() -> String { "data/maps.json".to_string() }

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format '{other}' (expected compact or json)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read the config file at `path`; a missing file falls back to environment
/// variables, any other read or parse failure is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => from_toml_str(&content).map_err(|e| anyhow!("invalid config file {path}: {e}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::from_env(),
        Err(e) => Err(anyhow!("cannot read config file {path}: {e}")),
    }
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment variables
    /// only when the file does not exist, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = load_or_env(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            cfg.server.port = port
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT '{port}' is not a valid port: {e}"))?;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(backend) = std::env::var("MAP_STORE_BACKEND") {
            cfg.storage.backend = backend.parse()?;
        }
        if let Ok(path) = std::env::var("MAP_STORE_PATH") {
            cfg.storage.path = path;
        }
        if let Ok(fmt) = std::env::var("LOG_FORMAT") {
            cfg.logging.format = fmt.parse()?;
        }
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::JsonFile && self.path.trim().is_empty() {
            return Err(anyhow!("storage.path is required for the json_file backend"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = from_toml_str("")?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.pretty_json);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        Ok(())
    }

    #[test]
    fn parses_all_sections() -> Result<()> {
        let cfg = from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000
            worker_threads = 2
            pretty_json = false

            [storage]
            backend = "json_file"
            path = "/var/lib/maps/maps.json"

            [logging]
            format = "json"
            "#,
        )?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert!(!cfg.server.pretty_json);
        assert_eq!(cfg.storage.backend, StorageBackend::JsonFile);
        assert_eq!(cfg.storage.path, "/var/lib/maps/maps.json");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(from_toml_str("[storage]\nbackend = \"mongo\"").is_err());
        assert!("mongo".parse::<StorageBackend>().is_err());
        assert_eq!("File".parse::<StorageBackend>().ok(), Some(StorageBackend::JsonFile));
    }

    fn temp_config(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mapservice_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn malformed_config_file_fails_instead_of_falling_back() {
        let path = temp_config("[storage]\nbackend = \"json_fil\"\npath = \"data/maps.json\"\n");
        let res = AppConfig::load_and_validate_from(&path.display().to_string());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err(), "malformed config must not start on defaults, got {:?}", res.map(|c| c.storage.backend));
    }

    #[test]
    fn existing_config_file_is_used() -> Result<()> {
        let path = temp_config("[storage]\nbackend = \"json_file\"\npath = \"data/maps.json\"\n");
        let res = AppConfig::load_and_validate_from(&path.display().to_string());
        let _ = std::fs::remove_file(&path);
        assert_eq!(res?.storage.backend, StorageBackend::JsonFile);
        Ok(())
    }

    #[test]
    fn missing_config_file_falls_back_to_env() {
        let path = std::env::temp_dir().join(format!("mapservice_missing_{}.toml", uuid::Uuid::new_v4()));
        // the env fallback may still reject bad variables, but never blames the file
        if let Err(e) = load_or_env(&path.display().to_string()) {
            assert!(!e.to_string().contains("config file"), "missing file must fall back to env: {e}");
        }
    }

    #[test]
    fn log_format_parses_strictly() {
        assert_eq!("JSON".parse::<LogFormat>().ok(), Some(LogFormat::Json));
        assert_eq!("compact".parse::<LogFormat>().ok(), Some(LogFormat::Compact));
        assert!("jsno".parse::<LogFormat>().is_err());
    }

    #[test]
    fn normalize_fills_host_and_threads() -> Result<()> {
        let mut cfg = from_toml_str("[server]\nhost = \" \"\nport = 9000\nworker_threads = 0")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn zero_port_is_invalid() -> Result<()> {
        let mut cfg = from_toml_str("[server]\nhost = \"localhost\"\nport = 0")?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }

    #[test]
    fn json_file_backend_needs_a_path() -> Result<()> {
        let mut cfg = from_toml_str("[storage]\nbackend = \"json_file\"\npath = \"\"")?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }
}
