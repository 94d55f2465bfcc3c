use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

/// Параметры прокси скачивания файлов (`/api/download`)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DownloadConfig {
    pub timeout_secs: u64,
    /// Максимальный размер файла в байтах
    pub max_bytes: usize,
    /// Разрешенные хосты источника; пустой список - без ограничений
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            max_bytes: 50 * 1024 * 1024,
            allowed_hosts: Vec::new(),
        }
    }
}

impl DownloadConfig {
    pub fn is_host_allowed(&self, host: &str) -> bool {
        self.allowed_hosts.is_empty()
            || self
                .allowed_hosts
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(host))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StaticFilesConfig {
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self { dir: "dist".into() }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[download]
timeout_secs = 60
max_bytes = 52428800
allowed_hosts = []

[static_files]
dir = "dist"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Directory with the built frontend.
/// Relative paths are resolved against the executable directory when it exists there.
pub fn static_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.static_files.dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(dir);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    dir.to_path_buf()
}
