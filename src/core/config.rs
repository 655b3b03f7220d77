//! Application configuration management

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::models::DEFAULT_FORMAT;

/// Prefix for environment overrides, e.g. `VIDEO_SEARCH__API__BASE_URL`
pub const ENV_PREFIX: &str = "VIDEO_SEARCH";

/// Main application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    /// No timeout unless set
    pub timeout_seconds: Option<u64>,
}

/// UI-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub default_format: String,
    pub formats: Vec<String>,
    pub logo_pin_threshold: u32,
    pub tick_rate_ms: u64,
}

/// Where downloads and the persisted query live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub output_directory: String,
    pub state_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: format!("VideoSearchClient/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_FORMAT.to_string(),
            formats: vec!["mp3".to_string(), "mp4".to_string()],
            logo_pin_threshold: 50,
            tick_rate_ms: 100,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_directory: "downloads".to_string(),
            state_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load defaults, then the JSON file at `config_path`, then environment overrides
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            Self::default().save_to(config_path)?;
            tracing::info!("Created default configuration at: {:?}", config_path);
        }

        let layered = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .with_context(|| "Failed to seed default configuration")?,
            )
            .add_source(
                config::File::from(config_path.to_path_buf())
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: AppConfig = layered
            .try_deserialize()
            .with_context(|| "Failed to parse config file")?;

        tracing::info!("Loaded configuration from: {:?}", config_path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        tracing::info!("Saved configuration to: {:?}", config_path);
        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "videosearch", "client")
            .with_context(|| "Failed to get project directories")
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Get the application data directory
    pub fn get_data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Get the logs directory
    pub fn get_logs_dir() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join("logs"))
    }

    /// File holding the persisted search query
    pub fn state_file_path(&self) -> Result<PathBuf> {
        match &self.storage.state_file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(Self::get_data_dir()?.join("state.json")),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| anyhow!("Invalid API base URL {}: {}", self.api.base_url, e))?;

        if self.api.timeout_seconds == Some(0) {
            return Err(anyhow!("Timeout must be greater than zero when set"));
        }

        if self.ui.default_format.trim().is_empty() {
            return Err(anyhow!("Default format must not be empty"));
        }

        if self.ui.formats.is_empty() {
            return Err(anyhow!("At least one output format is required"));
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(anyhow!("Tick rate must be greater than zero"));
        }

        if self.storage.output_directory.trim().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        output_directory: Option<String>,
        format: Option<String>,
    ) {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(output_directory) = output_directory {
            self.storage.output_directory = output_directory;
        }
        if let Some(format) = format {
            if !self.ui.formats.contains(&format) {
                self.ui.formats.push(format.clone());
            }
            self.ui.default_format = format;
        }
    }
}
