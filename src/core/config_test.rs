//! Configuration unit tests
//!
//! Exercises loading, saving, validation and command-line overrides of AppConfig.

#[cfg(test)]
mod tests {
    use super::super::config::{ApiConfig, AppConfig, StorageConfig, UiConfig};
    use parking_lot::{const_mutex, Mutex};
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Serializes tests that read the process environment through `load_from`
    static ENV_LOCK: Mutex<()> = const_mutex(());

    /// 创建测试用的完整配置
    fn create_test_config() -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: "http://videos.internal:9000".to_string(),
                user_agent: "Test Agent".to_string(),
                timeout_seconds: Some(45),
            },
            ui: UiConfig {
                default_format: "mp4".to_string(),
                formats: vec!["mp4".to_string(), "mp3".to_string(), "webm".to_string()],
                logo_pin_threshold: 80,
                tick_rate_ms: 250,
            },
            storage: StorageConfig {
                output_directory: "/tmp/videos".to_string(),
                state_file: Some("/tmp/state.json".to_string()),
            },
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.default_format, "mp3");
        assert_eq!(config.ui.logo_pin_threshold, 50);
        assert!(config.api.timeout_seconds.is_none());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = AppConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let original = create_test_config();

        original.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "api": { "base_url": "http://example.com" } }"#).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();

        assert_eq!(loaded.api.base_url, "http://example.com");
        assert_eq!(loaded.ui, UiConfig::default());
        assert_eq!(loaded.storage, StorageConfig::default());
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let _env = ENV_LOCK.lock();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        create_test_config().save_to(&path).unwrap();

        std::env::set_var("VIDEO_SEARCH__API__BASE_URL", "http://env:1");
        std::env::set_var("VIDEO_SEARCH__UI__LOGO_PIN_THRESHOLD", "7");
        let loaded = AppConfig::load_from(&path);
        std::env::remove_var("VIDEO_SEARCH__API__BASE_URL");
        std::env::remove_var("VIDEO_SEARCH__UI__LOGO_PIN_THRESHOLD");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.api.base_url, "http://env:1");
        assert_eq!(loaded.ui.logo_pin_threshold, 7);
        assert_eq!(loaded.ui.default_format, "mp4");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.api.base_url = "::not-a-url".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.formats.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.default_format = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.tick_rate_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = AppConfig::default();
        config.apply_overrides(
            Some("http://other:1234".to_string()),
            Some("/srv/out".to_string()),
            Some("flac".to_string()),
        );

        assert_eq!(config.api.base_url, "http://other:1234");
        assert_eq!(config.storage.output_directory, "/srv/out");
        assert_eq!(config.ui.default_format, "flac");
        assert!(config.ui.formats.contains(&"flac".to_string()));

        config.apply_overrides(None, None, None);
        assert_eq!(config.ui.default_format, "flac");
    }

    #[test]
    fn test_explicit_state_file_is_respected() {
        let config = create_test_config();
        assert_eq!(
            config.state_file_path().unwrap(),
            PathBuf::from("/tmp/state.json")
        );
    }
}
