#[cfg(test)]
mod tests {
    use depo::libs::config::{Config, DisplayConfig, ExportConfig, DEFAULT_CURRENCY};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_falls_back_to_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_symbol(), DEFAULT_CURRENCY);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            display: Some(DisplayConfig {
                currency_symbol: "$".to_string(),
            }),
            export: Some(ExportConfig {
                directory: Some("/tmp/exports".to_string()),
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.currency_symbol(), "$");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_keeps_defaults_elsewhere(_ctx: &mut ConfigTestContext) {
        let config = Config {
            display: None,
            export: Some(ExportConfig { directory: None }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.currency_symbol(), DEFAULT_CURRENCY);
        assert!(loaded.display.is_none());
    }
}
