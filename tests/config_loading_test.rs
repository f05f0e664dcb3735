//! Layered configuration tests (TOML file + environment overrides).

use figment::Jail;
use wigle2mtscan::config::ConverterConfig;

#[test]
fn test_missing_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = ConverterConfig::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config, ConverterConfig::default());
        Ok(())
    });
}

#[test]
fn test_file_values_are_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "wigle2mtscan.toml",
            r#"
                log_level = "debug"
                log_format = "json"
                compression_level = 9
            "#,
        )?;

        let config = ConverterConfig::load().unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.compression_level, 9);
        // Not in the file, so defaulted
        assert_eq!(config.header_lines, 2);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", r#"log_level = "warn""#)?;
        jail.set_env("WIGLE2MTSCAN_LOG_LEVEL", "error");
        jail.set_env("WIGLE2MTSCAN_HEADER_LINES", "1");

        let config = ConverterConfig::load_from("custom.toml").unwrap();
        assert_eq!(config.log_level, "error");
        assert_eq!(config.header_lines, 1);
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "compression_level = 12")?;
        let err = ConverterConfig::load_from("bad.toml").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Invalid compression_level 12"));

        jail.create_file("typo.toml", r#"header_lines = "two""#)?;
        let err = ConverterConfig::load_from("typo.toml").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
        Ok(())
    });
}
