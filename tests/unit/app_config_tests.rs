/*!
 * Tests for application configuration
 */

use anyhow::Result;
use captionlist::app_config::{Config, LogLevel, TranslationProvider};
use captionlist::translation::StalePolicy;
use tempfile::TempDir;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.stale_policy, StalePolicy::Discard);
    assert!(config.validate().is_ok());
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "es".to_string();
    config.stale_policy = StalePolicy::Apply;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.target_language, "es");
    assert_eq!(loaded.stale_policy, StalePolicy::Apply);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.source_language, "en");
    Ok(())
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"target_language": "de", "translation": {"provider": "mock"}, "stale_policy": "apply"}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::Mock);
    assert_eq!(config.translation.retry_count, 3);
    assert_eq!(config.stale_policy, StalePolicy::Apply);
    Ok(())
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut bad_language = Config::default();
    bad_language.target_language = "zz".to_string();
    assert!(bad_language.validate().is_err());

    let mut same_language = Config::default();
    same_language.target_language = "eng".to_string();
    assert!(same_language.validate().is_err());

    let mut bad_temperature = Config::default();
    bad_temperature.translation.temperature = 1.5;
    assert!(bad_temperature.validate().is_err());

    let mut bad_endpoint = Config::default();
    bad_endpoint.translation.endpoint = "not a url".to_string();
    assert!(bad_endpoint.validate().is_err());
}

#[test]
fn test_validate_withRegionTaggedLanguages_shouldSucceed() {
    let mut config = Config::default();
    config.target_language = "pt-br".to_string();
    assert!(config.validate().is_ok());

    config.source_language = "pt-pt".to_string();
    assert!(config.validate().is_ok());

    config.source_language = "pt_BR".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_translationProvider_fromStr_shouldParseKnownProviders() {
    assert_eq!("Ollama".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert_eq!("mock".parse::<TranslationProvider>().unwrap(), TranslationProvider::Mock);
    assert!("openai".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Mock.to_string(), "mock");
}

#[test]
fn test_logLevel_toLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
