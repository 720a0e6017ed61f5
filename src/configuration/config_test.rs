use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());
}

#[test]
fn it_skips_config_file_when_serializing() {
    let res = Config::serialize_default(cli::build());
    assert!(!res.contains("config-file"));
    assert!(res.contains("dialogue-url = \"http://127.0.0.1:8000\""));
    assert!(res.contains("health-check-timeout = 1000"));
    assert!(res.contains("# request-timeout = \"\""));
}

#[test]
fn it_renders_keys_as_kebab_case() {
    assert_eq!(ConfigKey::DialogueURL.to_string(), "dialogue-url");
    assert_eq!(ConfigKey::HealthCheckTimeout.to_string(), "health-check-timeout");
    assert_eq!(ConfigKey::RequestTimeout.to_string(), "request-timeout");
    assert_eq!(ConfigKey::StorageFile.to_string(), "storage-file");
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "ivf-intake",
        "chat",
        "-c",
        "./config.example.toml",
    ])?;
    let (_, chat_matches) = matches.subcommand().unwrap();
    Config::load(vec![&matches, chat_matches]).await?;

    assert_eq!(Config::get(ConfigKey::HealthCheckTimeout), "1000");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["ivf-intake", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());

    let err = res.unwrap_err().to_string();
    assert!(err.contains("health-check-timeout"));
    return Ok(());
}

#[test]
fn it_ignores_unset_millis() {
    assert_eq!(Config::get_millis(ConfigKey::ConfigFile), None);
}
