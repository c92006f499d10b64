// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use hakim::config::Config;
use hakim::error::Error;

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.model, "gemini-3-flash-preview");
    assert_eq!(
        config.base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert!(config.api_key.is_none());
    assert!(config.timeout_secs.is_none());
    assert!(config.temperature.is_none());
    assert_eq!(config.max_attachment_bytes, 20 * 1024 * 1024);
    assert!(config.validate().is_ok());
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
model = "gemini-2.5-pro"
base_url = "http://localhost:8080/v1beta"
timeout_secs = 90
temperature = 0.2
max_attachment_bytes = 1048576
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.base_url, "http://localhost:8080/v1beta");
    assert_eq!(config.timeout_secs, Some(90));
    assert_eq!(config.temperature, Some(0.2));
    assert_eq!(config.max_attachment_bytes, 1_048_576);
    assert!(config.validate().is_ok());
}

#[test]
fn api_key_is_never_read_from_deserialized_file_fields() {
    // The key is resolved through figment in Config::load, not serde.
    let config: Config = toml::from_str(r#"api_key = "abc""#).unwrap();
    assert!(config.api_key.is_none());
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    let default = Config::default();
    assert_eq!(config.model, default.model);
    assert_eq!(config.base_url, default.base_url);
    assert_eq!(config.max_attachment_bytes, default.max_attachment_bytes);
}

#[test]
fn invalid_toml_returns_error() {
    let result: std::result::Result<Config, _> = toml::from_str("model = [invalid");
    assert!(result.is_err(), "invalid TOML should return an error");
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn assert_config_error(config: Config, needle: &str) {
    match config.validate() {
        Err(Error::Configuration(message)) => {
            assert!(message.contains(needle), "{message} should mention {needle}")
        }
        other => panic!("expected Configuration error, got: {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_values() {
    assert_config_error(
        Config {
            timeout_secs: Some(0),
            ..Config::default()
        },
        "timeout_secs",
    );
    assert_config_error(
        Config {
            temperature: Some(3.5),
            ..Config::default()
        },
        "temperature",
    );
    assert_config_error(
        Config {
            max_attachment_bytes: 0,
            ..Config::default()
        },
        "max_attachment_bytes",
    );
}

#[test]
fn rejects_bad_base_url() {
    assert_config_error(
        Config {
            base_url: "not a url".into(),
            ..Config::default()
        },
        "base_url",
    );
    assert_config_error(
        Config {
            base_url: "ftp://example.com".into(),
            ..Config::default()
        },
        "http",
    );
}

#[test]
fn rejects_blank_model() {
    assert_config_error(
        Config {
            model: "  ".into(),
            ..Config::default()
        },
        "model",
    );
}

#[test]
fn debug_output_redacts_key() {
    let config = Config {
        api_key: Some("super-secret-key".to_string().into()),
        ..Config::default()
    };
    let dbg = format!("{config:?}");
    assert!(!dbg.contains("super-secret-key"));
}
