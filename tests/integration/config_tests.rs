use figment::providers::Serialized;
use lesscrowd::cli::OutputFormat;
use lesscrowd::config::{Config, ConfigError};
use lesscrowd::view::{BandFilter, SortDirection, SortKey};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = figment::Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.band, BandFilter::Both);
    assert_eq!(config.sort, SortKey::Signal);
    assert_eq!(config.order, SortDirection::Descending);
    assert_eq!(config.output, OutputFormat::Table);
    assert!(!config.iw_scan_dump);
}

#[test]
fn test_config_load_from_env() {
    use figment::{providers::Env, Figment};

    std::env::set_var("LCTEST_BAND", "2.4ghz");
    std::env::set_var("LCTEST_OUTPUT", "csv");

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("LCTEST_"));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.band, BandFilter::Ghz2_4);
    assert_eq!(config.output, OutputFormat::Csv);

    std::env::remove_var("LCTEST_BAND");
    std::env::remove_var("LCTEST_OUTPUT");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
adapter = "wlan1"
band = "5ghz"
sort = "channel"
order = "asc"
output = "json"
macos_helper = "/usr/local/libexec/lesscrowd-corewlan"
"#;
    fs::write(&config_path, toml_content).unwrap();

    use figment::{
        providers::{Format, Toml},
        Figment,
    };
    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));

    let config: Config = figment.extract().unwrap();

    assert_eq!(config.adapter.as_deref(), Some("wlan1"));
    assert_eq!(config.band, BandFilter::Ghz5);
    assert_eq!(config.sort, SortKey::Channel);
    assert_eq!(config.order, SortDirection::Ascending);
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.macos_helper, "/usr/local/libexec/lesscrowd-corewlan");
}

#[test]
fn test_config_explicit_path_must_exist() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_config_unknown_key_message() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "ordr = \"asc\"\n").unwrap();

    let err = Config::load(Some(&config_path)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown config key 'ordr' (did you mean 'order'?)"
    );
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "band = ").unwrap();

    assert!(matches!(
        Config::load(Some(&config_path)),
        Err(ConfigError::Syntax { .. })
    ));
}

#[test]
fn test_config_render_toml() {
    let config = Config {
        band: BandFilter::Ghz2_4,
        ..Config::default()
    };
    let rendered = config.to_toml().unwrap();

    assert!(rendered.contains("band = \"2.4ghz\""));
    assert!(rendered.contains("sort = \"signal\""));
    assert!(rendered.contains("order = \"desc\""));
    assert!(!rendered.contains("adapter"));
}
