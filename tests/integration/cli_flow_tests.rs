use std::sync::Arc;

use lesscrowd::cli::OutputFormat;
use lesscrowd::config::Config;
use lesscrowd::error::ExitCode;
use lesscrowd::host::{InMemoryHost, RawScanEntry};
use lesscrowd::permission::AuthorizationState;
use lesscrowd::scanner::ScanError;
use lesscrowd::view::BandFilter;

fn host() -> InMemoryHost {
    InMemoryHost::new()
        .with_adapter("en0", true)
        .with_adapter("en1", false)
        .with_entries(vec![
            RawScanEntry::new(Some("Cafe5G"), Some("a4:2b:b0:11:22:33"), -50, Some(149)),
            RawScanEntry::new(Some("Cafe2.4"), None, -60, Some(6)),
        ])
}

fn json_config() -> Config {
    Config {
        output: OutputFormat::Json,
        ..Config::default()
    }
}

#[test]
fn test_scan_writes_view_and_succeeds() {
    let mut out = Vec::new();
    let code = lesscrowd::scan(Arc::new(host()), &json_config(), &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["ssid"], "Cafe5G");
    assert_eq!(value[1]["bssid"], serde_json::Value::Null);
}

#[test]
fn test_scan_with_empty_view_reports_no_access_points() {
    let config = Config {
        band: BandFilter::Ghz5,
        ..json_config()
    };
    let host = InMemoryHost::new()
        .with_adapter("en0", true)
        .with_entries(vec![RawScanEntry::new(Some("Cafe2.4"), None, -60, Some(6))]);

    let mut out = Vec::new();
    let code = lesscrowd::scan(Arc::new(host), &config, &mut out).unwrap();

    assert_eq!(code, ExitCode::NoAccessPoints);
    assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
}

#[test]
fn test_scan_on_configured_adapter() {
    let config = Config {
        adapter: Some("en1".to_string()),
        output: OutputFormat::Csv,
        ..Config::default()
    };

    let mut out = Vec::new();
    let code = lesscrowd::scan(Arc::new(host()), &config, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let csv = String::from_utf8(out).unwrap();
    assert!(csv.starts_with("ssid,bssid,signal_dbm,channel,band\n"));
    assert!(csv.contains("Cafe5G,a4:2b:b0:11:22:33,-50,149,5GHz"));
}

#[test]
fn test_scan_unknown_adapter_maps_to_no_adapter_exit() {
    let config = Config {
        adapter: Some("en9".to_string()),
        ..Config::default()
    };

    let mut out = Vec::new();
    let err = lesscrowd::scan(Arc::new(host()), &config, &mut out).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScanError>(),
        Some(ScanError::UnknownAdapter { .. })
    ));
    assert_eq!(ExitCode::from_error(&err), ExitCode::NoAdapter);
    assert!(out.is_empty());
}

#[test]
fn test_scan_without_adapters_maps_to_no_adapter_exit() {
    let mut out = Vec::new();
    let err = lesscrowd::scan(Arc::new(InMemoryHost::new()), &Config::default(), &mut out).unwrap_err();
    assert_eq!(ExitCode::from_error(&err), ExitCode::NoAdapter);
}

#[test]
fn test_scan_denied_maps_to_authorization_exit() {
    let host = host().with_authorization(AuthorizationState::Denied);

    let mut out = Vec::new();
    let err = lesscrowd::scan(Arc::new(host), &Config::default(), &mut out).unwrap_err();

    assert_eq!(ExitCode::from_error(&err), ExitCode::AuthorizationRequired);
    assert_eq!(ExitCode::from_error(&err).as_i32(), 3);
}

#[test]
fn test_scan_host_failure_is_general_error() {
    let host = host().then_fail("radio is off");

    let mut out = Vec::new();
    let err = lesscrowd::scan(Arc::new(host), &Config::default(), &mut out).unwrap_err();

    assert_eq!(ExitCode::from_error(&err), ExitCode::GeneralError);
    assert!(err.to_string().contains("radio is off"));
}

#[test]
fn test_list_adapters_json() {
    let mut out = Vec::new();
    let code = lesscrowd::list_adapters(Arc::new(host()), &json_config(), &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["name"], "en0");
    assert_eq!(value[0]["isDefault"], true);
    assert_eq!(value[1]["isDefault"], false);
}
