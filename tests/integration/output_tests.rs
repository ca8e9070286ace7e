use lesscrowd::cli::OutputFormat;
use lesscrowd::output::{write_adapters, write_records};
use lesscrowd::records::{normalize_all, ScanRecord};
use lesscrowd::host::RawScanEntry;
use lesscrowd::registry::WirelessAdapter;
use lesscrowd::view::{project, ViewQuery};

fn view() -> Vec<ScanRecord> {
    let records = normalize_all(vec![
        RawScanEntry::new(Some("Cafe2.4"), Some("a4:2b:b0:11:22:34"), -61, Some(6)),
        RawScanEntry::new(Some("Cafe5G"), Some("a4:2b:b0:11:22:33"), -48, Some(149)),
        RawScanEntry::new(None, Some("00:00:00:00:00:00"), -70, Some(11)),
        RawScanEntry::new(Some("NoChannel"), None, -30, None),
    ]);
    project(&records, &ViewQuery::default())
}

fn render(format: OutputFormat) -> String {
    let mut out = Vec::new();
    write_records(&view(), format, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_table_output() {
    yansi::disable();
    let text = render(OutputFormat::Table);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Access points detected: 3");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("Cafe5G"));
    assert!(lines[2].contains("Cafe2.4"));
    assert!(lines[3].contains("Read Error"));
    assert!(lines[3].contains("[unavailable]"));
    assert!(!text.contains("NoChannel"));
}

#[test]
fn test_json_output_order_matches_view() {
    let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
    let ssids: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["ssid"].clone())
        .collect();

    assert_eq!(
        ssids,
        vec![
            serde_json::json!("Cafe5G"),
            serde_json::json!("Cafe2.4"),
            serde_json::Value::Null
        ]
    );
    assert_eq!(value[0]["signalDbm"], -48);
    assert_eq!(value[0]["band"], "5GHz");
}

#[test]
fn test_csv_output() {
    let csv = render(OutputFormat::Csv);
    assert_eq!(
        csv,
        "ssid,bssid,signal_dbm,channel,band\n\
         Cafe5G,a4:2b:b0:11:22:33,-48,149,5GHz\n\
         Cafe2.4,a4:2b:b0:11:22:34,-61,6,2.4GHz\n\
         ,,-70,11,2.4GHz\n"
    );
}

#[test]
fn test_adapter_outputs() {
    yansi::disable();
    let adapters = vec![WirelessAdapter::new("wlan0", false), WirelessAdapter::new("wlan1", true)];

    let mut table = Vec::new();
    write_adapters(&adapters, OutputFormat::Table, &mut table).unwrap();
    let table = String::from_utf8(table).unwrap();
    assert!(table.starts_with("Wireless adapters: 2\n"));
    assert!(table.contains("wlan1  (default)"));

    let mut csv = Vec::new();
    write_adapters(&adapters, OutputFormat::Csv, &mut csv).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "name,is_default\nwlan0,false\nwlan1,true\n"
    );
}
