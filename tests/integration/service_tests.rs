use std::sync::Arc;
use std::thread;

use lesscrowd::host::{InMemoryHost, RawScanEntry};
use lesscrowd::permission::AuthorizationState;
use lesscrowd::scanner::ScanError;
use lesscrowd::service::InventoryService;
use lesscrowd::view::{BandFilter, SortDirection, SortKey, ViewQuery};

fn cafe_entries() -> Vec<RawScanEntry> {
    vec![
        RawScanEntry::new(Some("Cafe5G"), Some("a4:2b:b0:11:22:33"), -50, Some(149)),
        RawScanEntry::new(Some("Cafe2.4"), Some("a4:2b:b0:11:22:34"), -60, Some(6)),
        RawScanEntry::new(None, None, -70, Some(11)),
    ]
}

fn names(service: &InventoryService, query: &ViewQuery) -> Vec<String> {
    service
        .view(query)
        .iter()
        .map(|r| r.ssid.to_string())
        .collect()
}

#[test]
fn test_empty_host_has_no_default_and_cannot_scan() {
    let service = InventoryService::new(Arc::new(InMemoryHost::new()));

    assert!(service.refresh_adapters().is_empty());
    assert_eq!(service.default_adapter(), None);
    assert_eq!(service.scan().unwrap_err(), ScanError::NoAdapterSelected);
}

#[test]
fn test_cafe_scenario_five_ghz_only() {
    let host = InMemoryHost::new()
        .with_adapter("en0", true)
        .with_entries(cafe_entries());
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    let result = service.scan().unwrap();
    assert_eq!(result.len(), 3);

    let query = ViewQuery::new(BandFilter::Ghz5, SortKey::Signal, SortDirection::Descending);
    let view = service.view(&query);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].ssid.to_string(), "Cafe5G");
    assert_eq!(view[0].channel, Some(149));
}

#[test]
fn test_view_is_recomputed_without_rescanning() {
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .with_entries(cafe_entries()),
    );
    let service = InventoryService::new(host.clone());
    service.refresh_adapters();
    service.scan().unwrap();

    let by_signal = ViewQuery::default();
    assert_eq!(
        names(&service, &by_signal),
        vec!["Cafe5G", "Cafe2.4", "Read Error"]
    );

    let by_channel = ViewQuery::new(BandFilter::Both, SortKey::Channel, SortDirection::Ascending);
    assert_eq!(
        names(&service, &by_channel),
        vec!["Cafe2.4", "Read Error", "Cafe5G"]
    );

    assert_eq!(host.scan_count(), 1);
}

#[test]
fn test_failed_scan_keeps_previous_result() {
    let host = InMemoryHost::new()
        .with_adapter("en0", true)
        .then_scan(cafe_entries())
        .then_fail("device busy");
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    let first = service.scan().unwrap();

    match service.scan() {
        Err(ScanError::HostScanFailure(message)) => assert!(message.contains("device busy")),
        other => panic!("Expected HostScanFailure, got {:?}", other),
    }

    let latest = service.latest().unwrap();
    assert!(Arc::ptr_eq(&first, &latest));
    assert_eq!(service.view(&ViewQuery::default()).len(), 3);
}

#[test]
fn test_new_scan_replaces_cache() {
    let host = InMemoryHost::new()
        .with_adapter("en0", true)
        .then_scan(cafe_entries())
        .then_scan(vec![RawScanEntry::new(Some("Lonely"), None, -80, Some(1))]);
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    service.scan().unwrap();
    service.scan().unwrap();

    assert_eq!(names(&service, &ViewQuery::default()), vec!["Lonely"]);
}

#[test]
fn test_pending_authorization_requests_once_per_scan() {
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .with_entries(cafe_entries())
            .with_authorization(AuthorizationState::Pending),
    );
    let service = InventoryService::new(host.clone());
    service.refresh_adapters();

    assert_eq!(service.scan().unwrap_err(), ScanError::AuthorizationPending);
    assert_eq!(host.authorization_requests(), 1);
    assert_eq!(host.scan_count(), 0);

    assert_eq!(service.scan().unwrap_err(), ScanError::AuthorizationPending);
    assert_eq!(host.authorization_requests(), 2);
    assert!(service.latest().is_none());
}

#[test]
fn test_authorization_granted_on_prompt_allows_next_scan() {
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .with_entries(cafe_entries())
            .with_authorization(AuthorizationState::Pending)
            .granting_on_request(),
    );
    let service = InventoryService::new(host.clone());
    service.refresh_adapters();

    // The request does not block, so the first attempt still reports pending
    assert_eq!(service.scan().unwrap_err(), ScanError::AuthorizationPending);
    assert_eq!(service.ensure_authorized(), AuthorizationState::Granted);
    assert!(service.scan().is_ok());
}

#[test]
fn test_denied_authorization_never_scans() {
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .with_authorization(AuthorizationState::Denied),
    );
    let service = InventoryService::new(host.clone());
    service.refresh_adapters();

    assert_eq!(service.scan().unwrap_err(), ScanError::AuthorizationDenied);
    assert_eq!(host.authorization_requests(), 0);
    assert_eq!(host.scan_count(), 0);
}

#[test]
fn test_scan_adapter_by_name() {
    let host = InMemoryHost::new()
        .with_adapter("en0", true)
        .with_adapter("en1", false)
        .with_entries(cafe_entries());
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    let result = service.scan_adapter("en1").unwrap();
    assert_eq!(result.adapter(), "en1");
    assert_eq!(service.selected_adapter().unwrap().name(), "en1");
}

#[test]
fn test_unknown_adapter_suggests_closest() {
    let host = InMemoryHost::new().with_adapter("wlan0", true);
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    match service.scan_adapter("wlan1") {
        Err(ScanError::UnknownAdapter { name, suggestion }) => {
            assert_eq!(name, "wlan1");
            assert_eq!(suggestion.as_deref(), Some("wlan0"));
        }
        other => panic!("Expected UnknownAdapter, got {:?}", other),
    }
    // The previous selection stays in place
    assert_eq!(service.selected_adapter().unwrap().name(), "wlan0");
}

#[test]
fn test_concurrent_scan_rejected() {
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .with_entries(cafe_entries()),
    );
    let service = Arc::new(InventoryService::new(host.clone()));
    service.refresh_adapters();
    let pause = host.pause_next_scan();

    let background = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.scan())
    };

    pause.started.recv().unwrap();
    assert_eq!(service.scan().unwrap_err(), ScanError::ScanInProgress);
    // Nothing cached yet: the running scan has not finished
    assert!(service.latest().is_none());

    pause.release.send(()).unwrap();
    let result = background.join().unwrap().unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(host.scan_count(), 1);
}

#[test]
fn test_newer_scan_result_is_the_cached_one() {
    let crowded: Vec<RawScanEntry> = (0..50_000)
        .map(|i: i32| RawScanEntry::new(Some("Crowded"), None, -40 - (i % 50), Some(1 + (i % 13) as u32)))
        .collect();
    let host = Arc::new(
        InMemoryHost::new()
            .with_adapter("en0", true)
            .then_scan(crowded)
            .then_scan(vec![RawScanEntry::new(Some("Quiet"), None, -70, Some(36))]),
    );
    let service = Arc::new(InventoryService::new(host.clone()));
    service.refresh_adapters();
    let pause = host.pause_next_scan();

    let first = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.scan())
    };
    pause.started.recv().unwrap();
    pause.release.send(()).unwrap();

    // Keep retrying until the first scan has cached its result
    let second = loop {
        match service.scan() {
            Err(ScanError::ScanInProgress) => thread::yield_now(),
            other => break other.unwrap(),
        }
    };

    assert_eq!(first.join().unwrap().unwrap().len(), 50_000);
    assert_eq!(second.len(), 1);
    assert_eq!(host.scan_count(), 2);
    assert!(Arc::ptr_eq(&second, &service.latest().unwrap()));
}

#[test]
fn test_normalization_through_service() {
    let host = InMemoryHost::new().with_adapter("wlan0", true).with_entries(vec![
        RawScanEntry::new(Some(""), Some("00:00:00:00:00:00"), -65, Some(0)),
        RawScanEntry::new(Some("Office"), Some("AA-BB-CC-DD-EE-FF"), -55, Some(36)),
    ]);
    let service = InventoryService::new(Arc::new(host));
    service.refresh_adapters();

    let result = service.scan().unwrap();
    let records = result.records();

    assert_eq!(records[0].ssid.to_string(), "Read Error");
    assert_eq!(records[0].bssid.to_mac_string(), None);
    assert_eq!(records[0].channel, None);
    assert_eq!(records[1].bssid.to_mac_string().as_deref(), Some("aa:bb:cc:dd:ee:ff"));

    // Channel-less records are dropped from every view
    assert_eq!(names(&service, &ViewQuery::default()), vec!["Office"]);
}
