//! Alert assertion helpers.

use dfe_serde::{AlertKind, AlertList};

/// Asserts that the list holds no alert, printing them otherwise.
pub fn assert_no_alerts(alerts: &AlertList) {
    assert!(
        alerts.is_empty(),
        "expected no alerts, got {:?}",
        alerts.texts()
    );
}

/// Asserts the kinds of every alert, in detection order.
pub fn assert_alert_kinds(alerts: &AlertList, expected: &[AlertKind]) {
    let kinds: Vec<AlertKind> = alerts.iter().map(|alert| alert.kind).collect();
    assert_eq!(
        kinds,
        expected,
        "alert kinds mismatch; texts: {:?}",
        alerts.texts()
    );
}

/// Asserts that exactly one alert refers to `tag` and returns it.
pub fn single_alert_for<'a>(alerts: &'a AlertList, tag: &str) -> &'a dfe_serde::Alert {
    let matching: Vec<_> = alerts.iter().filter(|alert| alert.tag == tag).collect();
    assert_eq!(
        matching.len(),
        1,
        "expected one alert for {}, got {:?}",
        tag,
        alerts.texts()
    );
    matching[0]
}
