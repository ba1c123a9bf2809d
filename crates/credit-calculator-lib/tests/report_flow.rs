use chrono::{TimeZone, Utc};
use credit_calculator_engine::{
    build_snapshot_at, render_document, trigger_export, Calculator, CalculatorConfig, FileTarget,
    Frequency, ReportFormat, UsageEntry,
};
use std::fs;

fn entries() -> Vec<UsageEntry> {
    vec![
        UsageEntry::from_input("streaming-activation", "0.5", "weekly"),
        UsageEntry::from_input("batch-pipeline", "3", "monthly"),
        UsageEntry::from_input("profile-unification", "1", "onetime"),
        UsageEntry::from_input("data-queries", "", "daily"),
        UsageEntry::from_input("profile-api", "-2", "daily"),
        UsageEntry::from_input("segment-processing", "abc", "monthly"),
    ]
}

#[test]
fn rendered_report_lists_exactly_the_positive_entries() {
    let calculator = Calculator::default();
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    let snapshot = build_snapshot_at(&calculator, &entries(), at);

    for format in [ReportFormat::Html, ReportFormat::Text] {
        let document = render_document(&snapshot, format);

        for name in [
            "Batch Data Pipeline",
            "Batch Profile Unification",
            "Streaming Activation",
        ] {
            assert!(document.contains(name), "{name} missing from {format:?} report");
        }
        for name in ["Real-Time Profile API", "Segment Processing"] {
            assert!(!document.contains(name), "{name} should not be in {format:?} report");
        }
    }
}

#[test]
fn report_totals_match_live_totals() {
    let calculator = Calculator::default();
    let entries = entries();
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

    let snapshot = build_snapshot_at(&calculator, &entries, at);
    let live = calculator.aggregate(&entries);

    // 0.5 * 1600 * 52 + 3 * 2000 * 12 + 1 * 100000
    assert_eq!(live.total_annual_units(), 41_600.0 + 72_000.0 + 100_000.0);
    assert_eq!(
        snapshot.totals().total_annual_units(),
        live.total_annual_units()
    );
    assert_eq!(
        snapshot.totals().total_monthly_units(),
        live.total_monthly_units()
    );
    assert_eq!(snapshot.totals().total_daily_units(), live.total_daily_units());
    assert_eq!(snapshot.totals().estimated_cost(), live.estimated_cost());
}

#[test]
fn exported_file_is_the_rendered_document() {
    let calculator = Calculator::default();
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    let snapshot = build_snapshot_at(&calculator, &entries(), at);
    let document = render_document(&snapshot, ReportFormat::Html);

    let dir = tempfile::tempdir().unwrap();
    let mut target = FileTarget::in_directory(dir.path(), ReportFormat::Html, at);
    trigger_export(&document, &mut target).unwrap();

    let written = fs::read_to_string(target.path()).unwrap();
    assert_eq!(written, document);
    assert!(target
        .path()
        .ends_with("credit-report-20240601-093000.html"));
}

#[test]
fn custom_config_drives_labels_and_pricing() {
    let config = CalculatorConfig::from_json_str(
        r#"{
            "sections": [{"id": "compute", "title": "Compute", "items": [
                {"id": "jobs", "name": "Batch Jobs", "description": "Scheduled jobs", "unit_multiplier": 4, "unit": "1K jobs"}
            ]}],
            "pricing": {"units_per_package": 1000, "cost_per_package": 50, "currency_symbol": "€"},
            "report": {"title": "Compute Estimate", "unit_label": "tokens", "footer": []}
        }"#,
    )
    .unwrap();
    let calculator = Calculator::new(config);
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    let entries = vec![UsageEntry::new("jobs", 10.0, Frequency::Monthly)];

    let snapshot = build_snapshot_at(&calculator, &entries, at);
    assert_eq!(snapshot.totals().total_annual_units(), 480.0);
    assert!((snapshot.totals().estimated_cost() - 24.0).abs() < 1e-9);

    let text = render_document(&snapshot, ReportFormat::Text);
    assert!(text.starts_with("Compute Estimate\n"));
    assert!(text.contains("Token Usage Summary"));
    assert!(text.contains("- Batch Jobs: 480 tokens"));
    assert!(text.contains("€24.00"));
}
