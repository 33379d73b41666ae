use launch_dash::config::config::DashboardConfig;
use launch_dash::dashboard::Dashboard;
use launch_dash::figure::{Figure, Trace};
use launch_dash::launch::{ColumnMapping, LaunchDataset};
use launch_dash::view::{PayloadRange, SiteFilter};
use std::path::PathBuf;
use std::sync::Arc;

fn get_test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up one directory from launch-dash to root
    path.push("data");
    path.push(filename);
    path
}

fn sample_dashboard() -> Dashboard {
    let dataset = LaunchDataset::load_csv(
        get_test_data_path("spacex_launch_dash.csv"),
        &ColumnMapping::default(),
    )
    .expect("Failed to load spacex_launch_dash.csv");
    Dashboard::new(Arc::new(dataset), DashboardConfig::default())
}

fn pie_values(figure: &Figure) -> Vec<(String, f64)> {
    match &figure.data[0] {
        Trace::Pie { labels, values, .. } => labels.iter().cloned().zip(values.iter().copied()).collect(),
        other => panic!("expected a pie trace, got {:?}", other),
    }
}

#[test]
fn test_load_sample_dataset() {
    let dashboard = sample_dashboard();
    let dataset = dashboard.dataset();

    assert_eq!(dataset.len(), 36);
    assert_eq!(
        dataset.sites(),
        &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
    );
    assert_eq!(dataset.payload_bounds(), Some((0.0, 9600.0)));
    assert!(dataset
        .source()
        .is_some_and(|s| s.ends_with("spacex_launch_dash.csv")));
}

#[test]
fn test_all_sites_pie_covers_full_dataset() {
    let dashboard = sample_dashboard();
    let slices = pie_values(&dashboard.success_pie(&SiteFilter::All));

    assert_eq!(
        slices,
        vec![
            ("CCAFS LC-40".to_string(), 2.0),
            ("VAFB SLC-4E".to_string(), 3.0),
            ("KSC LC-39A".to_string(), 5.0),
            ("CCAFS SLC-40".to_string(), 3.0),
        ]
    );

    let total_successes = dashboard
        .dataset()
        .records()
        .iter()
        .filter(|r| r.outcome.is_success())
        .count();
    let pie_total: f64 = slices.iter().map(|(_, v)| v).sum();
    assert_eq!(pie_total, total_successes as f64);
}

#[test]
fn test_site_pie_is_restricted_to_site() {
    let dashboard = sample_dashboard();

    for site in dashboard.dataset().sites().to_vec() {
        let slices = pie_values(&dashboard.success_pie(&SiteFilter::parse(&site)));
        let launches: f64 = slices.iter().map(|(_, v)| v).sum();
        let expected = dashboard
            .dataset()
            .records()
            .iter()
            .filter(|r| r.site == site)
            .count();
        assert_eq!(launches, expected as f64, "site {}", site);
    }

    let ksc = pie_values(&dashboard.success_pie(&SiteFilter::parse("KSC LC-39A")));
    assert_eq!(
        ksc,
        vec![("Success".to_string(), 5.0), ("Failure".to_string(), 2.0)]
    );
}

#[test]
fn test_scatter_range_is_inclusive() {
    let dashboard = sample_dashboard();

    // 9600 kg appears twice at VAFB, both on the upper bound
    let top = dashboard.payload_scatter(&SiteFilter::All, PayloadRange::new(9600.0, 9600.0));
    assert_eq!(top.point_count(), 2);

    // 0 kg appears twice at CCAFS LC-40, both on the lower bound
    let bottom = dashboard.payload_scatter(
        &SiteFilter::parse("CCAFS LC-40"),
        PayloadRange::new(0.0, 0.0),
    );
    assert_eq!(bottom.point_count(), 2);

    let full = dashboard.payload_scatter(&SiteFilter::All, dashboard.default_range());
    assert_eq!(full.point_count(), 36);
}

#[test]
fn test_empty_range_yields_empty_chart() {
    let dashboard = sample_dashboard();

    let inverted = dashboard.payload_scatter(&SiteFilter::All, PayloadRange::new(5000.0, 4000.0));
    assert!(inverted.is_empty());

    let gap = dashboard.payload_scatter(&SiteFilter::All, PayloadRange::new(9601.0, 10000.0));
    assert!(gap.is_empty());
}

#[test]
fn test_layout_from_sample() {
    let layout = sample_dashboard().layout();
    assert_eq!(layout.dropdown.options.len(), 5);
    assert_eq!(layout.slider.value, [0.0, 9600.0]);

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["dropdown"]["id"], "site-dropdown");
    assert_eq!(json["slider"]["id"], "payload-slider");
    assert_eq!(json["scatter_chart_id"], "success-payload-scatter-chart");
}
