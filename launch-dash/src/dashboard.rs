//! Dashboard page description and the two chart callbacks
//!
//! The page has one dropdown (launch site) and one range selector (payload
//! mass). The pie chart depends on the dropdown, the scatter chart on both.
//! Callbacks are pure functions of their inputs over the shared dataset.

use crate::aggregate::{outcome_counts, points_by_category, success_by_site};
use crate::config::config::DashboardConfig;
use crate::figure::Figure;
use crate::launch::LaunchDataset;
use crate::view::{LaunchView, PayloadRange, SiteFilter, ALL_SITES};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const SUCCESS_PIE_ID: &str = "success-pie-chart";
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";
pub const PAYLOAD_SCATTER_ID: &str = "success-payload-scatter-chart";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Initial handle positions
    pub value: [f64; 2],
}

/// Everything the page needs to build its controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub dropdown: Dropdown,
    pub pie_chart_id: String,
    pub slider_caption: String,
    pub slider: RangeSlider,
    pub scatter_chart_id: String,
}

#[derive(Clone)]
pub struct Dashboard {
    dataset: Arc<LaunchDataset>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: Arc<LaunchDataset>, config: DashboardConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Arc<LaunchDataset> {
        &self.dataset
    }

    /// Full payload span of the data, `[0, 0]` for an empty dataset
    pub fn default_range(&self) -> PayloadRange {
        let (low, high) = self.dataset.payload_bounds().unwrap_or((0.0, 0.0));
        PayloadRange::new(low, high)
    }

    pub fn layout(&self) -> DashboardLayout {
        let mut options = vec![DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(self.dataset.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        let range = self.default_range();

        DashboardLayout {
            title: self.config.title.clone(),
            dropdown: Dropdown {
                id: SITE_DROPDOWN_ID.to_string(),
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            pie_chart_id: SUCCESS_PIE_ID.to_string(),
            slider_caption: "Payload range (Kg):".to_string(),
            slider: RangeSlider {
                id: PAYLOAD_SLIDER_ID.to_string(),
                min: self.config.slider_min,
                max: self.config.slider_max,
                step: self.config.slider_step,
                value: [range.low, range.high],
            },
            scatter_chart_id: PAYLOAD_SCATTER_ID.to_string(),
        }
    }

    /// Proportional chart for the dropdown value.
    ///
    /// `ALL` shows successful launches per site; a single site shows its
    /// success vs. failure counts. An unknown site yields an empty pie.
    pub fn success_pie(&self, site: &SiteFilter) -> Figure {
        let view = LaunchView::new(Arc::clone(&self.dataset)).with_site(site);

        let figure = match site {
            SiteFilter::All => {
                Figure::pie_chart("Total Successful Launches by Site", &success_by_site(&view))
            }
            SiteFilter::Site(name) => Figure::pie_chart(
                format!("Launch Outcomes for {}", name),
                &outcome_counts(&view),
            ),
        };

        debug!(
            target: "dashboard",
            "success_pie site={} rows={} slices={}",
            site,
            view.len(),
            figure.point_count()
        );
        figure
    }

    /// Payload vs. outcome scatter, colored by booster version category
    pub fn payload_scatter(&self, site: &SiteFilter, range: PayloadRange) -> Figure {
        let view = LaunchView::new(Arc::clone(&self.dataset))
            .with_payload_range(range)
            .with_site(site);

        let title = match site {
            SiteFilter::All => "Payload Mass (kg) vs Launch Success".to_string(),
            SiteFilter::Site(name) => format!("Payload Mass (kg) vs Launch Success for {}", name),
        };

        let columns = self.dataset.columns();
        let figure = Figure::scatter_chart(
            title,
            &points_by_category(&view),
            &columns.payload_mass,
            &columns.outcome,
            &columns.booster_category,
        );

        debug!(
            target: "dashboard",
            "payload_scatter site={} range={} points={}",
            site,
            range,
            figure.point_count()
        );
        figure
    }
}
