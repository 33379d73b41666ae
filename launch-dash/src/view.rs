use crate::launch::{LaunchDataset, LaunchRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Dropdown value that stands for every launch site
pub const ALL_SITES: &str = "ALL";

/// Launch site selection from the dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// `ALL` (or nothing) selects every site, anything else is an exact site name
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(name) => name == site,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteFilter::All)
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "{}", ALL_SITES),
            SiteFilter::Site(name) => write!(f, "{}", name),
        }
    }
}

/// Payload mass window in kg, inclusive at both ends.
/// `low > high` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Build from the two handles of the range slider
    pub fn from_slider(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        // NaN bounds count as empty
        !(self.low <= self.high)
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.low, self.high)
    }
}

/// A filtered view over a shared dataset. Only row indices are stored.
#[derive(Clone)]
pub struct LaunchView {
    source: Arc<LaunchDataset>,
    visible_rows: Vec<usize>,
}

impl LaunchView {
    /// Create a new view showing every record
    pub fn new(source: Arc<LaunchDataset>) -> Self {
        let row_count = source.len();
        Self {
            source,
            visible_rows: (0..row_count).collect(),
        }
    }

    /// Filter rows based on a predicate
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&LaunchRecord) -> bool,
    {
        let source = &self.source;
        self.visible_rows.retain(|&idx| {
            source.get(idx).is_some_and(|record| predicate(record))
        });
        self
    }

    pub fn with_site(self, site: &SiteFilter) -> Self {
        if site.is_all() {
            return self;
        }
        self.filter(|record| site.matches(&record.site))
    }

    pub fn with_payload_range(self, range: PayloadRange) -> Self {
        self.filter(|record| range.contains(record.payload_mass_kg))
    }

    pub fn records(&self) -> impl Iterator<Item = &LaunchRecord> + '_ {
        self.visible_rows
            .iter()
            .filter_map(move |&idx| self.source.get(idx))
    }

    pub fn len(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_rows.is_empty()
    }

    pub fn source(&self) -> &LaunchDataset {
        &self.source
    }

    pub fn visible_row_indices(&self) -> &[usize] {
        &self.visible_rows
    }
}
