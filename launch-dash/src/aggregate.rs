//! Single-pass aggregates behind the proportional chart

use crate::launch::Outcome;
use crate::view::LaunchView;
use serde::Serialize;

/// One slice of a proportional chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Sum of the class flag per site, i.e. successful launches per site.
/// Sites keep their first-appearance order and stay in the result with 0.
pub fn success_by_site(view: &LaunchView) -> Vec<Slice> {
    let mut slices: Vec<Slice> = Vec::new();
    for record in view.records() {
        let value = f64::from(record.outcome.class_value());
        match slices.iter_mut().find(|s| s.label == record.site) {
            Some(slice) => slice.value += value,
            None => slices.push(Slice {
                label: record.site.clone(),
                value,
            }),
        }
    }
    slices
}

/// Launch count per outcome, largest first. Ties keep first-appearance order.
pub fn outcome_counts(view: &LaunchView) -> Vec<Slice> {
    let mut counts: Vec<(Outcome, usize)> = Vec::with_capacity(2);
    for record in view.records() {
        match counts.iter_mut().find(|(o, _)| *o == record.outcome) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.outcome, 1)),
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(outcome, count)| Slice {
            label: outcome.label().to_string(),
            value: count as f64,
        })
        .collect()
}

/// Points of one color group in the scatter chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGroup {
    pub category: String,
    pub payload_mass_kg: Vec<f64>,
    pub class: Vec<u8>,
}

/// Split the view into booster-category groups in first-appearance order
pub fn points_by_category(view: &LaunchView) -> Vec<PointGroup> {
    let mut groups: Vec<PointGroup> = Vec::new();
    for record in view.records() {
        let idx = match groups
            .iter()
            .position(|g| g.category == record.booster_category)
        {
            Some(idx) => idx,
            None => {
                groups.push(PointGroup {
                    category: record.booster_category.clone(),
                    payload_mass_kg: Vec::new(),
                    class: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[idx].payload_mass_kg.push(record.payload_mass_kg);
        groups[idx].class.push(record.outcome.class_value());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::{ColumnMapping, LaunchDataset, LaunchRecord};
    use crate::view::SiteFilter;
    use std::sync::Arc;

    fn view() -> LaunchView {
        let rows = [
            ("CCAFS LC-40", 0.0, "v1.0", Outcome::Failure),
            ("CCAFS LC-40", 525.0, "v1.0", Outcome::Failure),
            ("VAFB SLC-4E", 500.0, "v1.1", Outcome::Failure),
            ("KSC LC-39A", 2490.0, "FT", Outcome::Success),
            ("CCAFS LC-40", 3136.0, "FT", Outcome::Success),
            ("KSC LC-39A", 5300.0, "FT", Outcome::Success),
            ("KSC LC-39A", 6070.0, "B4", Outcome::Failure),
        ];
        let records = rows
            .iter()
            .map(|(site, mass, booster, outcome)| LaunchRecord {
                site: site.to_string(),
                payload_mass_kg: *mass,
                booster_category: booster.to_string(),
                outcome: *outcome,
            })
            .collect();
        LaunchView::new(Arc::new(LaunchDataset::from_records(
            records,
            ColumnMapping::default(),
        )))
    }

    #[test]
    fn test_success_by_site_sums_class() {
        let slices = success_by_site(&view());
        assert_eq!(
            slices,
            vec![
                Slice { label: "CCAFS LC-40".into(), value: 1.0 },
                Slice { label: "VAFB SLC-4E".into(), value: 0.0 },
                Slice { label: "KSC LC-39A".into(), value: 2.0 },
            ]
        );
    }

    #[test]
    fn test_outcome_counts_for_site() {
        let ksc = view().with_site(&SiteFilter::parse("KSC LC-39A"));
        let slices = outcome_counts(&ksc);
        assert_eq!(
            slices,
            vec![
                Slice { label: "Success".into(), value: 2.0 },
                Slice { label: "Failure".into(), value: 1.0 },
            ]
        );
    }

    #[test]
    fn test_outcome_counts_only_present_outcomes() {
        let vafb = view().with_site(&SiteFilter::parse("VAFB SLC-4E"));
        let slices = outcome_counts(&vafb);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Failure");
    }

    #[test]
    fn test_outcome_counts_tie_keeps_first_seen() {
        let ccafs = view().with_site(&SiteFilter::parse("CCAFS LC-40"));
        // two failures, one success
        assert_eq!(outcome_counts(&ccafs)[0].label, "Failure");

        let tied = view().filter(|r| r.payload_mass_kg >= 5300.0);
        let labels: Vec<String> = outcome_counts(&tied).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Success", "Failure"]);
    }

    #[test]
    fn test_points_by_category() {
        let groups = points_by_category(&view());
        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["v1.0", "v1.1", "FT", "B4"]);

        let ft = &groups[2];
        assert_eq!(ft.payload_mass_kg, vec![2490.0, 3136.0, 5300.0]);
        assert_eq!(ft.class, vec![1, 1, 1]);
    }

    #[test]
    fn test_empty_view_aggregates() {
        let empty = view().with_site(&SiteFilter::parse("nowhere"));
        assert!(success_by_site(&empty).is_empty());
        assert!(outcome_counts(&empty).is_empty());
        assert!(points_by_category(&empty).is_empty());
    }
}
