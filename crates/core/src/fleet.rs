//! Fleet query engine.
//!
//! Composes free-text search, categorical filters, grouped summary counts,
//! deterministic ordering, and fixed-size pagination over the component
//! collection. Summary counts are computed from the filtered subset, not the
//! full collection -- filtering by site collapses the site breakdown to a
//! single entry, which is the observed product behavior and kept on purpose.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{Category, Condition, ScaffoldComponent, Site};

/// Components per page.
pub const PAGE_SIZE: usize = 10;

/// Filter criteria for a fleet listing. All criteria optional, AND-combined;
/// free text is OR-matched across `name` and `asset_code`.
///
/// Enum-valued criteria stay raw strings: a provided-but-unrecognized value
/// matches nothing (zero results), never a hard failure. An empty string is
/// treated as absent for every criterion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetQuery {
    /// Free-text term, case-insensitive substring over name OR asset_code.
    pub q: Option<String>,
    pub site: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    /// The literal string "true" means in use; any other provided value
    /// means not in use.
    pub in_use: Option<String>,
}

impl FleetQuery {
    fn provided(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Whether a single component satisfies every provided criterion.
    pub fn matches(&self, component: &ScaffoldComponent) -> bool {
        if let Some(term) = Self::provided(&self.q) {
            let term = term.to_lowercase();
            let hit = component.name.to_lowercase().contains(&term)
                || component.asset_code.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(raw) = Self::provided(&self.site) {
            match Site::parse(raw) {
                Some(site) if component.site == site => {}
                _ => return false,
            }
        }
        if let Some(raw) = Self::provided(&self.category) {
            match Category::parse(raw) {
                Some(category) if component.category == category => {}
                _ => return false,
            }
        }
        if let Some(raw) = Self::provided(&self.condition) {
            match Condition::parse(raw) {
                Some(condition) if component.condition == condition => {}
                _ => return false,
            }
        }
        if let Some(raw) = Self::provided(&self.in_use) {
            if component.is_in_use != (raw == "true") {
                return false;
            }
        }
        true
    }
}

/// One page of query results plus summary counts over the filtered subset.
#[derive(Debug, Clone, Serialize)]
pub struct FleetView {
    pub items: Vec<ScaffoldComponent>,
    /// Total matches across all pages.
    pub total: usize,
    /// Resolved page number after clamping.
    pub page: usize,
    pub page_count: usize,
    /// Matches per site label, ascending by label.
    pub site_counts: BTreeMap<&'static str, usize>,
    /// Matches per condition label, ascending by label.
    pub condition_counts: BTreeMap<&'static str, usize>,
}

/// Filter, summarize, order, and paginate the fleet.
///
/// Ordering is ascending by condition *label* then name -- the label's
/// lexical order (GOOD, NEW, REPAIR, SCRAP), not declaration order. An
/// out-of-range `page` clamps to the nearest valid page; an absent one
/// means page 1.
pub fn run_query(
    query: &FleetQuery,
    page: Option<u32>,
    fleet: Vec<ScaffoldComponent>,
) -> FleetView {
    let mut matched: Vec<ScaffoldComponent> =
        fleet.into_iter().filter(|c| query.matches(c)).collect();

    let mut site_counts = BTreeMap::new();
    let mut condition_counts = BTreeMap::new();
    for component in &matched {
        *site_counts.entry(component.site.label()).or_insert(0) += 1;
        *condition_counts
            .entry(component.condition.label())
            .or_insert(0) += 1;
    }

    matched.sort_by(|a, b| {
        (a.condition.label(), a.name.as_str()).cmp(&(b.condition.label(), b.name.as_str()))
    });

    let total = matched.len();
    let page_count = total.div_ceil(PAGE_SIZE).max(1);
    let page = (page.unwrap_or(1) as usize).clamp(1, page_count);
    let items: Vec<_> = matched
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    FleetView {
        items,
        total,
        page,
        page_count,
        site_counts,
        condition_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn component(
        id: i64,
        asset_code: &str,
        name: &str,
        condition: Condition,
        site: Site,
        in_use: bool,
    ) -> ScaffoldComponent {
        let stamp = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        ScaffoldComponent {
            id,
            asset_code: asset_code.to_string(),
            name: name.to_string(),
            category: Category::Tube,
            length_mm: Some(3000),
            weight_kg: Decimal::new(1250, 2),
            condition,
            site,
            location: None,
            last_inspection: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            next_inspection: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            is_in_use: in_use,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn sample_fleet() -> Vec<ScaffoldComponent> {
        vec![
            component(1, "TUBE-001", "Steel Tube", Condition::Good, Site::Secunda, true),
            component(2, "BOARD-001", "Walk Board", Condition::New, Site::Secunda, false),
            component(3, "JACK-001", "Base Jack", Condition::Repair, Site::Sasolburg, false),
        ]
    }

    fn query(f: impl FnOnce(&mut FleetQuery)) -> FleetQuery {
        let mut q = FleetQuery::default();
        f(&mut q);
        q
    }

    #[test]
    fn site_filter_narrows_results_and_counts() {
        let view = run_query(
            &query(|q| q.site = Some("Secunda".to_string())),
            None,
            sample_fleet(),
        );
        assert_eq!(view.total, 2);
        assert_eq!(view.site_counts, BTreeMap::from([("Secunda", 2)]));
        assert!(!view.site_counts.contains_key("Sasolburg"));
    }

    #[test]
    fn counts_come_from_the_filtered_subset() {
        let view = run_query(
            &query(|q| q.condition = Some("GOOD".to_string())),
            None,
            sample_fleet(),
        );
        assert_eq!(view.condition_counts, BTreeMap::from([("GOOD", 1)]));
        assert_eq!(view.site_counts, BTreeMap::from([("Secunda", 1)]));
    }

    #[test]
    fn unfiltered_counts_cover_all_groups_in_label_order() {
        let view = run_query(&FleetQuery::default(), None, sample_fleet());
        assert_eq!(view.total, 3);
        let sites: Vec<_> = view.site_counts.keys().copied().collect();
        assert_eq!(sites, vec!["Sasolburg", "Secunda"]);
        let conditions: Vec<_> = view.condition_counts.keys().copied().collect();
        assert_eq!(conditions, vec!["GOOD", "NEW", "REPAIR"]);
    }

    #[test]
    fn free_text_matches_name_or_code_case_insensitively() {
        let fleet = vec![
            component(1, "T-1", "Board X", Condition::Good, Site::Secunda, false),
            component(2, "HEAVY-BOARD-2", "Plank", Condition::Good, Site::Secunda, false),
            component(3, "J-1", "Base Jack", Condition::Good, Site::Secunda, false),
        ];
        let view = run_query(&query(|q| q.q = Some("board".to_string())), None, fleet);
        assert_eq!(view.total, 2);
        let ids: Vec<_> = view.items.iter().map(|c| c.id).collect();
        assert!(ids.contains(&1) && ids.contains(&2));
    }

    #[test]
    fn in_use_filter_honors_true_literal_only() {
        let view = run_query(
            &query(|q| q.in_use = Some("true".to_string())),
            None,
            sample_fleet(),
        );
        assert_eq!(view.total, 1);
        assert!(view.items[0].is_in_use);

        // Any other provided value means "not in use".
        let view = run_query(
            &query(|q| q.in_use = Some("yes".to_string())),
            None,
            sample_fleet(),
        );
        assert_eq!(view.total, 2);
        assert!(view.items.iter().all(|c| !c.is_in_use));
    }

    #[test]
    fn omitted_in_use_returns_everything() {
        let view = run_query(&FleetQuery::default(), None, sample_fleet());
        assert_eq!(view.total, 3);
    }

    #[test]
    fn default_ordering_is_condition_label_then_name() {
        let fleet = vec![
            component(1, "A", "Zeta", Condition::New, Site::Secunda, false),
            component(2, "B", "Alpha", Condition::Repair, Site::Secunda, false),
            component(3, "C", "Beta", Condition::Good, Site::Secunda, false),
            component(4, "D", "Alpha", Condition::Good, Site::Secunda, false),
            component(5, "E", "Mu", Condition::Scrap, Site::Secunda, false),
        ];
        let view = run_query(&FleetQuery::default(), None, fleet);
        let order: Vec<_> = view
            .items
            .iter()
            .map(|c| (c.condition.label(), c.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("GOOD", "Alpha"),
                ("GOOD", "Beta"),
                ("NEW", "Zeta"),
                ("REPAIR", "Alpha"),
                ("SCRAP", "Mu"),
            ]
        );
    }

    #[test]
    fn unrecognized_enum_criteria_yield_zero_matches_not_errors() {
        for q in [
            query(|q| q.site = Some("Atlantis".to_string())),
            query(|q| q.category = Some("Ladder".to_string())),
            query(|q| q.condition = Some("BROKEN".to_string())),
        ] {
            let view = run_query(&q, None, sample_fleet());
            assert_eq!(view.total, 0);
            assert!(view.items.is_empty());
            assert!(view.site_counts.is_empty());
            assert!(view.condition_counts.is_empty());
            assert_eq!(view.page, 1);
            assert_eq!(view.page_count, 1);
        }
    }

    #[test]
    fn empty_string_criteria_are_treated_as_absent() {
        let q = query(|q| {
            q.q = Some(String::new());
            q.site = Some(String::new());
            q.in_use = Some(String::new());
        });
        let view = run_query(&q, None, sample_fleet());
        assert_eq!(view.total, 3);
    }

    #[test]
    fn pagination_is_fixed_size_and_clamps_out_of_range_pages() {
        let fleet: Vec<_> = (0..25)
            .map(|i| {
                component(
                    i,
                    &format!("T-{i:03}"),
                    &format!("Tube {i:03}"),
                    Condition::Good,
                    Site::Secunda,
                    false,
                )
            })
            .collect();

        let view = run_query(&FleetQuery::default(), Some(2), fleet.clone());
        assert_eq!(view.page, 2);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.items.len(), PAGE_SIZE);
        assert_eq!(view.items[0].name, "Tube 010");

        // Past the end clamps to the last page.
        let view = run_query(&FleetQuery::default(), Some(99), fleet.clone());
        assert_eq!(view.page, 3);
        assert_eq!(view.items.len(), 5);

        // Zero clamps to the first page.
        let view = run_query(&FleetQuery::default(), Some(0), fleet);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let q = query(|q| {
            q.site = Some("Secunda".to_string());
            q.condition = Some("NEW".to_string());
        });
        let view = run_query(&q, None, sample_fleet());
        assert_eq!(view.total, 1);
        assert_eq!(view.items[0].asset_code, "BOARD-001");
    }
}
