//! Filtered views over a guest list.

use super::columns::ColumnLayout;
use super::records::{GuestRecord, RecordSet};

/// City filter choice. `All` is selected with the literal sentinel "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CityFilter {
    #[default]
    All,
    City(String),
}

impl CityFilter {
    pub const SENTINEL: &'static str = "all";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::SENTINEL {
            CityFilter::All
        } else {
            CityFilter::City(raw.to_string())
        }
    }
}

/// Operator-supplied filter state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct GuestFilter {
    /// Case-insensitive substring matched against the identity column.
    /// Empty matches everything.
    pub search: String,
    pub city: CityFilter,
}

/// Select the records matching `filter`, preserving input order. Returns a
/// view; the underlying records are never touched.
pub fn filter_guests<'a, I>(
    records: I,
    layout: &ColumnLayout,
    filter: &GuestFilter,
) -> Vec<&'a GuestRecord>
where
    I: IntoIterator<Item = &'a GuestRecord>,
{
    let needle = filter.search.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            matches_identity(record, layout, &needle) && matches_city(record, layout, &filter.city)
        })
        .collect()
}

fn matches_identity(record: &GuestRecord, layout: &ColumnLayout, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    match record.cell(&layout.name) {
        Some(name) => name.to_lowercase().contains(needle),
        // No identity column: a non-empty search can never match.
        None => false,
    }
}

fn matches_city(record: &GuestRecord, layout: &ColumnLayout, filter: &CityFilter) -> bool {
    match filter {
        CityFilter::All => true,
        CityFilter::City(city) => record.cell(&layout.city) == Some(city.as_str()),
    }
}

/// Distinct city values in first-seen order. Empty when the city role is
/// absent. Empty cell values count as a value like any other.
pub fn distinct_cities(set: &RecordSet, layout: &ColumnLayout) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    if !layout.city.is_present() {
        return cities;
    }
    for record in set.records() {
        if let Some(city) = record.cell(&layout.city) {
            if !cities.iter().any(|seen| seen == city) {
                cities.push(city.to_string());
            }
        }
    }
    cities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_from(rows: &[&[&str]]) -> RecordSet {
        RecordSet::from_grid(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn guest_list() -> RecordSet {
        set_from(&[
            &["Nome", "Cidade"],
            &["Ana Silva", "Lisboa"],
            &["Bruno Costa", "Porto"],
            &["ANA", "Lisboa"],
            &["Carla", ""],
        ])
    }

    #[test]
    fn empty_search_and_all_cities_is_the_identity_transform() {
        let set = guest_list();
        let layout = set.layout();
        let filtered = filter_guests(set.records(), &layout, &GuestFilter::default());
        let expected: Vec<&GuestRecord> = set.records().iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn identity_search_is_a_case_insensitive_substring() {
        let set = guest_list();
        let layout = set.layout();
        let filter = GuestFilter { search: "ana".into(), ..Default::default() };

        let filtered = filter_guests(set.records(), &layout, &filter);
        let names: Vec<_> = filtered
            .iter()
            .filter_map(|r| r.cell(&layout.name))
            .collect();
        assert_eq!(names, ["Ana Silva", "ANA"]);
    }

    #[test]
    fn city_filter_is_exact_and_all_disables_it() {
        let set = guest_list();
        let layout = set.layout();

        let lisbon = GuestFilter { city: CityFilter::parse("Lisboa"), ..Default::default() };
        assert_eq!(filter_guests(set.records(), &layout, &lisbon).len(), 2);

        let lowercase = GuestFilter { city: CityFilter::parse("lisboa"), ..Default::default() };
        assert!(filter_guests(set.records(), &layout, &lowercase).is_empty());

        let all = GuestFilter { city: CityFilter::parse("all"), ..Default::default() };
        assert_eq!(filter_guests(set.records(), &layout, &all).len(), set.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let set = guest_list();
        let layout = set.layout();
        let filter = GuestFilter {
            search: "a".into(),
            city: CityFilter::parse("Lisboa"),
        };

        let once = filter_guests(set.records(), &layout, &filter);
        let twice = filter_guests(once.clone(), &layout, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn search_without_a_name_column_matches_nothing() {
        let set = set_from(&[&["Cidade"], &["Lisboa"]]);
        let layout = set.layout();

        let searched = GuestFilter { search: "lis".into(), ..Default::default() };
        assert!(filter_guests(set.records(), &layout, &searched).is_empty());

        // An empty search still matches every record.
        let unsearched = GuestFilter::default();
        assert_eq!(filter_guests(set.records(), &layout, &unsearched).len(), 1);
    }

    #[test]
    fn distinct_cities_dedup_in_first_seen_order() {
        let set = guest_list();
        let layout = set.layout();
        assert_eq!(distinct_cities(&set, &layout), ["Lisboa", "Porto", ""]);
    }

    #[test]
    fn distinct_cities_is_empty_without_a_city_column() {
        let set = set_from(&[&["Nome"], &["Ana"]]);
        let layout = set.layout();
        assert!(distinct_cities(&set, &layout).is_empty());
    }
}
