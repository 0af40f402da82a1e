//! Data Processor Module
//! Group-and-count derivations feeding each chart.

use super::cantons::canton_name;
use super::record::PlantRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Plants per canton full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CantonCount {
    pub canton_name: String,
    pub count: usize,
}

/// Plants per energy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub energy_source_level_2: String,
    pub count: usize,
}

/// Plants per commissioning year and energy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCategoryCount {
    pub year: i32,
    pub energy_source_level_2: String,
    pub count: usize,
}

/// Per-canton counts plus the codes that had no canton name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CantonTable {
    pub rows: Vec<CantonCount>,
    /// Distinct unknown codes, sorted. Their records are not in `rows`.
    pub unmapped: Vec<String>,
}

impl CantonTable {
    pub fn get(&self, canton_name: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| r.canton_name == canton_name)
            .map(|r| r.count)
    }
}

/// The three aggregate tables behind the charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTables {
    pub by_canton: CantonTable,
    pub by_category: Vec<CategoryCount>,
    pub by_year_category: Vec<YearCategoryCount>,
}

impl DashboardTables {
    /// Sorted distinct categories; their order fixes the category colours.
    pub fn categories(&self) -> Vec<String> {
        self.by_category
            .iter()
            .map(|c| c.energy_source_level_2.clone())
            .collect()
    }
}

/// Aggregations over loaded records. All rows come out sorted by key.
pub struct DataProcessor;

impl DataProcessor {
    /// Count records per canton full name, resolving codes with `lookup`.
    ///
    /// Records whose code is empty or does not resolve are left out of the
    /// groups.
    pub fn count_by_canton<F>(records: &[PlantRecord], lookup: F) -> CantonTable
    where
        F: Fn(&str) -> Option<&'static str>,
    {
        let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
        let mut unmapped: BTreeMap<&str, usize> = BTreeMap::new();
        let mut without_code = 0usize;

        for record in records {
            let Some(code) = record.canton.as_deref() else {
                without_code += 1;
                continue;
            };
            match lookup(code) {
                Some(name) => *groups.entry(name).or_default() += 1,
                None => *unmapped.entry(code).or_default() += 1,
            }
        }

        if !unmapped.is_empty() || without_code > 0 {
            let skipped: usize = unmapped.values().sum::<usize>() + without_code;
            warn!(
                records = skipped,
                without_code,
                codes = ?unmapped.keys().collect::<Vec<_>>(),
                "plants without a known canton, left out of per-canton counts"
            );
        }

        CantonTable {
            rows: groups
                .into_iter()
                .map(|(name, count)| CantonCount {
                    canton_name: name.to_string(),
                    count,
                })
                .collect(),
            unmapped: unmapped.into_keys().map(str::to_string).collect(),
        }
    }

    /// Count records per energy_source_level_2. Records without a category
    /// are not counted.
    pub fn count_by_energy_category(records: &[PlantRecord]) -> Vec<CategoryCount> {
        let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
        for category in records
            .iter()
            .filter_map(|r| r.energy_source_level_2.as_deref())
        {
            *groups.entry(category).or_default() += 1;
        }

        groups
            .into_iter()
            .map(|(category, count)| CategoryCount {
                energy_source_level_2: category.to_string(),
                count,
            })
            .collect()
    }

    /// Count records per (commissioning year, energy_source_level_2).
    /// Records missing either key are not counted.
    pub fn count_by_year_and_category(records: &[PlantRecord]) -> Vec<YearCategoryCount> {
        let mut groups: BTreeMap<(i32, &str), usize> = BTreeMap::new();
        for record in records {
            if let (Some(year), Some(category)) =
                (record.year(), record.energy_source_level_2.as_deref())
            {
                *groups.entry((year, category)).or_default() += 1;
            }
        }

        groups
            .into_iter()
            .map(|((year, category), count)| YearCategoryCount {
                year,
                energy_source_level_2: category.to_string(),
                count,
            })
            .collect()
    }

    /// Run all three aggregations with the built-in canton table.
    pub fn summarize(records: &[PlantRecord]) -> DashboardTables {
        let tables = DashboardTables {
            by_canton: Self::count_by_canton(records, canton_name),
            by_category: Self::count_by_energy_category(records),
            by_year_category: Self::count_by_year_and_category(records),
        };
        debug!(
            cantons = tables.by_canton.rows.len(),
            categories = tables.by_category.len(),
            year_category_pairs = tables.by_year_category.len(),
            "aggregates computed"
        );
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cantons::CANTON_NAMES;
    use chrono::NaiveDate;

    fn record(canton: &str, source: &str, date: &str) -> PlantRecord {
        PlantRecord {
            company: "Plant AG".to_string(),
            canton: Some(canton.to_string()),
            energy_source_level_2: Some(source.to_string()),
            electrical_capacity: Some(1.0),
            commissioning_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            lat: Some(46.8),
            lon: Some(8.2),
        }
    }

    fn sample() -> Vec<PlantRecord> {
        vec![
            record("ZH", "Solar", "2010-01-01"),
            record("ZH", "Solar", "2010-06-15"),
            record("BE", "Hydro", "1950-03-01"),
            record("VS", "Hydro", "2010-12-31"),
            record("VS", "Wind", "2016-07-01"),
            record("GR", "Solar", "2016-02-02"),
            record("GR", "Bioenergy", "2005-05-05"),
        ]
    }

    #[test]
    fn test_count_by_canton_scenario() {
        let records = vec![
            record("ZH", "Solar", "2010-01-01"),
            record("ZH", "Solar", "2011-01-01"),
            record("BE", "Hydro", "2012-01-01"),
        ];
        let table = DataProcessor::count_by_canton(&records, canton_name);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.get("Zürich"), Some(2));
        assert_eq!(table.get("Bern"), Some(1));
        assert!(table.unmapped.is_empty());
    }

    #[test]
    fn test_count_by_canton_matches_records_per_code() {
        let records = sample();
        let table = DataProcessor::count_by_canton(&records, canton_name);

        for (code, name) in CANTON_NAMES {
            let expected = records
                .iter()
                .filter(|r| r.canton.as_deref() == Some(code))
                .count();
            if expected > 0 {
                assert_eq!(table.get(name), Some(expected), "canton {code}");
            } else {
                assert_eq!(table.get(name), None);
            }
        }
    }

    #[test]
    fn test_count_by_canton_unmapped_codes() {
        let mut records = sample();
        records.push(record("FL", "Solar", "2020-01-01"));
        records.push(record("", "Solar", "2020-01-01"));
        records.push(record("FL", "Hydro", "2020-01-01"));
        let mut no_canton = record("ZH", "Solar", "2020-01-01");
        no_canton.canton = None;
        records.push(no_canton);

        let table = DataProcessor::count_by_canton(&records, canton_name);
        assert_eq!(table.unmapped, vec!["".to_string(), "FL".to_string()]);

        let counted: usize = table.rows.iter().map(|r| r.count).sum();
        assert_eq!(counted, sample().len());
    }

    #[test]
    fn test_count_by_canton_custom_lookup() {
        let records = sample();
        let table = DataProcessor::count_by_canton(&records, |code| match code {
            "ZH" => Some("Zurich"),
            _ => None,
        });
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.get("Zurich"), Some(2));
        assert_eq!(table.unmapped, vec!["BE", "GR", "VS"]);
    }

    #[test]
    fn test_categories_follow_category_table() {
        let tables = DataProcessor::summarize(&sample());
        assert_eq!(tables.categories(), vec!["Bioenergy", "Hydro", "Solar", "Wind"]);
    }

    #[test]
    fn test_count_by_energy_category_sums_to_total() {
        let records = sample();
        let table = DataProcessor::count_by_energy_category(&records);

        let total: usize = table.iter().map(|r| r.count).sum();
        assert_eq!(total, records.len());

        let keys: Vec<&str> = table
            .iter()
            .map(|r| r.energy_source_level_2.as_str())
            .collect();
        assert_eq!(keys, vec!["Bioenergy", "Hydro", "Solar", "Wind"]);
        assert_eq!(table[2].count, 3);
    }

    #[test]
    fn test_count_by_year_and_category_scenario() {
        let records = vec![
            record("ZH", "Solar", "2010-01-01"),
            record("BE", "Solar", "2010-06-15"),
        ];
        let table = DataProcessor::count_by_year_and_category(&records);
        assert_eq!(
            table,
            vec![YearCategoryCount {
                year: 2010,
                energy_source_level_2: "Solar".to_string(),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_year_totals_match_category_totals() {
        let records = sample();
        let by_category = DataProcessor::count_by_energy_category(&records);
        let by_year = DataProcessor::count_by_year_and_category(&records);

        for category in &by_category {
            let summed: usize = by_year
                .iter()
                .filter(|r| r.energy_source_level_2 == category.energy_source_level_2)
                .map(|r| r.count)
                .sum();
            assert_eq!(summed, category.count);
        }
    }

    #[test]
    fn test_year_rows_sorted_by_year_then_category() {
        let table = DataProcessor::count_by_year_and_category(&sample());
        let keys: Vec<(i32, &str)> = table
            .iter()
            .map(|r| (r.year, r.energy_source_level_2.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], (1950, "Hydro"));
    }

    #[test]
    fn test_missing_date_only_leaves_year_table() {
        let mut records = sample();
        let mut undated = record("BE", "Solar", "2010-01-01");
        undated.commissioning_date = None;
        records.push(undated);
        let mut uncategorised = record("BE", "Solar", "2010-01-01");
        uncategorised.energy_source_level_2 = None;
        records.push(uncategorised);

        let tables = DataProcessor::summarize(&records);
        assert_eq!(tables.by_canton.get("Bern"), Some(3));

        let solar = tables
            .by_category
            .iter()
            .find(|c| c.energy_source_level_2 == "Solar")
            .unwrap();
        assert_eq!(solar.count, 4);

        let dated_solar: usize = tables
            .by_year_category
            .iter()
            .filter(|r| r.energy_source_level_2 == "Solar")
            .map(|r| r.count)
            .sum();
        assert_eq!(dated_solar, 3);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records = sample();
        let first = serde_json::to_vec(&DataProcessor::summarize(&records)).unwrap();
        let second = serde_json::to_vec(&DataProcessor::summarize(&records)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let tables = DataProcessor::summarize(&[]);
        assert_eq!(tables, DashboardTables::default());
        assert!(tables.categories().is_empty());
    }
}
