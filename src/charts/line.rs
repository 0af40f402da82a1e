//! Plants commissioned per year, one series per energy category.

use super::palette::category_color;
use crate::data::YearCategoryCount;
use egui::Color32;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesData {
    pub category: String,
    pub color: Color32,
    /// (year, count) sorted by year.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    pub series: Vec<LineSeriesData>,
}

impl LineChart {
    /// `categories` fixes colour order so it matches the scatter map.
    pub fn build(by_year_category: &[YearCategoryCount], categories: &[String]) -> Self {
        let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for row in by_year_category {
            grouped
                .entry(row.energy_source_level_2.as_str())
                .or_default()
                .push([row.year as f64, row.count as f64]);
        }

        let series = grouped
            .into_iter()
            .map(|(category, mut points)| {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                let index = categories
                    .iter()
                    .position(|c| c == category)
                    .unwrap_or(categories.len());
                LineSeriesData {
                    category: category.to_string(),
                    color: category_color(index),
                    points,
                }
            })
            .collect();

        Self { series }
    }

    /// Largest count across all series.
    pub fn max_count(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p[1]))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, category: &str, count: usize) -> YearCategoryCount {
        YearCategoryCount {
            year,
            energy_source_level_2: category.to_string(),
            count,
        }
    }

    #[test]
    fn test_series_per_category() {
        let rows = vec![
            row(2001, "Hydro", 3),
            row(2001, "Solar", 1),
            row(2002, "Solar", 7),
            row(1999, "Solar", 2),
        ];
        let categories = vec!["Hydro".to_string(), "Solar".to_string()];
        let chart = LineChart::build(&rows, &categories);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].category, "Hydro");
        assert_eq!(chart.series[0].points, vec![[2001.0, 3.0]]);
        assert_eq!(chart.series[0].color, category_color(0));

        let solar = &chart.series[1];
        assert_eq!(
            solar.points,
            vec![[1999.0, 2.0], [2001.0, 1.0], [2002.0, 7.0]]
        );
        assert_eq!(solar.color, category_color(1));
        assert_eq!(chart.max_count(), 7.0);
    }

    #[test]
    fn test_empty() {
        let chart = LineChart::build(&[], &[]);
        assert!(chart.series.is_empty());
        assert_eq!(chart.max_count(), 0.0);
    }
}
