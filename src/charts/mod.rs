//! Charts module - chart models and rendering

mod line;
mod map;
mod palette;
mod pie;
mod plotter;

pub use line::LineChart;
pub use map::{ChoroplethChart, MapProjection, ScatterMapChart};
pub use pie::PieChart;
pub use plotter::ChartPlotter;

use crate::config::DashboardConfig;
use crate::data::{DashboardTables, Dataset};

/// The four dashboard charts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Choropleth,
    Pie,
    Line,
    ScatterMap,
}

impl ChartKind {
    /// Section header shown above the chart.
    pub fn header(self) -> &'static str {
        match self {
            ChartKind::Choropleth => "Number of energy sources per canton",
            ChartKind::Pie => "Percentage of Swiss power plants",
            ChartKind::Line => "Development of Sources of energy through the years",
            ChartKind::ScatterMap => "Sources and size of Energy according to location",
        }
    }

    /// Chart title, if the chart has one.
    pub fn title(self) -> Option<&'static str> {
        match self {
            ChartKind::Choropleth => Some("Clean Energy Sources per Canton"),
            ChartKind::Pie => Some("Composition of Swiss power plants"),
            ChartKind::Line => Some("Different industry developments over the years"),
            ChartKind::ScatterMap => None,
        }
    }
}

/// Chart models for one load, ready to draw.
#[derive(Debug, Clone)]
pub struct ChartSet {
    pub projection: MapProjection,
    pub choropleth: ChoroplethChart,
    pub pie: PieChart,
    pub line: LineChart,
    pub scatter: ScatterMapChart,
}

impl ChartSet {
    pub fn build(dataset: &Dataset, tables: &DashboardTables, config: &DashboardConfig) -> Self {
        let (lat, lon) = config.map_center;
        let projection = MapProjection::new(lat, lon);
        let categories = tables.categories();

        Self {
            projection,
            choropleth: ChoroplethChart::build(
                &tables.by_canton,
                &dataset.boundaries,
                &projection,
                config.simplify_tolerance,
            ),
            pie: PieChart::build(&tables.by_category),
            line: LineChart::build(&tables.by_year_category, &categories),
            scatter: ScatterMapChart::build(&dataset.records, &categories, &projection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::palette::category_color;
    use super::*;
    use crate::data::{DataProcessor, PlantRecord};
    use chrono::NaiveDate;
    use polars::prelude::DataFrame;

    fn dataset() -> Dataset {
        let record = |canton: &str, source: &str, year: i32| PlantRecord {
            company: "Test".to_string(),
            canton: Some(canton.to_string()),
            energy_source_level_2: Some(source.to_string()),
            electrical_capacity: Some(1.0),
            commissioning_date: NaiveDate::from_ymd_opt(year, 1, 1),
            lat: Some(46.9),
            lon: Some(8.0),
        };
        Dataset {
            table: DataFrame::empty(),
            records: vec![
                record("ZH", "Wind", 2000),
                record("BE", "Hydro", 2001),
                record("BE", "Wind", 2001),
            ],
            boundaries: Vec::new(),
        }
    }

    #[test]
    fn test_chart_set_shares_category_colors() {
        let dataset = dataset();
        let tables = DataProcessor::summarize(&dataset.records);
        let charts = ChartSet::build(&dataset, &tables, &DashboardConfig::default());

        let wind_line = charts
            .line
            .series
            .iter()
            .find(|s| s.category == "Wind")
            .unwrap();
        let wind_points = charts
            .scatter
            .series
            .iter()
            .find(|s| s.category == "Wind")
            .unwrap();
        assert_eq!(wind_line.color, wind_points.color);
        assert_eq!(wind_line.color, category_color(1));

        assert_eq!(charts.pie.total, 3);
        assert_eq!(charts.choropleth.unmatched.len(), 2);
        assert_eq!(charts.scatter.plants.len(), 3);
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            ChartKind::Choropleth.header(),
            "Number of energy sources per canton"
        );
        assert!(ChartKind::ScatterMap.title().is_none());
    }
}
