//! Data module - CSV/GeoJSON loading and aggregation

mod cantons;
mod loader;
mod processor;
mod record;

pub use loader::{CantonBoundary, Dataset};
pub use processor::{
    CantonTable, CategoryCount, DashboardTables, DataProcessor, YearCategoryCount,
};
pub use record::PlantRecord;
