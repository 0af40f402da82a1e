//! Data Loader Module
//! Reads the plant CSV with Polars and the canton boundaries with geojson.

use super::record::PlantRecord;
use geo::{Geometry, MultiPolygon};
use geojson::{GeoJson, JsonValue};
use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse GeoJSON: {0}")]
    GeoJsonError(#[from] geojson::Error),
    #[error("GeoJSON is not a FeatureCollection")]
    NotAFeatureCollection,
    #[error("Row {row}: invalid commissioning_date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("No data loaded")]
    NoData,
}

/// Property holding the canton full name in the boundary file.
const NAME_PROPERTY: &str = "kan_name";

const TEXT_COLUMNS: [&str; 4] = [
    "company",
    "canton",
    "energy_source_level_2",
    "commissioning_date",
];
const NUMERIC_COLUMNS: [&str; 3] = ["electrical_capacity", "lat", "lon"];

/// Fixed dtypes for the columns the dashboard reads; the rest are inferred.
fn column_dtypes() -> Schema {
    let mut schema = Schema::with_capacity(TEXT_COLUMNS.len() + NUMERIC_COLUMNS.len());
    for name in TEXT_COLUMNS {
        schema.insert(name.into(), DataType::String);
    }
    for name in NUMERIC_COLUMNS {
        schema.insert(name.into(), DataType::Float64);
    }
    schema
}

/// One canton polygon keyed by its full name.
#[derive(Debug, Clone)]
pub struct CantonBoundary {
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

/// Everything one load produces: the raw table as read, the typed records
/// and the canton boundaries.
#[derive(Clone)]
pub struct Dataset {
    pub table: DataFrame,
    pub records: Vec<PlantRecord>,
    pub boundaries: Vec<CantonBoundary>,
}

impl Dataset {
    /// Load boundaries then records. Any failure aborts the whole load.
    pub fn load(csv_path: &Path, boundary_path: &Path) -> Result<Self, LoaderError> {
        let boundaries = DataLoader::load_boundaries(boundary_path)?;

        let mut loader = DataLoader::new();
        loader.load_csv(csv_path)?;
        debug!(
            rows = loader.get_row_count(),
            columns = ?loader.get_columns(),
            "plant table read"
        );
        let records = loader.load_records()?;
        let table = loader.get_dataframe().cloned().ok_or(LoaderError::NoData)?;

        info!(
            records = records.len(),
            boundaries = boundaries.len(),
            "dataset loaded"
        );
        Ok(Self {
            table,
            records,
            boundaries,
        })
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// Parse errors are not ignored: a malformed file fails the load. The
    /// record columns are read with fixed dtypes so a fractional capacity
    /// after a run of whole numbers still parses.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(Some(Arc::new(column_dtypes())))
            .finish()?
            .collect()?;
        debug!(path = %file_path.display(), "csv read");

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Convert the loaded DataFrame into typed records.
    pub fn load_records(&self) -> Result<Vec<PlantRecord>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        Self::records_from_dataframe(df)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Build one `PlantRecord` per row.
    ///
    /// Capacity and coordinates are cast strictly, so text in a numeric
    /// column is a parse error rather than a silent null. Empty cells are
    /// kept as `None`; only a date that is present but unreadable fails.
    pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<PlantRecord>, LoaderError> {
        let company = string_values(df, "company")?;
        let canton = string_values(df, "canton")?;
        let source = string_values(df, "energy_source_level_2")?;
        let date = string_values(df, "commissioning_date")?;
        let capacity = float_values(df, "electrical_capacity")?;
        let lat = float_values(df, "lat")?;
        let lon = float_values(df, "lon")?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let commissioning_date = match non_blank(date[i].clone()) {
                Some(raw) => Some(PlantRecord::parse_commissioning_date(&raw).ok_or(
                    LoaderError::InvalidDate {
                        row: i + 1,
                        value: raw,
                    },
                )?),
                None => None,
            };

            records.push(PlantRecord {
                company: company[i].clone().unwrap_or_default(),
                canton: non_blank(canton[i].clone()),
                energy_source_level_2: non_blank(source[i].clone()),
                electrical_capacity: capacity[i],
                commissioning_date,
                lat: lat[i],
                lon: lon[i],
            });
        }

        let incomplete = records
            .iter()
            .filter(|r| {
                r.canton.is_none()
                    || r.energy_source_level_2.is_none()
                    || r.commissioning_date.is_none()
                    || r.electrical_capacity.is_none()
                    || r.location().is_none()
            })
            .count();
        if incomplete > 0 {
            debug!(rows = incomplete, "rows with empty cells");
        }
        Ok(records)
    }

    /// Read canton boundaries from a GeoJSON FeatureCollection file.
    pub fn load_boundaries(path: &Path) -> Result<Vec<CantonBoundary>, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let geojson =
            GeoJson::from_reader(BufReader::new(file)).map_err(geojson::Error::MalformedJson)?;
        Self::boundaries_from_geojson(geojson)
    }

    /// Extract one boundary per feature with a `kan_name` and an areal geometry.
    pub fn boundaries_from_geojson(geojson: GeoJson) -> Result<Vec<CantonBoundary>, LoaderError> {
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(LoaderError::NotAFeatureCollection);
        };

        let mut boundaries = Vec::with_capacity(collection.features.len());
        for (idx, feature) in collection.features.into_iter().enumerate() {
            let Some(name) = feature.property(NAME_PROPERTY).and_then(property_text) else {
                warn!(feature = idx, "boundary feature without {NAME_PROPERTY}, skipped");
                continue;
            };
            let Some(geometry) = feature.geometry else {
                warn!(canton = %name, "boundary feature without geometry, skipped");
                continue;
            };
            let shape = match Geometry::<f64>::try_from(geometry.value) {
                Ok(Geometry::Polygon(polygon)) => MultiPolygon::new(vec![polygon]),
                Ok(Geometry::MultiPolygon(multi)) => multi,
                Ok(_) => {
                    warn!(canton = %name, "boundary geometry is not areal, skipped");
                    continue;
                }
                Err(e) => {
                    warn!(canton = %name, error = %e, "unreadable boundary geometry, skipped");
                    continue;
                }
            };
            boundaries.push(CantonBoundary { name, shape });
        }
        Ok(boundaries)
    }
}

/// `kan_name` is either a plain string or a one-element array of strings.
fn property_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => items.first().and_then(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}

/// Whitespace-only text counts as an empty cell.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let series = df
        .column(name)?
        .cast(&DataType::String)?
        .as_materialized_series()
        .clone();
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}
