//! Map Chart Models
//! Choropleth regions and scatter markers in projected map coordinates.

use super::palette::{category_color, viridis};
use crate::data::{CantonBoundary, CantonTable, PlantRecord};
use egui::Color32;
use geo::{Contains, MultiPolygon, Point, Simplify, TriangulateEarcut};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Largest marker diameter in points.
pub const MAX_MARKER_DIAMETER: f32 = 20.0;
const MIN_MARKER_RADIUS: f32 = 1.5;

/// Equirectangular projection scaled for the map centre latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub center_lat: f64,
    pub center_lon: f64,
    x_scale: f64,
}

impl MapProjection {
    pub fn new(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            x_scale: center_lat.to_radians().cos(),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> [f64; 2] {
        [lon * self.x_scale, lat]
    }

    /// Inverse of [`Self::project`], returns (lon, lat).
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.x_scale, y)
    }

    pub fn center(&self) -> [f64; 2] {
        self.project(self.center_lon, self.center_lat)
    }
}

/// One canton on the choropleth.
#[derive(Debug, Clone)]
pub struct ChoroplethRegion {
    pub name: String,
    /// `None` when no record maps to this canton; drawn as outline only.
    pub count: Option<usize>,
    pub color: Option<Color32>,
    /// Fill triangles, projected.
    pub triangles: Vec<[[f64; 2]; 3]>,
    /// Exterior and interior rings, projected.
    pub outlines: Vec<Vec<[f64; 2]>>,
    shape: MultiPolygon<f64>,
}

impl ChoroplethRegion {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.shape.contains(&Point::new(lon, lat))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChoroplethChart {
    pub regions: Vec<ChoroplethRegion>,
    pub min_count: usize,
    pub max_count: usize,
    /// Canton names with a count but no boundary.
    pub unmatched: Vec<String>,
    /// Canton codes with no canton name.
    pub unmapped_codes: Vec<String>,
}

impl ChoroplethChart {
    pub fn build(
        table: &CantonTable,
        boundaries: &[CantonBoundary],
        projection: &MapProjection,
        simplify_tolerance: f64,
    ) -> Self {
        let min_count = table.rows.iter().map(|r| r.count).min().unwrap_or(0);
        let max_count = table.rows.iter().map(|r| r.count).max().unwrap_or(0);

        let regions: Vec<ChoroplethRegion> = boundaries
            .iter()
            .map(|boundary| {
                let count = table.get(&boundary.name);
                let color =
                    count.map(|c| viridis(c as f64, min_count as f64, max_count as f64));
                let drawn = if simplify_tolerance > 0.0 {
                    boundary.shape.simplify(&simplify_tolerance)
                } else {
                    boundary.shape.clone()
                };
                ChoroplethRegion {
                    name: boundary.name.clone(),
                    count,
                    color,
                    triangles: triangulate(&drawn, projection),
                    outlines: outlines(&drawn, projection),
                    shape: boundary.shape.clone(),
                }
            })
            .collect();

        let unmatched: Vec<String> = table
            .rows
            .iter()
            .filter(|row| !boundaries.iter().any(|b| b.name == row.canton_name))
            .map(|row| row.canton_name.clone())
            .collect();
        if !unmatched.is_empty() {
            warn!(cantons = ?unmatched, "cantons without boundary, omitted from the map");
        }

        Self {
            regions,
            min_count,
            max_count,
            unmatched,
            unmapped_codes: table.unmapped.clone(),
        }
    }

    /// Region under a geographic position.
    pub fn region_at(&self, lon: f64, lat: f64) -> Option<&ChoroplethRegion> {
        self.regions.iter().find(|r| r.contains(lon, lat))
    }
}

fn triangulate(shape: &MultiPolygon<f64>, projection: &MapProjection) -> Vec<[[f64; 2]; 3]> {
    shape
        .iter()
        .flat_map(|polygon| polygon.earcut_triangles())
        .map(|t| {
            [
                projection.project(t.v1().x, t.v1().y),
                projection.project(t.v2().x, t.v2().y),
                projection.project(t.v3().x, t.v3().y),
            ]
        })
        .collect()
}

fn outlines(shape: &MultiPolygon<f64>, projection: &MapProjection) -> Vec<Vec<[f64; 2]>> {
    shape
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .map(|ring| ring.coords().map(|c| projection.project(c.x, c.y)).collect())
        .collect()
}

/// Hover details for one plant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlant {
    pub company: String,
    /// Canton full name, or the raw code when unknown. Empty without a code.
    pub canton: String,
    pub category: String,
    pub electrical_capacity: f64,
    pub position: [f64; 2],
}

/// Markers sharing category and size.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    pub radius: f32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default)]
pub struct ScatterMapChart {
    pub series: Vec<ScatterSeries>,
    pub plants: Vec<ScatterPlant>,
}

impl ScatterMapChart {
    /// `categories` fixes colour order so it matches the line chart.
    ///
    /// Plants without coordinates, capacity or a listed category have no
    /// marker.
    pub fn build(
        records: &[PlantRecord],
        categories: &[String],
        projection: &MapProjection,
    ) -> Self {
        let mappable: Vec<(&PlantRecord, usize, (f64, f64), f64)> = records
            .iter()
            .filter_map(|record| {
                let category = record.energy_source_level_2.as_deref()?;
                let category_idx = categories.iter().position(|c| c == category)?;
                Some((
                    record,
                    category_idx,
                    record.location()?,
                    record.electrical_capacity?,
                ))
            })
            .collect();
        if mappable.len() < records.len() {
            debug!(
                skipped = records.len() - mappable.len(),
                "plants without location, capacity or category left off the map"
            );
        }

        let max_capacity = mappable
            .iter()
            .map(|(_, _, _, capacity)| *capacity)
            .filter(|c| c.is_finite())
            .fold(0.0_f64, f64::max);

        // (category index, radius in half points) -> positions
        let mut groups: BTreeMap<(usize, u32), Vec<[f64; 2]>> = BTreeMap::new();
        let mut plants = Vec::with_capacity(mappable.len());

        for (record, category_idx, (lon, lat), capacity) in mappable {
            let position = projection.project(lon, lat);
            let radius = marker_radius(capacity, max_capacity);
            let bucket = (radius * 2.0).round() as u32;

            groups.entry((category_idx, bucket)).or_default().push(position);
            plants.push(ScatterPlant {
                company: record.company.clone(),
                canton: record
                    .canton_name()
                    .map(str::to_string)
                    .or_else(|| record.canton.clone())
                    .unwrap_or_default(),
                category: categories[category_idx].clone(),
                electrical_capacity: capacity,
                position,
            });
        }

        let series = groups
            .into_iter()
            .map(|((category_idx, bucket), points)| ScatterSeries {
                category: categories[category_idx].clone(),
                color: category_color(category_idx),
                radius: bucket as f32 / 2.0,
                points,
            })
            .collect();

        Self { series, plants }
    }

    /// Plant closest to a projected position, if within `max_distance`.
    pub fn nearest(&self, x: f64, y: f64, max_distance: f64) -> Option<&ScatterPlant> {
        self.plants
            .iter()
            .map(|p| {
                let dx = p.position[0] - x;
                let dy = p.position[1] - y;
                (p, dx * dx + dy * dy)
            })
            .filter(|(_, d2)| *d2 <= max_distance * max_distance)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p)
    }
}

/// Marker radius with area proportional to capacity.
pub fn marker_radius(capacity: f64, max_capacity: f64) -> f32 {
    if !(capacity > 0.0) || !(max_capacity > 0.0) {
        return MIN_MARKER_RADIUS;
    }
    let radius = (MAX_MARKER_DIAMETER / 2.0) * (capacity / max_capacity).sqrt() as f32;
    radius.max(MIN_MARKER_RADIUS)
}
