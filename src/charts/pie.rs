//! Donut chart of plant counts per energy category, painted directly with egui.

use super::palette::RDBU;
use crate::data::CategoryCount;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

/// Inner radius as a fraction of the outer radius.
pub const HOLE: f32 = 0.4;
/// Maximum arc covered by one painted segment, in radians.
const SEGMENT_STEP: f32 = 0.03;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub color: Color32,
    /// Start and end as fractions of the full turn, clockwise from 12 o'clock.
    pub start: f64,
    pub end: f64,
}

impl PieSlice {
    pub fn fraction(&self) -> f64 {
        self.end - self.start
    }

    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.fraction() * 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub total: usize,
}

impl PieChart {
    /// Slices ordered by count, largest first; ties keep category order.
    pub fn build(by_category: &[CategoryCount]) -> Self {
        let total: usize = by_category.iter().map(|c| c.count).sum();

        let mut ordered: Vec<&CategoryCount> = by_category.iter().collect();
        ordered.sort_by(|a, b| b.count.cmp(&a.count));

        let mut start = 0.0;
        let slices = ordered
            .into_iter()
            .enumerate()
            .map(|(i, category)| {
                let fraction = if total > 0 {
                    category.count as f64 / total as f64
                } else {
                    0.0
                };
                let slice = PieSlice {
                    label: category.energy_source_level_2.clone(),
                    count: category.count,
                    color: RDBU[i % RDBU.len()],
                    start,
                    end: start + fraction,
                };
                start += fraction;
                slice
            })
            .collect();

        Self { slices, total }
    }

    /// Slice covering a position on the turn (0..1, clockwise from top).
    pub fn slice_at(&self, turn: f64) -> Option<&PieSlice> {
        self.slices
            .iter()
            .find(|s| turn >= s.start && turn < s.end)
    }

    /// Inline slice labels as (mid-slice turn, "label\npercent"). Empty when
    /// labels are switched off; empty slices get no label.
    pub fn inline_labels(&self, show_labels: bool) -> Vec<(f64, String)> {
        if !show_labels {
            return Vec::new();
        }
        self.slices
            .iter()
            .filter(|s| s.fraction() > 0.0)
            .map(|s| {
                (
                    (s.start + s.end) / 2.0,
                    format!("{}\n{}", s.label, s.percent_text()),
                )
            })
            .collect()
    }

    /// Draw the donut with a legend to its right.
    pub fn show(&self, ui: &mut egui::Ui, show_labels: bool, diameter: f32) {
        ui.horizontal(|ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::splat(diameter), Sense::hover());
            let center = response.rect.center();
            let outer = diameter / 2.0 - 4.0;
            let inner = outer * HOLE;

            for slice in &self.slices {
                paint_ring_segment(&painter, center, inner, outer, slice);
            }

            for (slice, (mid, text)) in self
                .slices
                .iter()
                .filter(|s| s.fraction() > 0.0)
                .zip(self.inline_labels(show_labels))
            {
                painter.text(
                    polar(center, (inner + outer) / 2.0, mid as f32),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(11.0),
                    label_color(slice.color),
                );
            }

            if let Some(hover) = response.hover_pos() {
                let offset = hover - center;
                let distance = offset.length();
                if distance >= inner && distance <= outer {
                    // atan2 of (x, -y) gives the clockwise angle from 12 o'clock
                    let angle = offset.x.atan2(-offset.y).rem_euclid(TAU);
                    if let Some(slice) = self.slice_at((angle / TAU) as f64) {
                        response.on_hover_text(format!(
                            "{}\n{} ({} plants)",
                            slice.label,
                            slice.percent_text(),
                            slice.count
                        ));
                    }
                }
            }

            ui.add_space(12.0);
            ui.vertical(|ui| {
                for slice in &self.slices {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, slice.color);
                        ui.label(RichText::new(&slice.label).size(13.0));
                    });
                }
            });
        });
    }
}

fn polar(center: Pos2, radius: f32, turn: f32) -> Pos2 {
    let angle = turn * TAU;
    Pos2::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Paint a slice as convex quads between the inner and outer radius.
fn paint_ring_segment(
    painter: &egui::Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    slice: &PieSlice,
) {
    let start = slice.start as f32;
    let end = slice.end as f32;
    if end <= start {
        return;
    }
    let steps = (((end - start) * TAU) / SEGMENT_STEP).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f32;

    for i in 0..steps {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        let quad = vec![
            polar(center, outer, a0),
            polar(center, outer, a1),
            polar(center, inner, a1),
            polar(center, inner, a0),
        ];
        painter.add(Shape::convex_polygon(quad, slice.color, Stroke::NONE));
    }

    // Slice separators
    let white = Stroke::new(1.5, Color32::WHITE);
    painter.line_segment([polar(center, inner, start), polar(center, outer, start)], white);
}

/// Dark text on light slices, light text on dark ones.
fn label_color(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(rows: &[(&str, usize)]) -> Vec<CategoryCount> {
        rows.iter()
            .map(|(name, count)| CategoryCount {
                energy_source_level_2: name.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn test_slices_sorted_and_cover_full_turn() {
        let chart = PieChart::build(&counts(&[
            ("Bioenergy", 10),
            ("Hydro", 30),
            ("Solar", 50),
            ("Wind", 10),
        ]));

        assert_eq!(chart.total, 100);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Solar", "Hydro", "Bioenergy", "Wind"]);

        assert_eq!(chart.slices[0].start, 0.0);
        assert!((chart.slices.last().unwrap().end - 1.0).abs() < 1e-12);
        for pair in chart.slices.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(chart.slices[0].percent_text(), "50.0%");
        assert_eq!(chart.slices[0].color, RDBU[0]);
        assert_eq!(chart.slices[1].color, RDBU[1]);
    }

    #[test]
    fn test_slice_at() {
        let chart = PieChart::build(&counts(&[("Hydro", 1), ("Solar", 3)]));
        assert_eq!(chart.slice_at(0.1).map(|s| s.label.as_str()), Some("Solar"));
        assert_eq!(chart.slice_at(0.8).map(|s| s.label.as_str()), Some("Hydro"));
        assert!(chart.slice_at(1.5).is_none());
    }

    #[test]
    fn test_inline_labels_toggle() {
        let chart = PieChart::build(&counts(&[("Hydro", 1), ("Solar", 3), ("Wind", 0)]));

        assert!(chart.inline_labels(false).is_empty());

        let labels = chart.inline_labels(true);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], (0.375, "Solar\n75.0%".to_string()));
        assert_eq!(labels[1], (0.875, "Hydro\n25.0%".to_string()));
    }

    #[test]
    fn test_empty_chart() {
        let chart = PieChart::build(&[]);
        assert_eq!(chart.total, 0);
        assert!(chart.slices.is_empty());
        assert!(chart.slice_at(0.5).is_none());
        assert!(chart.inline_labels(true).is_empty());
    }

    #[test]
    fn test_polar_starts_at_top_and_turns_clockwise() {
        let c = Pos2::new(100.0, 100.0);
        let top = polar(c, 10.0, 0.0);
        assert!((top.x - 100.0).abs() < 1e-4 && (top.y - 90.0).abs() < 1e-4);
        let right = polar(c, 10.0, 0.25);
        assert!((right.x - 110.0).abs() < 1e-4 && (right.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_label_color_contrast() {
        assert_eq!(label_color(RDBU[0]), Color32::WHITE);
        assert_eq!(label_color(RDBU[5]), Color32::BLACK);
    }
}
