//! Chart Plotter Module
//! Draws the map and line charts with egui_plot.

use super::line::LineChart;
use super::map::{ChoroplethChart, MapProjection, ScatterMapChart};
use super::palette::viridis;
use egui::{Color32, RichText, Sense, Stroke};
use egui_plot::{Legend, Line, Plot, Points, Polygon};

/// Choropleth fill opacity.
const REGION_OPACITY: f32 = 0.8;
const OUTLINE_COLOR: Color32 = Color32::from_rgb(120, 120, 120);
/// Hover radius for scatter markers, as a share of the visible map width.
const HOVER_SHARE: f64 = 0.01;

/// Draws the egui_plot based charts.
pub struct ChartPlotter;

impl ChartPlotter {
    fn map_plot<'a>(id: &'a str, projection: &MapProjection, height: f32) -> Plot<'a> {
        let [cx, cy] = projection.center();
        Plot::new(id)
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_scroll(false)
            .include_x(cx - 2.2)
            .include_x(cx + 2.2)
            .include_y(cy - 1.1)
            .include_y(cy + 1.1)
    }

    fn draw_outlines(plot_ui: &mut egui_plot::PlotUi, chart: &ChoroplethChart, color: Color32) {
        for region in &chart.regions {
            for ring in &region.outlines {
                plot_ui.line(Line::new(ring.clone()).color(color).width(1.0));
            }
        }
    }

    /// Cantons shaded by plant count. Hover shows canton and count.
    pub fn draw_choropleth(
        ui: &mut egui::Ui,
        chart: &ChoroplethChart,
        projection: &MapProjection,
        height: f32,
    ) {
        let response = Self::map_plot("choropleth", projection, height).show(ui, |plot_ui| {
            for region in &chart.regions {
                let Some(color) = region.color else {
                    continue;
                };
                let fill = color.gamma_multiply(REGION_OPACITY);
                for triangle in &region.triangles {
                    plot_ui.polygon(
                        Polygon::new(triangle.to_vec())
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, fill)),
                    );
                }
            }
            Self::draw_outlines(plot_ui, chart, Color32::WHITE);

            plot_ui.pointer_coordinate().and_then(|pointer| {
                let (lon, lat) = projection.unproject(pointer.x, pointer.y);
                chart.region_at(lon, lat).map(|region| {
                    let count = region
                        .count
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    format!("Canton: {}\nNumber of Sources: {}", region.name, count)
                })
            })
        });

        if let Some(text) = response.inner {
            response.response.on_hover_text_at_pointer(text);
        }

        Self::draw_color_bar(ui, chart.min_count, chart.max_count);

        if !chart.unmatched.is_empty() {
            ui.label(
                RichText::new(format!("Not on the map: {}", chart.unmatched.join(", ")))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
        if !chart.unmapped_codes.is_empty() {
            ui.label(
                RichText::new(format!(
                    "Unknown canton codes, not counted: {}",
                    chart.unmapped_codes.join(", ")
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        }
    }

    /// Horizontal Viridis bar with the count range.
    pub fn draw_color_bar(ui: &mut egui::Ui, min: usize, max: usize) {
        const STEPS: usize = 64;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Number of Sources").size(12.0));
            ui.label(RichText::new(min.to_string()).size(11.0));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 12.0), Sense::hover());
            let step_width = rect.width() / STEPS as f32;
            for i in 0..STEPS {
                let t = i as f64 / (STEPS - 1) as f64;
                let x = rect.left() + step_width * i as f32;
                let cell = egui::Rect::from_min_size(
                    egui::pos2(x, rect.top()),
                    egui::vec2(step_width + 0.5, rect.height()),
                );
                ui.painter().rect_filled(cell, 0.0, viridis(t, 0.0, 1.0));
            }
            ui.label(RichText::new(max.to_string()).size(11.0));
        });
    }

    /// One line with markers per energy category.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &LineChart, height: f32) {
        Plot::new("plants_per_year")
            .height(height)
            .legend(Legend::default().position(egui_plot::Corner::LeftTop))
            .x_axis_label("Year")
            .y_axis_label("Number of plants")
            .include_y(0.0)
            .include_y(chart.max_count() * 1.05)
            .allow_scroll(false)
            .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [100.0, 500.0, 1000.0]))
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    plot_ui.line(
                        Line::new(series.points.clone())
                            .color(series.color)
                            .width(1.5)
                            .name(&series.category),
                    );
                    plot_ui.points(
                        Points::new(series.points.clone())
                            .radius(3.0)
                            .color(series.color)
                            .name(&series.category),
                    );
                }
            });
    }

    /// Plants at their location over canton outlines, sized by capacity.
    pub fn draw_scatter_map(
        ui: &mut egui::Ui,
        chart: &ScatterMapChart,
        base: &ChoroplethChart,
        projection: &MapProjection,
        height: f32,
    ) {
        let response = Self::map_plot("scatter_map", projection, height)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                Self::draw_outlines(plot_ui, base, OUTLINE_COLOR);

                for series in &chart.series {
                    plot_ui.points(
                        Points::new(series.points.clone())
                            .radius(series.radius)
                            .color(series.color.gamma_multiply(0.8))
                            .name(&series.category),
                    );
                }

                let tolerance = plot_ui.plot_bounds().width() * HOVER_SHARE;
                plot_ui.pointer_coordinate().and_then(|pointer| {
                    chart
                        .nearest(pointer.x, pointer.y, tolerance)
                        .map(|plant| {
                            format!(
                                "company: {}\ncanton: {}\nSources of Energy: {}\nelectrical_capacity: {}",
                                plant.company, plant.canton, plant.category, plant.electrical_capacity
                            )
                        })
                })
            });

        if let Some(text) = response.inner {
            response.response.on_hover_text_at_pointer(text);
        }
    }
}
