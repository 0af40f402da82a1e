//! Chart Viewer Widget
//! Central scrollable area drawing the charts selected in the control panel.

use crate::charts::{ChartKind, ChartPlotter, ChartSet};
use crate::gui::control_panel::UserSettings;
use crate::gui::data_table::DataTable;
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::DataFrame;

const SECTION_SPACING: f32 = 20.0;
const MAP_HEIGHT: f32 = 500.0;
const SCATTER_HEIGHT: f32 = 700.0;
const LINE_HEIGHT: f32 = 600.0;
const PIE_DIAMETER: f32 = 400.0;

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Option<ChartSet>,
    pub table: Option<DataTable>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.charts = None;
        self.table = None;
    }

    pub fn set_data(&mut self, charts: ChartSet, table: DataFrame) {
        self.charts = Some(charts);
        self.table = Some(DataTable::new(table));
    }

    /// Draw the page. Selector state comes in as a parameter; nothing is
    /// remembered between frames.
    pub fn show(&self, ui: &mut egui::Ui, settings: &UserSettings) {
        let Some(charts) = &self.charts else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Electricity production plants in Switzerland")
                            .size(28.0)
                            .strong()
                            .color(Color32::RED),
                    );
                });
                ui.add_space(SECTION_SPACING);

                if settings.show_table {
                    if let Some(table) = &self.table {
                        ui.label(RichText::new("This is my dataset:").size(16.0).strong());
                        table.show(ui);
                        ui.add_space(SECTION_SPACING);
                    }
                }

                for &kind in settings.source.charts() {
                    Self::draw_section(ui, charts, kind, settings.show_labels);
                    ui.add_space(SECTION_SPACING);
                }
            });
    }

    fn draw_section(ui: &mut egui::Ui, charts: &ChartSet, kind: ChartKind, show_labels: bool) {
        ui.label(RichText::new(kind.header()).size(20.0).strong());
        if let Some(title) = kind.title() {
            ui.label(RichText::new(title).size(14.0).strong());
        }
        ui.add_space(8.0);

        match kind {
            ChartKind::Choropleth => {
                ChartPlotter::draw_choropleth(ui, &charts.choropleth, &charts.projection, MAP_HEIGHT)
            }
            ChartKind::Pie => charts.pie.show(ui, show_labels, PIE_DIAMETER),
            ChartKind::Line => ChartPlotter::draw_line_chart(ui, &charts.line, LINE_HEIGHT),
            ChartKind::ScatterMap => ChartPlotter::draw_scatter_map(
                ui,
                &charts.scatter,
                &charts.choropleth,
                &charts.projection,
                SCATTER_HEIGHT,
            ),
        }
    }
}
