//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::ChartSet;
use crate::config::DashboardConfig;
use crate::data::{DataProcessor, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{RichText, SidePanel};
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{error, info};

/// Loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        charts: Box<ChartSet>,
        table: DataFrame,
        row_count: usize,
    },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    load_error: Option<String>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            load_error: None,
        };
        app.start_load();
        app
    }

    /// Read both files and build the charts in a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        self.chart_viewer.clear();
        self.load_error = None;
        self.control_panel.reload_enabled = false;
        self.control_panel.set_status("Loading data...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let config = self.config.clone();

        thread::spawn(move || Self::run_load(tx, config));
    }

    /// Run the whole pipeline (called from background thread)
    fn run_load(tx: Sender<LoadResult>, config: DashboardConfig) {
        info!(
            csv = %config.plants_csv.display(),
            boundaries = %config.cantons_geojson.display(),
            "loading dataset"
        );
        let _ = tx.send(LoadResult::Progress("Reading files...".to_string()));

        let dataset = match Dataset::load(&config.plants_csv, &config.cantons_geojson) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(error = %e, "dataset load failed");
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress("Aggregating...".to_string()));
        let tables = DataProcessor::summarize(&dataset.records);
        let charts = ChartSet::build(&dataset, &tables, &config);

        let _ = tx.send(LoadResult::Complete {
            charts: Box::new(charts),
            row_count: dataset.records.len(),
            table: dataset.table,
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete {
                        charts,
                        table,
                        row_count,
                    } => {
                        let regions = charts.choropleth.regions.len();
                        self.chart_viewer.set_data(*charts, table);
                        self.control_panel.set_status(&format!(
                            "Loaded {} plants, {} cantons",
                            row_count, regions
                        ));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.load_error = Some(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            } else {
                self.control_panel.reload_enabled = true;
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Reload => self.start_load(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.load_error {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Failed to load data\n\n{}", error))
                            .size(16.0)
                            .color(egui::Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            if self.is_loading {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            self.chart_viewer.show(ui, &self.control_panel.settings);
        });
    }
}
