//! Control Panel Widget
//! Left side panel with the dashboard selectors and load status.

use crate::charts::ChartKind;
use egui::{Color32, ComboBox, RichText};

/// "Choose a Visual" options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualSource {
    #[default]
    All,
    Map,
    Graph,
}

impl VisualSource {
    pub const OPTIONS: [VisualSource; 3] = [VisualSource::All, VisualSource::Map, VisualSource::Graph];

    pub fn label(self) -> &'static str {
        match self {
            VisualSource::All => "All",
            VisualSource::Map => "Map",
            VisualSource::Graph => "Graph",
        }
    }

    /// Charts shown for this selection, in display order.
    pub fn charts(self) -> &'static [ChartKind] {
        match self {
            VisualSource::All => &[
                ChartKind::Choropleth,
                ChartKind::Pie,
                ChartKind::Line,
                ChartKind::ScatterMap,
            ],
            VisualSource::Map => &[ChartKind::Choropleth, ChartKind::ScatterMap],
            VisualSource::Graph => &[ChartKind::Pie, ChartKind::Line],
        }
    }
}

/// User selections driving what the chart viewer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSettings {
    pub source: VisualSource,
    pub show_labels: bool,
    pub show_table: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            source: VisualSource::All,
            show_labels: true,
            show_table: false,
        }
    }
}

/// Left side control panel with the selectors and load status.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub reload_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
            reload_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⚡ Swiss Power Plants")
                    .size(20.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Exploration =====
        ui.label(RichText::new("Data Exploration").size(14.0).strong());
        ui.add_space(5.0);
        ui.checkbox(
            &mut self.settings.show_table,
            "Check the box if you are interested in the table",
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Visual Selection =====
        ui.label(RichText::new("Choose a Visual").size(14.0).strong());
        ui.add_space(5.0);
        ComboBox::from_id_salt("visual_source")
            .width(150.0)
            .selected_text(self.settings.source.label())
            .show_ui(ui, |ui| {
                for option in VisualSource::OPTIONS {
                    ui.selectable_value(&mut self.settings.source, option, option.label());
                }
            });

        ui.add_space(10.0);

        ui.label(RichText::new("Show Pie charts labels").size(14.0).strong());
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.settings.show_labels, true, "Yes");
            ui.radio_value(&mut self.settings.show_labels, false, "No");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.reload_enabled, |ui| {
                let button = egui::Button::new(RichText::new("⟳ Reload data").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Reload;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_shows_only_maps() {
        assert_eq!(
            VisualSource::Map.charts(),
            &[ChartKind::Choropleth, ChartKind::ScatterMap]
        );
    }

    #[test]
    fn test_graph_shows_only_graphs() {
        assert_eq!(VisualSource::Graph.charts(), &[ChartKind::Pie, ChartKind::Line]);
    }

    #[test]
    fn test_all_shows_everything_in_order() {
        assert_eq!(
            VisualSource::All.charts(),
            &[
                ChartKind::Choropleth,
                ChartKind::Pie,
                ChartKind::Line,
                ChartKind::ScatterMap
            ]
        );
    }

    #[test]
    fn test_selections_partition_all() {
        let mut combined: Vec<ChartKind> = VisualSource::Map
            .charts()
            .iter()
            .chain(VisualSource::Graph.charts())
            .copied()
            .collect();
        combined.sort_by_key(|k| VisualSource::All.charts().iter().position(|a| a == k));
        assert_eq!(combined, VisualSource::All.charts());
    }

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.source, VisualSource::All);
        assert!(settings.show_labels);
        assert!(!settings.show_table);
        assert_eq!(VisualSource::OPTIONS.map(VisualSource::label), ["All", "Map", "Graph"]);
    }
}
