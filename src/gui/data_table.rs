//! Raw dataset table.

use egui::{Label, RichText, ScrollArea};
use polars::prelude::{AnyValue, DataFrame};

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 320.0;
const COLUMN_WIDTH: f32 = 110.0;

/// Scrollable view of the CSV exactly as read, all columns included.
pub struct DataTable {
    df: DataFrame,
    columns: Vec<String>,
}

impl DataTable {
    pub fn new(df: DataFrame) -> Self {
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self { df, columns }
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Display text of one cell; nulls and out-of-range cells are blank.
    pub fn cell_text(&self, column: usize, row: usize) -> String {
        let Some(col) = self.df.get_columns().get(column) else {
            return String::new();
        };
        match col.get(row) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(value) => value.to_string().trim_matches('"').to_string(),
        }
    }

    /// Display text of every cell in one data row.
    pub fn row_cells(&self, row: usize) -> Vec<String> {
        (0..self.columns.len())
            .map(|column| self.cell_text(column, row))
            .collect()
    }

    /// Header stays fixed above the vertically scrolling rows; both scroll
    /// sideways together.
    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new(format!(
                "{} rows × {} columns",
                self.row_count(),
                self.columns.len()
            ))
            .size(11.0),
        );

        ScrollArea::horizontal()
            .id_salt("dataset_table_columns")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        for name in &self.columns {
                            cell(ui, RichText::new(name).strong().size(11.0));
                        }
                    });
                    ui.separator();

                    ScrollArea::vertical()
                        .id_salt("dataset_table_rows")
                        .max_height(TABLE_HEIGHT)
                        .auto_shrink([true, true])
                        .show_rows(ui, ROW_HEIGHT, self.row_count(), |ui, row_range| {
                            for row in row_range {
                                ui.horizontal(|ui| {
                                    for text in self.row_cells(row) {
                                        cell(ui, RichText::new(text).size(11.0));
                                    }
                                });
                            }
                        });
                });
            });
    }
}

fn cell(ui: &mut egui::Ui, text: RichText) {
    ui.add_sized([COLUMN_WIDTH, ROW_HEIGHT], Label::new(text).truncate());
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_cell_text() {
        let df = df!(
            "company" => &[Some("EWZ"), None],
            "electrical_capacity" => &[2.5, 0.01]
        )
        .unwrap();
        let table = DataTable::new(df);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_text(0, 0), "EWZ");
        assert_eq!(table.cell_text(0, 1), "");
        assert_eq!(table.cell_text(1, 0), "2.5");
        assert_eq!(table.cell_text(1, 5), "");
        assert_eq!(table.cell_text(9, 0), "");
    }

    #[test]
    fn test_rows_start_at_first_record() {
        let df = df!(
            "company" => &["EWZ", "BKW"],
            "canton" => &["ZH", "BE"]
        )
        .unwrap();
        let table = DataTable::new(df);

        assert_eq!(table.row_cells(0), vec!["EWZ", "ZH"]);
        assert_eq!(table.row_cells(1), vec!["BKW", "BE"]);
        assert_eq!(table.row_cells(2), vec!["", ""]);
    }

    #[test]
    fn test_show_renders_headless() {
        let df = df!("company" => &["EWZ"], "canton" => &["ZH"]).unwrap();
        let table = DataTable::new(df);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| table.show(ui));
        });
    }
}
