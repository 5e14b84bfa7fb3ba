//! Full-window panel for fatal initialization errors. While this is
//! visible no visualization exists.

use crate::theme;
use cosponsor_data::DataError;
use eframe::egui;

pub struct ErrorPanel;

impl ErrorPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, error: &DataError) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            match error {
                // A missing dump is an empty state, not a failure.
                DataError::NoData => {
                    theme::empty_state(
                        ui,
                        "No data available",
                        "Run the dump pipeline and start the data server, then restart.",
                    );
                }
                other => {
                    ui.set_max_width(520.0);
                    theme::error_box(ui, other.headline(), &other.detail());
                }
            }
        });
    }
}
