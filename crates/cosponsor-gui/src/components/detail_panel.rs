//! Detail panel for the focused or selected legislator.

use crate::theme::{self, spacing, to_color32};
use cosponsor_graph::{BILL_LIST_CAP, NodeDetails, party_color};
use eframe::egui;

pub struct DetailPanel;

impl DetailPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, details: Option<&NodeDetails>) {
        let Some(details) = details else {
            theme::empty_state(
                ui,
                "No selection",
                "Select a legislator to see collaborators and bills",
            );
            return;
        };

        let legislator = &details.legislator;
        theme::card(ui, |ui| {
            ui.heading(
                egui::RichText::new(&legislator.name).color(ui.visuals().selection.bg_fill),
            );
            ui.add_space(spacing::ITEM_SPACING);

            ui.horizontal(|ui| {
                theme::badge(
                    ui,
                    legislator.party.label(),
                    to_color32(party_color(legislator.party).with_opacity(0.35)),
                );
                let seat = match legislator.district {
                    Some(district) => format!("{}-{district}", legislator.state),
                    None => legislator.state.clone(),
                };
                ui.label(egui::RichText::new(seat).color(ui.visuals().weak_text_color()));
            });

            ui.horizontal(|ui| {
                ui.label("Collaborators:");
                ui.label(
                    egui::RichText::new(details.connected_legislators.to_string()).strong(),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Total collaborations:");
                ui.label(
                    egui::RichText::new(legislator.metrics.total_collaborations.to_string())
                        .strong(),
                );
            });
        });

        ui.add_space(spacing::SECTION_SPACING);
        theme::labeled_separator(ui, "Top policy areas");
        ui.add_space(spacing::ITEM_SPACING);
        if details.top_policies.is_empty() {
            ui.label(
                egui::RichText::new("No categorized bills")
                    .color(ui.visuals().weak_text_color()),
            );
        } else {
            for tally in &details.top_policies {
                ui.horizontal(|ui| {
                    ui.label(&tally.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        theme::badge(
                            ui,
                            &format!("{} bills", tally.bills),
                            ui.visuals().faint_bg_color,
                        );
                    });
                });
            }
        }

        ui.add_space(spacing::SECTION_SPACING);
        theme::labeled_separator(ui, "Shared bills");
        if details.total_bills > BILL_LIST_CAP {
            ui.label(
                egui::RichText::new(format!(
                    "Showing {BILL_LIST_CAP} of {} bills",
                    details.total_bills
                ))
                .small()
                .color(ui.visuals().weak_text_color()),
            );
        }
        ui.add_space(spacing::ITEM_SPACING);

        egui::ScrollArea::vertical()
            .id_salt("detail_bills")
            .show(ui, |ui| {
                for bill in &details.bills {
                    ui.group(|ui| {
                        ui.label(egui::RichText::new(&bill.title).small());
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(bill.bill_number.as_str())
                                    .small()
                                    .monospace()
                                    .color(ui.visuals().weak_text_color()),
                            );
                            if let Some(date) = &bill.latest_action_date {
                                ui.label(
                                    egui::RichText::new(date)
                                        .small()
                                        .color(ui.visuals().weak_text_color()),
                                );
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            });
    }
}
