//! Filter controls: threshold slider, policy selector, sampling choice,
//! name search, and the counts disclosure line.

use crate::theme::{self, spacing};
use cosponsor_core::{Metadata, Policy};
use cosponsor_graph::{
    EDGE_SAMPLE_CAP, FilterParams, MIN_COLLABORATIONS_RANGE, PolicyFilter, SamplingStrategy,
    SubgraphCounts,
};
use cosponsor_events::{Event, EventBus};
use eframe::egui;
use std::collections::HashMap;

pub struct ControlPanel {
    event_bus: EventBus,
}

impl ControlPanel {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        metadata: &Metadata,
        policies: &[Policy],
        params: &FilterParams,
        search_query: &str,
        counts: SubgraphCounts,
    ) {
        theme::labeled_separator(ui, "Filters");
        ui.add_space(spacing::ITEM_SPACING);

        let mut threshold = params.min_collaborations;
        let slider = ui.add(
            egui::Slider::new(&mut threshold, MIN_COLLABORATIONS_RANGE)
                .text("min. collaborations"),
        );
        if slider.changed() {
            self.event_bus.publish(Event::ThresholdChanged {
                min_collaborations: threshold,
            });
        }

        ui.add_space(spacing::ITEM_SPACING);
        self.policy_selector(ui, metadata, policies, &params.policy);

        ui.add_space(spacing::ITEM_SPACING);
        self.sampling_selector(ui, params.sampling);

        ui.add_space(spacing::ITEM_SPACING);
        let mut query = search_query.to_string();
        let search = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search legislators")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.event_bus.publish(Event::SearchChanged { query });
        }

        ui.add_space(spacing::SECTION_SPACING);
        theme::labeled_separator(ui, "Network");
        ui.add_space(spacing::ITEM_SPACING);
        self.counts_line(ui, counts);

        ui.add_space(spacing::SECTION_SPACING);
        theme::labeled_separator(ui, "Dataset");
        ui.add_space(spacing::ITEM_SPACING);
        self.metadata_summary(ui, metadata);
    }

    fn policy_selector(
        &self,
        ui: &mut egui::Ui,
        metadata: &Metadata,
        policies: &[Policy],
        current: &PolicyFilter,
    ) {
        let selected_label = match current {
            PolicyFilter::All => "All policies".to_string(),
            PolicyFilter::Id(id) => policies
                .iter()
                .find(|p| p.id == *id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("Policy {id}")),
        };

        // Heaviest policy areas first, uncounted ones behind in dataset
        // order.
        let rank: HashMap<&str, usize> = metadata
            .policies_by_weight()
            .into_iter()
            .enumerate()
            .map(|(rank, (name, _))| (name, rank))
            .collect();
        let mut ordered: Vec<&Policy> = policies.iter().collect();
        ordered.sort_by_key(|p| rank.get(p.name.as_str()).copied().unwrap_or(usize::MAX));

        egui::ComboBox::from_label("policy area")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                let mut choice: Option<PolicyFilter> = None;
                if ui
                    .selectable_label(*current == PolicyFilter::All, "All policies")
                    .clicked()
                {
                    choice = Some(PolicyFilter::All);
                }
                for policy in ordered {
                    let label = match metadata.policies.counts.get(&policy.name) {
                        Some(count) => format!("{} ({count})", policy.name),
                        None => policy.name.clone(),
                    };
                    let selected = matches!(current, PolicyFilter::Id(id) if *id == policy.id);
                    if ui.selectable_label(selected, label).clicked() {
                        choice = Some(PolicyFilter::Id(policy.id.clone()));
                    }
                }
                if let Some(policy) = choice {
                    self.event_bus.publish(Event::PolicySelected { policy });
                }
            });
    }

    fn sampling_selector(&self, ui: &mut egui::Ui, current: SamplingStrategy) {
        egui::ComboBox::from_label("edge sampling")
            .selected_text(match current {
                SamplingStrategy::Uniform => "Random",
                SamplingStrategy::Weighted => "Strongest pairs",
            })
            .show_ui(ui, |ui| {
                for (strategy, label) in [
                    (SamplingStrategy::Uniform, "Random"),
                    (SamplingStrategy::Weighted, "Strongest pairs"),
                ] {
                    if ui.selectable_label(current == strategy, label).clicked()
                        && current != strategy
                    {
                        self.event_bus
                            .publish(Event::SamplingChanged { strategy });
                    }
                }
            });
    }

    fn counts_line(&self, ui: &mut egui::Ui, counts: SubgraphCounts) {
        ui.label(format!(
            "{} legislators · {} connections · {} bills",
            counts.legislators, counts.connections, counts.bills
        ));
        if counts.sampled {
            theme::warning_box(
                ui,
                &format!(
                    "Showing {EDGE_SAMPLE_CAP} of {} connections",
                    counts.connections
                ),
            );
        }
    }

    fn metadata_summary(&self, ui: &mut egui::Ui, metadata: &Metadata) {
        ui.label(
            egui::RichText::new(format!(
                "Congress {}–{}",
                metadata.congress_range.start, metadata.congress_range.end
            ))
            .small(),
        );
        ui.label(
            egui::RichText::new(format!(
                "Actions {} to {}",
                metadata.date_range.start, metadata.date_range.end
            ))
            .small()
            .color(ui.visuals().weak_text_color()),
        );
    }
}
