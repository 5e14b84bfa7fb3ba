use crate::components::{
    control_panel::ControlPanel,
    detail_panel::DetailPanel,
    error_panel::ErrorPanel,
    graph_view::{CanvasHit, GraphScene, GraphView},
};
use crate::theme::{self, Theme};
use cosponsor_core::{Dataset, LegislatorId};
use cosponsor_data::{DEFAULT_DATA_URL, DataError, fetch_network_data};
use cosponsor_graph::{
    FilterParams, Highlight, Layout, NodeDetails, Selection, Subgraph, Trigger, ViewState, filter,
    node_details,
};
use cosponsor_events::{ActivationOrigin, Event, EventBus, EventListener};
use crossbeam_channel::{Receiver, TryRecvError};
use eframe::egui;
use egui_notify::Toasts;
use std::time::{Duration, Instant};

/// Advisory budget for one synchronous rebuild (filter + layout +
/// highlight). Crossing it logs a warning and raises a toast; nothing is
/// enforced.
const SLOW_REDRAW: Duration = Duration::from_millis(3000);

enum LoadPhase {
    Loading {
        rx: Receiver<Result<Dataset, DataError>>,
    },
    Ready(Box<ReadyState>),
    Failed(DataError),
}

/// Everything derived from the dataset for the current parameters. The
/// dataset itself never changes after load; on any parameter or view
/// change the derived members are rebuilt, never patched.
struct ReadyState {
    dataset: Dataset,
    params: FilterParams,
    search_query: String,
    subgraph: Subgraph,
    layout: Layout,
    view: ViewState,
    selection: Selection,
    highlight: Highlight,
    details: Option<NodeDetails>,
}

impl ReadyState {
    fn new(dataset: Dataset) -> Self {
        let params = FilterParams::default();
        let subgraph = filter(&dataset, &params);
        let view = ViewState::default();
        let layout = Layout::compute(subgraph.nodes(), &view.layout_mode());
        let highlight = Highlight::for_view(&view, &subgraph);
        Self {
            dataset,
            params,
            search_query: String::new(),
            subgraph,
            layout,
            view,
            selection: Selection::default(),
            highlight,
            details: None,
        }
    }

    /// Re-derive the subgraph after a parameter change, dropping any
    /// focus or selection that no longer resolves.
    fn refilter(&mut self) {
        self.subgraph = filter(&self.dataset, &self.params);
        self.view = reconcile_view(&self.view, &self.subgraph);
        let stale = self
            .selection
            .current()
            .is_some_and(|id| self.subgraph.node(id).is_none());
        if stale {
            self.selection.clear();
        }
        self.refresh_derived();
    }

    /// Recompute layout, highlight, and panel details for the current
    /// view and selection.
    fn refresh_derived(&mut self) {
        self.layout = Layout::compute(self.subgraph.nodes(), &self.view.layout_mode());
        self.highlight = match self.selection.current() {
            Some(id) => Highlight::for_selection(id, &self.subgraph),
            None => Highlight::for_view(&self.view, &self.subgraph),
        };
        let target = self
            .selection
            .current()
            .or_else(|| self.view.focused_node())
            .cloned();
        self.details =
            target.and_then(|id| node_details(&self.dataset, &self.subgraph, &id));
    }

    fn activate_node(&mut self, id: &LegislatorId) {
        self.view = self.view.apply(&Trigger::Node(id.clone()), &self.subgraph);
        self.selection.toggle(id);
        self.refresh_derived();
    }

    fn activate_label(&mut self, state_code: &str) {
        self.view = self
            .view
            .apply(&Trigger::StateLabel(state_code.to_string()), &self.subgraph);
        self.selection.clear();
        self.refresh_derived();
    }

    fn activate_background(&mut self) {
        self.view = self.view.apply(&Trigger::Background, &self.subgraph);
        self.selection.clear();
        self.refresh_derived();
    }
}

/// Keep a focus target only while it still exists in the subgraph;
/// otherwise fall back one level.
fn reconcile_view(view: &ViewState, subgraph: &Subgraph) -> ViewState {
    let state_exists =
        |state: &str| subgraph.nodes().iter().any(|n| n.state == state);
    match view {
        ViewState::Overview => ViewState::Overview,
        ViewState::StateFocus { state } => {
            if state_exists(state) {
                view.clone()
            } else {
                ViewState::Overview
            }
        }
        ViewState::NodeFocus { node, state } => {
            if subgraph.node(node).is_some() {
                view.clone()
            } else if state_exists(state) {
                ViewState::StateFocus {
                    state: state.clone(),
                }
            } else {
                ViewState::Overview
            }
        }
    }
}

pub struct NetworkApp {
    phase: LoadPhase,
    event_bus: EventBus,
    graph_view: GraphView,
    control_panel: ControlPanel,
    detail_panel: DetailPanel,
    error_panel: ErrorPanel,
    toasts: Toasts,
}

impl NetworkApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Theme::default().apply(&cc.egui_ctx);

        let event_bus = EventBus::new();
        let url = std::env::var("COSPONSOR_DATA_URL")
            .unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
        let rx = fetch_network_data(&url);

        Self {
            phase: LoadPhase::Loading { rx },
            control_panel: ControlPanel::new(event_bus.clone()),
            detail_panel: DetailPanel::new(),
            error_panel: ErrorPanel::new(),
            graph_view: GraphView::new(),
            toasts: Toasts::default(),
            event_bus,
        }
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let LoadPhase::Loading { rx } = &self.phase else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                self.event_bus.publish(Event::DataLoaded);
                self.phase = LoadPhase::Ready(Box::new(ReadyState::new(dataset)));
                self.graph_view.begin_transition();
            }
            Ok(Err(error)) => {
                self.event_bus.publish(Event::DataFailed {
                    message: error.headline().to_string(),
                    detail: error.detail(),
                });
                self.phase = LoadPhase::Failed(error);
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            Err(TryRecvError::Disconnected) => {
                self.phase = LoadPhase::Failed(DataError::Fetch {
                    message: "data fetch worker disconnected".to_string(),
                });
            }
        }
    }
}

impl eframe::App for NetworkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load(ctx);

        // Split the borrows: the ready state lives inside `phase` while
        // the widgets are separate fields.
        let NetworkApp {
            phase,
            event_bus,
            graph_view,
            control_panel,
            detail_panel,
            error_panel,
            ..
        } = self;

        match phase {
            LoadPhase::Loading { .. } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.spinner();
                        ui.label("Loading network data…");
                    });
                });
            }
            LoadPhase::Failed(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    error_panel.ui(ui, error);
                });
            }
            LoadPhase::Ready(state) => {
                egui::SidePanel::left("controls")
                    .default_width(270.0)
                    .show(ctx, |ui| {
                        control_panel.ui(
                            ui,
                            state.dataset.metadata(),
                            state.dataset.policies(),
                            &state.params,
                            &state.search_query,
                            state.subgraph.counts(),
                        );
                    });

                egui::SidePanel::right("details")
                    .default_width(320.0)
                    .show(ctx, |ui| {
                        detail_panel.ui(ui, state.details.as_ref());
                    });

                egui::CentralPanel::default().show(ctx, |ui| {
                    if state.subgraph.is_empty() {
                        theme::empty_state(
                            ui,
                            "Nothing to show",
                            "No connections match the current filters",
                        );
                    }
                    let rect = ui.available_rect_before_wrap();
                    let scene = GraphScene {
                        subgraph: &state.subgraph,
                        layout: &state.layout,
                        highlight: &state.highlight,
                        search_query: &state.search_query,
                    };
                    match graph_view.show(ui, rect, &scene) {
                        Some(CanvasHit::Node(id)) => event_bus.publish(Event::NodeActivated {
                            id,
                            origin: ActivationOrigin::Canvas,
                        }),
                        Some(CanvasHit::StateLabel(state)) => {
                            event_bus.publish(Event::StateLabelActivated { state });
                        }
                        Some(CanvasHit::Background) => {
                            event_bus.publish(Event::BackgroundActivated);
                        }
                        None => {}
                    }
                });
            }
        }

        let bus = self.event_bus.clone();
        bus.dispatch_to(self);

        self.toasts.show(ctx);
    }
}

impl EventListener for NetworkApp {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::ShowWarning { message } => {
                self.toasts.warning(message.clone());
                return;
            }
            Event::ShowError { message } => {
                self.toasts.error(message.clone());
                return;
            }
            Event::DataLoaded => {
                tracing::info!("network dataset ready");
                return;
            }
            Event::DataFailed { message, detail } => {
                tracing::error!(%message, %detail, "network dataset failed to load");
                return;
            }
            _ => {}
        }

        let LoadPhase::Ready(state) = &mut self.phase else {
            return;
        };

        let started = Instant::now();
        let mut structural = true;
        match event {
            Event::ThresholdChanged { min_collaborations } => {
                state.params.min_collaborations = *min_collaborations;
                state.refilter();
            }
            Event::PolicySelected { policy } => {
                state.params.policy = policy.clone();
                state.refilter();
            }
            Event::SamplingChanged { strategy } => {
                state.params.sampling = *strategy;
                state.refilter();
            }
            Event::SearchChanged { query } => {
                // Search only dims; no rebuild or transition needed.
                state.search_query = query.clone();
                structural = false;
            }
            Event::NodeActivated { id, .. } => state.activate_node(id),
            Event::StateLabelActivated { state: label } => state.activate_label(label),
            Event::BackgroundActivated => state.activate_background(),
            // Lifecycle and notification events returned above.
            _ => structural = false,
        }

        if structural {
            self.graph_view.begin_transition();

            let elapsed = started.elapsed();
            if elapsed > SLOW_REDRAW {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "graph rebuild exceeded the redraw budget"
                );
                self.event_bus.publish(Event::ShowWarning {
                    message: format!("Slow redraw: {} ms", elapsed.as_millis()),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosponsor_core::{
        Bill, BillNumber, Collaboration, Legislator, LegislatorMetrics, Metadata, Party,
    };

    /// A and B in CA, connected on one bill.
    fn sample_subgraph() -> Subgraph {
        let dataset = Dataset::new(
            vec![
                Legislator {
                    id: LegislatorId::new("A"),
                    name: "Member A".to_string(),
                    party: Party::Democrat,
                    state: "CA".to_string(),
                    district: None,
                    metrics: LegislatorMetrics::default(),
                },
                Legislator {
                    id: LegislatorId::new("B"),
                    name: "Member B".to_string(),
                    party: Party::Republican,
                    state: "CA".to_string(),
                    district: None,
                    metrics: LegislatorMetrics::default(),
                },
            ],
            vec![Bill {
                bill_number: BillNumber::new("hr1"),
                title: "An act".to_string(),
                policy_id: None,
                policy_name: "Uncategorized".to_string(),
                latest_action_date: None,
            }],
            vec![Collaboration {
                source: LegislatorId::new("A"),
                target: LegislatorId::new("B"),
                bill_number: BillNumber::new("hr1"),
            }],
            vec![],
            Metadata::default(),
        );
        filter(
            &dataset,
            &FilterParams {
                min_collaborations: 1,
                ..FilterParams::default()
            },
        )
    }

    #[test]
    fn reconcile_keeps_a_focus_that_still_resolves() {
        let subgraph = sample_subgraph();

        let state = ViewState::StateFocus {
            state: "CA".to_string(),
        };
        assert_eq!(reconcile_view(&state, &subgraph), state);

        let node = ViewState::NodeFocus {
            node: LegislatorId::new("A"),
            state: "CA".to_string(),
        };
        assert_eq!(reconcile_view(&node, &subgraph), node);
    }

    #[test]
    fn reconcile_falls_back_one_level_at_a_time() {
        let subgraph = sample_subgraph();

        // Filtered-out node, surviving state: node focus becomes state
        // focus, not overview.
        let gone_node = ViewState::NodeFocus {
            node: LegislatorId::new("GHOST"),
            state: "CA".to_string(),
        };
        assert_eq!(
            reconcile_view(&gone_node, &subgraph),
            ViewState::StateFocus {
                state: "CA".to_string()
            }
        );

        // Whole state filtered out: back to overview.
        let gone_state = ViewState::StateFocus {
            state: "NY".to_string(),
        };
        assert_eq!(reconcile_view(&gone_state, &subgraph), ViewState::Overview);

        let gone_both = ViewState::NodeFocus {
            node: LegislatorId::new("GHOST"),
            state: "NY".to_string(),
        };
        assert_eq!(reconcile_view(&gone_both, &subgraph), ViewState::Overview);
    }
}
