use crate::filter::Subgraph;
use crate::layout::LayoutMode;
use cosponsor_core::{Collaboration, LegislatorId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The three navigation levels. A single value owns the whole navigation
/// model; transitions return a new value instead of mutating shared
/// flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewState {
    #[default]
    Overview,
    StateFocus {
        state: String,
    },
    /// Focus on one legislator, nested under the state focus it was
    /// entered from. `state` is always the node's own state, so leaving
    /// node focus lands back on that state, never directly on the
    /// overview.
    NodeFocus {
        node: LegislatorId,
        state: String,
    },
}

/// Pointer activations the presentation layer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Node(LegislatorId),
    StateLabel(String),
    Background,
}

impl ViewState {
    /// Apply one activation. Unknown nodes or labels leave the state
    /// unchanged; interaction errors degrade to no-ops after load.
    pub fn apply(&self, trigger: &Trigger, graph: &Subgraph) -> ViewState {
        match trigger {
            Trigger::Node(id) => {
                let Some(node_state) = graph.state_of(id).map(str::to_string) else {
                    tracing::debug!(node = %id, "activation for a node outside the subgraph");
                    return self.clone();
                };
                match self {
                    ViewState::Overview => ViewState::StateFocus { state: node_state },
                    ViewState::StateFocus { state } => {
                        if *state == node_state {
                            ViewState::NodeFocus {
                                node: id.clone(),
                                state: node_state,
                            }
                        } else {
                            ViewState::StateFocus { state: node_state }
                        }
                    }
                    ViewState::NodeFocus { node, state } => {
                        if node == id {
                            // Re-activating the focused node steps back out
                            // to its state.
                            ViewState::StateFocus {
                                state: state.clone(),
                            }
                        } else if *state == node_state {
                            ViewState::NodeFocus {
                                node: id.clone(),
                                state: node_state,
                            }
                        } else {
                            ViewState::StateFocus { state: node_state }
                        }
                    }
                }
            }
            // A label activation re-targets the state focus from any level.
            Trigger::StateLabel(label) => {
                if graph.nodes().iter().any(|n| n.state == *label) {
                    ViewState::StateFocus {
                        state: label.clone(),
                    }
                } else {
                    tracing::debug!(state = %label, "activation for a state outside the subgraph");
                    self.clone()
                }
            }
            Trigger::Background => match self {
                ViewState::Overview => ViewState::Overview,
                ViewState::StateFocus { .. } => ViewState::Overview,
                ViewState::NodeFocus { state, .. } => ViewState::StateFocus {
                    state: state.clone(),
                },
            },
        }
    }

    /// The layout this view renders with.
    pub fn layout_mode(&self) -> LayoutMode {
        match self {
            ViewState::Overview => LayoutMode::Overview,
            ViewState::StateFocus { state } => LayoutMode::StateFocus {
                state: state.clone(),
            },
            ViewState::NodeFocus { node, state } => LayoutMode::NodeFocus {
                node: node.clone(),
                state: state.clone(),
            },
        }
    }

    pub fn focused_node(&self) -> Option<&LegislatorId> {
        match self {
            ViewState::NodeFocus { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn focused_state(&self) -> Option<&str> {
        match self {
            ViewState::Overview => None,
            ViewState::StateFocus { state } | ViewState::NodeFocus { state, .. } => {
                Some(state.as_str())
            }
        }
    }
}

/// Emphasis of a node after highlight computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeEmphasis {
    #[default]
    Neutral,
    /// Part of the connected set for the current focus or selection.
    Connected,
    /// The focused/selected node itself.
    Focused,
    /// Low but non-zero opacity, never fully hidden.
    Dimmed,
}

/// Emphasis of an edge after highlight computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeEmphasis {
    /// Resting opacity.
    #[default]
    Neutral,
    /// Emphasized and colored by its color endpoint's party.
    Connected,
    /// Opacity zero; the edge stays in the data.
    Hidden,
}

/// Target emphasis for every node and edge of a subgraph. Plain data:
/// the presentation layer interpolates toward it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    node_emphasis: HashMap<LegislatorId, NodeEmphasis>,
    /// Parallel to `Subgraph::edges`.
    edge_emphasis: Vec<EdgeEmphasis>,
    /// For connected edges, the endpoint whose party colors the stroke
    /// (the endpoint away from the focus).
    edge_color_endpoints: Vec<Option<LegislatorId>>,
}

impl Highlight {
    /// Everything at resting emphasis.
    pub fn neutral(graph: &Subgraph) -> Highlight {
        Highlight {
            node_emphasis: graph
                .nodes()
                .iter()
                .map(|n| (n.id.clone(), NodeEmphasis::Neutral))
                .collect(),
            edge_emphasis: vec![EdgeEmphasis::Neutral; graph.edges().len()],
            edge_color_endpoints: vec![None; graph.edges().len()],
        }
    }

    /// Highlight for the current navigation focus.
    ///
    /// State focus: connected = the state's members plus anyone sharing
    /// an edge with them; connected edges touch the state. Node focus:
    /// connected = the node plus direct neighbors; connected edges touch
    /// the node. Everything else dims (nodes) or hides (edges).
    pub fn for_view(view: &ViewState, graph: &Subgraph) -> Highlight {
        match view {
            ViewState::Overview => Highlight::neutral(graph),
            ViewState::StateFocus { state } => {
                let members: HashSet<&LegislatorId> = graph
                    .nodes()
                    .iter()
                    .filter(|n| n.state == *state)
                    .map(|n| &n.id)
                    .collect();
                Highlight::emphasize(graph, |edge| {
                    let source_in = members.contains(&edge.source);
                    let target_in = members.contains(&edge.target);
                    match (source_in, target_in) {
                        (true, false) => Some(edge.target.clone()),
                        (false, true) => Some(edge.source.clone()),
                        (true, true) => Some(edge.target.clone()),
                        (false, false) => None,
                    }
                })
            }
            ViewState::NodeFocus { node, .. } => Highlight::for_node(graph, node),
        }
    }

    /// The toggle-selection overlay: dims all non-neighbors of `node`
    /// regardless of the navigation level.
    pub fn for_selection(node: &LegislatorId, graph: &Subgraph) -> Highlight {
        Highlight::for_node(graph, node)
    }

    fn for_node(graph: &Subgraph, node: &LegislatorId) -> Highlight {
        let mut highlight = Highlight::emphasize(graph, |edge| {
            edge.other_endpoint(node).cloned()
        });
        if let Some(emphasis) = highlight.node_emphasis.get_mut(node) {
            *emphasis = NodeEmphasis::Focused;
        }
        highlight
    }

    /// Shared core: `color_endpoint` decides whether an edge is connected
    /// (returning the endpoint that colors it); connected endpoints form
    /// the connected node set, every other node dims and every other edge
    /// hides.
    fn emphasize(
        graph: &Subgraph,
        color_endpoint: impl Fn(&Collaboration) -> Option<LegislatorId>,
    ) -> Highlight {
        let mut connected_nodes: HashSet<LegislatorId> = HashSet::new();
        let mut edge_emphasis = Vec::with_capacity(graph.edges().len());
        let mut edge_color_endpoints = Vec::with_capacity(graph.edges().len());

        for edge in graph.edges() {
            match color_endpoint(edge) {
                Some(endpoint) => {
                    connected_nodes.insert(edge.source.clone());
                    connected_nodes.insert(edge.target.clone());
                    edge_emphasis.push(EdgeEmphasis::Connected);
                    edge_color_endpoints.push(Some(endpoint));
                }
                None => {
                    edge_emphasis.push(EdgeEmphasis::Hidden);
                    edge_color_endpoints.push(None);
                }
            }
        }

        let node_emphasis = graph
            .nodes()
            .iter()
            .map(|n| {
                let emphasis = if connected_nodes.contains(&n.id) {
                    NodeEmphasis::Connected
                } else {
                    NodeEmphasis::Dimmed
                };
                (n.id.clone(), emphasis)
            })
            .collect();

        Highlight {
            node_emphasis,
            edge_emphasis,
            edge_color_endpoints,
        }
    }

    pub fn node(&self, id: &LegislatorId) -> NodeEmphasis {
        self.node_emphasis.get(id).copied().unwrap_or_default()
    }

    pub fn edge(&self, index: usize) -> EdgeEmphasis {
        self.edge_emphasis.get(index).copied().unwrap_or_default()
    }

    pub fn edge_color_endpoint(&self, index: usize) -> Option<&LegislatorId> {
        self.edge_color_endpoints.get(index)?.as_ref()
    }
}

/// Toggle selection, tracked separately from the navigation focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    current: Option<LegislatorId>,
}

impl Selection {
    /// Select `id`, or clear when `id` is already selected. Returns true
    /// when a node is selected afterwards.
    pub fn toggle(&mut self, id: &LegislatorId) -> bool {
        if self.current.as_ref() == Some(id) {
            self.current = None;
            false
        } else {
            self.current = Some(id.clone());
            true
        }
    }

    pub fn current(&self) -> Option<&LegislatorId> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
