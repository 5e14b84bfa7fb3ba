use cosponsor_core::{Collaboration, Legislator, LegislatorId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::f32::consts::TAU;

/// Radius of the outer state ring.
pub const OUTER_RADIUS: f32 = 300.0;
/// Focused-state nodes sit on a circle of `OUTER_RADIUS * INNER_FACTOR`.
pub const INNER_FACTOR: f32 = 0.5;
/// Fixed angular gap between adjacent state arcs, in radians.
pub const ARC_GAP: f32 = 0.06;
/// State labels render this far outside the ring.
pub const LABEL_OFFSET: f32 = 28.0;

/// Arc radius = endpoint distance times this factor. Larger separation
/// therefore gives a flatter curve.
pub const ARC_RADIUS_FACTOR: f32 = 1.1;
/// Tighter factor for edges whose endpoints both sit on the inner circle.
pub const INNER_ARC_RADIUS_FACTOR: f32 = 0.65;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn polar(radius: f32, angle: f32) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn distance(self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Which circle a node was placed on; decides the curve factor for its
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ring {
    Outer,
    Inner,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutMode {
    #[default]
    Overview,
    StateFocus {
        state: String,
    },
    NodeFocus {
        node: LegislatorId,
        state: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateLabel {
    pub state: String,
    pub angle: f32,
    pub position: Vec2,
}

/// Deterministic positions for one subgraph + mode. Pure data: no part of
/// the layout changes after [`Layout::compute`] returns.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    mode: LayoutMode,
    positions: HashMap<LegislatorId, Vec2>,
    rings: HashMap<LegislatorId, Ring>,
    labels: Vec<StateLabel>,
}

impl Layout {
    /// Position every node for `mode`.
    ///
    /// States are keyed lexicographically and nodes ordered by id within
    /// their state, so the result depends only on the node set and mode.
    pub fn compute(nodes: &[Legislator], mode: &LayoutMode) -> Layout {
        let mut by_state: BTreeMap<&str, Vec<&Legislator>> = BTreeMap::new();
        for node in nodes {
            by_state.entry(node.state.as_str()).or_default().push(node);
        }
        for members in by_state.values_mut() {
            members.sort_by(|a, b| a.id.cmp(&b.id));
        }

        let mut layout = Layout {
            mode: mode.clone(),
            ..Layout::default()
        };

        match mode {
            LayoutMode::Overview => layout.place_overview(&by_state),
            LayoutMode::StateFocus { state } => layout.place_state_focus(&by_state, state),
            LayoutMode::NodeFocus { node, state } => {
                layout.place_state_focus(&by_state, state);
                // The focused node leaves the inner circle for the origin;
                // everyone else keeps their state-focus position.
                layout.positions.insert(node.clone(), Vec2::default());
                layout.rings.insert(node.clone(), Ring::Center);
            }
        }

        layout
    }

    fn place_overview(&mut self, by_state: &BTreeMap<&str, Vec<&Legislator>>) {
        let state_count = by_state.len();
        if state_count == 0 {
            return;
        }

        // Every state gets an equal share of the circle regardless of how
        // many members it holds.
        let total_gap = ARC_GAP * state_count as f32;
        let arc_span = (TAU - total_gap).max(0.0) / state_count as f32;

        for (index, (state, members)) in by_state.iter().enumerate() {
            let arc_start = index as f32 * (arc_span + ARC_GAP);
            for (slot, member) in members.iter().enumerate() {
                let angle = arc_start + (slot as f32 + 0.5) * arc_span / members.len() as f32;
                self.positions
                    .insert(member.id.clone(), Vec2::polar(OUTER_RADIUS, angle));
                self.rings.insert(member.id.clone(), Ring::Outer);
            }
            let mid = arc_start + arc_span / 2.0;
            self.labels.push(StateLabel {
                state: state.to_string(),
                angle: mid,
                position: Vec2::polar(OUTER_RADIUS + LABEL_OFFSET, mid),
            });
        }
    }

    fn place_state_focus(&mut self, by_state: &BTreeMap<&str, Vec<&Legislator>>, focused: &str) {
        let inner_radius = OUTER_RADIUS * INNER_FACTOR;
        if let Some(members) = by_state.get(focused) {
            for (slot, member) in members.iter().enumerate() {
                let angle = slot as f32 * TAU / members.len() as f32;
                self.positions
                    .insert(member.id.clone(), Vec2::polar(inner_radius, angle));
                self.rings.insert(member.id.clone(), Ring::Inner);
            }
        }

        // Remaining states collapse to single points on the outer ring,
        // evenly spaced over a ring that excludes the focused state.
        let collapsed: Vec<(&str, &Vec<&Legislator>)> = by_state
            .iter()
            .filter(|(state, _)| **state != focused)
            .map(|(state, members)| (*state, members))
            .collect();
        let ring_len = collapsed.len();
        for (index, (state, members)) in collapsed.into_iter().enumerate() {
            let angle = index as f32 * TAU / ring_len as f32;
            let point = Vec2::polar(OUTER_RADIUS, angle);
            for member in members {
                self.positions.insert(member.id.clone(), point);
                self.rings.insert(member.id.clone(), Ring::Outer);
            }
            self.labels.push(StateLabel {
                state: state.to_string(),
                angle,
                position: Vec2::polar(OUTER_RADIUS + LABEL_OFFSET, angle),
            });
        }
    }

    pub fn mode(&self) -> &LayoutMode {
        &self.mode
    }

    pub fn position(&self, id: &LegislatorId) -> Option<Vec2> {
        self.positions.get(id).copied()
    }

    pub fn ring(&self, id: &LegislatorId) -> Option<Ring> {
        self.rings.get(id).copied()
    }

    pub fn labels(&self) -> &[StateLabel] {
        &self.labels
    }

    /// Arc path for `edge`, or `None` when an endpoint is not part of
    /// this layout (the caller skips the edge instead of failing) or the
    /// endpoints coincide (nothing to draw).
    pub fn edge_path(&self, edge: &Collaboration) -> Option<ArcPath> {
        let start = self.position(&edge.source)?;
        let end = self.position(&edge.target)?;

        let both_inside = matches!(self.ring(&edge.source)?, Ring::Inner | Ring::Center)
            && matches!(self.ring(&edge.target)?, Ring::Inner | Ring::Center);
        let factor = if both_inside {
            INNER_ARC_RADIUS_FACTOR
        } else {
            ARC_RADIUS_FACTOR
        };

        ArcPath::between(start, end, factor)
    }
}

/// A single circular arc between two points, the rendering primitive for
/// every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Vec2,
    pub end: Vec2,
    pub radius: f32,
    center: Vec2,
    start_angle: f32,
    sweep: f32,
}

impl ArcPath {
    /// Build the arc whose radius is `chord * factor`, bowing to the left
    /// of the start→end direction. Returns `None` for coincident
    /// endpoints.
    pub fn between(start: Vec2, end: Vec2, factor: f32) -> Option<ArcPath> {
        let chord = start.distance(end);
        if chord <= f32::EPSILON {
            return None;
        }

        // A circle through both points needs radius >= chord / 2.
        let radius = (chord * factor).max(chord / 2.0 + f32::EPSILON);

        let mid = Vec2::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
        let dir = Vec2::new((end.x - start.x) / chord, (end.y - start.y) / chord);
        let perpendicular = Vec2::new(-dir.y, dir.x);
        let offset = (radius * radius - (chord / 2.0) * (chord / 2.0))
            .max(0.0)
            .sqrt();
        let center = Vec2::new(
            mid.x + perpendicular.x * offset,
            mid.y + perpendicular.y * offset,
        );

        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let end_angle = (end.y - center.y).atan2(end.x - center.x);
        let mut sweep = end_angle - start_angle;
        // Always the minor arc.
        if sweep > std::f32::consts::PI {
            sweep -= TAU;
        } else if sweep < -std::f32::consts::PI {
            sweep += TAU;
        }

        Some(ArcPath {
            start,
            end,
            radius,
            center,
            start_angle,
            sweep,
        })
    }

    /// Point on the arc at parameter `t` in `[0, 1]`.
    pub fn sample(&self, t: f32) -> Vec2 {
        let angle = self.start_angle + self.sweep * t;
        Vec2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Polyline approximation with `segments + 1` points, endpoints exact.
    pub fn points(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments + 1);
        points.push(self.start);
        for i in 1..segments {
            points.push(self.sample(i as f32 / segments as f32));
        }
        points.push(self.end);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosponsor_core::{BillNumber, LegislatorMetrics, Party};

    fn legislator(id: &str, state: &str) -> Legislator {
        Legislator {
            id: LegislatorId::new(id),
            name: format!("Member {id}"),
            party: Party::Republican,
            state: state.to_string(),
            district: None,
            metrics: LegislatorMetrics::default(),
        }
    }

    fn edge(source: &str, target: &str) -> Collaboration {
        Collaboration {
            source: LegislatorId::new(source),
            target: LegislatorId::new(target),
            bill_number: BillNumber::new("hr1"),
        }
    }

    fn sample_nodes() -> Vec<Legislator> {
        vec![
            legislator("A1", "CA"),
            legislator("A2", "CA"),
            legislator("B1", "NY"),
            legislator("C1", "TX"),
            legislator("C2", "TX"),
            legislator("C3", "TX"),
        ]
    }

    #[test]
    fn overview_places_every_node_on_the_ring() {
        let nodes = sample_nodes();
        let layout = Layout::compute(&nodes, &LayoutMode::Overview);

        for node in &nodes {
            let pos = layout.position(&node.id).unwrap();
            let radius = pos.distance(Vec2::default());
            assert!(
                (radius - OUTER_RADIUS).abs() < 0.01,
                "{} at radius {radius}",
                node.id
            );
            assert_eq!(layout.ring(&node.id), Some(Ring::Outer));
        }
        assert_eq!(layout.labels().len(), 3);
    }

    #[test]
    fn overview_is_deterministic_regardless_of_input_order() {
        let nodes = sample_nodes();
        let mut shuffled = sample_nodes();
        shuffled.reverse();

        let a = Layout::compute(&nodes, &LayoutMode::Overview);
        let b = Layout::compute(&shuffled, &LayoutMode::Overview);

        for node in &nodes {
            assert_eq!(a.position(&node.id), b.position(&node.id));
        }
    }

    #[test]
    fn overview_state_arcs_are_equal_and_labels_sit_outside() {
        let layout = Layout::compute(&sample_nodes(), &LayoutMode::Overview);
        let labels = layout.labels();

        // Lexicographic state order: CA, NY, TX.
        assert_eq!(labels[0].state, "CA");
        assert_eq!(labels[1].state, "NY");
        assert_eq!(labels[2].state, "TX");

        let spacing01 = labels[1].angle - labels[0].angle;
        let spacing12 = labels[2].angle - labels[1].angle;
        assert!((spacing01 - spacing12).abs() < 1e-4);

        for label in labels {
            let radius = label.position.distance(Vec2::default());
            assert!((radius - (OUTER_RADIUS + LABEL_OFFSET)).abs() < 0.01);
        }
    }

    #[test]
    fn state_focus_moves_members_inside_and_collapses_the_rest() {
        let layout = Layout::compute(
            &sample_nodes(),
            &LayoutMode::StateFocus {
                state: "TX".to_string(),
            },
        );

        for id in ["C1", "C2", "C3"] {
            let pos = layout.position(&LegislatorId::new(id)).unwrap();
            let radius = pos.distance(Vec2::default());
            assert!((radius - OUTER_RADIUS * INNER_FACTOR).abs() < 0.01);
            assert_eq!(layout.ring(&LegislatorId::new(id)), Some(Ring::Inner));
        }

        // CA members collapse onto one shared point.
        let a1 = layout.position(&LegislatorId::new("A1")).unwrap();
        let a2 = layout.position(&LegislatorId::new("A2")).unwrap();
        assert_eq!(a1, a2);
        assert!((a1.distance(Vec2::default()) - OUTER_RADIUS).abs() < 0.01);

        // Labels only for collapsed states.
        let label_states: Vec<&str> = layout.labels().iter().map(|l| l.state.as_str()).collect();
        assert_eq!(label_states, vec!["CA", "NY"]);
    }

    #[test]
    fn node_focus_centers_the_node_and_keeps_the_rest() {
        let state_focus = Layout::compute(
            &sample_nodes(),
            &LayoutMode::StateFocus {
                state: "TX".to_string(),
            },
        );
        let node_focus = Layout::compute(
            &sample_nodes(),
            &LayoutMode::NodeFocus {
                node: LegislatorId::new("C2"),
                state: "TX".to_string(),
            },
        );

        assert_eq!(
            node_focus.position(&LegislatorId::new("C2")),
            Some(Vec2::default())
        );
        assert_eq!(node_focus.ring(&LegislatorId::new("C2")), Some(Ring::Center));

        for id in ["C1", "C3", "A1", "B1"] {
            let id = LegislatorId::new(id);
            assert_eq!(node_focus.position(&id), state_focus.position(&id));
        }
    }

    #[test]
    fn edge_path_is_none_for_missing_endpoints() {
        let layout = Layout::compute(&sample_nodes(), &LayoutMode::Overview);
        assert!(layout.edge_path(&edge("A1", "GHOST")).is_none());
        assert!(layout.edge_path(&edge("A1", "B1")).is_some());
    }

    #[test]
    fn edge_path_is_none_for_coincident_endpoints() {
        // Two members of the same collapsed state share a point.
        let layout = Layout::compute(
            &sample_nodes(),
            &LayoutMode::StateFocus {
                state: "TX".to_string(),
            },
        );
        assert!(layout.edge_path(&edge("A1", "A2")).is_none());
    }

    #[test]
    fn inner_edges_curve_tighter_than_ring_edges() {
        let layout = Layout::compute(
            &sample_nodes(),
            &LayoutMode::StateFocus {
                state: "TX".to_string(),
            },
        );

        let inner = layout.edge_path(&edge("C1", "C2")).unwrap();
        let mixed = layout.edge_path(&edge("C1", "A1")).unwrap();

        let inner_chord = inner.start.distance(inner.end);
        let mixed_chord = mixed.start.distance(mixed.end);
        assert!((inner.radius / inner_chord) < (mixed.radius / mixed_chord));
    }

    #[test]
    fn arc_radius_scales_with_endpoint_distance() {
        let near = ArcPath::between(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 1.1).unwrap();
        let far = ArcPath::between(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 1.1).unwrap();
        assert!((near.radius - 11.0).abs() < 0.01);
        assert!((far.radius - 110.0).abs() < 0.01);
    }

    #[test]
    fn arc_sample_hits_both_endpoints() {
        let arc = ArcPath::between(Vec2::new(-50.0, 20.0), Vec2::new(75.0, -10.0), 1.1).unwrap();
        assert!(arc.sample(0.0).distance(arc.start) < 0.01);
        assert!(arc.sample(1.0).distance(arc.end) < 0.01);

        let points = arc.points(16);
        assert_eq!(points.len(), 17);
        assert_eq!(points[0], arc.start);
        assert_eq!(points[16], arc.end);
        // Every sampled point keeps the arc's radius from its center.
        for point in points {
            assert!((point.distance(arc.center) - arc.radius).abs() < 0.05);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn point_strategy() -> impl Strategy<Value = Vec2> {
            (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y))
        }

        proptest! {
            /// The arc always passes through both endpoints and its radius
            /// is never below half the chord.
            #[test]
            fn arc_endpoint_continuity(
                start in point_strategy(),
                end in point_strategy(),
                factor in 0.4f32..3.0,
            ) {
                prop_assume!(start.distance(end) > 1.0);
                let arc = ArcPath::between(start, end, factor).unwrap();

                prop_assert!(arc.sample(0.0).distance(start) < 0.1);
                prop_assert!(arc.sample(1.0).distance(end) < 0.1);
                prop_assert!(arc.radius >= start.distance(end) / 2.0);
            }
        }
    }
}
