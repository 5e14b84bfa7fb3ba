//! The network canvas: edges as circular arcs, legislators as party
//! colored discs, state labels around the ring. Pure scene data comes in
//! (positions, emphasis); this component only interpolates and paints.

use crate::theme::to_color32;
use cosponsor_core::LegislatorId;
use cosponsor_graph::{
    Highlight, LABEL_OFFSET, Layout, OUTER_RADIUS, Subgraph, Vec2, edge_style, node_radius,
    node_style, style,
};
use eframe::egui;
use std::collections::HashMap;

/// Fixed duration of a focus/filter transition.
pub const TRANSITION_SECS: f64 = 0.75;
/// Polyline resolution for one edge arc.
const EDGE_SEGMENTS: usize = 16;
/// Extra clickable slack around a node disc, in pixels.
const HIT_SLACK: f32 = 4.0;

/// What the pointer landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasHit {
    Node(LegislatorId),
    StateLabel(String),
    Background,
}

/// Borrowed scene description for one frame.
pub struct GraphScene<'a> {
    pub subgraph: &'a Subgraph,
    pub layout: &'a Layout,
    pub highlight: &'a Highlight,
    pub search_query: &'a str,
}

#[derive(Debug, Clone, Copy)]
struct NodeVisual {
    pos: Vec2,
    opacity: f32,
}

struct Transition {
    started_at: f64,
    from_nodes: HashMap<LegislatorId, NodeVisual>,
    from_edges: Vec<f32>,
}

pub struct GraphView {
    displayed_nodes: HashMap<LegislatorId, NodeVisual>,
    displayed_edges: Vec<f32>,
    transition: Option<Transition>,
    transition_pending: bool,
}

impl Default for GraphView {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView {
    pub fn new() -> Self {
        Self {
            displayed_nodes: HashMap::new(),
            displayed_edges: Vec::new(),
            transition: None,
            transition_pending: false,
        }
    }

    /// Start animating from the currently displayed visuals toward the
    /// next scene's targets. Fire-and-forget: calling this again mid
    /// flight simply restarts from wherever the interpolation was.
    pub fn begin_transition(&mut self) {
        self.transition_pending = true;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        scene: &GraphScene<'_>,
    ) -> Option<CanvasHit> {
        let response = ui.allocate_rect(rect, egui::Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let now = ui.input(|i| i.time);
        if self.transition_pending {
            self.transition = Some(Transition {
                started_at: now,
                from_nodes: self.displayed_nodes.clone(),
                from_edges: self.displayed_edges.clone(),
            });
            self.transition_pending = false;
        }
        let progress = match &self.transition {
            Some(t) => (((now - t.started_at) / TRANSITION_SECS) as f32).clamp(0.0, 1.0),
            None => 1.0,
        };
        let blend = smoothstep(progress);

        // World-to-screen: fit the labeled ring into the viewport.
        let world_extent = OUTER_RADIUS + LABEL_OFFSET + 40.0;
        let scale = (rect.width().min(rect.height()) / (2.0 * world_extent)).max(0.05);
        let center = rect.center();
        let to_screen =
            |v: Vec2| egui::pos2(center.x + v.x * scale, center.y + v.y * scale);

        let query = scene.search_query.trim().to_lowercase();

        // Resolve per-node targets and interpolate.
        let mut next_nodes: HashMap<LegislatorId, NodeVisual> =
            HashMap::with_capacity(scene.subgraph.nodes().len());
        for node in scene.subgraph.nodes() {
            let Some(pos) = scene.layout.position(&node.id) else {
                continue;
            };
            let resolved = node_style(node.party, scene.highlight.node(&node.id));
            let mut opacity = resolved.opacity;
            if !query.is_empty() && !node.name.to_lowercase().contains(&query) {
                opacity = opacity.min(style::NODE_DIMMED_OPACITY);
            }
            let target = NodeVisual { pos, opacity };

            let displayed = match self.transition.as_ref().and_then(|t| t.from_nodes.get(&node.id)) {
                Some(from) if blend < 1.0 => NodeVisual {
                    pos: Vec2::new(
                        lerp(from.pos.x, target.pos.x, blend),
                        lerp(from.pos.y, target.pos.y, blend),
                    ),
                    opacity: lerp(from.opacity, target.opacity, blend),
                },
                _ => target,
            };
            next_nodes.insert(node.id.clone(), displayed);
        }

        // Edges first so discs sit on top.
        let mut next_edges = Vec::with_capacity(scene.subgraph.edges().len());
        for (index, edge) in scene.subgraph.edges().iter().enumerate() {
            let emphasis = scene.highlight.edge(index);
            let color_party = scene
                .highlight
                .edge_color_endpoint(index)
                .and_then(|id| scene.subgraph.node(id))
                .map(|n| n.party);
            let resolved = edge_style(emphasis, color_party);

            let from = self
                .transition
                .as_ref()
                .and_then(|t| t.from_edges.get(index))
                .copied();
            let opacity = match from {
                Some(from) if blend < 1.0 => lerp(from, resolved.opacity, blend),
                _ => resolved.opacity,
            };
            next_edges.push(opacity);

            if opacity <= f32::EPSILON {
                continue;
            }
            let Some(path) = scene.layout.edge_path(edge) else {
                continue;
            };
            let points: Vec<egui::Pos2> = path
                .points(EDGE_SEGMENTS)
                .into_iter()
                .map(to_screen)
                .collect();
            let stroke = egui::Stroke::new(
                resolved.width,
                to_color32(resolved.stroke.with_opacity(opacity)),
            );
            painter.add(egui::Shape::line(points, stroke));
        }

        // Discs, collecting hit geometry as we go.
        let mut hit_circles: Vec<(LegislatorId, egui::Pos2, f32)> = Vec::new();
        for node in scene.subgraph.nodes() {
            let Some(visual) = next_nodes.get(&node.id) else {
                continue;
            };
            let pos = to_screen(visual.pos);
            let radius = node_radius(&node.metrics);
            let resolved = node_style(node.party, scene.highlight.node(&node.id));
            painter.circle_filled(
                pos,
                radius,
                to_color32(resolved.fill.with_opacity(visual.opacity)),
            );
            if resolved.outlined {
                painter.circle_stroke(
                    pos,
                    radius + 1.5,
                    egui::Stroke::new(2.0, to_color32(style::COLOR_NODE_OUTLINE)),
                );
            }
            hit_circles.push((node.id.clone(), pos, radius + HIT_SLACK));
        }

        // State labels outside the ring.
        let mut label_rects: Vec<(String, egui::Rect)> = Vec::new();
        for label in scene.layout.labels() {
            let pos = to_screen(label.position);
            let rect = painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                &label.state,
                egui::FontId::proportional(13.0),
                to_color32(style::COLOR_LABEL),
            );
            label_rects.push((label.state.clone(), rect.expand(4.0)));
        }

        self.displayed_nodes = next_nodes;
        self.displayed_edges = next_edges;
        if blend < 1.0 {
            ui.ctx().request_repaint();
        } else {
            self.transition = None;
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            return Some(Self::hit_test(pointer, &hit_circles, &label_rects));
        }
        None
    }

    /// Nodes win over labels, labels over background.
    fn hit_test(
        pointer: egui::Pos2,
        circles: &[(LegislatorId, egui::Pos2, f32)],
        labels: &[(String, egui::Rect)],
    ) -> CanvasHit {
        let mut best: Option<(&LegislatorId, f32)> = None;
        for (id, pos, radius) in circles {
            let distance = pos.distance(pointer);
            if distance <= *radius && best.is_none_or(|(_, d)| distance < d) {
                best = Some((id, distance));
            }
        }
        if let Some((id, _)) = best {
            return CanvasHit::Node(id.clone());
        }

        for (state, rect) in labels {
            if rect.contains(pointer) {
                return CanvasHit::StateLabel(state.clone());
            }
        }

        CanvasHit::Background
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Vec<(LegislatorId, egui::Pos2, f32)>, Vec<(String, egui::Rect)>) {
        let circles = vec![
            (LegislatorId::new("A"), egui::pos2(10.0, 10.0), 6.0),
            (LegislatorId::new("B"), egui::pos2(14.0, 10.0), 6.0),
        ];
        let labels = vec![(
            "CA".to_string(),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(40.0, 40.0)),
        )];
        (circles, labels)
    }

    #[test]
    fn nodes_win_over_labels_win_over_background() {
        let (circles, labels) = fixtures();

        assert_eq!(
            GraphView::hit_test(egui::pos2(8.0, 10.0), &circles, &labels),
            CanvasHit::Node(LegislatorId::new("A"))
        );
        assert_eq!(
            GraphView::hit_test(egui::pos2(35.0, 35.0), &circles, &labels),
            CanvasHit::StateLabel("CA".to_string())
        );
        assert_eq!(
            GraphView::hit_test(egui::pos2(200.0, 200.0), &circles, &labels),
            CanvasHit::Background
        );
    }

    #[test]
    fn overlapping_discs_resolve_to_the_closest_center() {
        let (circles, labels) = fixtures();
        // Between the two discs but nearer to B.
        assert_eq!(
            GraphView::hit_test(egui::pos2(13.0, 10.0), &circles, &labels),
            CanvasHit::Node(LegislatorId::new("B"))
        );
    }
}
