//! Party palette and emphasis-driven style resolution for the canvas.

use crate::view::{EdgeEmphasis, NodeEmphasis};
use cosponsor_core::{LegislatorMetrics, Party};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0) as u8,
            ..self
        }
    }
}

// Party colors.
pub const COLOR_DEMOCRAT: Color = Color::rgb(31, 119, 180);
pub const COLOR_REPUBLICAN: Color = Color::rgb(214, 39, 40);
pub const COLOR_INDEPENDENT: Color = Color::rgb(148, 103, 189);
pub const COLOR_OTHER: Color = Color::rgb(127, 127, 127);

// Canvas furniture.
pub const COLOR_LABEL: Color = Color::rgb(90, 90, 95);
pub const COLOR_EDGE_NEUTRAL: Color = Color::rgb(130, 130, 140);
pub const COLOR_NODE_OUTLINE: Color = Color::rgb(250, 250, 250);

// Opacity targets the state machine's highlight resolves to. Dimmed
// nodes stay faintly visible; hidden edges drop to zero but remain in
// the data.
pub const NODE_FULL_OPACITY: f32 = 1.0;
pub const NODE_DIMMED_OPACITY: f32 = 0.15;
pub const EDGE_DEFAULT_OPACITY: f32 = 0.12;
pub const EDGE_CONNECTED_OPACITY: f32 = 0.85;
pub const EDGE_HIDDEN_OPACITY: f32 = 0.0;

/// Node disc radius bounds.
pub const NODE_RADIUS_MIN: f32 = 3.5;
pub const NODE_RADIUS_MAX: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub opacity: f32,
    pub outlined: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub stroke: Color,
    pub opacity: f32,
    pub width: f32,
}

pub fn party_color(party: Party) -> Color {
    match party {
        Party::Democrat => COLOR_DEMOCRAT,
        Party::Republican => COLOR_REPUBLICAN,
        Party::Independent => COLOR_INDEPENDENT,
        Party::Other => COLOR_OTHER,
    }
}

/// Disc radius grows with the square root of total collaborations so
/// busy legislators read larger without dwarfing the ring.
pub fn node_radius(metrics: &LegislatorMetrics) -> f32 {
    let scaled = NODE_RADIUS_MIN + (metrics.total_collaborations as f32).sqrt() * 0.35;
    scaled.min(NODE_RADIUS_MAX)
}

pub fn node_style(party: Party, emphasis: NodeEmphasis) -> NodeStyle {
    let fill = party_color(party);
    match emphasis {
        NodeEmphasis::Neutral => NodeStyle {
            fill,
            opacity: NODE_FULL_OPACITY,
            outlined: false,
        },
        NodeEmphasis::Connected => NodeStyle {
            fill,
            opacity: NODE_FULL_OPACITY,
            outlined: false,
        },
        NodeEmphasis::Focused => NodeStyle {
            fill,
            opacity: NODE_FULL_OPACITY,
            outlined: true,
        },
        NodeEmphasis::Dimmed => NodeStyle {
            fill,
            opacity: NODE_DIMMED_OPACITY,
            outlined: false,
        },
    }
}

/// Edge stroke for the given emphasis. Connected edges take the party
/// color of their color endpoint; everything else uses the neutral gray.
pub fn edge_style(emphasis: EdgeEmphasis, color_party: Option<Party>) -> EdgeStyle {
    match emphasis {
        EdgeEmphasis::Neutral => EdgeStyle {
            stroke: COLOR_EDGE_NEUTRAL,
            opacity: EDGE_DEFAULT_OPACITY,
            width: 1.0,
        },
        EdgeEmphasis::Connected => EdgeStyle {
            stroke: color_party.map(party_color).unwrap_or(COLOR_EDGE_NEUTRAL),
            opacity: EDGE_CONNECTED_OPACITY,
            width: 1.5,
        },
        EdgeEmphasis::Hidden => EdgeStyle {
            stroke: COLOR_EDGE_NEUTRAL,
            opacity: EDGE_HIDDEN_OPACITY,
            width: 1.0,
        },
    }
}
