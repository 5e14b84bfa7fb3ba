pub mod details;
pub mod filter;
pub mod layout;
pub mod style;
pub mod view;

pub use details::{BILL_LIST_CAP, BillSummary, NodeDetails, PolicyTally, node_details};
pub use filter::{
    DEFAULT_MIN_COLLABORATIONS, EDGE_SAMPLE_CAP, FilterParams, MIN_COLLABORATIONS_RANGE,
    PolicyFilter, SamplingStrategy, Subgraph, SubgraphCounts, filter,
};
pub use layout::{
    ArcPath, LABEL_OFFSET, Layout, LayoutMode, OUTER_RADIUS, Ring, StateLabel, Vec2,
};
pub use style::{Color, EdgeStyle, NodeStyle, edge_style, node_radius, node_style, party_color};
pub use view::{EdgeEmphasis, Highlight, NodeEmphasis, Selection, Trigger, ViewState};
