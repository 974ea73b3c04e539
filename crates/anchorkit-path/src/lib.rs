//! # AnchorKit Path
//!
//! The canonical path-instruction model and the topology queries the editor
//! builds on.
//!
//! ## Components
//!
//! - **Instruction**: `Move`, `Line`, `Quad`, `Cubic` and `Close`
//! - **VectorPath**: an id-stamped instruction list, with parsing,
//!   normalization and serialization
//! - **Topology**: subpath decomposition, neighbor lookup, endpoint detection
//!   and inversion
//! - **Bezier**: exact degree elevation, quadratic fitting, De Casteljau
//!   splitting and nearest-parameter search
//!
//! ```text
//! raw "M 0 0 L 10 0 L 10 10 Z"
//!   └── parser ──> Vec<Instruction>
//!         └── VectorPath::normalize ──> "M 0 0 L 10 0 L 10 10 L 0 0 Z"
//!               └── topology (subpaths, neighbors, endpoints)
//! ```

pub mod bezier;
pub mod instruction;
pub mod parser;
pub mod path;
pub mod topology;

pub use instruction::{ControlSlot, Instruction, PathNode};
pub use parser::parse_instructions;
pub use path::VectorPath;
pub use topology::{
    canonical_anchor, incoming_segment, invert, is_endpoint, neighbors, outgoing_segment,
    split_into_subpaths, subpath_of, Neighbors, SegmentRef, Subpath,
};
