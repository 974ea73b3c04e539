//! Edit operations on a [`VectorPath`](anchorkit_path::VectorPath).
//!
//! All operations work in path-local coordinates and mutate the path in
//! place. They either succeed completely or return an error; callers that
//! need atomicity run them on a clone (see `PathEditor`).

mod degree;
mod insert;
mod merge;
mod movement;
mod removal;

pub use degree::{degrade_to_line, elevate_to_curve, promote_to_cubic};
pub use insert::{insert_anchor, InsertMode};
pub use merge::{invert_subpath, merge_subpaths};
pub use movement::{move_anchor, move_anchors, move_handle, HandleDragOptions};
pub use removal::remove_anchors;

use anchorkit_core::InstructionId;
use serde::Serialize;

use crate::views::HandleId;

/// What an operation touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Effect {
    pub changed: bool,
    /// The set of anchors or handles changed; every view is stale.
    pub structural: bool,
    pub anchors: Vec<InstructionId>,
    pub handles: Vec<HandleId>,
}

impl Effect {
    /// Nothing happened.
    pub fn none() -> Self {
        Self::default()
    }

    /// Coordinates changed in place.
    pub fn moved(anchors: Vec<InstructionId>, handles: Vec<HandleId>) -> Self {
        Self {
            changed: true,
            structural: false,
            anchors,
            handles,
        }
    }

    /// Instructions were added, removed, reordered or changed degree.
    pub fn structural(anchors: Vec<InstructionId>) -> Self {
        Self {
            changed: true,
            structural: true,
            anchors,
            handles: Vec::new(),
        }
    }
}
