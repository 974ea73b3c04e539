//! Transient anchor and handle views.
//!
//! Views are derived from the path on demand and carry host-space positions.
//! They hold instruction ids, never references, and go stale after any
//! structural edit.

use anchorkit_core::{EditError, EditResult, InstructionId, Point, SegmentSide, Transform};
use anchorkit_path::{is_endpoint, split_into_subpaths, ControlSlot, VectorPath};
use serde::{Deserialize, Serialize};

use crate::continuity::{handle_for, handle_owner, handle_position, mirror_status, resolve_anchor};

/// Identifies one control coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId {
    /// The curve instruction holding the control.
    pub instruction: InstructionId,
    pub slot: ControlSlot,
}

impl HandleId {
    pub fn new(instruction: InstructionId, slot: ControlSlot) -> Self {
        Self { instruction, slot }
    }
}

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.instruction, self.slot.index())
    }
}

/// A draggable on-curve point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub id: InstructionId,
    /// Host-space position.
    pub position: Point,
    /// Index of the owning subpath.
    pub subpath: usize,
    pub endpoint: bool,
    pub closed: bool,
    pub mirrored: bool,
    pub pre_handle: Option<HandleId>,
    pub next_handle: Option<HandleId>,
}

/// A draggable control point together with its guide segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveHandle {
    pub id: HandleId,
    /// The anchor this handle belongs to.
    pub anchor: InstructionId,
    pub side: SegmentSide,
    /// Host-space position.
    pub position: Point,
    /// Host-space position of the owning anchor; the guide runs from here to
    /// `position`.
    pub anchor_position: Point,
    /// Mirror flag of the owning anchor.
    pub mirrored: bool,
}

impl CurveHandle {
    /// Guide segment endpoints, anchor first.
    pub fn guide(&self) -> (Point, Point) {
        (self.anchor_position, self.position)
    }
}

fn build_anchor(
    path: &VectorPath,
    transform: &Transform,
    index: usize,
    subpath: usize,
    closed: bool,
) -> Option<Anchor> {
    let node = path.nodes().get(index)?;
    let local = node.instruction.anchor()?;
    Some(Anchor {
        id: node.id,
        position: transform.to_absolute(local),
        subpath,
        endpoint: is_endpoint(path, node.id),
        closed,
        mirrored: mirror_status(path, index),
        pre_handle: handle_for(path, index, SegmentSide::Pre),
        next_handle: handle_for(path, index, SegmentSide::Next),
    })
}

/// Every logical anchor, in path order. The closing duplicate of a closed
/// subpath is folded into its `Move`.
pub fn anchor_views(path: &VectorPath, transform: &Transform) -> Vec<Anchor> {
    let mut out = Vec::new();
    for sp in split_into_subpaths(path) {
        let end = if sp.closed && sp.len() >= 3 {
            sp.range.end - 2
        } else {
            sp.range.end
        };
        for index in sp.range.start..end {
            if let Some(anchor) = build_anchor(path, transform, index, sp.index, sp.closed) {
                out.push(anchor);
            }
        }
    }
    out
}

/// View of a single anchor.
pub fn anchor_view(path: &VectorPath, transform: &Transform, id: InstructionId) -> EditResult<Anchor> {
    let index = resolve_anchor(path, id)?;
    let sp = anchorkit_path::subpath_of(path, index).ok_or(EditError::AnchorNotFound(id))?;
    build_anchor(path, transform, index, sp.index, sp.closed).ok_or(EditError::AnchorNotFound(id))
}

/// View of a single handle.
pub fn handle_view(
    path: &VectorPath,
    transform: &Transform,
    handle: HandleId,
) -> EditResult<CurveHandle> {
    let (owner, side) = handle_owner(path, handle)?;
    let not_found = EditError::HandleNotFound {
        id: handle.instruction,
        slot: handle.slot.index(),
    };
    let position = handle_position(path, handle).ok_or_else(|| not_found.clone())?;
    let owner_node = path.nodes().get(owner).ok_or_else(|| not_found.clone())?;
    let anchor = owner_node.instruction.anchor().ok_or(not_found)?;
    Ok(CurveHandle {
        id: handle,
        anchor: owner_node.id,
        side,
        position: transform.to_absolute(position),
        anchor_position: transform.to_absolute(anchor),
        mirrored: mirror_status(path, owner),
    })
}

/// Every visible handle, grouped by anchor in path order (`Pre` first).
pub fn handle_views(path: &VectorPath, transform: &Transform) -> Vec<CurveHandle> {
    anchor_views(path, transform)
        .into_iter()
        .flat_map(|a| [a.pre_handle, a.next_handle])
        .flatten()
        .filter_map(|h| handle_view(path, transform, h).ok())
        .collect()
}
