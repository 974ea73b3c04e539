//! Handle ownership and the mirror relation.
//!
//! Every control point belongs to exactly one anchor, on one side of it:
//!
//! | control      | owner                     | side   |
//! |--------------|---------------------------|--------|
//! | `Cubic.ctrl1`| start anchor of the cubic | `Next` |
//! | `Cubic.ctrl2`| end anchor of the cubic   | `Pre`  |
//! | `Quad.ctrl`  | end anchor of the quad    | `Pre`  |
//!
//! An anchor whose outgoing segment is a `Quad` therefore has no `Next`
//! handle; the shared control is exposed once, on the far end.

use anchorkit_core::{EditError, EditResult, InstructionId, Point, SegmentSide};
use anchorkit_path::{
    canonical_anchor, incoming_segment, outgoing_segment, ControlSlot, Instruction, VectorPath,
};

use crate::views::HandleId;

/// Resolves an anchor id to the index of its logical anchor.
///
/// The closing duplicate of a closed subpath resolves onto the `Move`.
pub fn resolve_anchor(path: &VectorPath, id: InstructionId) -> EditResult<usize> {
    let index = path.index_of(id).ok_or(EditError::AnchorNotFound(id))?;
    canonical_anchor(path, index).ok_or(EditError::AnchorNotFound(id))
}

/// The handle on `side` of the anchor at `index`, if one is visible.
pub fn handle_for(path: &VectorPath, index: usize, side: SegmentSide) -> Option<HandleId> {
    let nodes = path.nodes();
    match side {
        SegmentSide::Pre => {
            let seg = incoming_segment(path, index)?;
            let node = nodes[seg.index];
            match node.instruction {
                Instruction::Cubic { .. } => Some(HandleId::new(node.id, ControlSlot::Second)),
                Instruction::Quad { .. } => Some(HandleId::new(node.id, ControlSlot::First)),
                _ => None,
            }
        }
        SegmentSide::Next => {
            let seg = outgoing_segment(path, index)?;
            let node = nodes[seg.index];
            match node.instruction {
                Instruction::Cubic { .. } => Some(HandleId::new(node.id, ControlSlot::First)),
                _ => None,
            }
        }
    }
}

/// Owning anchor index and side of a handle.
pub fn handle_owner(path: &VectorPath, handle: HandleId) -> EditResult<(usize, SegmentSide)> {
    let not_found = || EditError::HandleNotFound {
        id: handle.instruction,
        slot: handle.slot.index(),
    };
    let index = path.index_of(handle.instruction).ok_or_else(not_found)?;
    let instruction = path.instruction_at(index).ok_or_else(not_found)?;
    instruction.control(handle.slot).ok_or_else(not_found)?;

    let (anchor, side) = match (instruction, handle.slot) {
        (Instruction::Cubic { .. }, ControlSlot::First) => {
            (index.checked_sub(1).ok_or_else(not_found)?, SegmentSide::Next)
        }
        _ => (index, SegmentSide::Pre),
    };
    let anchor = canonical_anchor(path, anchor).ok_or_else(not_found)?;
    Ok((anchor, side))
}

/// Current position of a handle in path-local coordinates.
pub fn handle_position(path: &VectorPath, handle: HandleId) -> Option<Point> {
    path.get(handle.instruction)?.control(handle.slot)
}

/// Whether the anchor at `index` is mirrored.
///
/// True iff both handles are visible and `pre + next == 2 * anchor`,
/// compared exactly on the stored values.
pub fn mirror_status(path: &VectorPath, index: usize) -> bool {
    let Some(anchor) = path.instruction_at(index).and_then(|i| i.anchor()) else {
        return false;
    };
    let pre = handle_for(path, index, SegmentSide::Pre).and_then(|h| handle_position(path, h));
    let next = handle_for(path, index, SegmentSide::Next).and_then(|h| handle_position(path, h));
    match (pre, next) {
        (Some(pre), Some(next)) => {
            pre.x + next.x == 2.0 * anchor.x && pre.y + next.y == 2.0 * anchor.y
        }
        _ => false,
    }
}

/// Mirror status by anchor id.
pub fn mirror_status_of(path: &VectorPath, id: InstructionId) -> EditResult<bool> {
    Ok(mirror_status(path, resolve_anchor(path, id)?))
}
