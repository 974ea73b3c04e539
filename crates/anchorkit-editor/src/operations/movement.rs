use anchorkit_core::{EditError, EditResult, InstructionId, Point};
use anchorkit_path::{subpath_of, VectorPath};
use serde::{Deserialize, Serialize};

use super::Effect;
use crate::continuity::{handle_for, handle_owner, mirror_status, resolve_anchor};
use crate::views::HandleId;

/// Per-call switches for a handle drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleDragOptions {
    /// Move only the dragged handle even if its anchor is mirrored.
    pub suppress_mirror: bool,
}

impl HandleDragOptions {
    pub fn suppressed() -> Self {
        Self {
            suppress_mirror: true,
        }
    }
}

/// Writes an anchor coordinate, keeping a closed subpath's closing duplicate
/// on its `Move`.
fn write_anchor(path: &mut VectorPath, index: usize, pos: Point) {
    if let Some(ins) = path.instruction_at_mut(index) {
        ins.set_anchor(pos);
    }
    if let Some(sp) = subpath_of(path, index) {
        if sp.closed && sp.len() >= 3 && index == sp.first() {
            if let Some(dup) = path.instruction_at_mut(sp.range.end - 2) {
                dup.set_anchor(pos);
            }
        }
    }
}

/// Moves one anchor. Attached handles stay where they are.
pub fn move_anchor(path: &mut VectorPath, id: InstructionId, pos: Point) -> EditResult<Effect> {
    move_anchors(path, &[(id, pos)])
}

/// Moves several anchors at once.
///
/// Every id is resolved before anything is written, so an unknown id leaves
/// the path untouched. When an anchor is named twice the last position wins.
pub fn move_anchors(path: &mut VectorPath, moves: &[(InstructionId, Point)]) -> EditResult<Effect> {
    let mut resolved: Vec<(usize, Point)> = Vec::with_capacity(moves.len());
    for &(id, pos) in moves {
        let index = resolve_anchor(path, id)?;
        match resolved.iter_mut().find(|(i, _)| *i == index) {
            Some(entry) => entry.1 = pos,
            None => resolved.push((index, pos)),
        }
    }

    let mut touched = Vec::new();
    for (index, pos) in resolved {
        let current = path.instruction_at(index).and_then(|i| i.anchor());
        if current == Some(pos) {
            continue;
        }
        write_anchor(path, index, pos);
        touched.push(path.nodes()[index].id);
    }

    if touched.is_empty() {
        return Ok(Effect::none());
    }
    tracing::debug!("moved {} anchor(s)", touched.len());
    Ok(Effect::moved(touched, Vec::new()))
}

/// Moves a handle, mirroring its partner when the owning anchor is mirrored
/// and `options` allow it.
///
/// Mirror status is taken before the write, so a drag that starts on a
/// mirrored anchor keeps it mirrored.
pub fn move_handle(
    path: &mut VectorPath,
    handle: HandleId,
    pos: Point,
    options: HandleDragOptions,
) -> EditResult<Effect> {
    let (owner, side) = handle_owner(path, handle)?;
    let anchor = path
        .instruction_at(owner)
        .and_then(|i| i.anchor())
        .ok_or(EditError::HandleNotFound {
            id: handle.instruction,
            slot: handle.slot.index(),
        })?;
    let mirrored = !options.suppress_mirror && mirror_status(path, owner);

    let slot = path
        .get_mut(handle.instruction)
        .and_then(|ins| ins.control_mut(handle.slot))
        .ok_or(EditError::HandleNotFound {
            id: handle.instruction,
            slot: handle.slot.index(),
        })?;
    if *slot == pos {
        return Ok(Effect::none());
    }
    *slot = pos;

    let mut handles = vec![handle];
    if mirrored {
        if let Some(partner) = handle_for(path, owner, side.opposite()) {
            if let Some(p) = path
                .get_mut(partner.instruction)
                .and_then(|ins| ins.control_mut(partner.slot))
            {
                *p = pos.reflect_through(anchor);
                handles.push(partner);
            }
        }
    }

    tracing::debug!(
        "moved handle {} (mirrored partner: {})",
        handle,
        handles.len() > 1
    );
    Ok(Effect::moved(vec![path.nodes()[owner].id], handles))
}
