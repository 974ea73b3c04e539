use anchorkit_core::{EditResult, InstructionId, Point, RemovalMode};
use anchorkit_path::bezier::quadratic_to_cubic;
use anchorkit_path::{subpath_of, Instruction, PathNode, Subpath, VectorPath};

use super::Effect;
use crate::continuity::resolve_anchor;

/// Removes anchors.
///
/// Ids are deduplicated and unknown ids are skipped. Endpoints are dropped
/// and a subpath left with a single `Move` disappears. Interior anchors are
/// handled according to `mode`. A closed loop too small to weld is opened
/// at the anchor, as with `Cut`.
pub fn remove_anchors(
    path: &mut VectorPath,
    ids: &[InstructionId],
    mode: RemovalMode,
) -> EditResult<Effect> {
    let mut targets: Vec<InstructionId> = Vec::new();
    for &id in ids {
        let Ok(index) = resolve_anchor(path, id) else {
            tracing::debug!("remove: {} not present, skipped", id);
            continue;
        };
        let canonical = path.nodes()[index].id;
        if !targets.contains(&canonical) {
            targets.push(canonical);
        }
    }
    if targets.is_empty() {
        return Ok(Effect::none());
    }

    for &id in &targets {
        // An earlier removal may already have taken this anchor with it.
        let Ok(index) = resolve_anchor(path, id) else {
            continue;
        };
        let Some(sp) = subpath_of(path, index) else {
            continue;
        };
        if sp.closed && sp.len() >= 3 {
            remove_from_closed(path, &sp, index, mode);
        } else if sp.closed {
            drop_subpath(path, &sp);
        } else {
            remove_from_open(path, &sp, index, mode);
        }
    }
    path.normalize();
    tracing::debug!("removed {} anchor(s) ({})", targets.len(), mode);
    Ok(Effect::structural(targets))
}

fn anchor_at(path: &VectorPath, index: usize) -> Point {
    path.instruction_at(index)
        .and_then(|i| i.anchor())
        .unwrap_or(Point::ORIGIN)
}

fn instruction(path: &VectorPath, index: usize) -> Instruction {
    path.nodes()[index].instruction
}

fn set(path: &mut VectorPath, index: usize, value: Instruction) {
    if let Some(slot) = path.instruction_at_mut(index) {
        *slot = value;
    }
}

fn drop_subpath(path: &mut VectorPath, sp: &Subpath) {
    path.splice(sp.range.clone(), Vec::new());
}

/// Joins two consecutive segments meeting at `pivot` into one, keeping the
/// outer controls. Quadratics are raised to cubics first so their outer
/// control keeps its tangent.
fn weld(from: Point, incoming: Instruction, pivot: Point, outgoing: Instruction) -> Instruction {
    let outer_in = match incoming {
        Instruction::Cubic { ctrl1, .. } => Some(ctrl1),
        Instruction::Quad { ctrl, to } => Some(quadratic_to_cubic(from, ctrl, to).0),
        _ => None,
    };
    let outer_out = match outgoing {
        Instruction::Cubic { ctrl2, .. } => Some(ctrl2),
        Instruction::Quad { ctrl, to } => Some(quadratic_to_cubic(pivot, ctrl, to).1),
        _ => None,
    };
    let to = outgoing.anchor().unwrap_or(pivot);
    match (outer_in, outer_out) {
        (Some(ctrl1), Some(ctrl2)) => Instruction::Cubic { ctrl1, ctrl2, to },
        (Some(ctrl), None) | (None, Some(ctrl)) => Instruction::Quad { ctrl, to },
        (None, None) => Instruction::Line(to),
    }
}

fn remove_from_open(path: &mut VectorPath, sp: &Subpath, index: usize, mode: RemovalMode) {
    let (s, last) = (sp.range.start, sp.range.end - 1);
    if s == last {
        drop_subpath(path, sp);
        return;
    }

    if index == s || index == last {
        path.remove(index);
        if index == s {
            if let Some(head) = path.instruction_at_mut(s) {
                *head = head.to_move();
            }
        }
        if last - 1 == s {
            // only a lone Move is left
            path.remove(s);
        }
        return;
    }

    match mode {
        RemovalMode::Cut => {
            let at = anchor_at(path, index);
            path.insert(index + 1, Instruction::Move(at));
        }
        RemovalMode::Weld => {
            let welded = weld(
                anchor_at(path, index - 1),
                instruction(path, index),
                anchor_at(path, index),
                instruction(path, index + 1),
            );
            set(path, index + 1, welded);
            path.remove(index);
        }
    }
}

fn remove_from_closed(path: &mut VectorPath, sp: &Subpath, index: usize, mode: RemovalMode) {
    let (s, e) = (sp.range.start, sp.range.end);
    let dup = e - 2;
    let anchors = dup - s;

    match mode {
        RemovalMode::Cut => {
            if anchors <= 1 {
                drop_subpath(path, sp);
                return;
            }
            if index == s {
                // Already starts and ends at this anchor; just open it.
                path.remove(e - 1);
                return;
            }
            let at = anchor_at(path, index);
            let head = path.make_node(Instruction::Move(at));
            let mut nodes: Vec<PathNode> = Vec::with_capacity(e - s - 1);
            nodes.push(head);
            nodes.extend_from_slice(&path.nodes()[index + 1..=dup]);
            nodes.extend_from_slice(&path.nodes()[s + 1..=index]);
            path.splice_nodes(s..e, nodes);
        }
        RemovalMode::Weld => {
            if anchors <= 2 {
                // Welding would leave fewer than two anchors; open the loop
                // at the anchor instead.
                remove_from_closed(path, sp, index, RemovalMode::Cut);
                return;
            }
            if index != s {
                let welded = weld(
                    anchor_at(path, index - 1),
                    instruction(path, index),
                    anchor_at(path, index),
                    instruction(path, index + 1),
                );
                set(path, index + 1, welded);
                path.remove(index);
                return;
            }
            // Removing the Move: the next anchor becomes the head and the
            // welded segment becomes the new closing segment.
            let welded = weld(
                anchor_at(path, dup - 1),
                instruction(path, dup),
                anchor_at(path, s),
                instruction(path, s + 1),
            );
            set(path, dup, welded);
            let new_head = PathNode {
                id: path.nodes()[s + 1].id,
                instruction: Instruction::Move(anchor_at(path, s + 1)),
            };
            path.splice_nodes(s..s + 2, vec![new_head]);
        }
    }
}
