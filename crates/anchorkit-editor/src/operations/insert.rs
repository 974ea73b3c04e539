use anchorkit_core::{EditError, EditResult, InstructionId, Point};
use anchorkit_path::bezier::{
    nearest_on_cubic, nearest_on_line, nearest_on_quadratic, split_cubic, split_quadratic,
};
use anchorkit_path::{is_endpoint, subpath_of, Instruction, VectorPath};
use serde::{Deserialize, Serialize};

use super::Effect;
use crate::continuity::resolve_anchor;

/// How a click on or near a path adds geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InsertMode {
    /// Raise the target segment one degree, using the position as the new
    /// control coordinate.
    Bend,
    /// Extend an open subpath beyond the target endpoint. With a handle the
    /// new segment is a quadratic whose control mirrors it through the new
    /// point.
    Append { handle: Option<Point> },
    /// Split the target segment at the point nearest the position.
    Split,
}

/// Adds geometry at `pos` relative to `target`.
///
/// `target` is a segment instruction for `Bend` and `Split`, an endpoint
/// anchor for `Append`.
pub fn insert_anchor(
    path: &mut VectorPath,
    target: InstructionId,
    pos: Point,
    mode: InsertMode,
    tolerance: f64,
) -> EditResult<Effect> {
    match mode {
        InsertMode::Bend => bend(path, target, pos),
        InsertMode::Append { handle } => append(path, target, pos, handle),
        InsertMode::Split => split(path, target, pos, tolerance),
    }
}

fn segment_index(path: &VectorPath, target: InstructionId) -> EditResult<usize> {
    let index = path
        .index_of(target)
        .ok_or(EditError::InstructionNotFound(target))?;
    if index == 0 || !path.nodes()[index].instruction.is_segment() {
        return Err(EditError::invalid(format!(
            "instruction {} is not a segment",
            target
        )));
    }
    Ok(index)
}

fn bend(path: &mut VectorPath, target: InstructionId, pos: Point) -> EditResult<Effect> {
    let index = segment_index(path, target)?;
    let raised = match path.nodes()[index].instruction {
        Instruction::Line(to) => Instruction::Quad { ctrl: pos, to },
        Instruction::Quad { ctrl, to } => Instruction::Cubic {
            ctrl1: ctrl,
            ctrl2: pos,
            to,
        },
        _ => {
            return Err(EditError::invalid(format!(
                "segment {} is already cubic",
                target
            )))
        }
    };
    if let Some(ins) = path.instruction_at_mut(index) {
        *ins = raised;
    }
    tracing::debug!("bent segment {} through {}", target, pos);
    Ok(Effect::structural(vec![target]))
}

fn append(
    path: &mut VectorPath,
    target: InstructionId,
    pos: Point,
    handle: Option<Point>,
) -> EditResult<Effect> {
    let index = resolve_anchor(path, target)?;
    let id = path.nodes()[index].id;
    if !is_endpoint(path, id) {
        return Err(EditError::NotAnEndpoint(target));
    }
    let sp = subpath_of(path, index).ok_or(EditError::AnchorNotFound(target))?;
    let segment_to = |to: Point| match handle {
        Some(h) => Instruction::Quad {
            ctrl: h.reflect_through(pos),
            to,
        },
        None => Instruction::Line(to),
    };

    let new_id = if index == sp.range.end - 1 {
        path.insert(index + 1, segment_to(pos))
    } else {
        // Prepend: the old head becomes the end of a new first segment.
        let old_head = path.nodes()[index]
            .instruction
            .anchor()
            .ok_or(EditError::AnchorNotFound(target))?;
        if let Some(ins) = path.instruction_at_mut(index) {
            *ins = segment_to(old_head);
        }
        path.insert(index, Instruction::Move(pos))
    };
    tracing::debug!("appended anchor {} at {}", new_id, pos);
    Ok(Effect::structural(vec![new_id]))
}

fn split(path: &mut VectorPath, target: InstructionId, pos: Point, tolerance: f64) -> EditResult<Effect> {
    let index = segment_index(path, target)?;
    let from = path
        .instruction_at(index - 1)
        .and_then(|i| i.anchor())
        .ok_or_else(|| EditError::invalid(format!("segment {} has no start anchor", target)))?;

    let (first, second) = match path.nodes()[index].instruction {
        Instruction::Line(to) => {
            let t = nearest_on_line(from, to, pos);
            if !interior(t, tolerance) {
                return Ok(Effect::none());
            }
            let mid = from.lerp(to, t);
            (Instruction::Line(mid), Instruction::Line(to))
        }
        Instruction::Quad { ctrl, to } => {
            let t = nearest_on_quadratic(from, ctrl, to, pos, tolerance);
            if !interior(t, tolerance) {
                return Ok(Effect::none());
            }
            let s = split_quadratic(from, ctrl, to, t);
            (
                Instruction::Quad {
                    ctrl: s.first_ctrl,
                    to: s.mid,
                },
                Instruction::Quad {
                    ctrl: s.second_ctrl,
                    to,
                },
            )
        }
        Instruction::Cubic { ctrl1, ctrl2, to } => {
            let t = nearest_on_cubic(from, ctrl1, ctrl2, to, pos, tolerance);
            if !interior(t, tolerance) {
                return Ok(Effect::none());
            }
            let s = split_cubic(from, ctrl1, ctrl2, to, t);
            (
                Instruction::Cubic {
                    ctrl1: s.first.0,
                    ctrl2: s.first.1,
                    to: s.mid,
                },
                Instruction::Cubic {
                    ctrl1: s.second.0,
                    ctrl2: s.second.1,
                    to,
                },
            )
        }
        _ => return Ok(Effect::none()),
    };

    // The target keeps its id as the second half.
    if let Some(ins) = path.instruction_at_mut(index) {
        *ins = second;
    }
    let new_id = path.insert(index, first);
    tracing::debug!("split segment {} with new anchor {}", target, new_id);
    Ok(Effect::structural(vec![new_id]))
}

fn interior(t: f64, tolerance: f64) -> bool {
    t > tolerance && t < 1.0 - tolerance
}
