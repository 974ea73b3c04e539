use anchorkit_core::{EditError, EditResult, InstructionId, Point, SegmentSide};
use anchorkit_path::bezier::{fit_quadratic, nearest_on_quadratic, quadratic_to_cubic, split_quadratic};
use anchorkit_path::{incoming_segment, outgoing_segment, Instruction, SegmentRef, VectorPath};

use super::Effect;
use crate::continuity::resolve_anchor;

/// Control point one third of the chord away from `a`, offset across the
/// chord towards `b`.
fn offset_control(a: Point, b: Point) -> Point {
    a + Point::new(b.y - a.y, b.x - a.x) * (1.0 / 3.0)
}

fn is_line(path: &VectorPath, seg: &SegmentRef) -> bool {
    path.instruction_at(seg.index).is_some_and(|i| i.is_line())
}

fn terminal(path: &VectorPath, seg: &SegmentRef) -> Option<Point> {
    path.instruction_at(seg.index).and_then(|i| i.anchor())
}

fn set(path: &mut VectorPath, index: usize, instruction: Instruction) {
    if let Some(slot) = path.instruction_at_mut(index) {
        *slot = instruction;
    }
}

/// Turns the `Line` segments next to an anchor into quadratics.
///
/// With segments on both sides, a quadratic is fitted through the previous
/// anchor, this anchor and the next anchor, split at this anchor, and each
/// half replaces the adjacent segment if that segment is a line. With a
/// segment on one side only, the line gets a control offset from this anchor
/// by a third of the chord. Curves already present are left alone.
pub fn elevate_to_curve(path: &mut VectorPath, id: InstructionId, tolerance: f64) -> EditResult<Effect> {
    let index = resolve_anchor(path, id)?;
    let anchor = path
        .instruction_at(index)
        .and_then(|i| i.anchor())
        .ok_or(EditError::AnchorNotFound(id))?;
    let incoming = incoming_segment(path, index).filter(|s| is_line(path, s));
    let outgoing = outgoing_segment(path, index).filter(|s| is_line(path, s));
    let has_incoming = incoming_segment(path, index).is_some();
    let has_outgoing = outgoing_segment(path, index).is_some();

    if incoming.is_none() && outgoing.is_none() {
        tracing::debug!("elevate {}: no line segment adjacent", id);
        return Ok(Effect::none());
    }
    if let (Some(inc), Some(out)) = (&incoming, &outgoing) {
        if inc.index == out.index {
            return Ok(Effect::none());
        }
    }

    let mut replaced = Vec::new();
    if has_incoming && has_outgoing {
        let prev = incoming_segment(path, index).map(|s| s.from);
        let next = outgoing_segment(path, index).and_then(|s| terminal(path, &s));
        let fitted = match (prev, next) {
            (Some(prev), Some(next)) => {
                fit_quadratic(prev, anchor, next).map(|(ctrl, t0)| (prev, ctrl, next, t0))
            }
            _ => None,
        };
        if let Some((prev, ctrl, next, t0)) = fitted {
            let searched = nearest_on_quadratic(prev, ctrl, next, anchor, tolerance);
            let at = |t: f64| split_quadratic(prev, ctrl, next, t).mid.distance_to(&anchor);
            let t = if at(searched) < at(t0) { searched } else { t0 };
            let split = split_quadratic(prev, ctrl, next, t);
            if let Some(inc) = &incoming {
                set(path, inc.index, Instruction::Quad { ctrl: split.first_ctrl, to: anchor });
                replaced.push(inc.index);
            }
            if let Some(out) = &outgoing {
                set(path, out.index, Instruction::Quad { ctrl: split.second_ctrl, to: next });
                replaced.push(out.index);
            }
            tracing::debug!("elevate {}: projected split at t = {:.4}", id, t);
        }
    }

    if replaced.is_empty() {
        // One-sided, or the neighbors coincide with the anchor.
        if let Some(inc) = &incoming {
            set(
                path,
                inc.index,
                Instruction::Quad {
                    ctrl: offset_control(anchor, inc.from),
                    to: anchor,
                },
            );
            replaced.push(inc.index);
        }
        if let Some(out) = &outgoing {
            if let Some(next) = terminal(path, out) {
                set(
                    path,
                    out.index,
                    Instruction::Quad {
                        ctrl: offset_control(anchor, next),
                        to: next,
                    },
                );
                replaced.push(out.index);
            }
        }
        tracing::debug!("elevate {}: offset control on {} segment(s)", id, replaced.len());
    }

    let anchors = vec![path.nodes()[index].id];
    Ok(Effect::structural(anchors))
}

/// Turns the segment on `side` of an anchor into a `Line` with the same
/// terminal. A line or a missing segment is a no-op.
pub fn degrade_to_line(path: &mut VectorPath, id: InstructionId, side: SegmentSide) -> EditResult<Effect> {
    let index = resolve_anchor(path, id)?;
    let seg = match side {
        SegmentSide::Pre => incoming_segment(path, index),
        SegmentSide::Next => outgoing_segment(path, index),
    };
    let Some(seg) = seg else {
        return Ok(Effect::none());
    };
    match path.instruction_at_mut(seg.index) {
        Some(ins) if ins.is_curve() => {
            *ins = ins.to_line();
            tracing::debug!("degrade {} ({}): segment is now a line", id, side);
            Ok(Effect::structural(vec![path.nodes()[index].id]))
        }
        _ => Ok(Effect::none()),
    }
}

/// Raises a segment to a cubic without changing its shape.
///
/// Quadratics use the exact 2/3 rule, lines get controls at the thirds of the
/// chord. A cubic is left as is.
pub fn promote_to_cubic(path: &mut VectorPath, segment: InstructionId) -> EditResult<Effect> {
    let index = path
        .index_of(segment)
        .ok_or(EditError::InstructionNotFound(segment))?;
    let ins = path.nodes()[index].instruction;
    if matches!(ins, Instruction::Cubic { .. }) {
        return Ok(Effect::none());
    }
    if !ins.is_segment() || index == 0 {
        return Err(EditError::invalid(format!(
            "instruction {} is not a segment",
            segment
        )));
    }
    let from = path
        .instruction_at(index - 1)
        .and_then(|i| i.anchor())
        .ok_or_else(|| EditError::invalid(format!("segment {} has no start anchor", segment)))?;

    let cubic = match ins {
        Instruction::Quad { ctrl, to } => {
            let (ctrl1, ctrl2, to) = quadratic_to_cubic(from, ctrl, to);
            Instruction::Cubic { ctrl1, ctrl2, to }
        }
        Instruction::Line(to) => Instruction::Cubic {
            ctrl1: from.lerp(to, 1.0 / 3.0),
            ctrl2: from.lerp(to, 2.0 / 3.0),
            to,
        },
        other => other,
    };
    set(path, index, cubic);
    tracing::debug!("promoted {} to cubic", segment);
    Ok(Effect::structural(vec![segment]))
}
