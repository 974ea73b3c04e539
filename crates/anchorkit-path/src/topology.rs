//! Topology queries over a [`VectorPath`].
//!
//! A subpath runs from a `Move` up to (and including) a `Close`, or up to the
//! next `Move`. In a normalized closed subpath the instruction right before
//! `Close` lands on the move point; that closing duplicate and the `Move`
//! are one logical anchor for editing purposes, see [`canonical_anchor`].

use anchorkit_core::{InstructionId, Point};
use serde::Serialize;
use std::ops::Range;

use crate::instruction::Instruction;
use crate::path::VectorPath;

/// Index range of one subpath inside the instruction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subpath {
    /// Position of this subpath among all subpaths.
    pub index: usize,
    pub range: Range<usize>,
    pub closed: bool,
}

impl Subpath {
    pub fn first(&self) -> usize {
        self.range.start
    }

    /// Index of the last anchored instruction (the closing duplicate for a
    /// closed subpath).
    pub fn last_anchor(&self) -> usize {
        if self.closed && self.range.end - self.range.start >= 2 {
            self.range.end - 2
        } else {
            self.range.end - 1
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// True for a closed subpath whose closing duplicate is a separate
    /// instruction from the move.
    fn has_closing_duplicate(&self) -> bool {
        self.closed && self.range.end - self.range.start >= 3
    }
}

/// Splits the path at every `Move` and after every `Close`.
pub fn split_into_subpaths(path: &VectorPath) -> Vec<Subpath> {
    let mut out = Vec::new();
    let mut start = 0;
    let nodes = path.nodes();
    for (i, node) in nodes.iter().enumerate() {
        if node.instruction.is_move() && i > start {
            out.push(Subpath {
                index: out.len(),
                range: start..i,
                closed: false,
            });
            start = i;
        }
        if node.instruction.is_close() {
            out.push(Subpath {
                index: out.len(),
                range: start..i + 1,
                closed: true,
            });
            start = i + 1;
        }
    }
    if start < nodes.len() {
        out.push(Subpath {
            index: out.len(),
            range: start..nodes.len(),
            closed: false,
        });
    }
    out
}

/// The subpath containing the instruction at `index`.
pub fn subpath_of(path: &VectorPath, index: usize) -> Option<Subpath> {
    split_into_subpaths(path)
        .into_iter()
        .find(|sp| sp.contains(index))
}

/// Instructions around `cur` inside its subpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub pre: Option<InstructionId>,
    pub cur: InstructionId,
    pub next: Option<InstructionId>,
}

/// Neighbor lookup within the owning subpath.
///
/// Closed subpaths are circular: the head's `pre` wraps to the instruction
/// right before `Close`, and a `next` that would be the `Close` resolves to
/// the head.
pub fn neighbors(path: &VectorPath, id: InstructionId) -> Option<Neighbors> {
    let index = path.index_of(id)?;
    let sp = subpath_of(path, index)?;
    let nodes = path.nodes();
    let (s, e) = (sp.range.start, sp.range.end);

    let pre = if index == s {
        if sp.closed && e >= 2 && e - 2 > s {
            Some(nodes[e - 2].id)
        } else {
            None
        }
    } else {
        Some(nodes[index - 1].id)
    };

    let next = if nodes[index].instruction.is_close() || index + 1 >= e {
        None
    } else if nodes[index + 1].instruction.is_close() {
        (index != s).then(|| nodes[s].id)
    } else {
        Some(nodes[index + 1].id)
    };

    Some(Neighbors {
        pre,
        cur: id,
        next,
    })
}

/// Maps an instruction index onto the index of the logical anchor it
/// carries: the closing duplicate of a closed subpath maps onto its `Move`.
/// `None` for `Close`.
pub fn canonical_anchor(path: &VectorPath, index: usize) -> Option<usize> {
    let node = path.nodes().get(index)?;
    node.instruction.anchor()?;
    let sp = subpath_of(path, index)?;
    if sp.has_closing_duplicate() && index == sp.range.end - 2 {
        Some(sp.range.start)
    } else {
        Some(index)
    }
}

/// True iff the anchor is the first or last anchor of an open subpath.
pub fn is_endpoint(path: &VectorPath, id: InstructionId) -> bool {
    let Some(index) = path.index_of(id) else {
        return false;
    };
    let Some(sp) = subpath_of(path, index) else {
        return false;
    };
    if sp.closed || path.nodes()[index].instruction.is_close() {
        return false;
    }
    index == sp.range.start || index == sp.range.end - 1
}

/// A segment instruction together with the anchor it leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentRef {
    /// Index of the segment instruction.
    pub index: usize,
    /// Start anchor of the segment.
    pub from: Point,
}

/// The segment arriving at the anchor at `index`.
pub fn incoming_segment(path: &VectorPath, index: usize) -> Option<SegmentRef> {
    let nodes = path.nodes();
    let ins = nodes.get(index)?.instruction;
    let sp = subpath_of(path, index)?;
    let target = if ins.is_move() {
        if !sp.has_closing_duplicate() {
            return None;
        }
        sp.range.end - 2
    } else if ins.is_segment() && index > sp.range.start {
        index
    } else {
        return None;
    };
    Some(SegmentRef {
        index: target,
        from: nodes[target - 1].instruction.anchor()?,
    })
}

/// The segment leaving the anchor at `index`.
pub fn outgoing_segment(path: &VectorPath, index: usize) -> Option<SegmentRef> {
    let nodes = path.nodes();
    let from = nodes.get(index)?.instruction.anchor()?;
    let sp = subpath_of(path, index)?;
    let base = if sp.has_closing_duplicate() && index == sp.range.end - 2 {
        sp.range.start
    } else {
        index
    };
    let target = base + 1;
    if target < sp.range.end && nodes[target].instruction.is_segment() {
        Some(SegmentRef {
            index: target,
            from,
        })
    } else {
        None
    }
}

/// Reverses the traversal order of one subpath.
///
/// Each segment's terminal becomes the anchor it used to leave from, cubic
/// controls swap roles, and the result starts with a `Move` at the original
/// last anchor. A trailing `Close` stays trailing.
pub fn invert(subpath: &[Instruction]) -> Vec<Instruction> {
    let closed = subpath.last().is_some_and(|i| i.is_close());
    let body = if closed {
        &subpath[..subpath.len() - 1]
    } else {
        subpath
    };
    let anchors: Vec<Point> = body.iter().filter_map(|i| i.anchor()).collect();
    let Some(&last) = anchors.last() else {
        return subpath.to_vec();
    };

    let mut out = Vec::with_capacity(subpath.len());
    out.push(Instruction::Move(last));
    for k in (1..body.len()).rev() {
        out.push(body[k].reversed(anchors[k - 1]));
    }
    if closed {
        out.push(Instruction::Close);
    }
    out
}
