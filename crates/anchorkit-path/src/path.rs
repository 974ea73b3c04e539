//! The canonical instruction list.

use anchorkit_core::{InstructionId, ParseResult, Point};
use std::ops::Range;

use crate::instruction::{Instruction, PathNode};
use crate::parser::parse_instructions;
use crate::topology::split_into_subpaths;

/// An ordered list of id-stamped instructions.
///
/// Ids are allocated from a counter owned by the path and are never reused.
/// Equality compares instructions only, ignoring ids.
#[derive(Debug, Clone, Default)]
pub struct VectorPath {
    nodes: Vec<PathNode>,
    next_id: u64,
}

impl VectorPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a path from instructions as given, without normalizing.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let mut path = Self::new();
        for ins in instructions {
            path.push(ins);
        }
        path
    }

    /// Parses path data and normalizes it.
    pub fn parse(data: &str) -> ParseResult<Self> {
        let mut path = Self::from_instructions(parse_instructions(data)?);
        path.normalize();
        Ok(path)
    }

    /// Replaces the contents with freshly parsed data.
    ///
    /// New ids continue from this path's counter, so ids handed out before the
    /// reload never resolve against the new contents. On error the path is
    /// left untouched.
    pub fn reload(&mut self, data: &str) -> ParseResult<()> {
        let instructions = parse_instructions(data)?;
        self.nodes.clear();
        for ins in instructions {
            self.push(ins);
        }
        self.normalize();
        Ok(())
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.nodes.iter().map(|n| n.instruction)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: InstructionId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn get(&self, id: InstructionId) -> Option<&Instruction> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| &n.instruction)
    }

    pub fn get_mut(&mut self, id: InstructionId) -> Option<&mut Instruction> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .map(|n| &mut n.instruction)
    }

    pub fn instruction_at(&self, index: usize) -> Option<&Instruction> {
        self.nodes.get(index).map(|n| &n.instruction)
    }

    pub fn instruction_at_mut(&mut self, index: usize) -> Option<&mut Instruction> {
        self.nodes.get_mut(index).map(|n| &mut n.instruction)
    }

    /// Stamps an instruction with a fresh id without inserting it.
    pub fn make_node(&mut self, instruction: Instruction) -> PathNode {
        let id = InstructionId(self.next_id);
        self.next_id += 1;
        PathNode { id, instruction }
    }

    pub fn push(&mut self, instruction: Instruction) -> InstructionId {
        let node = self.make_node(instruction);
        self.nodes.push(node);
        node.id
    }

    pub fn insert(&mut self, index: usize, instruction: Instruction) -> InstructionId {
        let node = self.make_node(instruction);
        self.nodes.insert(index, node);
        node.id
    }

    pub fn remove(&mut self, index: usize) -> PathNode {
        self.nodes.remove(index)
    }

    /// Replaces a range with existing nodes, keeping their ids.
    pub fn splice_nodes(&mut self, range: Range<usize>, nodes: Vec<PathNode>) {
        self.nodes.splice(range, nodes);
    }

    /// Replaces a range with new instructions, allocating fresh ids.
    pub fn splice(
        &mut self,
        range: Range<usize>,
        instructions: Vec<Instruction>,
    ) -> Vec<InstructionId> {
        let nodes: Vec<PathNode> = instructions
            .into_iter()
            .map(|ins| self.make_node(ins))
            .collect();
        let ids = nodes.iter().map(|n| n.id).collect();
        self.nodes.splice(range, nodes);
        ids
    }

    /// Makes implicit closing segments explicit.
    ///
    /// For every closed subpath whose last real instruction does not land on
    /// its move point, a `Line` back to that point is inserted before the
    /// `Close`. Returns true if anything changed; a second call is a no-op.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        for sp in split_into_subpaths(self).into_iter().rev() {
            if !sp.closed || sp.len() < 2 {
                continue;
            }
            let (s, e) = (sp.range.start, sp.range.end);
            let start = self.nodes[s].instruction.anchor();
            let last = self.nodes[e - 2].instruction.anchor();
            if let (Some(start), Some(last)) = (start, last) {
                if start != last {
                    self.insert(e - 1, Instruction::Line(start));
                    changed = true;
                }
            }
        }
        if changed {
            tracing::debug!("normalize: inserted explicit closing segments");
        }
        changed
    }

    /// True if [`normalize`](Self::normalize) would change nothing.
    pub fn is_normalized(&self) -> bool {
        let mut copy = self.clone();
        !copy.normalize()
    }

    /// Re-expresses every coordinate relative to `offset`, folding a
    /// separately tracked origin offset into the coordinates themselves.
    pub fn rebase(&mut self, offset: Point) {
        if offset == Point::ORIGIN {
            return;
        }
        self.transform(|p| p - offset);
    }

    /// Applies `f` to every coordinate in place.
    pub fn transform(&mut self, f: impl Fn(Point) -> Point) {
        for node in &mut self.nodes {
            node.instruction = node.instruction.map_points(&f);
        }
    }

    /// True when no coordinate is NaN or infinite. Only finite paths
    /// serialize to data that parses back.
    pub fn is_finite(&self) -> bool {
        self.nodes.iter().all(|n| n.instruction.is_finite())
    }

    /// Axis-aligned box over all anchors and controls.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.nodes.iter().flat_map(|n| {
            n.instruction
                .controls()
                .into_iter()
                .chain(n.instruction.anchor())
        });
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some((min, max))
    }

    /// Serializes to path data using absolute commands.
    pub fn to_svg_string(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let s = match node.instruction {
                Instruction::Move(p) => format!("M {} {}", num(p.x), num(p.y)),
                Instruction::Line(p) => format!("L {} {}", num(p.x), num(p.y)),
                Instruction::Quad { ctrl, to } => format!(
                    "Q {} {} {} {}",
                    num(ctrl.x),
                    num(ctrl.y),
                    num(to.x),
                    num(to.y)
                ),
                Instruction::Cubic { ctrl1, ctrl2, to } => format!(
                    "C {} {} {} {} {} {}",
                    num(ctrl1.x),
                    num(ctrl1.y),
                    num(ctrl2.x),
                    num(ctrl2.y),
                    num(to.x),
                    num(to.y)
                ),
                Instruction::Close => "Z".to_string(),
            };
            parts.push(s);
        }
        parts.join(" ")
    }

    /// Render-ready lyon path for the host's renderer.
    pub fn to_lyon_path(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder();
        let mut open = false;
        for node in &self.nodes {
            match node.instruction {
                Instruction::Move(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(p.to_lyon());
                    open = true;
                }
                Instruction::Line(p) if open => {
                    builder.line_to(p.to_lyon());
                }
                Instruction::Quad { ctrl, to } if open => {
                    builder.quadratic_bezier_to(ctrl.to_lyon(), to.to_lyon());
                }
                Instruction::Cubic { ctrl1, ctrl2, to } if open => {
                    builder.cubic_bezier_to(ctrl1.to_lyon(), ctrl2.to_lyon(), to.to_lyon());
                }
                Instruction::Close if open => {
                    builder.end(true);
                    open = false;
                }
                _ => {}
            }
        }
        if open {
            builder.end(false);
        }
        builder.build()
    }

    /// Coordinate-wise comparison with a tolerance.
    pub fn approx_eq(&self, other: &VectorPath, epsilon: f64) -> bool {
        self.len() == other.len()
            && self.instructions().zip(other.instructions()).all(|(a, b)| {
                a.command_letter() == b.command_letter()
                    && a.controls()
                        .iter()
                        .zip(b.controls().iter())
                        .all(|(p, q)| p.approx_eq(q, epsilon))
                    && match (a.anchor(), b.anchor()) {
                        (Some(p), Some(q)) => p.approx_eq(&q, epsilon),
                        (None, None) => true,
                        _ => false,
                    }
            })
    }
}

/// Shortest round-trip formatting, with negative zero printed as `0`.
fn num(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{}", v)
    }
}

impl PartialEq for VectorPath {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.instructions().eq(other.instructions())
    }
}

impl std::fmt::Display for VectorPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_svg_string())
    }
}

impl std::str::FromStr for VectorPath {
    type Err = anchorkit_core::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
