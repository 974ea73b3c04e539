//! Path instructions.

use anchorkit_core::{InstructionId, Point};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single path instruction in path-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instruction {
    /// Start a subpath at a point without drawing.
    Move(Point),
    /// Straight segment to a point.
    Line(Point),
    /// Quadratic bezier with one control point.
    Quad { ctrl: Point, to: Point },
    /// Cubic bezier with two control points.
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    /// Close the current subpath back to its move point.
    Close,
}

/// Which control coordinate of a curve instruction a handle is bound to.
///
/// A `Quad` only has `First`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSlot {
    First,
    Second,
}

impl ControlSlot {
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl Instruction {
    /// Terminal coordinate; `None` for `Close`.
    pub fn anchor(&self) -> Option<Point> {
        match *self {
            Self::Move(p) | Self::Line(p) => Some(p),
            Self::Quad { to, .. } | Self::Cubic { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    pub fn anchor_mut(&mut self) -> Option<&mut Point> {
        match self {
            Self::Move(p) | Self::Line(p) => Some(p),
            Self::Quad { to, .. } | Self::Cubic { to, .. } => Some(to),
            Self::Close => None,
        }
    }

    /// Writes the terminal coordinate. Returns false for `Close`.
    pub fn set_anchor(&mut self, value: Point) -> bool {
        match self.anchor_mut() {
            Some(p) => {
                *p = value;
                true
            }
            None => false,
        }
    }

    /// Control coordinates in path order.
    pub fn controls(&self) -> SmallVec<[Point; 2]> {
        match *self {
            Self::Quad { ctrl, .. } => SmallVec::from_slice(&[ctrl]),
            Self::Cubic { ctrl1, ctrl2, .. } => SmallVec::from_slice(&[ctrl1, ctrl2]),
            _ => SmallVec::new(),
        }
    }

    pub fn control(&self, slot: ControlSlot) -> Option<Point> {
        self.controls().get(slot.index()).copied()
    }

    pub fn control_mut(&mut self, slot: ControlSlot) -> Option<&mut Point> {
        match (self, slot) {
            (Self::Quad { ctrl, .. }, ControlSlot::First) => Some(ctrl),
            (Self::Cubic { ctrl1, .. }, ControlSlot::First) => Some(ctrl1),
            (Self::Cubic { ctrl2, .. }, ControlSlot::Second) => Some(ctrl2),
            _ => None,
        }
    }

    /// Number of numeric values beyond the terminal coordinate
    /// (`Move`/`Line` 0, `Quad` 2, `Cubic` 4).
    pub fn extra_coordinate_count(&self) -> usize {
        self.controls().len() * 2
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Self::Close)
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    /// `Line`, `Quad` or `Cubic`.
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Line(_) | Self::Quad { .. } | Self::Cubic { .. })
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Quad { .. } | Self::Cubic { .. })
    }

    pub fn command_letter(&self) -> char {
        match self {
            Self::Move(_) => 'M',
            Self::Line(_) => 'L',
            Self::Quad { .. } => 'Q',
            Self::Cubic { .. } => 'C',
            Self::Close => 'Z',
        }
    }

    /// Same terminal, controls dropped.
    pub fn to_line(&self) -> Instruction {
        match self.anchor() {
            Some(p) => Self::Line(p),
            None => Self::Close,
        }
    }

    /// Same terminal, as a subpath head.
    pub fn to_move(&self) -> Instruction {
        match self.anchor() {
            Some(p) => Self::Move(p),
            None => Self::Close,
        }
    }

    /// The same segment traversed backwards, ending at `start`.
    ///
    /// `start` is the anchor this segment used to leave from. Cubic controls
    /// swap roles; a quadratic control is shared by both directions.
    pub fn reversed(&self, start: Point) -> Instruction {
        match *self {
            Self::Move(_) => Self::Move(start),
            Self::Line(_) => Self::Line(start),
            Self::Quad { ctrl, .. } => Self::Quad { ctrl, to: start },
            Self::Cubic { ctrl1, ctrl2, .. } => Self::Cubic {
                ctrl1: ctrl2,
                ctrl2: ctrl1,
                to: start,
            },
            Self::Close => Self::Close,
        }
    }

    /// Every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.anchor().is_none_or(|p| p.is_finite())
            && self.controls().iter().all(Point::is_finite)
    }

    /// Applies `f` to every coordinate.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Instruction {
        match *self {
            Self::Move(p) => Self::Move(f(p)),
            Self::Line(p) => Self::Line(f(p)),
            Self::Quad { ctrl, to } => Self::Quad {
                ctrl: f(ctrl),
                to: f(to),
            },
            Self::Cubic { ctrl1, ctrl2, to } => Self::Cubic {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Self::Close => Self::Close,
        }
    }
}

/// An instruction stamped with its stable id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: InstructionId,
    pub instruction: Instruction,
}
