//! Identifiers, editing enums and sharing aliases.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable identifier of one instruction inside a path.
///
/// Ids are allocated monotonically by the owning path and never reused, so a
/// stale id simply fails to resolve instead of pointing at the wrong
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionId(pub u64);

impl std::fmt::Display for InstructionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which segment adjacent to an anchor an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentSide {
    /// The segment arriving at the anchor
    Pre,
    /// The segment leaving the anchor
    Next,
}

impl SegmentSide {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Self::Pre => Self::Next,
            Self::Next => Self::Pre,
        }
    }
}

impl std::fmt::Display for SegmentSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Next => write!(f, "next"),
        }
    }
}

/// How removing an interior anchor treats the surrounding subpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Break the subpath at the anchor, leaving two pieces that touch there
    #[default]
    Cut,
    /// Drop the anchor and join its two neighbors with a single segment
    Weld,
}

impl std::fmt::Display for RemovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cut => write!(f, "cut"),
            Self::Weld => write!(f, "weld"),
        }
    }
}

/// A thread-safe, mutex-protected wrapper for hosts that drive the editor
/// from more than one thread.
///
/// Uses `parking_lot::Mutex`; every call made through the lock is serialized,
/// which is what the single-writer editing model requires.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Wrap a value in a [`ThreadSafe`] container.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
