//! # AnchorKit Core
//!
//! Core types shared by every AnchorKit crate: path-local geometry, the
//! host placement transform, stable instruction identifiers and the error
//! taxonomy used by parsing and editing.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{EditError, EditResult, Error, ParseError, ParseResult, Result};
pub use geometry::{Point, Transform};
pub use types::{
    thread_safe, InstructionId, RemovalMode, SegmentSide, ThreadSafe,
};
