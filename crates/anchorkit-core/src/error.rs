//! Error handling for AnchorKit
//!
//! Provides the error types for every layer of the editing kernel:
//! - Parse errors (malformed path data)
//! - Edit errors (operations on missing anchors, rejected requests, history)
//!
//! All error types use `thiserror` for ergonomic error handling. None of them
//! is fatal: a failed load or edit always leaves the last committed path intact.

use thiserror::Error;

use crate::geometry::Point;
use crate::types::InstructionId;

/// Path data parse error type
///
/// Every variant carries the byte offset in the input where the problem was
/// detected so the host can point at it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character that cannot start a command or a number
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset in the input.
        offset: usize,
    },

    /// A letter that is not a path command
    #[error("Unknown command '{command}' at offset {offset}")]
    UnknownCommand {
        /// The command letter.
        command: char,
        /// Byte offset in the input.
        offset: usize,
    },

    /// A valid path command that the editor does not model
    #[error("Unsupported command '{command}' at offset {offset}")]
    UnsupportedCommand {
        /// The command letter.
        command: char,
        /// Byte offset in the input.
        offset: usize,
    },

    /// A command ran out of coordinates
    #[error("Command '{command}' at offset {offset} expects {expected} numbers, found {found}")]
    MissingCoordinates {
        /// The command letter.
        command: char,
        /// Byte offset of the command.
        offset: usize,
        /// Number of values the command needs.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },

    /// A number literal that does not parse
    #[error("Invalid number '{text}' at offset {offset}")]
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Byte offset in the input.
        offset: usize,
    },

    /// A command whose resolved coordinates overflow to infinity
    #[error("Command '{command}' at offset {offset} produces a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The command letter.
        command: char,
        /// Byte offset of the command.
        offset: usize,
    },

    /// Drawing started before any move command
    #[error("Path data must start with a move command (offset {offset})")]
    MissingInitialMove {
        /// Byte offset of the first drawing command.
        offset: usize,
    },
}

/// Edit operation error type
///
/// Represents requests that cannot be applied to the current model. These are
/// reported to the caller; the model is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// The anchor is not part of the current model
    #[error("Anchor {0} not found")]
    AnchorNotFound(InstructionId),

    /// The handle is not part of the current model
    #[error("Handle on instruction {id} (slot {slot}) not found")]
    HandleNotFound {
        /// Instruction that should carry the control point.
        id: InstructionId,
        /// Control slot index.
        slot: usize,
    },

    /// The instruction id does not resolve
    #[error("Instruction {0} not found")]
    InstructionNotFound(InstructionId),

    /// Merge requested on an anchor that is not an open-subpath endpoint
    #[error("Anchor {0} is not an endpoint of an open subpath")]
    NotAnEndpoint(InstructionId),

    /// Operation not valid for the current geometry
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The undo stack holds only the baseline
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The redo stack is empty
    #[error("Nothing to redo")]
    NothingToRedo,

    /// History navigation attempted during a drag gesture
    #[error("A drag gesture is in progress")]
    GestureInProgress,

    /// A NaN or infinite coordinate would enter the model
    #[error("Coordinate {0} is not finite")]
    NonFiniteCoordinate(Point),

    /// The placement transform cannot be inverted
    #[error("Placement transform is not invertible")]
    SingularTransform,
}

impl EditError {
    /// Create an invalid-operation error from a message
    pub fn invalid(msg: impl Into<String>) -> Self {
        EditError::InvalidOperation(msg.into())
    }
}

/// Main error type for AnchorKit
///
/// A unified error type that can represent any error from the kernel.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is an edit error
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for edit operations
pub type EditResult<T> = std::result::Result<T, EditError>;
