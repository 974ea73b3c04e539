//! # AnchorKit Editor
//!
//! Interactive anchor and handle editing over an [`anchorkit_path::VectorPath`].
//!
//! ## Components
//!
//! - **Views**: anchors and curve handles in host space, recomputed from the
//!   instruction list on demand
//! - **Continuity**: handle ownership and mirror detection
//! - **Operations**: movement, degree changes, insertion, removal, merging
//! - **History**: snapshot undo/redo with gesture batching
//! - **PathEditor**: the facade a host talks to
//!
//! ```text
//! host event ──> PathEditor::request_* ──> operations on a copy
//!                      │                         │
//!                      │            Ok ──> commit + history record
//!                      │            Err ──> model untouched
//!                      └──> EditOutcome { anchors, handles, path }
//! ```

pub mod continuity;
pub mod editor;
pub mod history;
pub mod operations;
pub mod views;

pub use continuity::{handle_owner, mirror_status, mirror_status_of, resolve_anchor};
pub use editor::{EditOutcome, PathEditor};
pub use history::{HistoryRecord, PathHistory};
pub use operations::{Effect, HandleDragOptions, InsertMode};
pub use views::{Anchor, CurveHandle, HandleId};
