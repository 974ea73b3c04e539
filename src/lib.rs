//! # AnchorKit
//!
//! An anchor and curve-handle editing kernel for SVG-style vector paths.
//!
//! ## Architecture
//!
//! AnchorKit is organized as a workspace with multiple crates:
//!
//! 1. **anchorkit-core** - Points, transforms, identifiers and error types
//! 2. **anchorkit-path** - Instruction model, parsing, normalization, topology
//! 3. **anchorkit-editor** - Anchor/handle views, editing operations, history
//! 4. **anchorkit-settings** - Persisted editor configuration
//! 5. **anchorkit** - Facade re-exports and the inspection binary

pub use anchorkit_core::{
    EditError, EditResult, Error, InstructionId, ParseError, ParseResult, Point, RemovalMode,
    Result, SegmentSide, ThreadSafe, Transform,
};
pub use anchorkit_editor::{
    Anchor, CurveHandle, EditOutcome, HandleDragOptions, HandleId, HistoryRecord, InsertMode,
    PathEditor, PathHistory,
};
pub use anchorkit_path::{ControlSlot, Instruction, VectorPath};
pub use anchorkit_settings::{EditorConfig, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Pretty console output on stderr, filtered by `RUST_LOG` (default `warn`).
/// Stdout is left to the caller.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
