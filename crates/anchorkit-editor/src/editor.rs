//! The editing facade a host drives with pointer events and requests.

use anchorkit_core::{
    thread_safe, EditError, EditResult, InstructionId, Point, RemovalMode, Result, SegmentSide,
    ThreadSafe, Transform,
};
use anchorkit_path::VectorPath;
use anchorkit_settings::EditorConfig;
use serde::Serialize;

use crate::continuity::{handle_for, mirror_status_of, resolve_anchor};
use crate::history::{HistoryRecord, PathHistory};
use crate::operations::{self, Effect, HandleDragOptions, InsertMode};
use crate::views::{anchor_view, anchor_views, handle_view, handle_views, Anchor, CurveHandle, HandleId};

/// Result of one host request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOutcome {
    pub changed: bool,
    /// Every previously obtained view is stale.
    pub structural: bool,
    /// Affected anchors; all anchors after a structural change.
    pub anchors: Vec<Anchor>,
    /// Affected handles; all handles after a structural change.
    pub handles: Vec<CurveHandle>,
    /// Serialized path after the request.
    pub path: String,
}

impl EditOutcome {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Owns a path, its placement transform and its history.
///
/// Every request runs on a copy of the path and is committed only if it
/// succeeds, so a rejected request never leaves a partial edit behind.
/// Positions passed in are in the host's absolute space.
#[derive(Debug, Clone)]
pub struct PathEditor {
    path: VectorPath,
    transform: Transform,
    config: EditorConfig,
    history: PathHistory,
    gesture_dirty: bool,
}

fn check_finite(p: Point) -> EditResult<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(EditError::NonFiniteCoordinate(p))
    }
}

fn check_transform(transform: &Transform) -> EditResult<()> {
    if transform.is_finite() && transform.is_invertible() {
        Ok(())
    } else {
        Err(EditError::SingularTransform)
    }
}

fn first_non_finite(path: &VectorPath) -> Option<Point> {
    path.instructions()
        .flat_map(|ins| ins.controls().into_iter().chain(ins.anchor()))
        .find(|p| !p.is_finite())
}

impl Default for PathEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PathEditor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            path: VectorPath::new(),
            transform: Transform::identity(),
            history: PathHistory::with_depth(config.history_depth),
            config,
            gesture_dirty: false,
        }
    }

    /// Wraps the editor for hosts that call in from several threads.
    pub fn into_shared(self) -> ThreadSafe<PathEditor> {
        thread_safe(self)
    }

    pub fn path(&self) -> &VectorPath {
        &self.path
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    pub fn path_string(&self) -> String {
        self.path.to_svg_string()
    }

    pub fn to_lyon_path(&self) -> lyon::path::Path {
        self.path.to_lyon_path()
    }

    /// All anchors in host space.
    pub fn anchors(&self) -> Vec<Anchor> {
        anchor_views(&self.path, &self.transform)
    }

    /// All visible handles in host space.
    pub fn handles(&self) -> Vec<CurveHandle> {
        handle_views(&self.path, &self.transform)
    }

    pub fn mirror_status(&self, anchor: InstructionId) -> Result<bool> {
        Ok(mirror_status_of(&self.path, anchor)?)
    }

    /// Loads path data placed by `transform`, resetting history.
    ///
    /// On failure the current path stays loaded.
    pub fn load(&mut self, data: &str, transform: Transform) -> Result<EditOutcome> {
        self.load_with_offset(data, transform, Point::ORIGIN)
    }

    /// Loads path data whose coordinates carry an origin offset. The offset
    /// is subtracted from every coordinate and folded into the transform, so
    /// host-space positions are unchanged.
    pub fn load_with_offset(
        &mut self,
        data: &str,
        transform: Transform,
        offset: Point,
    ) -> Result<EditOutcome> {
        check_transform(&transform).inspect_err(|e| tracing::warn!("load rejected: {}", e))?;
        check_finite(offset).inspect_err(|e| tracing::warn!("load rejected: offset {}", e))?;
        let mut path = self.path.clone();
        if let Err(e) = path.reload(data) {
            tracing::warn!("load rejected: {}", e);
            return Err(e.into());
        }
        path.rebase(offset);
        if let Some(bad) = first_non_finite(&path) {
            tracing::warn!("load rejected: offset pushes a coordinate to {}", bad);
            return Err(EditError::NonFiniteCoordinate(bad).into());
        }

        self.path = path;
        self.transform = if offset == Point::ORIGIN {
            transform
        } else {
            transform.with_translation(transform.to_absolute(offset))
        };
        self.gesture_dirty = false;
        let baseline = self.snapshot("load");
        self.history.reset(baseline);
        tracing::info!("loaded path with {} instructions", self.path.len());
        Ok(self.full_outcome(true))
    }

    /// Replaces the placement transform. A change of translation is recorded
    /// in history.
    pub fn set_transform(&mut self, transform: Transform) -> Result<EditOutcome> {
        check_transform(&transform)
            .inspect_err(|e| tracing::warn!("set_transform rejected: {}", e))?;
        if transform == self.transform {
            return Ok(self.unchanged());
        }
        self.transform = transform;
        self.commit("transform");
        Ok(self.full_outcome(false))
    }

    pub fn anchor_dragged(&mut self, anchor: InstructionId, pos: Point) -> Result<EditOutcome> {
        let local = self.to_local(pos)?;
        self.apply("move anchor", |path| {
            operations::move_anchor(path, anchor, local)
        })
    }

    /// Group drag. Either every anchor moves or none does.
    pub fn anchors_dragged(&mut self, moves: &[(InstructionId, Point)]) -> Result<EditOutcome> {
        let local = moves
            .iter()
            .map(|&(id, pos)| Ok((id, self.to_local(pos)?)))
            .collect::<EditResult<Vec<_>>>()?;
        self.apply("move anchors", |path| operations::move_anchors(path, &local))
    }

    pub fn handle_dragged(
        &mut self,
        handle: HandleId,
        pos: Point,
        options: HandleDragOptions,
    ) -> Result<EditOutcome> {
        let local = self.to_local(pos)?;
        let options = if self.config.mirror_handles {
            options
        } else {
            HandleDragOptions::suppressed()
        };
        self.apply("move handle", |path| {
            operations::move_handle(path, handle, local, options)
        })
    }

    pub fn request_elevate(&mut self, anchor: InstructionId) -> Result<EditOutcome> {
        let tolerance = self.config.split_tolerance;
        self.apply("elevate to curve", |path| {
            operations::elevate_to_curve(path, anchor, tolerance)
        })
    }

    pub fn request_degrade(&mut self, anchor: InstructionId, side: SegmentSide) -> Result<EditOutcome> {
        self.apply("degrade to line", |path| {
            operations::degrade_to_line(path, anchor, side)
        })
    }

    pub fn request_cubic(&mut self, segment: InstructionId) -> Result<EditOutcome> {
        self.apply("convert to cubic", |path| {
            operations::promote_to_cubic(path, segment)
        })
    }

    /// Removes anchors using the configured removal mode.
    pub fn request_remove(&mut self, anchors: &[InstructionId]) -> Result<EditOutcome> {
        self.request_remove_with(anchors, self.config.removal_mode)
    }

    pub fn request_remove_with(
        &mut self,
        anchors: &[InstructionId],
        mode: RemovalMode,
    ) -> Result<EditOutcome> {
        self.apply("remove anchors", |path| {
            operations::remove_anchors(path, anchors, mode)
        })
    }

    pub fn request_merge(&mut self, a: InstructionId, b: InstructionId) -> Result<EditOutcome> {
        self.apply("merge subpaths", |path| operations::merge_subpaths(path, a, b))
    }

    pub fn request_insert(
        &mut self,
        target: InstructionId,
        pos: Point,
        mode: InsertMode,
    ) -> Result<EditOutcome> {
        let local = self.to_local(pos)?;
        let mode = match mode {
            InsertMode::Append { handle: Some(h) } => InsertMode::Append {
                handle: Some(self.to_local(h)?),
            },
            other => other,
        };
        let tolerance = self.config.split_tolerance;
        self.apply("insert anchor", |path| {
            operations::insert_anchor(path, target, local, mode, tolerance)
        })
    }

    pub fn request_invert(&mut self, anchor: InstructionId) -> Result<EditOutcome> {
        self.apply("invert subpath", |path| {
            operations::invert_subpath(path, anchor)
        })
    }

    /// Starts a drag gesture; edits until [`end_gesture`](Self::end_gesture)
    /// become one history record.
    pub fn begin_gesture(&mut self, description: impl Into<String>) -> Result<()> {
        if self.history.in_batch() {
            return Err(EditError::GestureInProgress.into());
        }
        self.history.begin_batch(description);
        self.gesture_dirty = false;
        Ok(())
    }

    /// Ends the drag gesture. Returns whether a history record was added.
    pub fn end_gesture(&mut self) -> Result<bool> {
        let description = self
            .history
            .end_batch()
            .ok_or_else(|| EditError::invalid("no gesture in progress"))?;
        if !std::mem::take(&mut self.gesture_dirty) {
            return Ok(false);
        }
        Ok(self.record(&description))
    }

    pub fn can_undo(&self) -> bool {
        !self.history.in_batch() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.in_batch() && self.history.can_redo()
    }

    pub fn undo(&mut self) -> Result<EditOutcome> {
        if self.history.in_batch() {
            return Err(EditError::GestureInProgress.into());
        }
        let record = self.history.peek_undo().ok_or(EditError::NothingToUndo)?;
        let path = self.restored(record)?;
        let record = self.history.undo().cloned().ok_or(EditError::NothingToUndo)?;
        self.install(path, &record);
        tracing::info!("undo -> {}", record.description);
        Ok(self.full_outcome(true))
    }

    pub fn redo(&mut self) -> Result<EditOutcome> {
        if self.history.in_batch() {
            return Err(EditError::GestureInProgress.into());
        }
        let record = self.history.peek_redo().ok_or(EditError::NothingToRedo)?;
        let path = self.restored(record)?;
        let record = self.history.redo().cloned().ok_or(EditError::NothingToRedo)?;
        self.install(path, &record);
        tracing::info!("redo -> {}", record.description);
        Ok(self.full_outcome(true))
    }

    /// Parses a history record into a fresh copy of the path. The history
    /// cursor only moves once this succeeds.
    fn restored(&self, record: &HistoryRecord) -> Result<VectorPath> {
        let mut path = self.path.clone();
        if let Err(e) = path.reload(&record.path) {
            tracing::warn!("history record '{}' unreadable: {}", record.description, e);
            return Err(e.into());
        }
        Ok(path)
    }

    fn install(&mut self, path: VectorPath, record: &HistoryRecord) {
        self.path = path;
        self.transform = self.transform.with_translation(record.translation);
    }

    /// Host-space point to path-local space, refusing NaN and infinities.
    fn to_local(&self, pos: Point) -> EditResult<Point> {
        check_finite(pos)?;
        let local = self.transform.to_relative(pos)?;
        check_finite(local)?;
        Ok(local)
    }

    fn snapshot(&self, description: &str) -> HistoryRecord {
        HistoryRecord::new(
            self.path.to_svg_string(),
            self.transform.translation_offset(),
            description,
        )
    }

    /// Pushes the current state unless it equals the top of history.
    fn record(&mut self, description: &str) -> bool {
        let record = self.snapshot(description);
        if self
            .history
            .current()
            .is_some_and(|current| current.same_state(&record))
        {
            return false;
        }
        self.history.record(record);
        true
    }

    fn commit(&mut self, description: &str) {
        if self.history.in_batch() {
            self.gesture_dirty = true;
        } else {
            self.record(description);
        }
    }

    fn apply(
        &mut self,
        description: &str,
        op: impl FnOnce(&mut VectorPath) -> EditResult<Effect>,
    ) -> Result<EditOutcome> {
        let mut working = self.path.clone();
        let effect = match op(&mut working) {
            Ok(effect) => effect,
            Err(e) => {
                tracing::warn!("{} rejected: {}", description, e);
                return Err(e.into());
            }
        };
        if !effect.changed {
            tracing::debug!("{}: nothing to do", description);
            return Ok(self.unchanged());
        }
        if let Some(bad) = first_non_finite(&working) {
            tracing::warn!("{} rejected: result has coordinate {}", description, bad);
            return Err(EditError::NonFiniteCoordinate(bad).into());
        }
        self.path = working;
        self.commit(description);
        Ok(self.outcome(&effect))
    }

    fn unchanged(&self) -> EditOutcome {
        EditOutcome {
            changed: false,
            structural: false,
            anchors: Vec::new(),
            handles: Vec::new(),
            path: self.path_string(),
        }
    }

    fn full_outcome(&self, structural: bool) -> EditOutcome {
        EditOutcome {
            changed: true,
            structural,
            anchors: self.anchors(),
            handles: self.handles(),
            path: self.path_string(),
        }
    }

    fn outcome(&self, effect: &Effect) -> EditOutcome {
        if effect.structural {
            return self.full_outcome(true);
        }
        let anchors: Vec<Anchor> = effect
            .anchors
            .iter()
            .filter_map(|&id| anchor_view(&self.path, &self.transform, id).ok())
            .collect();

        let mut handle_ids: Vec<HandleId> = effect.handles.clone();
        for &id in &effect.anchors {
            if let Ok(index) = resolve_anchor(&self.path, id) {
                for side in [SegmentSide::Pre, SegmentSide::Next] {
                    if let Some(h) = handle_for(&self.path, index, side) {
                        if !handle_ids.contains(&h) {
                            handle_ids.push(h);
                        }
                    }
                }
            }
        }
        let handles = handle_ids
            .into_iter()
            .filter_map(|h| handle_view(&self.path, &self.transform, h).ok())
            .collect();

        EditOutcome {
            changed: true,
            structural: false,
            anchors,
            handles,
            path: self.path_string(),
        }
    }
}
