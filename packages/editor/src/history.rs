//! # Undo/Redo History
//!
//! Snapshot stacks for undo/redo.
//!
//! ## Design
//!
//! - The snapshot taken *before* an undoable dispatch is recorded
//! - Undo swaps the current snapshot with the top of the undo stack
//! - Redo swaps it back with the top of the redo stack
//! - A batch records a single snapshot, so it is undone as one step
//! - Snapshots are `Arc<Model>` sharing structure with each other; recording
//!   one never copies the tree
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::default();
//! history.record(Arc::clone(&current));
//! current = Arc::new(next);
//!
//! if history.can_undo(&current) {
//!     current = history.undo(current).unwrap();
//! }
//! ```

use crate::config::{HistoryConfig, RedoPolicy};
use crate::operation::OpKind;
use mindmap_model::Model;
use std::sync::Arc;

/// Undo and redo stacks owned by one editor
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Snapshots to return to on undo (most recent last)
    undo_stack: Vec<Arc<Model>>,

    /// Snapshots to return to on redo (most recent last)
    redo_stack: Vec<Arc<Model>>,

    config: HistoryConfig,
}

impl History {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Whether history may move while `model` is current
    ///
    /// `kind` is the operation about to run, or `None` for a batch or for
    /// the undo/redo commands themselves.
    pub fn allows_undo(model: &Model, kind: Option<&OpKind>) -> bool {
        if kind.map_or(false, OpKind::is_focus_only) {
            return false;
        }
        if model.focus_mode().is_editing() {
            return false;
        }
        model.config().allow_undo
    }

    /// Record the snapshot an undoable operation is about to replace
    pub fn record(&mut self, snapshot: Arc<Model>) {
        self.undo_stack.push(snapshot);

        if let Some(max_depth) = self.config.max_depth {
            if self.undo_stack.len() > max_depth {
                let excess = self.undo_stack.len() - max_depth;
                self.undo_stack.drain(..excess);
            }
        }

        if self.config.redo_policy == RedoPolicy::ClearOnEdit {
            self.redo_stack.clear();
        }
    }

    pub fn can_undo(&self, current: &Model) -> bool {
        !self.undo_stack.is_empty() && Self::allows_undo(current, None)
    }

    pub fn can_redo(&self, current: &Model) -> bool {
        !self.redo_stack.is_empty() && Self::allows_undo(current, None)
    }

    /// Step back, returning the snapshot to publish
    ///
    /// Returns `None` (and changes nothing) when undo is not possible.
    pub fn undo(&mut self, current: Arc<Model>) -> Option<Arc<Model>> {
        if !self.can_undo(&current) {
            return None;
        }
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward, returning the snapshot to publish
    pub fn redo(&mut self, current: Arc<Model>) -> Option<Arc<Model>> {
        if !self.can_redo(&current) {
            return None;
        }
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Forget every snapshot
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmap_model::{modifier, FocusMode, ModelConfig};

    fn snapshot(content: &str) -> Arc<Model> {
        Arc::new(Model::new_root("root", content))
    }

    #[test]
    fn test_history_creation() {
        let history = History::default();
        let current = snapshot("Main");
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
        assert!(!history.can_undo(&current));
        assert!(!history.can_redo(&current));
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::default();
        let first = snapshot("one");
        let second = snapshot("two");

        history.record(Arc::clone(&first));
        assert!(history.can_undo(&second));

        let restored = history.undo(Arc::clone(&second)).unwrap();
        assert!(Arc::ptr_eq(&restored, &first));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);

        let redone = history.redo(restored).unwrap();
        assert!(Arc::ptr_eq(&redone, &second));
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_undo_on_empty_stack_changes_nothing() {
        let mut history = History::default();
        assert!(history.undo(snapshot("Main")).is_none());
        assert!(history.redo(snapshot("Main")).is_none());
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_focus_only_kinds_are_not_undoable() {
        let model = Model::new_root("root", "Main");

        assert!(!History::allows_undo(&model, Some(&OpKind::FocusTopic)));
        assert!(!History::allows_undo(&model, Some(&OpKind::StartEditingContent)));
        assert!(!History::allows_undo(&model, Some(&OpKind::StartEditingDesc)));
        assert!(History::allows_undo(&model, Some(&OpKind::AddChild)));
        assert!(History::allows_undo(&model, Some(&OpKind::custom("MARK"))));
        assert!(History::allows_undo(&model, None));
    }

    #[test]
    fn test_nothing_is_undoable_mid_edit() {
        let editing = modifier::focus_topic(
            &Model::new_root("root", "Main"),
            "root",
            FocusMode::EditingDesc,
        )
        .unwrap();

        assert!(!History::allows_undo(&editing, Some(&OpKind::AddChild)));
        assert!(!History::allows_undo(&editing, None));

        let mut history = History::default();
        history.record(snapshot("before"));
        let current = Arc::new(editing);
        assert!(!history.can_undo(&current));
        assert!(history.undo(current).is_none());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_allow_undo_flag() {
        let model = Model::new_root("root", "Main").with_config(ModelConfig {
            allow_undo: false,
            readonly: false,
        });
        assert!(!History::allows_undo(&model, Some(&OpKind::AddChild)));
    }

    #[test]
    fn test_redo_blocked_like_undo() {
        let mut history = History::default();
        history.record(snapshot("one"));
        history.undo(snapshot("two")).unwrap();
        assert_eq!(history.redo_depth(), 1);

        let model = Model::new_root("root", "two");
        let editing = modifier::focus_topic(&model, "root", FocusMode::EditingContent).unwrap();
        let editing = Arc::new(editing);
        assert!(!history.can_redo(&editing));
        assert!(history.redo(editing).is_none());

        let locked = Arc::new(model.with_config(ModelConfig {
            allow_undo: false,
            readonly: false,
        }));
        assert!(!history.can_redo(&locked));
        assert!(history.redo(locked).is_none());
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_redo_retained_by_default() {
        let mut history = History::default();
        history.record(snapshot("one"));
        history.undo(snapshot("two")).unwrap();
        assert_eq!(history.redo_depth(), 1);

        history.record(snapshot("one"));
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_clear_on_edit_policy() {
        let mut history = History::new(HistoryConfig {
            max_depth: None,
            redo_policy: RedoPolicy::ClearOnEdit,
        });
        history.record(snapshot("one"));
        history.undo(snapshot("two")).unwrap();
        assert_eq!(history.redo_depth(), 1);

        history.record(snapshot("one"));
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let mut history = History::new(HistoryConfig {
            max_depth: Some(2),
            redo_policy: RedoPolicy::Retain,
        });

        let oldest = snapshot("0");
        history.record(Arc::clone(&oldest));
        history.record(snapshot("1"));
        let newest = snapshot("2");
        history.record(Arc::clone(&newest));

        assert_eq!(history.undo_depth(), 2);
        let restored = history.undo(snapshot("3")).unwrap();
        assert!(Arc::ptr_eq(&restored, &newest));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.record(snapshot("one"));
        history.undo(snapshot("two")).unwrap();
        history.record(snapshot("three"));

        history.clear();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }
}
