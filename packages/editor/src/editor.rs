//! # Editor
//!
//! Owns the current snapshot and runs every request against it:
//! Request → Hooks → Handlers (folded) → Invariant check → History → Publish
//!
//! A dispatch either publishes exactly one new snapshot or fails with the
//! snapshot and history untouched. Handlers never see a partially applied
//! batch from a previous failed dispatch because nothing is committed until
//! the whole fold has succeeded.

use crate::config::EditorConfig;
use crate::drag_drop;
use crate::errors::DispatchError;
use crate::history::History;
use crate::hooks::{NoopHooks, OperationHooks};
use crate::operation::{OpKind, OpParams, OpRequest, RequestShape};
use crate::registry::{OpRegistry, RegistryExtension};
use mindmap_model::Model;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Receives every published snapshot
pub type ChangeListener = Box<dyn FnMut(&Model) + Send>;

/// Command dispatcher and history owner for one document
pub struct Editor {
    current: Arc<Model>,
    registry: OpRegistry,
    history: History,
    hooks: Box<dyn OperationHooks + Send>,
    on_change: Option<ChangeListener>,
    config: EditorConfig,
}

impl Editor {
    /// Editor with the built-in operations, default config and no hooks
    pub fn new(model: Model) -> Self {
        Self::builder(model).build()
    }

    pub fn builder(model: Model) -> EditorBuilder {
        EditorBuilder::new(model)
    }

    /// Current snapshot
    pub fn model(&self) -> &Model {
        &self.current
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<Model> {
        Arc::clone(&self.current)
    }

    pub fn operation_registry(&self) -> &OpRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply a single operation or a batch
    ///
    /// On success the new snapshot has been published (one `change`
    /// notification) and is returned. On failure nothing changed.
    #[instrument(skip(self, request), fields(topics = self.current.len()))]
    pub fn dispatch(&mut self, request: &OpRequest) -> Result<&Model, DispatchError> {
        let (next, undoable) = match self.prepare(request) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(error = %err, "request rejected");
                return Err(err);
            }
        };

        if undoable {
            self.history.record(Arc::clone(&self.current));
        }
        self.publish(Arc::new(next));
        self.hooks.after_operation(request, &self.current);

        debug!(
            undoable,
            undo_depth = self.history.undo_depth(),
            topics = self.current.len(),
            "request applied"
        );
        Ok(self.current.as_ref())
    }

    /// Run the request to completion without committing anything
    fn prepare(&mut self, request: &OpRequest) -> Result<(Model, bool), DispatchError> {
        let shape = request.shape()?;
        self.hooks.before_operation(request, &self.current)?;

        let (next, undoable) = match shape {
            RequestShape::Single(kind, params) => {
                let next = self.apply(&self.current, kind, params)?;
                (next, History::allows_undo(&self.current, Some(kind)))
            }
            RequestShape::Batch(items) => {
                let next = items
                    .iter()
                    .try_fold(Model::clone(&self.current), |model, item| {
                        self.apply(&model, &item.kind, &item.params)
                    })?;
                let focus_only = items.iter().all(|item| item.kind.is_focus_only());
                (next, !focus_only && History::allows_undo(&self.current, None))
            }
        };

        if self.config.check_invariants {
            next.check_invariants().map_err(DispatchError::Corrupted)?;
        }

        Ok((next, undoable))
    }

    fn apply(
        &self,
        model: &Model,
        kind: &OpKind,
        params: &OpParams,
    ) -> Result<Model, DispatchError> {
        let handler = self
            .registry
            .lookup(kind)
            .ok_or_else(|| DispatchError::UnknownOperation(kind.clone()))?;

        if *kind == OpKind::DragAndDrop {
            drag_drop::check_move(model, params)?;
        }

        debug!(kind = %kind, "applying operation");
        handler
            .apply(model, params)
            .map_err(|source| DispatchError::operation(kind, source))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo(&self.current)
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo(&self.current)
    }

    /// Return to the snapshot before the last undoable operation
    pub fn undo(&mut self) -> bool {
        match self.history.undo(Arc::clone(&self.current)) {
            Some(previous) => {
                self.publish(previous);
                info!(
                    undo_depth = self.history.undo_depth(),
                    redo_depth = self.history.redo_depth(),
                    "undo"
                );
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(Arc::clone(&self.current)) {
            Some(next) => {
                self.publish(next);
                info!(
                    undo_depth = self.history.undo_depth(),
                    redo_depth = self.history.redo_depth(),
                    "redo"
                );
                true
            }
            None => false,
        }
    }

    /// Replace the document and forget its history
    ///
    /// A document that fails the invariant check is refused and the editor
    /// keeps its current snapshot and history.
    pub fn reset(&mut self, model: Model) -> Result<&Model, DispatchError> {
        if self.config.check_invariants {
            if let Err(err) = model.check_invariants() {
                warn!(error = %err, "reset rejected");
                return Err(DispatchError::Corrupted(err));
            }
        }

        self.history.clear();
        self.publish(Arc::new(model));
        info!(topics = self.current.len(), "editor reset");
        Ok(self.current.as_ref())
    }

    fn publish(&mut self, next: Arc<Model>) {
        self.current = next;
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.current);
        }
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("current", &self.current)
            .field("registry", &self.registry)
            .field("history", &self.history)
            .field("config", &self.config)
            .finish()
    }
}

/// Configures an [`Editor`] before its registry is assembled
pub struct EditorBuilder {
    model: Model,
    config: EditorConfig,
    extensions: Vec<RegistryExtension>,
    hooks: Box<dyn OperationHooks + Send>,
    on_change: Option<ChangeListener>,
}

impl EditorBuilder {
    fn new(model: Model) -> Self {
        Self {
            model,
            config: EditorConfig::default(),
            extensions: Vec::new(),
            hooks: Box::new(NoopHooks),
            on_change: None,
        }
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a registry extension; extensions run in the order added
    pub fn extension(mut self, extension: impl Fn(OpRegistry) -> OpRegistry + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    pub fn hooks(mut self, hooks: impl OperationHooks + Send + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn on_change(mut self, listener: impl FnMut(&Model) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn build(self) -> Editor {
        let registry = OpRegistry::assemble(OpRegistry::builtin(), &self.extensions);
        debug!(kinds = registry.len(), extensions = self.extensions.len(), "registry assembled");

        Editor {
            current: Arc::new(self.model),
            registry,
            history: History::new(self.config.history.clone()),
            hooks: self.hooks,
            on_change: self.on_change,
            config: self.config,
        }
    }
}
