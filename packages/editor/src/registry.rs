//! # Operation Registry
//!
//! Maps each [`OpKind`] to the pure handler that performs it.
//!
//! ## Extending
//!
//! An editor's registry is assembled once, when the editor is built. The
//! built-in registry is handed through an ordered list of extensions; each
//! receives the registry produced so far and returns an augmented one:
//!
//! ```rust,ignore
//! let editor = Editor::builder(model)
//!     .extension(|registry: OpRegistry| {
//!         registry.with(
//!             OpKind::custom("MARK_DONE"),
//!             |model: &Model, params: &OpParams| -> Result<Model, OpError> {
//!                 let key = params.require_topic_key()?;
//!                 Ok(modifier::set_style(model, key.as_str(), Some("done".into()))?)
//!             },
//!         )
//!     })
//!     .build();
//! ```
//!
//! Later extensions see (and may override) entries added by earlier ones.

use crate::errors::OpError;
use crate::handlers;
use crate::operation::{OpKind, OpParams};
use mindmap_model::Model;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A pure operation handler: current snapshot in, next snapshot out
pub trait OpHandler: Send + Sync {
    fn apply(&self, model: &Model, params: &OpParams) -> Result<Model, OpError>;
}

impl<F> OpHandler for F
where
    F: Fn(&Model, &OpParams) -> Result<Model, OpError> + Send + Sync,
{
    fn apply(&self, model: &Model, params: &OpParams) -> Result<Model, OpError> {
        self(model, params)
    }
}

/// One link of the registry construction chain
pub type RegistryExtension = Box<dyn Fn(OpRegistry) -> OpRegistry>;

/// Kind → handler table
#[derive(Clone, Default)]
pub struct OpRegistry {
    handlers: HashMap<OpKind, Arc<dyn OpHandler>>,
}

impl OpRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry holding every built-in kind
    pub fn builtin() -> Self {
        Self::new()
            .with(OpKind::ToggleCollapse, handlers::toggle_collapse)
            .with(OpKind::CollapseAll, handlers::collapse_all)
            .with(OpKind::ExpandAll, handlers::expand_all)
            .with(OpKind::AddChild, handlers::add_child)
            .with(OpKind::AddSibling, handlers::add_sibling)
            .with(OpKind::DeleteTopic, handlers::delete_topic)
            .with(OpKind::FocusTopic, handlers::focus_topic)
            .with(OpKind::SetStyle, handlers::set_style)
            .with(OpKind::SetTopicBlock, handlers::set_topic_block)
            .with(OpKind::DeleteTopicBlock, handlers::delete_topic_block)
            .with(OpKind::StartEditingContent, handlers::start_editing_content)
            .with(OpKind::StartEditingDesc, handlers::start_editing_desc)
            .with(OpKind::DragAndDrop, handlers::drag_and_drop)
            .with(OpKind::SetEditorRoot, handlers::set_editor_root)
    }

    /// Run `base` through `extensions` in order
    pub fn assemble(base: OpRegistry, extensions: &[RegistryExtension]) -> OpRegistry {
        extensions
            .iter()
            .fold(base, |registry, extend| extend(registry))
    }

    /// Add or replace a handler, returning the one it replaced
    pub fn register(
        &mut self,
        kind: OpKind,
        handler: impl OpHandler + 'static,
    ) -> Option<Arc<dyn OpHandler>> {
        self.handlers.insert(kind, Arc::new(handler))
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, kind: OpKind, handler: impl OpHandler + 'static) -> Self {
        self.register(kind, handler);
        self
    }

    pub fn unregister(&mut self, kind: &OpKind) -> Option<Arc<dyn OpHandler>> {
        self.handlers.remove(kind)
    }

    pub fn lookup(&self, kind: &OpKind) -> Option<Arc<dyn OpHandler>> {
        self.handlers.get(kind).cloned()
    }

    pub fn contains(&self, kind: &OpKind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Current mapping
    pub fn list(&self) -> impl Iterator<Item = (&OpKind, &Arc<dyn OpHandler>)> {
        self.handlers.iter()
    }

    /// Registered kinds, sorted by tag
    pub fn kinds(&self) -> Vec<&OpKind> {
        let mut kinds: Vec<&OpKind> = self.handlers.keys().collect();
        kinds.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for OpRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
