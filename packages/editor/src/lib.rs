//! # Mind-map Editor
//!
//! Command dispatch and undo/redo history for mind-map documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ request: { kind, params } | { batch: [..] } │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: dispatch                            │
//! │  - Validate request shape                   │
//! │  - before_operation hooks (may veto)        │
//! │  - Fold registry handlers over the snapshot │
//! │  - Record history, publish, after hooks     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: persistent topic tree snapshot       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: handlers take a snapshot and return the next
//! 2. **All or nothing**: a failed request leaves snapshot and history as-is
//! 3. **One history entry per request**: batches undo as a unit
//! 4. **Editing is not history**: focus changes and in-progress edits never
//!    push undo entries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindmap_editor::{DropDir, Editor, OpKind, OpParams, OpRequest};
//! use mindmap_model::Model;
//!
//! let mut editor = Editor::builder(Model::new_root("root", "Main Topic"))
//!     .on_change(|model| println!("{} topics", model.len()))
//!     .build();
//!
//! editor.dispatch(&OpRequest::single(
//!     OpKind::AddChild,
//!     OpParams::topic("root").with_new_key("a"),
//! ))?;
//!
//! editor.undo();
//! editor.redo();
//! ```

mod config;
mod drag_drop;
mod editor;
mod errors;
mod handlers;
mod history;
mod hooks;
mod operation;
mod registry;

pub use config::{EditorConfig, HistoryConfig, RedoPolicy, DEFAULT_CONFIG_NAME};
pub use drag_drop::{check_move, drag_and_drop};
pub use editor::{ChangeListener, Editor, EditorBuilder};
pub use errors::{ConfigError, DispatchError, OpError};
pub use history::History;
pub use hooks::{HookChain, HookVeto, LoggingHooks, NoopHooks, OperationHooks, ReadonlyGuard};
pub use operation::{DropDir, OpItem, OpKind, OpParams, OpRequest, RequestShape};
pub use registry::{OpHandler, OpRegistry, RegistryExtension};

// Re-export the document model for convenience
pub use mindmap_model::{FocusMode, Model, ModelError, TopicKey};
