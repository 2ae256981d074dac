//! # Mind-map Document Model
//!
//! Immutable snapshots of a mind-map topic tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Topic tree snapshots                 │
//! │  - Persistent topics map (im::OrdMap)       │
//! │  - Focus state + display root + config      │
//! │  - Pure modifiers (add, delete, focus, ...) │
//! │  - Structural invariant checks              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Operation dispatch + undo/redo      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindmap_model::{modifier, Model, TopicKey};
//!
//! let model = Model::new_root("root", "Main topic");
//! let next = modifier::add_child(&model, "root", TopicKey::from("a"), Some("Idea"))?;
//!
//! assert_eq!(model.len(), 1);
//! assert_eq!(next.len(), 2);
//! next.check_invariants()?;
//! ```

pub mod error;
pub mod model;
pub mod modifier;
pub mod topic;

pub use error::{ModelError, ModelResult};
pub use model::{FocusMode, Model, ModelConfig, ModelDescriptor, TopicDescriptor};
pub use topic::{Block, BlockType, Topic, TopicKey};
