//! Error types for the editor

use crate::hooks::HookVeto;
use crate::operation::OpKind;
use mindmap_model::{ModelError, TopicKey};
use thiserror::Error;

/// Failure inside a single operation handler
#[derive(Error, Debug)]
pub enum OpError {
    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid parameter {name}: {message}")]
    InvalidParam { name: &'static str, message: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl OpError {
    pub fn invalid_param(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            name,
            message: message.into(),
        }
    }
}

/// Failure of a whole dispatch. The current snapshot and history are left
/// exactly as they were.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("operation: kind and batch conflict")]
    Conflict,

    #[error("operation: batch must be a sequence")]
    InvalidBatch,

    #[error("operation: request names neither a kind nor any batch item")]
    EmptyRequest,

    #[error("Unknown operation kind: {0}")]
    UnknownOperation(OpKind),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Moving {src} onto {dst} would create a cycle")]
    CycleDetected { src: TopicKey, dst: TopicKey },

    #[error("Operation vetoed: {0}")]
    Vetoed(#[from] HookVeto),

    #[error("{kind} failed: {source}")]
    Operation {
        kind: OpKind,
        #[source]
        source: OpError,
    },

    #[error("Operation produced an invalid tree: {0}")]
    Corrupted(#[source] ModelError),

    #[error("Invalid request: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    pub(crate) fn operation(kind: &OpKind, source: impl Into<OpError>) -> Self {
        Self::Operation {
            kind: kind.clone(),
            source: source.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
