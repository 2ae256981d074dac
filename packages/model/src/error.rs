use crate::topic::TopicKey;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Topic not found: {0}")]
    TopicNotFound(TopicKey),

    #[error("Topic {0} is the root and has no parent")]
    RootHasNoParent(TopicKey),

    #[error("Cannot delete root topic: {0}")]
    CannotDeleteRoot(TopicKey),

    #[error("Duplicate topic key: {0}")]
    DuplicateKey(TopicKey),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid model description: {0}")]
    Descriptor(#[from] serde_json::Error),
}

impl ModelError {
    pub fn not_found(key: impl Into<TopicKey>) -> Self {
        Self::TopicNotFound(key.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}
