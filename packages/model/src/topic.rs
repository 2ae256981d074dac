//! # Topics
//!
//! A topic is one node of the mind-map tree. Topics never own their children
//! directly: a parent lists its children by key in `sub_keys`, and every child
//! points back through `parent_key`. The [`Model`](crate::Model) keeps both
//! directions in agreement.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, stable identifier of a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicKey(String);

impl TopicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Fresh random key for a newly created topic
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TopicKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopicKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TopicKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&TopicKey> for TopicKey {
    fn from(key: &TopicKey) -> Self {
        key.clone()
    }
}

/// Kind of content block attached to a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// Primary topic text
    Content,
    /// Long-form description
    Desc,
    Custom(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Content => "CONTENT",
            BlockType::Desc => "DESC",
            BlockType::Custom(tag) => tag,
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "CONTENT" => BlockType::Content,
            "DESC" => BlockType::Desc,
            _ => BlockType::Custom(tag),
        }
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content block. The block may exist before any data has been entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub data: Option<String>,
}

impl Block {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

/// A node in the topic tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub key: TopicKey,

    /// `None` only for the absolute root
    pub parent_key: Option<TopicKey>,

    /// Child keys in display order
    pub sub_keys: Vector<TopicKey>,

    /// Whether children are hidden
    pub collapse: bool,

    pub style: Option<String>,

    pub blocks: OrdMap<BlockType, Block>,
}

impl Topic {
    pub fn new(key: impl Into<TopicKey>, parent_key: Option<TopicKey>) -> Self {
        Self {
            key: key.into(),
            parent_key,
            sub_keys: Vector::new(),
            collapse: false,
            style: None,
            blocks: OrdMap::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.blocks.insert(BlockType::Content, Block::with_data(content));
        self
    }

    pub fn block(&self, block_type: &BlockType) -> Option<&Block> {
        self.blocks.get(block_type)
    }

    /// Data of a block, if the block exists and has any
    pub fn block_data(&self, block_type: &BlockType) -> Option<&str> {
        self.block(block_type).and_then(|b| b.data.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        self.block_data(&BlockType::Content)
    }

    pub fn has_children(&self) -> bool {
        !self.sub_keys.is_empty()
    }

    pub fn child_index(&self, key: &str) -> Option<usize> {
        self.sub_keys.iter().position(|k| k.as_str() == key)
    }
}
