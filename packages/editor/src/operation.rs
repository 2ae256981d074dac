//! # Operations
//!
//! Typed operation requests accepted by the [`Editor`](crate::Editor).
//!
//! A request names either one operation kind with its parameters, or an
//! ordered batch of them:
//!
//! ```json
//! { "kind": "ADD_CHILD", "params": { "topicKey": "root" } }
//!
//! { "batch": [
//!     { "kind": "ADD_CHILD", "params": { "topicKey": "root", "newKey": "n1" } },
//!     { "kind": "START_EDITING_CONTENT", "params": { "topicKey": "n1" } }
//! ] }
//! ```
//!
//! Kinds travel as the tags in [`OpKind::as_str`]. Any tag that is not a
//! built-in kind becomes [`OpKind::Custom`] and must be provided by a registry
//! extension.

use crate::errors::{DispatchError, OpError};
use mindmap_model::{BlockType, FocusMode, TopicKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Operation kind tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OpKind {
    ToggleCollapse,
    CollapseAll,
    ExpandAll,
    AddChild,
    AddSibling,
    DeleteTopic,
    FocusTopic,
    SetStyle,
    SetTopicBlock,
    DeleteTopicBlock,
    StartEditingContent,
    StartEditingDesc,
    DragAndDrop,
    SetEditorRoot,
    /// Kind contributed by a collaborator
    Custom(String),
}

impl OpKind {
    pub const BUILTIN: [OpKind; 14] = [
        OpKind::ToggleCollapse,
        OpKind::CollapseAll,
        OpKind::ExpandAll,
        OpKind::AddChild,
        OpKind::AddSibling,
        OpKind::DeleteTopic,
        OpKind::FocusTopic,
        OpKind::SetStyle,
        OpKind::SetTopicBlock,
        OpKind::DeleteTopicBlock,
        OpKind::StartEditingContent,
        OpKind::StartEditingDesc,
        OpKind::DragAndDrop,
        OpKind::SetEditorRoot,
    ];

    pub fn custom(tag: impl Into<String>) -> Self {
        OpKind::from(tag.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            OpKind::ToggleCollapse => "TOGGLE_COLLAPSE",
            OpKind::CollapseAll => "COLLAPSE_ALL",
            OpKind::ExpandAll => "EXPAND_ALL",
            OpKind::AddChild => "ADD_CHILD",
            OpKind::AddSibling => "ADD_SIBLING",
            OpKind::DeleteTopic => "DELETE_TOPIC",
            OpKind::FocusTopic => "FOCUS_TOPIC",
            OpKind::SetStyle => "SET_STYLE",
            OpKind::SetTopicBlock => "SET_TOPIC_BLOCK",
            OpKind::DeleteTopicBlock => "DELETE_TOPIC_BLOCK",
            OpKind::StartEditingContent => "START_EDITING_CONTENT",
            OpKind::StartEditingDesc => "START_EDITING_DESC",
            OpKind::DragAndDrop => "DRAG_AND_DROP",
            OpKind::SetEditorRoot => "SET_EDITOR_ROOT",
            OpKind::Custom(tag) => tag,
        }
    }

    /// Kinds that only move focus and never enter undo history
    pub fn is_focus_only(&self) -> bool {
        matches!(
            self,
            OpKind::FocusTopic | OpKind::StartEditingContent | OpKind::StartEditingDesc
        )
    }
}

impl From<String> for OpKind {
    fn from(tag: String) -> Self {
        OpKind::BUILTIN
            .iter()
            .find(|kind| kind.as_str() == tag)
            .cloned()
            .unwrap_or(OpKind::Custom(tag))
    }
}

impl From<&str> for OpKind {
    fn from(tag: &str) -> Self {
        OpKind::from(tag.to_string())
    }
}

impl From<OpKind> for String {
    fn from(kind: OpKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a dragged topic lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropDir {
    /// Last child of the target
    In,
    /// Sibling right before the target
    Prev,
    /// Sibling right after the target
    Next,
}

/// Parameters of one operation
///
/// Built-in handlers read the named fields they need; collaborator handlers
/// can additionally read anything in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_key: Option<TopicKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_key: Option<TopicKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_key: Option<TopicKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_dir: Option<DropDir>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_mode: Option<FocusMode>,

    /// Key for a topic created by add-child / add-sibling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_key: Option<TopicKey>,

    /// Initial content for a created topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OpParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters addressing a single topic
    pub fn topic(key: impl Into<TopicKey>) -> Self {
        Self {
            topic_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Parameters of a drag-and-drop move
    pub fn drag(src: impl Into<TopicKey>, dst: impl Into<TopicKey>, drop_dir: DropDir) -> Self {
        Self {
            src_key: Some(src.into()),
            dst_key: Some(dst.into()),
            drop_dir: Some(drop_dir),
            ..Self::default()
        }
    }

    pub fn with_new_key(mut self, key: impl Into<TopicKey>) -> Self {
        self.new_key = Some(key.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_block(mut self, block_type: BlockType, data: Option<String>) -> Self {
        self.block_type = Some(block_type);
        self.data = data;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_focus_mode(mut self, focus_mode: FocusMode) -> Self {
        self.focus_mode = Some(focus_mode);
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    pub fn require_topic_key(&self) -> Result<&TopicKey, OpError> {
        self.topic_key.as_ref().ok_or(OpError::MissingParam("topicKey"))
    }

    pub fn require_src_key(&self) -> Result<&TopicKey, OpError> {
        self.src_key.as_ref().ok_or(OpError::MissingParam("srcKey"))
    }

    pub fn require_dst_key(&self) -> Result<&TopicKey, OpError> {
        self.dst_key.as_ref().ok_or(OpError::MissingParam("dstKey"))
    }

    pub fn require_drop_dir(&self) -> Result<DropDir, OpError> {
        self.drop_dir.ok_or(OpError::MissingParam("dropDir"))
    }

    pub fn require_block_type(&self) -> Result<&BlockType, OpError> {
        self.block_type.as_ref().ok_or(OpError::MissingParam("blockType"))
    }
}

/// One entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpItem {
    pub kind: OpKind,

    #[serde(default)]
    pub params: OpParams,
}

impl OpItem {
    pub fn new(kind: OpKind, params: OpParams) -> Self {
        Self { kind, params }
    }
}

/// A dispatch request: exactly one of `kind` or a non-empty `batch` must be set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<OpKind>,

    #[serde(default)]
    pub params: OpParams,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<Vec<OpItem>>,
}

/// Validated view of a request
#[derive(Debug, Clone, Copy)]
pub enum RequestShape<'a> {
    Single(&'a OpKind, &'a OpParams),
    Batch(&'a [OpItem]),
}

impl OpRequest {
    pub fn single(kind: OpKind, params: OpParams) -> Self {
        Self {
            kind: Some(kind),
            params,
            batch: None,
        }
    }

    pub fn batch(items: Vec<OpItem>) -> Self {
        Self {
            kind: None,
            params: OpParams::default(),
            batch: Some(items),
        }
    }

    /// Decode a request from JSON, rejecting a `batch` that is not an array
    pub fn from_json(value: Value) -> Result<Self, DispatchError> {
        if let Some(batch) = value.get("batch") {
            if !batch.is_null() && !batch.is_array() {
                return Err(DispatchError::InvalidBatch);
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(value)
    }

    pub fn shape(&self) -> Result<RequestShape<'_>, DispatchError> {
        match (&self.kind, &self.batch) {
            (Some(_), Some(_)) => Err(DispatchError::Conflict),
            (Some(kind), None) => Ok(RequestShape::Single(kind, &self.params)),
            (None, Some(items)) if items.is_empty() => Err(DispatchError::EmptyRequest),
            (None, Some(items)) => Ok(RequestShape::Batch(items)),
            (None, None) => Err(DispatchError::EmptyRequest),
        }
    }

    /// Every kind this request would apply, in order
    pub fn kinds(&self) -> Vec<&OpKind> {
        match (&self.kind, &self.batch) {
            (Some(kind), _) => vec![kind],
            (None, Some(items)) => items.iter().map(|item| &item.kind).collect(),
            (None, None) => vec![],
        }
    }
}

impl From<OpItem> for OpRequest {
    fn from(item: OpItem) -> Self {
        Self::single(item.kind, item.params)
    }
}
