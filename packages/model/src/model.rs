//! # Document Model
//!
//! A [`Model`] is one immutable snapshot of a mind-map document: the topic
//! tree plus the editor metadata that travels with it (focus, display root,
//! config).
//!
//! ## Snapshots
//!
//! Topics live in a persistent [`im::OrdMap`], and each topic keeps its
//! children in an [`im::Vector`]. Cloning a `Model` is O(1) and an edit only
//! copies the map nodes along the path to the changed topics, so keeping
//! hundreds of snapshots in an undo history costs little more than one copy.
//!
//! Edits never happen in place. Every editing method consumes `self` and
//! returns the next snapshot:
//!
//! ```rust,ignore
//! let next = model.clone().update_topic("a", |t| t.collapse = true)?;
//! // `model` is unchanged, `next` shares every other topic with it
//! ```

use crate::error::{ModelError, ModelResult};
use crate::topic::{Block, BlockType, Topic, TopicKey};
use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the user is currently doing with the focused topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FocusMode {
    #[default]
    Normal,
    EditingContent,
    EditingDesc,
    ShowPopup,
}

impl FocusMode {
    /// True while a content or description editor is open
    pub fn is_editing(self) -> bool {
        matches!(self, FocusMode::EditingContent | FocusMode::EditingDesc)
    }
}

/// Structural settings carried inside every snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default = "default_allow_undo")]
    pub allow_undo: bool,

    #[serde(default)]
    pub readonly: bool,
}

fn default_allow_undo() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            allow_undo: default_allow_undo(),
            readonly: false,
        }
    }
}

/// Immutable document snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    topics: OrdMap<TopicKey, Topic>,
    root_topic_key: TopicKey,
    editor_root_topic_key: TopicKey,
    focus_key: Option<TopicKey>,
    focus_mode: FocusMode,
    config: ModelConfig,
}

impl Model {
    /// Create a document holding a single root topic
    pub fn new_root(key: impl Into<TopicKey>, content: impl Into<String>) -> Self {
        let key = key.into();
        let root = Topic::new(key.clone(), None).with_content(content);

        let mut topics = OrdMap::new();
        topics.insert(key.clone(), root);

        Self {
            topics,
            root_topic_key: key.clone(),
            editor_root_topic_key: key,
            focus_key: None,
            focus_mode: FocusMode::Normal,
            config: ModelConfig::default(),
        }
    }

    /// Build a snapshot from a flat topic description
    ///
    /// The description must already describe a valid tree: every listed
    /// child must name its parent and vice versa.
    pub fn create(descriptor: ModelDescriptor) -> ModelResult<Self> {
        let mut topics = OrdMap::new();

        for desc in descriptor.topics {
            let key = desc.key.clone();
            if topics.contains_key(&key) {
                return Err(ModelError::DuplicateKey(key));
            }
            topics.insert(key, desc.into_topic());
        }

        let editor_root_topic_key = descriptor
            .editor_root_topic_key
            .unwrap_or_else(|| descriptor.root_topic_key.clone());

        let model = Self {
            topics,
            root_topic_key: descriptor.root_topic_key,
            editor_root_topic_key,
            focus_key: None,
            focus_mode: FocusMode::Normal,
            config: descriptor.config,
        };

        model.check_invariants()?;
        Ok(model)
    }

    /// Build a snapshot from a JSON description
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let descriptor: ModelDescriptor = serde_json::from_str(json)?;
        Self::create(descriptor)
    }

    // ====================================================================
    // Queries
    // ====================================================================

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        self.topics.get(key)
    }

    /// Like [`topic`](Self::topic), but a missing key is an error
    pub fn get_topic(&self, key: &str) -> ModelResult<&Topic> {
        self.topics
            .get(key)
            .ok_or_else(|| ModelError::not_found(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.topics.contains_key(key)
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn root_topic_key(&self) -> &TopicKey {
        &self.root_topic_key
    }

    pub fn editor_root_topic_key(&self) -> &TopicKey {
        &self.editor_root_topic_key
    }

    pub fn focus_key(&self) -> Option<&TopicKey> {
        self.focus_key.as_ref()
    }

    pub fn focus_mode(&self) -> FocusMode {
        self.focus_mode
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Parent topic of `key`; fails for the root
    pub fn parent_of(&self, key: &str) -> ModelResult<&Topic> {
        let topic = self.get_topic(key)?;
        match &topic.parent_key {
            Some(parent_key) => self.get_topic(parent_key.as_str()),
            None => Err(ModelError::RootHasNoParent(topic.key.clone())),
        }
    }

    /// Whether `key` lies strictly below `ancestor`
    pub fn is_descendant(&self, key: &str, ancestor: &str) -> bool {
        let mut current = self.topic(key).and_then(|t| t.parent_key.as_ref());
        let mut steps = 0;

        while let Some(parent) = current {
            if parent.as_str() == ancestor {
                return true;
            }
            // A malformed tree must not hang the walk.
            steps += 1;
            if steps > self.topics.len() {
                return false;
            }
            current = self.topic(parent.as_str()).and_then(|t| t.parent_key.as_ref());
        }

        false
    }

    /// `key` and everything below it, in pre-order
    pub fn subtree_keys(&self, key: &str) -> ModelResult<Vec<TopicKey>> {
        let start = self.get_topic(key)?;
        let mut out = Vec::new();
        let mut stack = vec![start.key.clone()];

        while let Some(next) = stack.pop() {
            if let Some(topic) = self.topic(next.as_str()) {
                stack.extend(topic.sub_keys.iter().rev().cloned());
            }
            out.push(next);
        }

        Ok(out)
    }

    // ====================================================================
    // Snapshot edits
    // ====================================================================

    /// Insert or replace a topic as-is
    pub fn put_topic(mut self, topic: Topic) -> Self {
        self.topics.insert(topic.key.clone(), topic);
        self
    }

    /// Rewrite one topic in the next snapshot
    pub fn update_topic<F>(mut self, key: &str, f: F) -> ModelResult<Self>
    where
        F: FnOnce(&mut Topic),
    {
        let topic = self
            .topics
            .get_mut(key)
            .ok_or_else(|| ModelError::not_found(key))?;
        f(topic);
        Ok(self)
    }

    /// Drop topics without touching any parent's `sub_keys`
    pub(crate) fn remove_topics<'a>(
        mut self,
        keys: impl IntoIterator<Item = &'a TopicKey>,
    ) -> Self {
        for key in keys {
            self.topics.remove(key);
        }
        self
    }

    pub fn with_focus(mut self, focus_key: Option<TopicKey>, focus_mode: FocusMode) -> Self {
        self.focus_key = focus_key;
        self.focus_mode = focus_mode;
        self
    }

    pub fn with_editor_root(mut self, key: TopicKey) -> Self {
        self.editor_root_topic_key = key;
        self
    }

    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    // ====================================================================
    // Validation
    // ====================================================================

    /// Verify the structural invariants of the topic tree
    ///
    /// 1. single connected tree rooted at the only parentless topic, no cycles
    /// 2. parent/child links agree in both directions
    /// 3. keys are unique (guaranteed by the map, checked against `topic.key`)
    /// 4. no duplicate entries in any `sub_keys`
    pub fn check_invariants(&self) -> ModelResult<()> {
        let root = self.topics.get(&self.root_topic_key).ok_or_else(|| {
            ModelError::invariant(format!("root {} is missing", self.root_topic_key))
        })?;
        if root.parent_key.is_some() {
            return Err(ModelError::invariant(format!(
                "root {} has a parent",
                self.root_topic_key
            )));
        }

        for (key, topic) in self.topics.iter() {
            if &topic.key != key {
                return Err(ModelError::invariant(format!(
                    "topic stored under {} carries key {}",
                    key, topic.key
                )));
            }

            match &topic.parent_key {
                None if key != &self.root_topic_key => {
                    return Err(ModelError::invariant(format!("{} has no parent", key)));
                }
                None => {}
                Some(parent_key) => {
                    let parent = self.topics.get(parent_key).ok_or_else(|| {
                        ModelError::invariant(format!(
                            "{} points at missing parent {}",
                            key, parent_key
                        ))
                    })?;
                    if parent.child_index(key.as_str()).is_none() {
                        return Err(ModelError::invariant(format!(
                            "{} is not listed by its parent {}",
                            key, parent_key
                        )));
                    }
                }
            }

            let mut seen = HashSet::new();
            for child_key in topic.sub_keys.iter() {
                if !seen.insert(child_key) {
                    return Err(ModelError::invariant(format!(
                        "{} lists child {} twice",
                        key, child_key
                    )));
                }
                let child = self.topics.get(child_key).ok_or_else(|| {
                    ModelError::invariant(format!("{} lists missing child {}", key, child_key))
                })?;
                if child.parent_key.as_ref() != Some(key) {
                    return Err(ModelError::invariant(format!(
                        "{} lists {} whose parent is {:?}",
                        key, child_key, child.parent_key
                    )));
                }
            }
        }

        // Reachability from the root also rules out cycles: a cycle would
        // leave its members unvisited.
        let mut visited = HashSet::new();
        let mut stack = vec![&self.root_topic_key];
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                return Err(ModelError::invariant(format!("{} reached twice", key)));
            }
            if let Some(topic) = self.topics.get(key) {
                stack.extend(topic.sub_keys.iter());
            }
        }
        if visited.len() != self.topics.len() {
            return Err(ModelError::invariant(format!(
                "{} of {} topics unreachable from root",
                self.topics.len() - visited.len(),
                self.topics.len()
            )));
        }

        if !self.topics.contains_key(&self.editor_root_topic_key) {
            return Err(ModelError::invariant(format!(
                "editor root {} is missing",
                self.editor_root_topic_key
            )));
        }
        if let Some(focus) = &self.focus_key {
            if !self.topics.contains_key(focus) {
                return Err(ModelError::invariant(format!("focused topic {} is missing", focus)));
            }
        }

        Ok(())
    }
}

/// Flat description of a document, as hosts hand it to [`Model::create`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub root_topic_key: TopicKey,

    #[serde(default)]
    pub editor_root_topic_key: Option<TopicKey>,

    pub topics: Vec<TopicDescriptor>,

    #[serde(default)]
    pub config: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDescriptor {
    pub key: TopicKey,

    #[serde(default)]
    pub parent_key: Option<TopicKey>,

    #[serde(default)]
    pub sub_keys: Vec<TopicKey>,

    #[serde(default)]
    pub collapse: bool,

    /// Shorthand for the content block
    #[serde(default)]
    pub content: Option<String>,

    /// Shorthand for the description block
    #[serde(default)]
    pub desc: Option<String>,

    #[serde(default)]
    pub style: Option<String>,
}

impl TopicDescriptor {
    fn into_topic(self) -> Topic {
        let mut topic = Topic::new(self.key, self.parent_key);
        topic.sub_keys = self.sub_keys.into_iter().collect();
        topic.collapse = self.collapse;
        topic.style = self.style;
        if let Some(content) = self.content {
            topic.blocks.insert(BlockType::Content, Block::with_data(content));
        }
        if let Some(desc) = self.desc {
            topic.blocks.insert(BlockType::Desc, Block::with_data(desc));
        }
        topic
    }
}
