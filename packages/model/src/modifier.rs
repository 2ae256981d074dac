//! # Model Modifiers
//!
//! Primitive, pure edits over a [`Model`]. Each function borrows the current
//! snapshot and returns the next one; the input is never touched.
//!
//! Topics are only created by [`add_child`] / [`add_sibling`] and only
//! destroyed by [`delete_topic`]. Every other modifier rewrites attributes of
//! existing topics.
//!
//! A modifier that moves focus to a different topic drops the focus mode back
//! to [`FocusMode::Normal`].

use crate::error::{ModelError, ModelResult};
use crate::model::{FocusMode, Model};
use crate::topic::{Block, BlockType, Topic, TopicKey};

/// Flip `collapse` on a topic that has children
pub fn toggle_collapse(model: &Model, topic_key: &str) -> ModelResult<Model> {
    let topic = model.get_topic(topic_key)?;
    if !topic.has_children() {
        return Ok(model.clone());
    }
    model.clone().update_topic(topic_key, |t| t.collapse = !t.collapse)
}

/// Collapse every branch below the editor root and focus the editor root
pub fn collapse_all(model: &Model) -> ModelResult<Model> {
    let editor_root = model.editor_root_topic_key().clone();
    let mut next = model.clone();

    for key in model.subtree_keys(editor_root.as_str())? {
        if key == editor_root {
            continue;
        }
        let has_children = next.get_topic(key.as_str())?.has_children();
        if has_children {
            next = next.update_topic(key.as_str(), |t| t.collapse = true)?;
        }
    }

    Ok(move_focus(next, editor_root))
}

/// Expand the editor root and everything below it
pub fn expand_all(model: &Model) -> ModelResult<Model> {
    let editor_root = model.editor_root_topic_key().clone();
    let mut next = model.clone();

    for key in model.subtree_keys(editor_root.as_str())? {
        if next.get_topic(key.as_str())?.collapse {
            next = next.update_topic(key.as_str(), |t| t.collapse = false)?;
        }
    }

    Ok(next)
}

/// Append a new child under `parent_key` and focus it
pub fn add_child(
    model: &Model,
    parent_key: &str,
    new_key: TopicKey,
    content: Option<&str>,
) -> ModelResult<Model> {
    let parent = model.get_topic(parent_key)?;
    if model.contains(new_key.as_str()) {
        return Err(ModelError::DuplicateKey(new_key));
    }

    let child = new_topic(new_key.clone(), parent.key.clone(), content);

    let next = model
        .clone()
        .put_topic(child)
        .update_topic(parent_key, |p| {
            p.sub_keys.push_back(new_key.clone());
            p.collapse = false;
        })?;

    Ok(move_focus(next, new_key))
}

/// Insert a new topic right after `topic_key` in its parent and focus it
pub fn add_sibling(
    model: &Model,
    topic_key: &str,
    new_key: TopicKey,
    content: Option<&str>,
) -> ModelResult<Model> {
    let parent = model.parent_of(topic_key)?;
    if model.contains(new_key.as_str()) {
        return Err(ModelError::DuplicateKey(new_key));
    }

    let index = parent.child_index(topic_key).ok_or_else(|| {
        ModelError::invariant(format!("{} is not listed by its parent", topic_key))
    })?;
    let parent_key = parent.key.clone();
    let sibling = new_topic(new_key.clone(), parent_key.clone(), content);

    let next = model
        .clone()
        .put_topic(sibling)
        .update_topic(parent_key.as_str(), |p| {
            p.sub_keys.insert(index + 1, new_key.clone());
        })?;

    Ok(move_focus(next, new_key))
}

/// Remove a topic together with its whole sub-tree
///
/// The root and the editor root (or any ancestor of it) cannot be deleted.
/// Focus inside the removed sub-tree moves to the parent.
pub fn delete_topic(model: &Model, topic_key: &str) -> ModelResult<Model> {
    let topic = model.get_topic(topic_key)?;
    let parent_key = topic
        .parent_key
        .clone()
        .ok_or_else(|| ModelError::CannotDeleteRoot(topic.key.clone()))?;

    let editor_root = model.editor_root_topic_key();
    if editor_root.as_str() == topic_key || model.is_descendant(editor_root.as_str(), topic_key) {
        return Err(ModelError::CannotDeleteRoot(topic.key.clone()));
    }

    let removed = model.subtree_keys(topic_key)?;

    let next = model
        .clone()
        .update_topic(parent_key.as_str(), |p| {
            p.sub_keys.retain(|k| k.as_str() != topic_key);
        })?
        .remove_topics(removed.iter());

    let focus_removed = model
        .focus_key()
        .map(|focus| removed.contains(focus))
        .unwrap_or(false);
    if focus_removed {
        return Ok(move_focus(next, parent_key));
    }

    Ok(next)
}

pub fn focus_topic(model: &Model, topic_key: &str, focus_mode: FocusMode) -> ModelResult<Model> {
    let key = model.get_topic(topic_key)?.key.clone();
    Ok(model.clone().with_focus(Some(key), focus_mode))
}

pub fn set_style(model: &Model, topic_key: &str, style: Option<String>) -> ModelResult<Model> {
    model.clone().update_topic(topic_key, |t| t.style = style)
}

/// Set the data of a block, creating the block when it does not exist yet
pub fn set_block_data(
    model: &Model,
    topic_key: &str,
    block_type: BlockType,
    data: Option<String>,
) -> ModelResult<Model> {
    model.clone().update_topic(topic_key, |t| {
        t.blocks.insert(block_type, Block { data });
    })
}

pub fn delete_block(model: &Model, topic_key: &str, block_type: &BlockType) -> ModelResult<Model> {
    model.clone().update_topic(topic_key, |t| {
        t.blocks.remove(block_type);
    })
}

/// Display the sub-tree rooted at `topic_key` in isolation
pub fn set_editor_root(model: &Model, topic_key: &str) -> ModelResult<Model> {
    let key = model.get_topic(topic_key)?.key.clone();
    Ok(model.clone().with_editor_root(key))
}

/// Focus `key`, leaving edit mode unless focus stays on the same topic
fn move_focus(model: Model, key: TopicKey) -> Model {
    let mode = if model.focus_key() == Some(&key) {
        model.focus_mode()
    } else {
        FocusMode::Normal
    };
    model.with_focus(Some(key), mode)
}

fn new_topic(key: TopicKey, parent_key: TopicKey, content: Option<&str>) -> Topic {
    let topic = Topic::new(key, Some(parent_key));
    match content {
        Some(content) => topic.with_content(content),
        None => topic,
    }
}
