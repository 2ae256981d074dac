//! Built-in operation handlers.
//!
//! Each handler unpacks its parameters and delegates to a model modifier or
//! to the drag-and-drop surgery. Two kinds are composed here rather than in
//! the model: starting to edit content only switches the focus mode, and
//! starting to edit the description first makes sure a description block
//! exists, then switches the focus mode. Both produce a single snapshot.

use crate::drag_drop;
use crate::errors::OpError;
use crate::operation::OpParams;
use mindmap_model::{modifier, BlockType, FocusMode, Model, TopicKey};

pub fn toggle_collapse(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::toggle_collapse(model, key.as_str())?)
}

pub fn collapse_all(model: &Model, _params: &OpParams) -> Result<Model, OpError> {
    Ok(modifier::collapse_all(model)?)
}

pub fn expand_all(model: &Model, _params: &OpParams) -> Result<Model, OpError> {
    Ok(modifier::expand_all(model)?)
}

pub fn add_child(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::add_child(
        model,
        key.as_str(),
        new_key(params),
        params.content.as_deref(),
    )?)
}

pub fn add_sibling(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::add_sibling(
        model,
        key.as_str(),
        new_key(params),
        params.content.as_deref(),
    )?)
}

pub fn delete_topic(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::delete_topic(model, key.as_str())?)
}

pub fn focus_topic(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    let mode = params.focus_mode.unwrap_or(FocusMode::Normal);
    Ok(modifier::focus_topic(model, key.as_str(), mode)?)
}

pub fn set_style(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::set_style(model, key.as_str(), params.style.clone())?)
}

pub fn set_topic_block(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    let block_type = params.require_block_type()?;
    Ok(modifier::set_block_data(
        model,
        key.as_str(),
        block_type.clone(),
        params.data.clone(),
    )?)
}

pub fn delete_topic_block(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    let block_type = params.require_block_type()?;
    Ok(modifier::delete_block(model, key.as_str(), block_type)?)
}

pub fn start_editing_content(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::focus_topic(model, key.as_str(), FocusMode::EditingContent)?)
}

pub fn start_editing_desc(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    let topic = model.get_topic(key.as_str())?;

    let seeded = if topic.block_data(&BlockType::Desc).is_none() {
        modifier::set_block_data(model, key.as_str(), BlockType::Desc, Some(String::new()))?
    } else {
        model.clone()
    };

    Ok(modifier::focus_topic(&seeded, key.as_str(), FocusMode::EditingDesc)?)
}

pub fn drag_and_drop(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let src = params.require_src_key()?;
    let dst = params.require_dst_key()?;
    let drop_dir = params.require_drop_dir()?;
    Ok(drag_drop::drag_and_drop(model, src.as_str(), dst.as_str(), drop_dir)?)
}

pub fn set_editor_root(model: &Model, params: &OpParams) -> Result<Model, OpError> {
    let key = params.require_topic_key()?;
    Ok(modifier::set_editor_root(model, key.as_str())?)
}

fn new_key(params: &OpParams) -> TopicKey {
    params.new_key.clone().unwrap_or_else(TopicKey::generate)
}
