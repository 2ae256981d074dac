//! # Drag and Drop
//!
//! Re-parenting and reordering of a topic when it is dropped on another one.
//!
//! ## Semantics
//!
//! ### In
//! - `src` becomes the last child of `dst`
//! - `dst` is expanded so the new child is visible
//!
//! ### Prev / Next
//! - `src` becomes a sibling right before / after `dst`
//! - Same parent: the parent's child list is rebuilt in a single pass over
//!   its original order. Deleting `src` first and then inserting at `dst`'s
//!   old index would be off by one whenever `src` sat before `dst`.
//! - Different parents: `src` is removed from its parent and inserted next to
//!   `dst`; the new parent is expanded.
//!
//! Only the moved topic and its old and new parents change. Every other topic
//! is shared with the previous snapshot.
//!
//! The caller guarantees `src != dst` and that `dst` is not inside `src`'s
//! sub-tree; [`check_move`] is the dispatcher-side check for that.

use crate::errors::DispatchError;
use crate::operation::{DropDir, OpKind, OpParams};
use im::Vector;
use mindmap_model::{Model, ModelError, ModelResult, TopicKey};

/// Reject moves that would not leave a single tree behind
pub fn check_move(model: &Model, params: &OpParams) -> Result<(), DispatchError> {
    let kind = OpKind::DragAndDrop;
    let src_key = params
        .require_src_key()
        .map_err(|e| DispatchError::operation(&kind, e))?;
    let dst_key = params
        .require_dst_key()
        .map_err(|e| DispatchError::operation(&kind, e))?;
    let drop_dir = params
        .require_drop_dir()
        .map_err(|e| DispatchError::operation(&kind, e))?;

    if src_key == dst_key {
        return Err(DispatchError::InvalidMove(format!("{} dropped onto itself", src_key)));
    }

    let src = model
        .get_topic(src_key.as_str())
        .map_err(|e| DispatchError::operation(&kind, e))?;
    let dst = model
        .get_topic(dst_key.as_str())
        .map_err(|e| DispatchError::operation(&kind, e))?;

    if src.parent_key.is_none() {
        return Err(DispatchError::InvalidMove(format!("root {} cannot be moved", src_key)));
    }
    if drop_dir != DropDir::In && dst.parent_key.is_none() {
        return Err(DispatchError::InvalidMove(format!(
            "root {} cannot have siblings",
            dst_key
        )));
    }
    if model.is_descendant(dst_key.as_str(), src_key.as_str()) {
        return Err(DispatchError::CycleDetected {
            src: src_key.clone(),
            dst: dst_key.clone(),
        });
    }

    Ok(())
}

/// Move `src_key` relative to `dst_key`
pub fn drag_and_drop(
    model: &Model,
    src_key: &str,
    dst_key: &str,
    drop_dir: DropDir,
) -> ModelResult<Model> {
    let src = model.get_topic(src_key)?;
    let dst = model.get_topic(dst_key)?;

    let src_parent_key = src
        .parent_key
        .clone()
        .ok_or_else(|| ModelError::RootHasNoParent(src.key.clone()))?;
    let mut src_parent_sub_keys = model.get_topic(src_parent_key.as_str())?.sub_keys.clone();
    src_parent_sub_keys.retain(|k| k.as_str() != src_key);

    let moved = src.key.clone();

    if drop_dir == DropDir::In {
        // `dst` may be the old parent itself, so its child list is read
        // after the removal above has been applied.
        let new_parent = dst.key.clone();
        return model
            .clone()
            .update_topic(src_parent_key.as_str(), |p| p.sub_keys = src_parent_sub_keys)?
            .update_topic(src_key, |t| t.parent_key = Some(new_parent))?
            .update_topic(dst_key, |t| {
                t.sub_keys.push_back(moved);
                t.collapse = false;
            });
    }

    let dst_parent_key = dst
        .parent_key
        .clone()
        .ok_or_else(|| ModelError::RootHasNoParent(dst.key.clone()))?;
    let dst_parent = model.get_topic(dst_parent_key.as_str())?;

    if src_parent_key == dst_parent_key {
        let rebuilt = reorder_siblings(&dst_parent.sub_keys, &moved, dst_key, drop_dir);
        return model
            .clone()
            .update_topic(dst_parent_key.as_str(), |p| p.sub_keys = rebuilt);
    }

    let dst_index = dst_parent
        .child_index(dst_key)
        .ok_or_else(|| ModelError::invariant(format!("{} is not listed by its parent", dst_key)))?;
    let insert_at = match drop_dir {
        DropDir::Prev => dst_index,
        _ => dst_index + 1,
    };
    let mut dst_parent_sub_keys = dst_parent.sub_keys.clone();
    dst_parent_sub_keys.insert(insert_at, moved);

    let new_parent = dst_parent_key.clone();
    model
        .clone()
        .update_topic(src_parent_key.as_str(), |p| p.sub_keys = src_parent_sub_keys)?
        .update_topic(src_key, |t| t.parent_key = Some(new_parent))?
        .update_topic(dst_parent_key.as_str(), |p| {
            p.sub_keys = dst_parent_sub_keys;
            p.collapse = false;
        })
}

/// One pass over `siblings`: drop `moved`, re-emit it next to `target`
fn reorder_siblings(
    siblings: &Vector<TopicKey>,
    moved: &TopicKey,
    target: &str,
    drop_dir: DropDir,
) -> Vector<TopicKey> {
    let mut out = Vector::new();

    for key in siblings.iter() {
        if key == moved {
            continue;
        }
        if key.as_str() == target {
            if drop_dir == DropDir::Prev {
                out.push_back(moved.clone());
                out.push_back(key.clone());
            } else {
                out.push_back(key.clone());
                out.push_back(moved.clone());
            }
        } else {
            out.push_back(key.clone());
        }
    }

    out
}
