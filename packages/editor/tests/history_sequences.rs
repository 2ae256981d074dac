//! Undo/redo sequences through the editor
//!
//! This tests:
//! - Round trips over several operations
//! - Which operations are kept out of history
//! - Batches as single history entries
//! - Redo policy and depth bound

use mindmap_editor::{
    DropDir, Editor, EditorConfig, HistoryConfig, OpError, OpItem, OpKind, OpParams, OpRegistry,
    OpRequest, RedoPolicy,
};
use mindmap_model::{BlockType, FocusMode, Model, ModelConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn fixture() -> Model {
    Model::from_json(
        r#"{
            "rootTopicKey": "root",
            "topics": [
                { "key": "root", "subKeys": ["a", "b"], "content": "Main Topic" },
                { "key": "a", "parentKey": "root", "subKeys": ["a1", "a2"] },
                { "key": "a1", "parentKey": "a" },
                { "key": "a2", "parentKey": "a" },
                { "key": "b", "parentKey": "root" }
            ]
        }"#,
    )
    .unwrap()
}

fn single(kind: OpKind, params: OpParams) -> OpRequest {
    OpRequest::single(kind, params)
}

fn edits() -> Vec<OpRequest> {
    vec![
        single(OpKind::AddChild, OpParams::topic("b").with_new_key("b1")),
        single(OpKind::DragAndDrop, OpParams::drag("a1", "a2", DropDir::Next)),
        single(OpKind::SetStyle, OpParams::topic("a").with_style("bold")),
        single(
            OpKind::SetTopicBlock,
            OpParams::topic("b1").with_block(BlockType::Content, Some("new".into())),
        ),
        single(OpKind::ToggleCollapse, OpParams::topic("a")),
        single(OpKind::DeleteTopic, OpParams::topic("a2")),
    ]
}

#[test]
fn test_round_trip_restores_every_snapshot() {
    let s0 = fixture();
    let mut editor = Editor::new(s0.clone());

    let mut snapshots = vec![s0.clone()];
    for request in edits() {
        editor.dispatch(&request).unwrap();
        snapshots.push(editor.model().clone());
    }
    let last = snapshots.len() - 1;
    assert_eq!(editor.history().undo_depth(), last);

    for expected in snapshots.iter().rev().skip(1) {
        assert!(editor.undo());
        assert_eq!(editor.model(), expected);
    }
    assert_eq!(editor.model(), &s0);
    assert!(!editor.can_undo());
    assert!(!editor.undo());

    for expected in snapshots.iter().skip(1) {
        assert!(editor.redo());
        assert_eq!(editor.model(), expected);
    }
    assert_eq!(editor.model(), &snapshots[last]);
    assert!(!editor.can_redo());
}

#[test]
fn test_focus_and_edit_kinds_skip_history() {
    let mut editor = Editor::new(fixture());

    editor
        .dispatch(&single(OpKind::FocusTopic, OpParams::topic("a")))
        .unwrap();
    assert_eq!(editor.history().undo_depth(), 0);

    editor
        .dispatch(&single(OpKind::StartEditingContent, OpParams::topic("a")))
        .unwrap();
    assert_eq!(editor.history().undo_depth(), 0);
    assert_eq!(editor.model().focus_mode(), FocusMode::EditingContent);
}

#[test]
fn test_no_history_while_editing() {
    let mut editor = Editor::new(fixture());
    editor
        .dispatch(&single(OpKind::AddChild, OpParams::topic("b").with_new_key("b1")))
        .unwrap();
    editor
        .dispatch(&single(OpKind::StartEditingDesc, OpParams::topic("b1")))
        .unwrap();
    assert_eq!(editor.history().undo_depth(), 1);

    // Committing the edited text happens mid-edit and is not recorded
    editor
        .dispatch(&single(
            OpKind::SetTopicBlock,
            OpParams::topic("b1").with_block(BlockType::Desc, Some("notes".into())),
        ))
        .unwrap();
    assert_eq!(editor.history().undo_depth(), 1);

    // Undo is unavailable until editing ends
    assert!(!editor.can_undo());
    assert!(!editor.undo());

    editor
        .dispatch(&single(
            OpKind::FocusTopic,
            OpParams::topic("b1").with_focus_mode(FocusMode::Normal),
        ))
        .unwrap();
    assert!(editor.can_undo());
    assert!(editor.undo());
    assert!(!editor.model().contains("b1"));
}

#[test]
fn test_allow_undo_disabled() {
    let model = fixture().with_config(ModelConfig {
        allow_undo: false,
        readonly: false,
    });
    let mut editor = Editor::new(model);

    editor
        .dispatch(&single(OpKind::DeleteTopic, OpParams::topic("b")))
        .unwrap();
    assert_eq!(editor.history().undo_depth(), 0);
    assert!(!editor.can_undo());
}

#[test]
fn test_no_redo_while_editing() {
    let mut editor = Editor::new(fixture());
    editor.dispatch(&edits()[0]).unwrap();
    assert!(editor.undo());
    assert_eq!(editor.history().redo_depth(), 1);

    editor
        .dispatch(&single(OpKind::StartEditingContent, OpParams::topic("a")))
        .unwrap();

    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.history().redo_depth(), 1);
    assert!(!editor.model().contains("b1"));
}

#[test]
fn test_no_redo_once_undo_is_disabled() {
    let mut editor = Editor::builder(fixture())
        .extension(|registry: OpRegistry| {
            registry.with(
                OpKind::custom("LOCK_HISTORY"),
                |model: &Model, _: &OpParams| -> Result<Model, OpError> {
                    Ok(model.clone().with_config(ModelConfig {
                        allow_undo: false,
                        readonly: false,
                    }))
                },
            )
        })
        .build();
    editor.dispatch(&edits()[0]).unwrap();
    assert!(editor.undo());

    editor
        .dispatch(&single(OpKind::custom("LOCK_HISTORY"), OpParams::new()))
        .unwrap();
    assert!(!editor.model().config().allow_undo);
    assert_eq!(editor.history().redo_depth(), 1);

    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.history().redo_depth(), 1);
    assert!(!editor.model().contains("b1"));
}

#[test]
fn test_batch_pushes_one_entry() {
    let mut editor = Editor::new(fixture());
    let before = editor.snapshot();

    let request = OpRequest::batch(vec![
        OpItem::new(OpKind::AddChild, OpParams::topic("root").with_new_key("n1")),
        OpItem::new(OpKind::AddChild, OpParams::topic("n1").with_new_key("n2")),
        OpItem::new(OpKind::StartEditingContent, OpParams::topic("n2")),
    ]);
    editor.dispatch(&request).unwrap();

    assert_eq!(editor.history().undo_depth(), 1);
    assert_eq!(editor.model().focus_mode(), FocusMode::EditingContent);

    // Leave edit mode, then the whole batch goes away in one step
    editor
        .dispatch(&single(OpKind::FocusTopic, OpParams::topic("n2")))
        .unwrap();
    assert!(editor.undo());
    assert_eq!(editor.model(), before.as_ref());
}

#[test]
fn test_redo_survives_new_edit_by_default() {
    let mut editor = Editor::new(fixture());
    let requests = edits();

    editor.dispatch(&requests[0]).unwrap();
    assert!(editor.undo());
    assert_eq!(editor.history().redo_depth(), 1);

    editor.dispatch(&requests[2]).unwrap();
    assert_eq!(editor.history().redo_depth(), 1);
    assert!(editor.can_redo());
}

#[test]
fn test_clear_on_edit_drops_redo() {
    let config = EditorConfig {
        history: HistoryConfig {
            max_depth: None,
            redo_policy: RedoPolicy::ClearOnEdit,
        },
        ..EditorConfig::default()
    };
    let mut editor = Editor::builder(fixture()).config(config).build();
    let requests = edits();

    editor.dispatch(&requests[0]).unwrap();
    assert!(editor.undo());
    editor.dispatch(&requests[2]).unwrap();

    assert_eq!(editor.history().redo_depth(), 0);
    assert!(!editor.redo());
}

#[test]
fn test_focus_change_keeps_redo_even_when_clearing() {
    let config =
        EditorConfig::from_json(r#"{ "history": { "redoPolicy": "clearOnEdit" } }"#).unwrap();
    let mut editor = Editor::builder(fixture()).config(config).build();

    editor.dispatch(&edits()[0]).unwrap();
    assert!(editor.undo());
    editor
        .dispatch(&single(OpKind::FocusTopic, OpParams::topic("a")))
        .unwrap();

    assert_eq!(editor.history().redo_depth(), 1);
}

#[test]
fn test_max_depth_bound() {
    let config = EditorConfig::from_json(r#"{ "history": { "maxDepth": 2 } }"#).unwrap();
    let mut editor = Editor::builder(fixture()).config(config).build();

    for request in edits().iter().take(4) {
        editor.dispatch(request).unwrap();
    }
    assert_eq!(editor.history().undo_depth(), 2);

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    // Only the last two edits were undone
    assert!(editor.model().contains("b1"));
}

#[test]
fn test_undo_and_redo_notify() {
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let mut editor = Editor::builder(fixture())
        .on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    editor.dispatch(&edits()[0]).unwrap();
    editor.undo();
    editor.redo();
    // Nothing left to redo: no notification
    editor.redo();

    assert_eq!(changes.load(Ordering::SeqCst), 3);
}
