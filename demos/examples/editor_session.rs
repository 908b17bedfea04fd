// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An end-to-end editor session: build a map, batch-insert generated
//! nodes, style a multi-selection, and walk the undo history.
//!
//! Run:
//! - `cargo run -p arbor_demos --example editor_session`

use arbor_document::{Document, NodeId, StylePatch};
use arbor_editor::Editor;
use arbor_history::Recorder;
use arbor_selection::Selection;

fn print_tree(doc: &Document, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let content = doc.content(id).unwrap_or("");
    match doc.frame(id) {
        Some(frame) => println!(
            "{indent}{content}  [{:.0},{:.0} {:.0}x{:.0}]",
            frame.x0,
            frame.y0,
            frame.width(),
            frame.height()
        ),
        None => println!("{indent}{content}  [hidden]"),
    }
    for &child in doc.children_of(id) {
        print_tree(doc, child, depth + 1);
    }
}

fn record(recorder: &mut Recorder<Document>, editor: &Editor) {
    recorder.record_if_changed(editor.revision(), || editor.document().clone());
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut editor = Editor::new(1, "Trip Planning");
    let mut recorder: Recorder<Document> = Recorder::new();
    record(&mut recorder, &editor);

    let root = editor.document().root();
    let mut selection = Selection::new(root);

    let transport = editor.add_child(root, "Transport").expect("root is live");
    let lodging = editor.add_child(root, "Lodging").expect("root is live");
    record(&mut recorder, &editor);

    // A generated batch lands through the same contract as manual edits.
    editor.add_children(transport, &["Train", "Ferry", "夜行バス"], "demo-provider");
    record(&mut recorder, &editor);

    // Style the two branches in one step.
    selection.toggle_multi(transport);
    selection.toggle_multi(lodging);
    editor.batch_apply_style(
        selection.multi(),
        &StylePatch {
            font_weight: Some(700),
            ..StylePatch::default()
        },
    );
    record(&mut recorder, &editor);

    editor.toggle_collapse(transport);
    record(&mut recorder, &editor);

    println!("--- after editing (transport collapsed) ---");
    print_tree(editor.document(), root, 0);

    if let Some(snapshot) = recorder.undo().cloned() {
        editor.restore(snapshot);
    }
    println!("--- one undo (transport expanded again) ---");
    print_tree(editor.document(), root, 0);

    if let Some(snapshot) = recorder.redo().cloned() {
        editor.restore(snapshot);
    }
    println!("--- redone ---");
    print_tree(editor.document(), root, 0);
    println!(
        "{} nodes, depth {}, revision {}",
        editor.document().node_count(),
        editor.document().depth(),
        editor.revision()
    );
}
