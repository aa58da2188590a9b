// crates/bridgeconvert/tests/session_test.rs

use bridgeconvert::{EditorSession, ImportOptions, LayoutConfig};
use bridgecore::{BridgeError, ImportWarning, Position};
use serde_json::json;

const WORKFLOW: &str = r#"{
    "nodes": [
        { "name": "Start", "type": "n8n-nodes-base.start", "position": [240, 300] },
        { "name": "Fetch", "type": "n8n-nodes-base.httpRequest",
          "parameters": { "url": "https://example.com" } }
    ],
    "connections": {
        "Start": { "main": [[{ "node": "Fetch", "type": "main", "index": 0 }]] }
    }
}"#;

fn loaded_session() -> EditorSession {
    let mut session = EditorSession::new();
    let warnings = session.import_str(WORKFLOW).unwrap();
    assert!(warnings.is_empty());
    session
}

#[test]
fn test_new_session_is_empty() {
    let session = EditorSession::new();

    assert!(session.graph().is_empty());
    assert!(session.export().nodes.is_empty());
}

#[test]
fn test_import_replaces_graph() {
    let mut session = loaded_session();
    assert_eq!(session.graph().node_count(), 2);

    let warnings = session
        .import_value(&json!({
            "nodes": [{ "name": "Only", "type": "x.only" }],
            "connections": { "Only": { "main": [[{ "node": "Gone", "index": 0 }]] } }
        }))
        .unwrap();

    assert_eq!(session.graph().node_count(), 1);
    assert!(session.graph().find_node("Start").is_none());
    assert_eq!(
        warnings,
        vec![ImportWarning::UnknownTarget {
            edge_id: "Only[0]->Gone[0]".to_string()
        }]
    );
}

#[test]
fn test_failed_imports_leave_graph_untouched() {
    let mut session = loaded_session();
    let before = session.graph().clone();

    let err = session.import_str("{ not json").unwrap_err();
    assert!(matches!(err, BridgeError::Parse(_)));
    assert_eq!(session.graph(), &before);

    let err = session.import_value(&json!({ "workflow": {} })).unwrap_err();
    assert!(matches!(err, BridgeError::Schema(_)));
    assert_eq!(session.graph(), &before);

    let err = session
        .import_value(&json!({ "nodes": [{ "name": "X" }, { "name": "X" }] }))
        .unwrap_err();
    assert!(matches!(err, BridgeError::DuplicateIdentifier { .. }));
    assert_eq!(session.graph(), &before);
}

#[test]
fn test_edits_show_up_in_export() {
    let mut session = loaded_session();

    {
        let graph = session.graph_mut();
        graph.move_node("Fetch", Position::new(600.0, 300.0)).unwrap();
        graph.remove_edge("Start[0]->Fetch[0]").unwrap();
        graph.connect("Start", "Fetch", 1, 0).unwrap();
    }

    let doc = session.export();

    let fetch = doc.nodes.iter().find(|n| n.name.as_deref() == Some("Fetch")).unwrap();
    assert_eq!(fetch.position.map(|p| (p.x(), p.y())), Some((600.0, 300.0)));
    let main = &doc.connections["Start"].main;
    assert_eq!(main.len(), 2);
    assert!(main[0].is_empty());
    assert_eq!(main[1][0].node, "Fetch");
}

#[test]
fn test_delete_node_removes_its_connections_from_export() {
    let mut session = loaded_session();

    session.graph_mut().remove_node("Fetch").unwrap();
    let text = session.export_string().unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(value["connections"], json!({}));
}

#[test]
fn test_session_uses_layout_options() {
    let layout = LayoutConfig::default().with_origin(0.0, 0.0);
    let mut session = EditorSession::with_options(ImportOptions::default().with_layout(layout));

    session.import_str(WORKFLOW).unwrap();

    assert_eq!(session.graph().find_node("Fetch").unwrap().position, Position::new(350.0, 200.0));
    assert_eq!(session.graph().find_node("Start").unwrap().position, Position::new(240.0, 300.0));
}

#[test]
fn test_clear() {
    let mut session = loaded_session();

    session.clear();

    assert!(session.graph().is_empty());
}
