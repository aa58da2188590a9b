// crates/bridgeconvert/tests/registry_test.rs

use bridgeconvert::registry::{self, TypeInfo};
use serde_json::{json, Map, Value};

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_known_type_label() {
    let info = registry::resolve("n8n-nodes-base.start");

    assert_eq!(info.label, "Start Trigger");
    assert_eq!(info.description, "Starts the workflow when it is run manually.");
}

#[test]
fn test_description_names_parameter() {
    let info = registry::resolve_with(
        "n8n-nodes-base.emailSend",
        &params(json!({ "toEmail": "ops@example.com", "subject": "Report" })),
    );

    assert_eq!(info.label, "Send Email");
    assert_eq!(info.description, "Sends an email message to ops@example.com.");
}

#[test]
fn test_description_falls_back_to_generic_phrase() {
    let generic = "Sends an HTTP request and returns the response.";

    for parameters in [json!({}), json!({ "url": "   " }), json!({ "url": { "nested": true } })] {
        let info = registry::resolve_with("n8n-nodes-base.httpRequest", &params(parameters));
        assert_eq!(info.description, generic);
    }
    assert_eq!(registry::resolve("n8n-nodes-base.httpRequest").description, generic);
}

#[test]
fn test_unknown_type_is_humanized() {
    let info = registry::resolve("myPlugin.customNode");

    assert_eq!(
        info,
        TypeInfo {
            label: "custom Node".to_string(),
            description: "Runs the custom node step.".to_string(),
        }
    );
}

#[test]
fn test_fallback_is_deterministic() {
    let first = registry::resolve("acme.nodes.fetchInvoiceData");
    let second = registry::resolve("acme.nodes.fetchInvoiceData");

    assert_eq!(first, second);
    assert_eq!(first.label, "fetch Invoice Data");
}

#[test]
fn test_fallback_edge_cases() {
    assert_eq!(registry::resolve("plainName").label, "plain Name");
    assert_eq!(registry::resolve("UpperStart").label, "Upper Start");
    assert_eq!(registry::resolve("  spaced  ").label, "spaced");
    assert_eq!(registry::resolve("").label, "Node");
    assert_eq!(registry::resolve("trailing.").label, "Node");
    assert_eq!(registry::resolve("").description, "Runs the node step.");
}

#[test]
fn test_catalogue_lists_every_entry() {
    let types = registry::known_types();

    assert!(types.iter().any(|t| t.type_id == "n8n-nodes-base.start"));
    let http = types
        .iter()
        .find(|t| t.type_id == "n8n-nodes-base.httpRequest")
        .unwrap();
    assert_eq!(http.parameter, Some("url"));

    for descriptor in &types {
        assert!(registry::is_known(descriptor.type_id));
        assert_eq!(registry::resolve(descriptor.type_id).label, descriptor.label);
    }
    assert!(!registry::is_known("myPlugin.customNode"));
}
