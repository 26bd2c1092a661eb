//! Integration tests for modelgen-introspector
//!
//! These tests load metadata modules from disk and validate controller
//! extraction and model discovery end to end.

use modelgen_core::{HttpVerb, Options};
use modelgen_introspector::{Introspector, ScanResult};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_module(dir: &Path, file: &str, doc: &serde_json::Value) {
    std::fs::write(dir.join(file), serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn scan(dir: &Path) -> ScanResult {
    let options = Options::builder(dir, dir.join("out")).build().unwrap();
    Introspector::new(&options).scan().unwrap()
}

fn model_names(scan: &ScanResult) -> Vec<String> {
    scan.models
        .sorted(&scan.registry)
        .into_iter()
        .map(|id| scan.registry.get(id).qualified_name())
        .collect()
}

/// Tests discovery across two module files
#[test]
fn test_scan_across_modules() {
    let dir = TempDir::new().unwrap();
    write_module(
        dir.path(),
        "Acme.Api.client.json",
        &json!({
            "module": "Acme.Api",
            "types": [{
                "name": "WidgetController", "namespace": "Acme.Api",
                "base": "System.Web.Http.ApiController",
                "methods": [
                    { "name": "GetWidget", "parameters": [ { "name": "id", "type": "int" } ],
                      "returns": "Acme.Models.Widget" },
                    { "name": "GetAll", "returns": "Task<IEnumerable<Acme.Models.Widget>>" }
                ]
            }]
        }),
    );
    write_module(
        dir.path(),
        "Acme.Models.client.json",
        &json!({
            "module": "Acme.Models",
            "types": [
                { "name": "Widget", "namespace": "Acme.Models",
                  "properties": [
                      { "name": "id", "type": "int" },
                      { "name": "name", "type": "string" },
                      { "name": "parts", "type": "List<Acme.Models.Part>" }
                  ] },
                { "name": "Part", "namespace": "Acme.Models",
                  "properties": [ { "name": "owner", "type": "Acme.Models.Widget" } ] },
                { "name": "Unused", "namespace": "Acme.Models" }
            ]
        }),
    );

    let scan = scan(dir.path());
    assert_eq!(scan.modules.len(), 2);
    assert_eq!(scan.controllers.len(), 1);
    assert_eq!(scan.controllers[0].group, "Widget");
    assert_eq!(scan.operations().count(), 2);
    assert!(scan.operations().all(|o| o.verb == Some(HttpVerb::Get)));
    assert_eq!(
        model_names(&scan),
        vec!["Acme.Models.Part", "Acme.Models.Widget"]
    );
}

/// Tests that a broken module is skipped and the run continues
#[test]
fn test_broken_module_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_module(
        dir.path(),
        "good.client.json",
        &json!({
            "types": [
                { "name": "Widget", "namespace": "Acme" },
                { "name": "WidgetController", "namespace": "Acme", "base": "ApiController",
                  "methods": [ { "name": "GetWidget", "returns": "Acme.Widget" } ] }
            ]
        }),
    );
    std::fs::write(dir.path().join("broken.client.json"), "{ \"types\": [").unwrap();

    let scan = scan(dir.path());
    assert_eq!(scan.skipped.len(), 1);
    assert_eq!(model_names(&scan), vec!["Acme.Widget"]);
}

/// Tests that non-matching files are ignored
#[test]
fn test_file_patterns() {
    let dir = TempDir::new().unwrap();
    write_module(
        dir.path(),
        "models.json",
        &json!({ "types": [ { "name": "Widget", "namespace": "Acme" } ] }),
    );

    let scan = scan(dir.path());
    assert!(scan.modules.is_empty());
    assert!(scan.models.is_empty());

    let options = Options::builder(dir.path(), dir.path().join("out"))
        .files(vec!["*.json".to_string()])
        .build()
        .unwrap();
    let scan = Introspector::new(&options).scan().unwrap();
    assert_eq!(scan.modules.len(), 1);
}

/// Tests the self-referencing model case
#[test]
fn test_self_reference_appears_once() {
    let dir = TempDir::new().unwrap();
    write_module(
        dir.path(),
        "tree.client.json",
        &json!({
            "types": [
                { "name": "Node", "namespace": "Acme",
                  "properties": [
                      { "name": "children", "type": "Acme.Node[]" },
                      { "name": "parent", "type": "Acme.Node" }
                  ] },
                { "name": "TreeController", "namespace": "Acme", "base": "ApiController",
                  "methods": [ { "name": "GetRoot", "returns": "Acme.Node" } ] }
            ]
        }),
    );

    let scan = scan(dir.path());
    assert_eq!(model_names(&scan), vec!["Acme.Node"]);
}

/// Tests that a missing source directory is a configuration error
#[test]
fn test_missing_source_directory() {
    let dir = TempDir::new().unwrap();
    let options = Options::builder(dir.path().join("missing"), dir.path().join("out"))
        .build()
        .unwrap();
    let err = Introspector::new(&options).scan().unwrap_err();
    assert!(err.is_config_error());
}
