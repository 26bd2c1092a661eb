//! End-to-end tests: generated code synced into a destination directory.

use modelgen_codegen::{GeneratedCode, GeneratedFile};
use modelgen_files::FilesBuilder;
use std::fs;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn generated(files: &[(&str, &str)]) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    for (path, content) in files {
        code.add_file(GeneratedFile {
            path: (*path).to_string(),
            content: (*content).to_string(),
        });
    }
    code
}

#[test]
fn test_unchanged_file_keeps_its_timestamp() {
    let temp = TempDir::new().unwrap();
    let code = generated(&[
        ("Widget.ts", "export class Widget {\n}\n"),
        ("index.ts", "export * from './Widget';\n"),
    ]);

    FilesBuilder::from_generated_code(code.clone())
        .build()
        .unwrap()
        .sync_to(temp.path())
        .unwrap();
    let widget = temp.path().join("Widget.ts");
    let before = fs::metadata(&widget).unwrap().modified().unwrap();

    thread::sleep(Duration::from_millis(50));
    let report = FilesBuilder::from_generated_code(code)
        .build()
        .unwrap()
        .sync_to(temp.path())
        .unwrap();

    assert!(report.written.is_empty());
    assert_eq!(fs::metadata(&widget).unwrap().modified().unwrap(), before);
}

#[test]
fn test_regeneration_reclaims_removed_models() {
    let temp = TempDir::new().unwrap();

    let first = generated(&[
        ("Gadget.ts", "export class Gadget {\n}\n"),
        ("Widget.ts", "export class Widget {\n}\n"),
        ("index.ts", "export * from './Gadget';\nexport * from './Widget';\n"),
    ]);
    FilesBuilder::from_generated_code(first)
        .build()
        .unwrap()
        .sync_to(temp.path())
        .unwrap();

    let second = generated(&[
        ("Widget.ts", "export class Widget {\n}\n"),
        ("index.ts", "export * from './Widget';\n"),
    ]);
    let report = FilesBuilder::from_generated_code(second)
        .build()
        .unwrap()
        .sync_to(temp.path())
        .unwrap();

    assert_eq!(report.deleted, vec!["Gadget.ts"]);
    assert_eq!(report.written, vec!["index.ts"]);
    assert_eq!(report.unchanged, vec!["Widget.ts"]);
    assert!(!temp.path().join("Gadget.ts").exists());
}

#[test]
fn test_nested_schema_path() {
    let temp = TempDir::new().unwrap();
    let code = generated(&[("index.ts", ""), ("meta/Schema.json", "[]")]);

    let report = FilesBuilder::from_generated_code(code)
        .build()
        .unwrap()
        .sync_to(temp.path())
        .unwrap();

    assert_eq!(report.written.len(), 2);
    assert!(temp.path().join("meta").join("Schema.json").is_file());
}
