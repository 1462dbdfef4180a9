use chrono::NaiveDate;
use daystart::catalog::{parse_catalog, Catalog, UserProfile};
use daystart::error::Error;
use daystart::processor::Materializer;
use daystart::renderer::MiniJinjaRenderer;
use daystart::resources::TemplateStore;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn profile() -> UserProfile {
    UserProfile {
        author: "A".to_string(),
        copyright: "Copyright (c) 2024 A".to_string(),
        email: "a@example.com".to_string(),
        organization: "Acme".to_string(),
    }
}

/// Builds an on-disk template set: a catalog with one `go`/`basic`
/// template over the given (source, dest, body) files and steps, plus the
/// file bodies under `templates/`. Returns the set's directory and the
/// parsed catalog.
fn template_set(
    files: &[(&str, &str, &str)],
    steps: serde_json::Value,
) -> (TempDir, PathBuf, Catalog) {
    let set_dir = TempDir::new().unwrap();

    let file_specs: Vec<serde_json::Value> = files
        .iter()
        .map(|(source, dest, _)| json!({ "source": source, "dest": dest }))
        .collect();
    let doc = json!({
        "languages": {
            "go": {
                "name": "Go",
                "fileExtension": "go",
                "templates": {
                    "basic": {
                        "name": "Basic",
                        "description": "test template",
                        "files": file_specs,
                        "postCreateSteps": steps
                    }
                }
            }
        }
    });

    let catalog_path = set_dir.path().join("templates.json");
    fs::write(&catalog_path, doc.to_string()).unwrap();

    for (source, _, body) in files {
        let path = set_dir.path().join("templates").join(source);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    let catalog = parse_catalog(doc.to_string().as_bytes()).unwrap();
    (set_dir, catalog_path, catalog)
}

#[test]
fn test_materialize_scenario() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("go/basic/main.go.tmpl", "main.go", "package main // {{ ProjectName }}")],
        json!([]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let project = materializer
        .materialize("go", "basic", Some("foo"), base_dir.path(), today())
        .unwrap();

    assert_eq!(project.root, base_dir.path().join("20240305-foo"));
    let body = fs::read_to_string(project.root.join("main.go")).unwrap();
    assert_eq!(body, "package main // foo");
    assert_eq!(project.entry_file, Some(project.root.join("main.go")));

    // Same name on the same day lands in the -1 sibling, never overwrites.
    let second = materializer
        .materialize("go", "basic", Some("foo"), base_dir.path(), today())
        .unwrap();
    assert_eq!(second.root, base_dir.path().join("20240305-foo-1"));
    assert!(second.root.join("main.go").is_file());
}

#[test]
fn test_default_project_name_when_none_given() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("go/basic/main.go", "main.go", "// {{ ProjectName }}")],
        json!([]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let project =
        materializer.materialize("go", "basic", None, base_dir.path(), today()).unwrap();

    assert_eq!(project.root, base_dir.path().join("daystart-20240305"));
    let body = fs::read_to_string(project.root.join("main.go")).unwrap();
    assert_eq!(body, "// daystart-20240305");
}

#[test]
fn test_files_written_in_order_and_failure_stops_the_sequence() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[
            ("t/a.txt", "a.txt", "{{ Author }}"),
            ("t/b.txt", "b.txt", "{{ NotAField }}"),
            ("t/c.txt", "c.txt", "{{ Author }}"),
        ],
        json!([]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let result =
        materializer.materialize("go", "basic", Some("foo"), base_dir.path(), today());
    assert!(matches!(result, Err(Error::Render(_))));

    // Fail fast, no rollback: A is on disk, C never was.
    let root = base_dir.path().join("20240305-foo");
    assert!(root.join("a.txt").is_file());
    assert!(!root.join("b.txt").exists());
    assert!(!root.join("c.txt").exists());
}

#[test]
fn test_destination_subdirectories_are_created() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("t/main.rs", "src/bin/main.rs", "fn main() {}")],
        json!([]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let project = materializer
        .materialize("go", "basic", Some("foo"), base_dir.path(), today())
        .unwrap();
    assert!(project.root.join("src/bin/main.rs").is_file());
}

#[test]
fn test_destination_may_not_escape_the_project() {
    let (_set_dir, catalog_path, catalog) =
        template_set(&[("t/x.txt", "../escape.txt", "x")], json!([]));
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let result =
        materializer.materialize("go", "basic", Some("foo"), base_dir.path(), today());
    assert!(matches!(result, Err(Error::InvalidDestination { .. })));
    assert!(!base_dir.path().join("escape.txt").exists());
}

#[test]
fn test_unknown_keys_are_fatal() {
    let (_set_dir, catalog_path, catalog) =
        template_set(&[("t/x.txt", "x.txt", "x")], json!([]));
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    assert!(matches!(
        materializer.materialize("cobol", "basic", Some("foo"), base_dir.path(), today()),
        Err(Error::UnknownLanguage { .. })
    ));
    assert!(matches!(
        materializer.materialize("go", "deluxe", Some("foo"), base_dir.path(), today()),
        Err(Error::UnknownTemplate { .. })
    ));
    // Nothing was created for either attempt.
    assert_eq!(fs::read_dir(base_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_remove_step_deletes_and_tolerates_missing() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("t/scratch.txt", "scratch.txt", "temporary")],
        json!([
            { "type": "remove", "path": "scratch.txt" },
            { "type": "remove", "path": "never-existed.txt" }
        ]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    // The missing target is already satisfied; the run still succeeds.
    let project = materializer
        .materialize("go", "basic", Some("foo"), base_dir.path(), today())
        .unwrap();
    assert!(!project.root.join("scratch.txt").exists());
}

#[test]
fn test_exec_step_runs_in_the_project_with_rendered_argv() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("t/main.go", "main.go", "package main")],
        json!([
            { "type": "exec", "command": ["touch", "{{ ProjectName }}.marker"] }
        ]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let project = materializer
        .materialize("go", "basic", Some("foo"), base_dir.path(), today())
        .unwrap();

    // The token was rendered and the child ran inside the project root.
    assert!(project.root.join("foo.marker").is_file());
}

#[test]
fn test_failing_exec_step_aborts_remaining_steps() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("t/main.go", "main.go", "package main")],
        json!([
            { "type": "exec", "command": ["sh", "-c", "exit 3"] },
            { "type": "exec", "command": ["touch", "after.marker"] }
        ]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let result =
        materializer.materialize("go", "basic", Some("foo"), base_dir.path(), today());
    assert!(matches!(result, Err(Error::StepFailed { .. })));

    // Files written before the step stay; later steps never ran.
    let root = base_dir.path().join("20240305-foo");
    assert!(root.join("main.go").is_file());
    assert!(!root.join("after.marker").exists());
}

#[test]
fn test_exec_step_with_no_tokens_is_an_error() {
    let (_set_dir, catalog_path, catalog) = template_set(
        &[("t/main.go", "main.go", "package main")],
        json!([ { "type": "exec", "command": [] } ]),
    );
    let store = TemplateStore::new(Some(&catalog_path));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let result =
        materializer.materialize("go", "basic", Some("foo"), base_dir.path(), today());
    assert!(matches!(result, Err(Error::EmptyCommand)));
}

#[test]
fn test_missing_template_source_aborts() {
    let (_set_dir, _catalog_path, catalog) =
        template_set(&[("t/a.txt", "a.txt", "a")], json!([]));
    // Point the store somewhere without the file bodies and without
    // bundled counterparts.
    let empty_dir = TempDir::new().unwrap();
    let store = TemplateStore::new(Some(&empty_dir.path().join("templates.json")));
    let engine = MiniJinjaRenderer::new();
    let profile = profile();
    let materializer = Materializer::new(&engine, &store, &catalog, &profile);
    let base_dir = TempDir::new().unwrap();

    let result =
        materializer.materialize("go", "basic", Some("foo"), base_dir.path(), today());
    assert!(matches!(result, Err(Error::ResourceNotFound { .. })));
}
