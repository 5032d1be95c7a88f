//! CLI conversion integration tests
//!
//! These tests run the compiled binary against model and document files on
//! disk, covering the export, import, and validate subcommands end to end.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use archex_core::{ids, Component, ComponentKind, Endpoint, EndpointKind, Link, System};

fn sample_system() -> System {
    let mut system = System::new("web-shop".to_string());

    let service = Component::new(
        ids::generate(),
        ComponentKind::Service,
        "Order Service".to_string(),
    );
    let service_id = service.id.clone();
    system.insert_component(service);

    let endpoint = Endpoint::new(
        ids::generate(),
        EndpointKind::External,
        "Http Api".to_string(),
    );
    let endpoint_id = endpoint.id.clone();
    system.insert_endpoint(endpoint);
    system
        .get_component_mut(&service_id)
        .unwrap()
        .add_endpoint_id(endpoint_id);

    system
}

fn write_model(temp_dir: &TempDir, system: &System) -> PathBuf {
    let path = temp_dir.path().join("model.json");
    fs::write(&path, serde_json::to_string_pretty(system).unwrap()).unwrap();
    path
}

#[test]
fn test_cli_export_writes_document() {
    // Scenario: export a model file into a service template document
    // When: `archex export model.json --output doc.yaml`
    // Then: the output file holds the versioned template with the node entries

    let temp_dir = TempDir::new().unwrap();
    let model_path = write_model(&temp_dir, &sample_system());
    let doc_path = temp_dir.path().join("doc.yaml");

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args([
            "export",
            model_path.to_str().unwrap(),
            "--output",
            doc_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Exported"), "Output should confirm export");

    let yaml = fs::read_to_string(&doc_path).unwrap();
    assert!(yaml.contains("tosca_definitions_version: tosca_simple_yaml_1_3"));
    assert!(yaml.contains("order_service"));
    assert!(yaml.contains("http_api"));
    assert!(yaml.contains("provides_external_endpoint"));
}

#[test]
fn test_cli_export_prints_to_stdout_without_output_flag() {
    let temp_dir = TempDir::new().unwrap();
    let model_path = write_model(&temp_dir, &sample_system());

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(["export", model_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tosca_definitions_version"));
    assert!(stdout.contains("order_service"));
}

#[test]
fn test_cli_import_writes_model() {
    // Scenario: import a service template document into a model file
    // When: `archex import doc.yaml --name shop --output model.json`
    // Then: the output file holds the reconstructed system as JSON

    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("doc.yaml");
    fs::write(
        &doc_path,
        r#"
tosca_definitions_version: tosca_simple_yaml_1_3
topology_template:
  node_templates:
    order_service:
      type: cna.qualityModel.entities.Service
      requirements:
        - provides_endpoint:
            node: http_api
            relationship:
              type: cna.qualityModel.relationships.Provides.Endpoint
    http_api:
      type: cna.qualityModel.entities.Endpoint
      capabilities:
        endpoint:
          type: tosca.capabilities.Endpoint
          properties:
            protocol: http
"#,
    )
    .unwrap();
    let model_path = temp_dir.path().join("model.json");

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args([
            "import",
            doc_path.to_str().unwrap(),
            "--name",
            "shop",
            "--output",
            model_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json = fs::read_to_string(&model_path).unwrap();
    let model: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(model["name"], "shop");
    assert_eq!(model["components"].as_object().unwrap().len(), 1);
    assert_eq!(model["endpoints"].as_object().unwrap().len(), 1);
}

#[test]
fn test_cli_import_rejects_malformed_document() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("empty.yaml");
    fs::write(&doc_path, "tosca_definitions_version: tosca_simple_yaml_1_3\n").unwrap();

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(["import", doc_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success(), "Import should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "Stderr: {}", stderr);
}

#[test]
fn test_cli_export_then_import_round_trips() {
    // Scenario: the exported document feeds straight back into import
    // When: `archex export` followed by `archex import` on its output
    // Then: the reconstructed model has the same entity counts

    let temp_dir = TempDir::new().unwrap();
    let model_path = write_model(&temp_dir, &sample_system());
    let doc_path = temp_dir.path().join("doc.yaml");
    let restored_path = temp_dir.path().join("restored.json");

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let export = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args([
            "export",
            model_path.to_str().unwrap(),
            "--output",
            doc_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute CLI");
    assert!(export.status.success());

    let import = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args([
            "import",
            doc_path.to_str().unwrap(),
            "--output",
            restored_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute CLI");
    assert!(
        import.status.success(),
        "Import should succeed. Stderr: {}",
        String::from_utf8_lossy(&import.stderr)
    );

    let json = fs::read_to_string(&restored_path).unwrap();
    let model: serde_json::Value = serde_json::from_str(&json).unwrap();
    // "doc.yaml" loses its extension on the way in
    assert_eq!(model["name"], "doc");
    assert_eq!(model["components"].as_object().unwrap().len(), 1);
    assert_eq!(model["endpoints"].as_object().unwrap().len(), 1);
}

#[test]
fn test_cli_validate_accepts_well_formed_model() {
    let temp_dir = TempDir::new().unwrap();
    let model_path = write_model(&temp_dir, &sample_system());

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(["validate", model_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "Validation should pass. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_cli_validate_rejects_dangling_reference() {
    // A link pointing at an endpoint that was never inserted
    let mut system = sample_system();
    let source_id = system.components().next().unwrap().id.clone();
    system.insert_link(Link::new(
        ids::generate(),
        source_id,
        "missing-endpoint".to_string(),
    ));

    let temp_dir = TempDir::new().unwrap();
    let model_path = write_model(&temp_dir, &system);

    let cli_bin = env!("CARGO_BIN_EXE_archex-cli");

    let output = Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .args(["validate", model_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success(), "Validation should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "Stderr: {}", stderr);
}
