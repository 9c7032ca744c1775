use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary data directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and an isolated data
/// directory
fn wp_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.arg("--no-color")
        .arg("--data-dir")
        .arg(data_dir)
        .current_dir(data_dir);
    cmd
}

/// Pulls the first "- ID: `...`" value out of command output.
fn extract_id(output: &[u8]) -> String {
    let text = String::from_utf8_lossy(output);
    let start = text.find("- ID: `").expect("output has an ID line") + "- ID: `".len();
    let end = text[start..].find('`').expect("ID is closed") + start;
    text[start..end].to_string()
}

#[test]
fn test_cli_default_shows_empty_plan() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Plan de Trabajo"))
        .stdout(predicate::str::contains("No hay tareas."));
}

#[test]
fn test_cli_set_plan_metadata() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args([
            "plan",
            "set",
            "--title",
            "Migración",
            "--author",
            "Ana",
            "--start",
            "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan actualizado"));

    wp_cmd(temp_dir.path())
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Migración"))
        .stdout(predicate::str::contains("- Autor: Ana"))
        .stdout(predicate::str::contains("01 mar 2024"));
}

#[test]
fn test_cli_rejects_malformed_date() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["task", "add", "Kick-off", "--start", "01/03/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_cli_task_lifecycle() {
    let temp_dir = create_cli_test_environment();

    let output = wp_cmd(temp_dir.path())
        .args([
            "task",
            "add",
            "Kick-off",
            "--start",
            "2024-03-05",
            "--end",
            "2024-03-09",
            "--owner",
            "Ana",
            "--priority",
            "high",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Kick-off (○ Pendiente)"))
        .stdout(predicate::str::contains("(5 días)"))
        .get_output()
        .stdout
        .clone();
    let id = extract_id(&output);

    wp_cmd(temp_dir.path())
        .args(["task", "update", &id, "--status", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("➤ En Progreso"))
        .stdout(predicate::str::contains("- Responsable: Ana"));

    wp_cmd(temp_dir.path())
        .args(["task", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay tareas."));

    wp_cmd(temp_dir.path())
        .args(["task", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tarea eliminada"));

    wp_cmd(temp_dir.path())
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay tareas."));
}

#[test]
fn test_cli_unknown_task_fails() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["task", "update", "nope", "--title", "X"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Tarea no encontrada"));

    wp_cmd(temp_dir.path())
        .args(["task", "delete", "nope"])
        .assert()
        .failure();
}

#[test]
fn test_cli_entity_update_merges_fields() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["entity", "origin", "--name", "Acme", "--tax-id", "76.123.456-7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Acme**"));

    wp_cmd(temp_dir.path())
        .args(["entity", "origin", "--email", "hola@acme.cl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Acme**"))
        .stdout(predicate::str::contains("- RUT: 76.123.456-7"))
        .stdout(predicate::str::contains("- Email: hola@acme.cl"));
}

#[test]
fn test_cli_save_list_and_load() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["plan", "set", "--title", "Primero"])
        .assert()
        .success();
    let output = wp_cmd(temp_dir.path())
        .args(["plan", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let first_id = extract_id(&output);

    wp_cmd(temp_dir.path())
        .args(["plan", "save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan guardado"));

    wp_cmd(temp_dir.path())
        .args(["plan", "new"])
        .assert()
        .success();
    wp_cmd(temp_dir.path())
        .args(["plan", "saved"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("## Primero (ID: {first_id})")));

    wp_cmd(temp_dir.path())
        .args(["plan", "load", &first_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan cargado"));
    wp_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Primero"));
}

#[test]
fn test_cli_load_unknown_plan_fails() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["plan", "load", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Plan no encontrado"));
}

#[test]
fn test_cli_saved_empty() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["plan", "saved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay planes guardados."));
}

#[test]
fn test_cli_example_and_timeline() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(temp_dir.path())
        .args(["plan", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Desarrollo de Aplicación Web"));

    wp_cmd(temp_dir.path())
        .arg("timeline")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Línea de Tiempo"))
        .stdout(predicate::str::contains("días)_"));
}

#[test]
fn test_cli_render_document_to_stdout() {
    let temp_dir = create_cli_test_environment();
    wp_cmd(temp_dir.path())
        .args(["plan", "example"])
        .assert()
        .success();

    wp_cmd(temp_dir.path())
        .args(["render", "document"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("id=\"plan-preview-content\""))
        .stdout(predicate::str::contains("Tech Solutions SpA"));
}

#[test]
fn test_cli_render_timeline_to_file() {
    let temp_dir = create_cli_test_environment();
    let output = temp_dir.path().join("timeline.html");

    wp_cmd(temp_dir.path())
        .args(["render", "timeline", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML generado"));

    let html = std::fs::read_to_string(&output).expect("timeline written");
    assert!(html.contains("id=\"plan-timeline-content\""));
    assert!(html.contains("Agrega tareas para ver la línea de tiempo"));
}

#[test]
fn test_cli_export_print_writes_page() {
    let temp_dir = create_cli_test_environment();
    wp_cmd(temp_dir.path())
        .args(["plan", "example"])
        .assert()
        .success();

    wp_cmd(temp_dir.path())
        .args(["export", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Documento de impresión listo"));

    let page = std::fs::read_to_string(temp_dir.path().join("Desarrollo_de_Aplicaci_n_Web.html"))
        .expect("print page written");
    assert!(page.contains("window.print()"));
    assert!(page.contains("plan-timeline-content"));
}

#[test]
fn test_cli_export_empty_plan_is_refused() {
    let temp_dir = create_cli_test_environment();

    for format in ["pdf", "print"] {
        wp_cmd(temp_dir.path())
            .args(["export", format])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Plan vacío"));
    }

    let written = std::fs::read_dir(temp_dir.path())
        .expect("data dir readable")
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == "pdf" || ext == "html")
        });
    assert!(!written);
}

#[test]
fn test_cli_export_print_without_timeline() {
    let temp_dir = create_cli_test_environment();
    let output = temp_dir.path().join("print.html");
    wp_cmd(temp_dir.path())
        .args(["task", "add", "Kick-off"])
        .assert()
        .success();

    wp_cmd(temp_dir.path())
        .args(["export", "print", "--no-timeline", "-o"])
        .arg(&output)
        .assert()
        .success();

    let page = std::fs::read_to_string(&output).expect("print page written");
    assert!(page.contains("plan-preview-content"));
    assert!(!page.contains("plan-timeline-content"));
}

#[test]
fn test_cli_export_pdf_reports_capture_failure() {
    let temp_dir = create_cli_test_environment();
    wp_cmd(temp_dir.path())
        .args(["plan", "set", "--title", "Migración"])
        .assert()
        .success();

    wp_cmd(temp_dir.path())
        .args([
            "export",
            "pdf",
            "--capture-command",
            "workplan-missing-rasterizer --format bmp",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error al generar PDF"));

    let written = std::fs::read_dir(temp_dir.path())
        .expect("data dir readable")
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "pdf"));
    assert!(!written);
}
