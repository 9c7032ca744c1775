//! Tests for the render module.

use super::*;
use crate::models::{Entity, NewTask, Plan, Task, TaskStatus};

fn task(id: &str, start: &str, end: &str) -> Task {
    Task::from_new(id.to_string(), NewTask::titled(format!("Task {id}")).with_dates(start, end))
}

fn plan_with(tasks: Vec<Task>) -> Plan {
    Plan {
        id: "plan00001".to_string(),
        created_on: "2024-01-01".to_string(),
        tasks,
        ..Default::default()
    }
}

/// Positions of `data-task-id` attributes in rendered markup, in order.
fn rendered_ids(markup: &str) -> Vec<String> {
    markup
        .split("data-task-id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_sort_by_start_orders_and_keeps_ties_stable() {
    let tasks = vec![
        task("c", "2024-03-01", ""),
        task("a1", "2024-01-01", ""),
        task("b", "2024-02-01", ""),
        task("a2", "2024-01-01", ""),
    ];

    let ids: Vec<_> = sort_by_start(&tasks).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "b", "c"]);
}

#[test]
fn test_sort_by_start_puts_undated_last() {
    let tasks = vec![
        task("none", "", ""),
        task("late", "2024-05-01", ""),
        task("bad", "someday", ""),
        task("early", "2024-01-01", ""),
    ];

    let ids: Vec<_> = sort_by_start(&tasks).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late", "none", "bad"]);
}

#[test]
fn test_rendering_does_not_mutate_plan() {
    let plan = plan_with(vec![task("b", "2024-02-01", ""), task("a", "2024-01-01", "")]);
    let before = plan.clone();

    let _ = DocumentView(&plan).to_string();
    let _ = TimelineView(&plan).to_string();

    assert_eq!(plan, before);
}

#[test]
fn test_document_lists_tasks_by_start_date() {
    let plan = plan_with(vec![
        task("b", "2024-02-01", "2024-02-02"),
        task("a", "2024-01-01", "2024-01-02"),
    ]);

    let markup = DocumentView(&plan).to_string();
    assert_eq!(rendered_ids(&markup), vec!["a", "b"]);
    assert!(markup.contains("<div class=\"wp-task-num\">1</div>"));
    assert!(markup.contains(&format!("id=\"{DOCUMENT_REGION_ID}\"")));
}

#[test]
fn test_document_suppresses_empty_blocks() {
    let plan = plan_with(Vec::new());
    let markup = DocumentView(&plan).to_string();

    assert!(markup.contains(">Plan de Trabajo</h1>"));
    assert!(markup.contains("Creado el 01 ene 2024"));
    assert!(markup.contains("No hay tareas definidas"));
    assert!(markup.contains("0 tareas"));
    assert!(!markup.contains("Partes Involucradas"));
    assert!(!markup.contains("Descripción"));
    assert!(!markup.contains("Objetivos"));
}

#[test]
fn test_document_entity_panel() {
    let mut plan = plan_with(vec![task("a", "", "")]);
    plan.origin = Entity {
        name: "Acme & Co".to_string(),
        tax_id: "76.123.456-7".to_string(),
        ..Default::default()
    };

    let markup = DocumentView(&plan).to_string();
    assert!(markup.contains("Partes Involucradas"));
    assert!(markup.contains("Empresa Emisora"));
    assert!(markup.contains("Acme &amp; Co"));
    assert!(markup.contains("RUT: 76.123.456-7"));
    assert!(!markup.contains("Empresa Destinataria"));
    assert!(!markup.contains("wp-divider"));
    assert!(!markup.contains("Contacto:"));
    assert!(markup.contains("1 tarea<"));

    plan.destination.name = "Globex".to_string();
    let markup = DocumentView(&plan).to_string();
    assert!(markup.contains("Empresa Destinataria"));
    assert!(markup.contains("wp-divider"));
}

#[test]
fn test_document_escapes_user_text() {
    let mut plan = plan_with(vec![task("a", "", "")]);
    plan.title = "<script>alert(1)</script>".to_string();
    plan.description = "Fase \"uno\"".to_string();

    let markup = DocumentView(&plan).to_string();
    assert!(!markup.contains("<script>"));
    assert!(markup.contains("&lt;script&gt;"));
    assert!(markup.contains("Fase &quot;uno&quot;"));
}

#[test]
fn test_timeline_duration_badges() {
    let plan = plan_with(vec![
        task("one", "2024-01-01", "2024-01-01"),
        task("five", "2024-01-01", "2024-01-05"),
        task("open", "2024-01-01", ""),
        task("inverted", "2024-01-05", "2024-01-01"),
    ]);

    let markup = TimelineView(&plan).to_string();
    assert!(markup.contains("⏱ 1 día<"));
    assert!(markup.contains("⏱ 5 días<"));
    assert_eq!(markup.matches("wp-badge-duration").count(), 2);
    assert_eq!(task_duration("2024-01-01", ""), 0);
    assert_eq!(task_duration("2024-01-05", "2024-01-01"), 0);
}

#[test]
fn test_timeline_alternates_sides_in_start_order() {
    let plan = plan_with(vec![
        task("third", "2024-03-01", ""),
        task("first", "2024-01-01", ""),
        task("second", "2024-02-01", ""),
    ]);

    let markup = TimelineView(&plan).to_string();
    assert_eq!(rendered_ids(&markup), vec!["first", "second", "third"]);

    let sides: Vec<_> = markup
        .split("wp-timeline-item wp-side-")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert_eq!(sides, vec!["left", "right", "left"]);
    assert!(markup.contains("Línea de Tiempo"));
    assert!(markup.contains("wp-spine"));
}

#[test]
fn test_timeline_status_dot_and_owner() {
    let mut done = task("done", "2024-01-01", "2024-01-02");
    done.status = TaskStatus::Completed;
    done.owner = "Ana".to_string();
    let plan = plan_with(vec![done, task("todo", "2024-01-03", "")]);

    let markup = TimelineView(&plan).to_string();
    assert!(markup.contains("wp-dot wp-dot-completada"));
    assert!(markup.contains("wp-dot wp-dot-pendiente"));
    assert!(markup.contains("👤 Ana"));
    assert_eq!(markup.matches("wp-badge-owner").count(), 1);
}

#[test]
fn test_timeline_empty_state() {
    let markup = TimelineView(&plan_with(Vec::new())).to_string();
    assert!(markup.contains("Sin tareas"));
    assert!(markup.contains("Agrega tareas para ver la línea de tiempo"));
    assert!(!markup.contains("wp-spine"));
    assert!(markup.contains(&format!("id=\"{TIMELINE_REGION_ID}\"")));
}

#[test]
fn test_standalone_page_inlines_stylesheet() {
    let page = standalone_page("Q1 <Plan>", "<p>body</p>");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Q1 &lt;Plan&gt;</title>"));
    assert!(page.contains(".wp-document{"));
    assert!(page.contains("<p>body</p>"));
}
