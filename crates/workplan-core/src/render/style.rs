//! Stylesheet shared by the document and timeline views.
//!
//! The base rules are fixed; the status and priority rules are generated from
//! [`TaskStatus::style`] and [`TaskPriority::style`] so the colors can never
//! drift from the terminal output.

use std::fmt::Write;

use crate::models::{TaskPriority, TaskStatus};

const BASE_RULES: &str = "\
.wp-document{width:210mm;max-width:100%;margin:0 auto;padding:1.5rem 2rem;background:#fff;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;font-size:10pt;line-height:1.4;color:#1e293b;box-sizing:border-box}
.wp-header{border-bottom:2px solid #4f46e5;padding-bottom:.75rem;margin-bottom:.75rem}
.wp-header-row{display:flex;align-items:center;gap:.6rem;margin-bottom:.5rem}
.wp-logo{width:2.25rem;height:2.25rem;background:#4f46e5;border-radius:.4rem;display:flex;align-items:center;justify-content:center;color:#fff;flex-shrink:0}
.wp-title{font-size:1.2rem;font-weight:700;color:#0f172a;margin:0}
.wp-subtitle{color:#64748b;font-size:.75rem;margin:0}
.wp-meta{display:flex;flex-wrap:wrap;gap:.75rem}
.wp-meta-item{display:flex;align-items:center;gap:.35rem;color:#334155;font-size:.8rem}
.wp-section{margin-bottom:.85rem}
.wp-section-head{font-size:.9rem;font-weight:600;color:#1e293b;margin:0 0 .3rem}
.wp-section-text{color:#334155;line-height:1.5;font-size:.82rem;margin:0;white-space:pre-line}
.wp-entities{margin-bottom:.85rem;padding:.65rem .85rem;background:#f8fafc;border-radius:.4rem;border:1px solid #e2e8f0}
.wp-entities-head{font-weight:600;font-size:.85rem;color:#1e293b;margin:0 0 .5rem}
.wp-entity-grid{display:flex;gap:1.5rem;flex-wrap:wrap}
.wp-entity{flex:1;min-width:180px}
.wp-entity-label{font-weight:600;font-size:.65rem;text-transform:uppercase;color:#4f46e5;margin:0 0 .3rem;letter-spacing:.05em}
.wp-entity-name{font-weight:700;color:#0f172a;font-size:.85rem;margin:0 0 .15rem}
.wp-entity-row{color:#475569;font-size:.75rem;margin:0 0 .1rem}
.wp-divider{width:1px;background:#e2e8f0;align-self:stretch}
.wp-tasks{display:flex;flex-direction:column;gap:.5rem}
.wp-task{border:1px solid #e2e8f0;border-radius:.4rem;padding:.6rem .75rem;display:flex;align-items:flex-start;gap:.6rem}
.wp-task-num{flex-shrink:0;width:1.5rem;height:1.5rem;background:#e0e7ff;border-radius:9999px;display:flex;align-items:center;justify-content:center;color:#4338ca;font-weight:600;font-size:.7rem}
.wp-task-body{flex:1;min-width:0}
.wp-task-top{display:flex;align-items:flex-start;justify-content:space-between;gap:.4rem;margin-bottom:.25rem;flex-wrap:wrap}
.wp-task-title{font-weight:600;color:#1e293b;margin:0;font-size:.85rem}
.wp-task-desc{color:#475569;font-size:.78rem;margin:0 0 .4rem;line-height:1.6;padding-bottom:.15rem}
.wp-task-meta{display:flex;flex-wrap:wrap;align-items:center;gap:.6rem;font-size:.75rem;color:#475569}
.wp-badges{display:flex;flex-wrap:wrap;gap:.3rem}
.wp-badge{display:inline-flex;align-items:center;gap:.2rem;padding:.15rem .4rem;border-radius:.2rem;font-size:.68rem;font-weight:500;border:1px solid #e2e8f0;background:#f1f5f9;color:#334155}
.wp-badge-dates{background:#eef2ff;color:#4338ca;border-color:#e0e7ff}
.wp-empty{color:#64748b;font-style:italic;font-size:.82rem}
.wp-footer{margin-top:1.5rem;padding-top:.75rem;border-top:1px solid #e2e8f0;text-align:center;color:#94a3b8;font-size:.72rem}
.wp-timeline{background:#fff;padding:2rem;max-width:794px;margin:0 auto;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;color:#1e293b;box-sizing:border-box}
.wp-timeline-heading{font-size:1.5rem;font-weight:700;color:#1e293b;margin:0 0 1.5rem;text-align:center}
.wp-timeline-empty{text-align:center;padding:3rem 0;color:#64748b}
.wp-timeline-track{position:relative}
.wp-spine{position:absolute;left:50%;top:0;bottom:0;width:2px;background:#818cf8;transform:translateX(-50%)}
.wp-timeline-items>*+*{margin-top:1.5rem}
.wp-timeline-item{position:relative;display:flex;align-items:flex-start;gap:2rem}
.wp-side-right{flex-direction:row-reverse}
.wp-dot{position:absolute;left:50%;transform:translateX(-50%);z-index:10;width:2.5rem;height:2.5rem;border-radius:9999px;border:4px solid #fff;box-shadow:0 1px 3px rgba(0,0,0,.1);display:flex;align-items:center;justify-content:center;color:#fff;font-weight:700;box-sizing:border-box}
.wp-timeline-card-wrap{width:calc(50% - 2rem)}
.wp-side-left .wp-timeline-card-wrap{padding-right:2rem;text-align:right}
.wp-side-left .wp-badges{justify-content:flex-end}
.wp-side-right .wp-timeline-card-wrap{padding-left:2rem;text-align:left}
.wp-timeline-card{background:#fff;border-radius:.75rem;box-shadow:0 1px 3px rgba(0,0,0,.1);padding:1rem;border:1px solid #f1f5f9}
.wp-timeline-spacer{width:calc(50% - 2rem)}
";

/// CSS class carrying a status color.
pub fn status_class(status: TaskStatus) -> String {
    format!("wp-status-{}", status.as_str())
}

/// CSS class carrying a status color as a solid background (timeline dots).
pub fn dot_class(status: TaskStatus) -> String {
    format!("wp-dot-{}", status.as_str())
}

/// CSS class carrying a priority color.
pub fn priority_class(priority: TaskPriority) -> String {
    format!("wp-priority-{}", priority.as_str())
}

/// The complete stylesheet for both views.
pub fn stylesheet() -> String {
    let mut css = String::from(BASE_RULES);
    for status in TaskStatus::ALL {
        let style = status.style();
        let _ = writeln!(
            css,
            ".{}{{color:{};background:{};border-color:{}}}",
            status_class(status),
            style.color,
            style.background,
            style.border
        );
        let _ = writeln!(css, ".{}{{background:{}}}", dot_class(status), style.color);
    }
    for priority in [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low] {
        let style = priority.style();
        let _ = writeln!(
            css,
            ".{}{{color:{};background:{};border-color:{}}}",
            priority_class(priority),
            style.color,
            style.background,
            style.border
        );
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_is_deterministic_and_complete() {
        let css = stylesheet();
        assert_eq!(css, stylesheet());
        assert!(css.contains(".wp-status-completada{color:#10b981"));
        assert!(css.contains(".wp-dot-en-progreso{background:#3b82f6}"));
        assert!(css.contains(".wp-priority-alta{color:#b91c1c"));
        assert!(css.contains(".wp-priority-baja{"));
    }
}
