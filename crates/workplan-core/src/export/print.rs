//! The standalone print document.

use crate::render::{Escaped, stylesheet};

const DEFAULT_TITLE: &str = "Plan de Trabajo";

const PAGE_RULES: &str = "\
@page{size:A4;margin:12mm}
*{box-sizing:border-box;-webkit-print-color-adjust:exact;print-color-adjust:exact}
html,body{margin:0;padding:0;background:#fff}
.wp-print-section{width:100%}
.wp-page-break{page-break-before:always;break-before:page}
.wp-document,.wp-timeline{width:100%;max-width:none;padding:0}
.wp-task,.wp-timeline-item,.wp-entities{page-break-inside:avoid;break-inside:avoid}
@media print{.wp-timeline-card{box-shadow:none}}
";

/// Delay before the print dialog is triggered, in milliseconds.
const PRINT_DELAY_MS: u32 = 500;

/// Delay between triggering print and closing the context, in milliseconds.
const CLOSE_DELAY_MS: u32 = 800;

/// Stylesheet of the print document: page setup plus the view styles.
pub fn print_stylesheet() -> String {
    format!("{PAGE_RULES}{}", stylesheet())
}

/// Builds a self-contained HTML page that prints itself once loaded.
///
/// `timeline_markup`, when given, starts on a new page after the document.
pub fn print_document(title: &str, document_markup: &str, timeline_markup: Option<&str>) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };

    let mut html = String::with_capacity(document_markup.len() + 16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", Escaped(title)));
    html.push_str("<style>\n");
    html.push_str(&print_stylesheet());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<div class=\"wp-print-section\">\n");
    html.push_str(document_markup);
    html.push_str("</div>\n");

    if let Some(timeline) = timeline_markup {
        html.push_str("<div class=\"wp-print-section wp-page-break\">\n");
        html.push_str(timeline);
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        "<script>\nwindow.onload=function(){{setTimeout(function(){{window.print();\
         setTimeout(function(){{window.close();}},{CLOSE_DELAY_MS});}},{PRINT_DELAY_MS});}};\n</script>\n"
    ));
    html.push_str("</body>\n</html>\n");
    html
}
