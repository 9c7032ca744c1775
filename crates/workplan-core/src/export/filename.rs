//! Artifact file naming.

/// Stem used when the plan has no title.
pub const FALLBACK_FILE_STEM: &str = "plan-de-trabajo";

/// File name for an exported plan: every character of the title (or of the
/// fallback stem when untitled) that is not an ASCII letter or digit becomes
/// `_`, then `.pdf` is appended.
pub fn export_file_name(title: &str) -> String {
    let source = if title.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        title
    };
    let stem: String = source
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.pdf")
}
