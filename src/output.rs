use colored::Colorize;

/// Truncate to `max` characters, ending in `...` when shortened.
///
/// Widths of 3 or less are cut hard without an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let head: String = s.chars().take(max - 3).collect();
    format!("{head}...")
}

/// Summary as shown in reports: `PARENT / SUMMARY` when a parent exists.
pub fn display_summary(summary: &str, parent: &str, width: usize) -> String {
    let summary = truncate(summary, width);
    let parent = parent.trim();
    if parent.is_empty() {
        summary
    } else {
        truncate(&format!("{parent} / {summary}"), width)
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    html_escape::encode_quoted_attribute(s).into_owned()
}

/// Print a hint line to stderr.
pub fn hint(message: &str) {
    eprintln!("{} {message}", "Hint:".cyan());
}

/// Print a warning line to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {message}", "Warning:".yellow().bold());
}

/// Print a status line to stderr.
pub fn notice(message: &str) {
    eprintln!("{}", message.green());
}
