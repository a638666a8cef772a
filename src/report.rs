//! Sorting and rendering of the normalized issue set.

use std::fmt::Write;

use crate::output::{display_summary, escape_html, truncate};
use crate::types::Issue;

const KEY_WIDTH: usize = 12;
const SUMMARY_WIDTH: usize = 150;
const STATUS_WIDTH: usize = 20;
const PARENT_WIDTH: usize = 12;
const RESOLVED_WIDTH: usize = 16;

const HEADERS: [&str; 5] = ["KEY", "SUMMARY", "STATUS", "PARENT", "RESOLVED"];

const UNKNOWN_STATUS: &str = "Unknown";

/// Ordering applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Parent, then status, then key.
    ByParent,
    /// Status, then key.
    ByStatus,
}

/// Report encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Tabs,
    Docs,
    Slides,
}

impl ReportFormat {
    pub fn sort_mode(self) -> SortMode {
        match self {
            ReportFormat::Slides => SortMode::ByStatus,
            ReportFormat::Table | ReportFormat::Tabs | ReportFormat::Docs => SortMode::ByParent,
        }
    }
}

/// Status outline in both its plain and HTML forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub plain: String,
    pub html: String,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.html.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Outline(Outline),
}

/// Sort `issues` for `format` and render them.
pub fn render(issues: &mut [Issue], format: ReportFormat) -> Rendered {
    sort_issues(issues, format.sort_mode());
    match format {
        ReportFormat::Table => Rendered::Text(render_table(issues)),
        ReportFormat::Tabs => Rendered::Text(render_tabs(issues)),
        ReportFormat::Docs => Rendered::Text(render_docs_html(issues)),
        ReportFormat::Slides => Rendered::Outline(render_outline(issues)),
    }
}

/// Stable, case-insensitive sort.
pub fn sort_issues(issues: &mut [Issue], mode: SortMode) {
    match mode {
        SortMode::ByParent => issues.sort_by_cached_key(|issue| {
            (
                fold(&issue.parent),
                fold(&issue.status),
                fold(&issue.key),
            )
        }),
        SortMode::ByStatus => {
            issues.sort_by_cached_key(|issue| (fold(&issue.status), fold(&issue.key)))
        }
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Fixed-width table with a header row. Every line ends with a newline.
pub fn render_table(issues: &[Issue]) -> String {
    let mut out = String::new();
    push_table_row(&mut out, HEADERS);

    for issue in issues {
        let parent = issue.parent.trim();
        let summary = display_summary(&issue.summary, parent, SUMMARY_WIDTH);
        let parent_col = truncate(parent, PARENT_WIDTH);
        push_table_row(
            &mut out,
            [&issue.key, &summary, &issue.status, &parent_col, &issue.resolved],
        );
    }

    out
}

fn push_table_row(out: &mut String, cells: [&str; 5]) {
    let [key, summary, status, parent, resolved] = cells;
    let _ = writeln!(
        out,
        "{key:<kw$} {summary:<sw$} {status:<tw$} {parent:<pw$} {resolved:<rw$}",
        kw = KEY_WIDTH,
        sw = SUMMARY_WIDTH,
        tw = STATUS_WIDTH,
        pw = PARENT_WIDTH,
        rw = RESOLVED_WIDTH,
    );
}

/// Tab-separated rows with a header.
pub fn render_tabs(issues: &[Issue]) -> String {
    let mut out = HEADERS.join("\t");
    out.push('\n');

    for issue in issues {
        let parent = issue.parent.trim();
        let summary = display_summary(&issue.summary, parent, SUMMARY_WIDTH);
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            issue.key, summary, issue.status, parent, issue.resolved
        );
    }

    out
}

/// HTML table suitable for pasting into a document editor.
pub fn render_docs_html(issues: &[Issue]) -> String {
    let mut out = String::from("<table border=\"1\" cellspacing=\"0\" cellpadding=\"4\">\n");
    out.push_str("  <tr>");
    for header in HEADERS {
        let _ = write!(out, "<td>{header}</td>");
    }
    out.push_str("</tr>\n");

    for issue in issues {
        let summary = display_summary(&issue.summary, &issue.parent, SUMMARY_WIDTH);
        out.push_str("  <tr><td>");
        push_key_link(&mut out, &issue.key, &issue.url);
        let _ = writeln!(
            out,
            "</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&summary),
            escape_html(&issue.status),
            escape_html(issue.parent.trim()),
            escape_html(&issue.resolved),
        );
    }

    out.push_str("</table>");
    out
}

/// Issues grouped into consecutive runs by status, as a plain bullet list and
/// as HTML headings with linked list items. Empty input gives empty output.
pub fn render_outline(issues: &[Issue]) -> Outline {
    if issues.is_empty() {
        return Outline::default();
    }

    let mut plain = String::new();
    let mut html = String::from("<html><body>\n");
    let mut current: Option<&str> = None;

    for issue in issues {
        let status = match issue.status.trim() {
            "" => UNKNOWN_STATUS,
            s => s,
        };

        if current != Some(status) {
            if current.is_some() {
                html.push_str("</ul>\n");
                plain.push('\n');
            }
            current = Some(status);

            if !plain.is_empty() {
                plain.push('\n');
            }
            plain.push_str(status);
            plain.push('\n');

            let _ = write!(html, "<h2>{}</h2>\n<ul>\n", escape_html(status));
        }

        let key = issue.key.trim();
        let summary = display_summary(issue.summary.trim(), &issue.parent, SUMMARY_WIDTH);

        plain.push_str("- ");
        plain.push_str(key);
        if !summary.is_empty() {
            plain.push_str(": ");
            plain.push_str(&summary);
        }
        plain.push('\n');

        html.push_str("  <li>");
        push_key_link(&mut html, key, &issue.url);
        if !summary.is_empty() {
            html.push_str(": ");
            html.push_str(&escape_html(&summary));
        }
        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n</body></html>");

    Outline {
        plain: plain.trim_end_matches('\n').to_string(),
        html,
    }
}

fn push_key_link(out: &mut String, key: &str, url: &str) {
    let url = url.trim();
    if url.is_empty() {
        out.push_str(&escape_html(key));
    } else {
        let _ = write!(
            out,
            "<a href=\"{}\">{}</a>",
            escape_html(url),
            escape_html(key)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn issue(key: &str, status: &str, parent: &str) -> Issue {
        Issue {
            key: key.to_string(),
            summary: format!("Summary of {key}"),
            status: status.to_string(),
            parent: parent.to_string(),
            resolved: String::new(),
            url: if key.is_empty() {
                String::new()
            } else {
                format!("https://jira.example/browse/{key}")
            },
        }
    }

    fn keys(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_by_parent_empty_parent_first() {
        let mut issues = vec![issue("B-2", "Done", ""), issue("A-1", "Done", "P-1")];
        sort_issues(&mut issues, SortMode::ByParent);
        assert_eq!(keys(&issues), vec!["B-2", "A-1"]);
    }

    #[test]
    fn test_by_parent_ties_break_on_status_then_key() {
        let mut issues = vec![
            issue("abc-3", "open", "P-1"),
            issue("ABC-2", "Done", "p-1"),
            issue("ABC-1", "Open", "P-1"),
        ];
        sort_issues(&mut issues, SortMode::ByParent);
        assert_eq!(keys(&issues), vec!["ABC-2", "ABC-1", "abc-3"]);
    }

    #[test]
    fn test_by_status_ignores_parent() {
        let mut issues = vec![
            issue("C-1", "To Do", ""),
            issue("B-1", "done", "Z-9"),
            issue("A-1", "Done", ""),
        ];
        sort_issues(&mut issues, SortMode::ByStatus);
        assert_eq!(keys(&issues), vec!["A-1", "B-1", "C-1"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut first = issue("K-1", "Done", "");
        first.summary = "first".to_string();
        let mut second = issue("k-1", "done", "");
        second.summary = "second".to_string();
        let mut issues = vec![first, second];
        sort_issues(&mut issues, SortMode::ByStatus);
        assert_eq!(issues[0].summary, "first");
        assert_eq!(issues[1].summary, "second");
    }

    #[test]
    fn test_empty_renderings() {
        let header_line = format!(
            "{:<12} {:<150} {:<20} {:<12} {:<16}\n",
            "KEY", "SUMMARY", "STATUS", "PARENT", "RESOLVED"
        );
        assert_eq!(render_table(&[]), header_line);
        assert_eq!(render_tabs(&[]), "KEY\tSUMMARY\tSTATUS\tPARENT\tRESOLVED\n");
        assert_eq!(
            render_docs_html(&[]),
            "<table border=\"1\" cellspacing=\"0\" cellpadding=\"4\">\n  <tr><td>KEY</td><td>SUMMARY</td><td>STATUS</td><td>PARENT</td><td>RESOLVED</td></tr>\n</table>"
        );
        assert!(render_outline(&[]).is_empty());
    }

    #[test]
    fn test_table_row_layout() {
        let mut item = issue("ABC-1", "Done", "PARENT-1");
        item.summary = "Fix bug".to_string();
        item.resolved = "2024-01-15 10:30".to_string();
        let table = render_table(&[item]);
        let row = table.lines().nth(1).unwrap();

        let expected = format!(
            "{:<12} {:<150} {:<20} {:<12} {:<16}",
            "ABC-1", "PARENT-1 / Fix bug", "Done", "PARENT-1", "2024-01-15 10:30"
        );
        assert_eq!(row, expected);
        assert_eq!(row.len(), 12 + 1 + 150 + 1 + 20 + 1 + 12 + 1 + 16);
    }

    #[test]
    fn test_table_long_parent_column_is_truncated() {
        let item = issue("ABC-1", "Done", "VERYLONGPARENT-12345");
        let table = render_table(&[item]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains(" VERYLONGP... "));
    }

    #[test]
    fn test_tabs_row() {
        let mut item = issue("ABC-1", "Done", " PARENT-1 ");
        item.summary = "Fix bug".to_string();
        let tabs = render_tabs(&[item]);
        assert_eq!(
            tabs.lines().nth(1).unwrap(),
            "ABC-1\tPARENT-1 / Fix bug\tDone\tPARENT-1\t"
        );
    }

    #[test]
    fn test_docs_links_and_escapes() {
        let mut linked = issue("ABC-1", "Done", "");
        linked.summary = "a < b & c".to_string();
        let unlinked = issue("", "Done", "");
        let html = render_docs_html(&[linked, unlinked]);

        assert!(html.contains(
            "<tr><td><a href=\"https://jira.example/browse/ABC-1\">ABC-1</a></td><td>a &lt; b &amp; c</td>"
        ));
        assert!(html.contains("  <tr><td></td><td>Summary of </td>"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn test_outline_groups_by_status() {
        let mut issues = vec![
            issue("B-1", "Done", ""),
            issue("A-1", "", ""),
            issue("A-2", "Done", "P-1"),
        ];
        let rendered = render(&mut issues, ReportFormat::Slides);
        let outline = match rendered {
            Rendered::Outline(outline) => outline,
            other => panic!("unexpected rendering: {other:?}"),
        };

        assert_eq!(
            outline.plain,
            "Unknown\n- A-1: Summary of A-1\n\n\nDone\n- A-2: P-1 / Summary of A-2\n- B-1: Summary of B-1"
        );
        assert!(outline.html.starts_with("<html><body>\n<h2>Unknown</h2>\n<ul>\n"));
        assert!(outline.html.contains(
            "</ul>\n<h2>Done</h2>\n<ul>\n  <li><a href=\"https://jira.example/browse/A-2\">A-2</a>: P-1 / Summary of A-2</li>\n"
        ));
        assert!(outline.html.ends_with("</ul>\n</body></html>"));
    }

    #[test]
    fn test_outline_omits_empty_summary() {
        let mut item = issue("X-1", "Open", "");
        item.summary = String::new();
        item.url = String::new();
        let outline = render_outline(&[item]);
        assert_eq!(outline.plain, "Open\n- X-1");
        assert!(outline.html.contains("  <li>X-1</li>\n"));
    }

    #[test]
    fn test_format_selects_sort_mode() {
        let mut issues = vec![issue("B-1", "A", ""), issue("A-1", "B", "P")];
        let rendered = render(&mut issues, ReportFormat::Tabs);
        assert!(matches!(rendered, Rendered::Text(_)));
        assert_eq!(keys(&issues), vec!["B-1", "A-1"]);

        render(&mut issues, ReportFormat::Slides);
        assert_eq!(keys(&issues), vec!["B-1", "A-1"]);
        assert_eq!(ReportFormat::Docs.sort_mode(), SortMode::ByParent);
    }

    #[test]
    fn test_only_slides_renders_an_outline() {
        for format in [ReportFormat::Table, ReportFormat::Tabs, ReportFormat::Docs] {
            let mut issues = vec![issue("A-1", "Open", "")];
            assert!(matches!(render(&mut issues, format), Rendered::Text(_)));
        }
        let mut issues = vec![issue("A-1", "Open", "")];
        assert!(matches!(
            render(&mut issues, ReportFormat::Slides),
            Rendered::Outline(_)
        ));
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(
            rows in proptest::collection::vec(("[A-Ca-c]-[0-9]", "(Done|done|Open)?", "(P-1|p-1|Q-2)?"), 0..20)
        ) {
            for mode in [SortMode::ByParent, SortMode::ByStatus] {
                let mut issues: Vec<Issue> = rows
                    .iter()
                    .map(|(k, s, p)| issue(k, s, p))
                    .collect();
                sort_issues(&mut issues, mode);
                let once = issues.clone();
                sort_issues(&mut issues, mode);
                prop_assert_eq!(once, issues);
            }
        }
    }
}
