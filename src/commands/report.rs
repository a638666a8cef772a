use std::io::{self, IsTerminal, Write};

use tokio_util::sync::CancellationToken;

use crate::client::JiraClient;
use crate::error::Result;
use crate::export::{copy_to_clipboard, html_to_rtf, ClipboardKind};
use crate::filters::resolve;
use crate::issues::fetch_by_filter;
use crate::output::{hint, notice, warn};
use crate::report::{render, Outline, ReportFormat, Rendered};

/// Resolve `identifier`, fetch its issues and deliver the report in `format`.
pub async fn run(
    client: &JiraClient,
    identifier: &str,
    format: ReportFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let filter = resolve(client, identifier, cancel).await?;
    let mut issues = fetch_by_filter(client, &filter, cancel).await?;

    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    let terminal = io::stdout().is_terminal();
    match render(&mut issues, format) {
        Rendered::Text(text) => match format {
            ReportFormat::Docs => deliver_docs(&text, terminal)?,
            ReportFormat::Tabs => deliver_tabs(&text, terminal),
            ReportFormat::Table => print!("{text}"),
            ReportFormat::Slides => unreachable!("slides always render as an outline"),
        },
        Rendered::Outline(outline) => deliver_slides(&outline, terminal)?,
    }

    Ok(())
}

fn deliver_tabs(content: &str, terminal: bool) {
    if !terminal {
        print!("{content}");
        hint("pipe into `pbcopy` to copy the tab-delimited report.");
        return;
    }

    match copy_to_clipboard(ClipboardKind::Plain, content.as_bytes()) {
        Ok(()) => notice(
            "Tab-delimited report copied to clipboard. Paste into your spreadsheet or text editor.",
        ),
        Err(e) => {
            print!("{content}");
            warn(&format!("failed to copy tab-delimited report to clipboard ({e})."));
            hint("run `wkreport --tabs ... | pbcopy` manually.");
        }
    }
}

fn deliver_docs(table_html: &str, terminal: bool) -> Result<()> {
    let rtf = html_to_rtf(table_html);

    if !terminal {
        match rtf {
            Ok(payload) => {
                io::stdout().write_all(&payload)?;
                hint("pipe into `pbcopy -Prefer rtf` to preserve table formatting.");
            }
            Err(_) => {
                println!("{table_html}");
                hint("pipe into `pbcopy -Prefer html` to preserve table formatting.");
            }
        }
        return Ok(());
    }

    if let Ok(payload) = &rtf {
        if copy_to_clipboard(ClipboardKind::Rtf, payload).is_ok() {
            notice("Document table copied to clipboard. Paste directly into your document.");
            return Ok(());
        }
    }

    match copy_to_clipboard(ClipboardKind::Html, table_html.as_bytes()) {
        Ok(()) => notice(
            "Table (HTML) copied to clipboard. If your editor shows raw markup, use Paste special > Paste HTML.",
        ),
        Err(e) => {
            println!("{table_html}");
            warn(&format!("failed to copy table to clipboard ({e})."));
            hint("run `wkreport --docs ... | pbcopy -Prefer html` manually.");
        }
    }
    Ok(())
}

fn deliver_slides(outline: &Outline, terminal: bool) -> Result<()> {
    if outline.is_empty() {
        println!("No slide content generated.");
        return Ok(());
    }

    let rtf = html_to_rtf(&outline.html);

    if !terminal {
        match rtf {
            Ok(payload) => {
                io::stdout().write_all(&payload)?;
                hint("pipe into `pbcopy -Prefer rtf` to preserve hyperlinks in slides.");
            }
            Err(_) => {
                println!("{}", outline.html);
                hint("pipe into `pbcopy -Prefer html` to preserve hyperlinks in slides.");
            }
        }
        return Ok(());
    }

    let mut copied = false;
    match &rtf {
        Ok(payload) => match copy_to_clipboard(ClipboardKind::Rtf, payload) {
            Ok(()) => {
                notice("Slides summary copied to clipboard with formatting. Paste directly into your slide notes or text box.");
                copied = true;
            }
            Err(e) => warn(&format!("failed to copy slides summary as RTF ({e}).")),
        },
        Err(e) => warn(&format!(
            "unable to convert slides summary to RTF ({e}). Falling back to HTML clipboard behavior."
        )),
    }

    if !copied {
        match copy_to_clipboard(ClipboardKind::Html, outline.html.as_bytes()) {
            Ok(()) => {
                notice("Slides summary copied as HTML to clipboard. Paste directly into your slide notes or text box.");
                copied = true;
            }
            Err(e) => {
                warn(&format!("failed to copy slides summary to clipboard ({e})."));
                hint("run `wkreport --slides ... | pbcopy -Prefer html` manually.");
            }
        }
    }

    if !copied {
        println!("{}", outline.plain);
    }
    Ok(())
}
