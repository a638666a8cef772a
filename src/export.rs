//! Clipboard and rich-text conversion through the macOS `pbcopy`/`textutil` tools.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} supported on macOS only")]
    Unsupported(&'static str),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clipboard flavours understood by `pbcopy -Prefer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardKind {
    Plain,
    Html,
    Rtf,
}

impl ClipboardKind {
    fn prefer_flag(self) -> Option<&'static str> {
        match self {
            ClipboardKind::Plain => None,
            ClipboardKind::Html => Some("html"),
            ClipboardKind::Rtf => Some("rtf"),
        }
    }
}

pub fn copy_to_clipboard(kind: ClipboardKind, data: &[u8]) -> Result<(), ExportError> {
    if !cfg!(target_os = "macos") {
        return Err(ExportError::Unsupported("clipboard copy"));
    }

    let mut command = Command::new("pbcopy");
    if let Some(prefer) = kind.prefer_flag() {
        command.args(["-Prefer", prefer]);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ExportError::Spawn {
            tool: "pbcopy",
            source: e,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(data) {
            drop(stdin);
            let _ = child.wait();
            return Err(e.into());
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ExportError::Failed {
            tool: "pbcopy",
            status,
        });
    }
    Ok(())
}

/// Convert an HTML document to RTF bytes.
pub fn html_to_rtf(html: &str) -> Result<Vec<u8>, ExportError> {
    if !cfg!(target_os = "macos") {
        return Err(ExportError::Unsupported("rtf conversion"));
    }

    let dir = tempfile::Builder::new().prefix("wkreport-html").tempdir()?;
    let html_path = dir.path().join("input.html");
    let rtf_path = dir.path().join("output.rtf");

    std::fs::write(&html_path, html)?;

    let status = Command::new("textutil")
        .arg("-convert")
        .arg("rtf")
        .arg(&html_path)
        .arg("-output")
        .arg(&rtf_path)
        .status()
        .map_err(|e| ExportError::Spawn {
            tool: "textutil",
            source: e,
        })?;

    if !status.success() {
        return Err(ExportError::Failed {
            tool: "textutil",
            status,
        });
    }

    Ok(std::fs::read(&rtf_path)?)
}
