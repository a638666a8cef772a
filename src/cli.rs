use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use clap_complete::Shell;

use crate::report::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "wkreport")]
#[command(about = "Weekly Jira reports from saved filters", version)]
#[command(group(ArgGroup::new("mode").args(["tabs", "docs", "slides"])))]
#[command(after_help = "EXAMPLES:
    wkreport -f \"Team Sprint\"         Fixed-width table for a filter by name
    wkreport -f10042 --tabs           Tab-separated report for filter 10042
    wkreport -f10042 --docs           HTML/RTF table for pasting into a document
    wkreport -f10042 --slides         Status outline for slide notes
    wkreport --ls                     List the filters you can see")]
pub struct Cli {
    /// Jira filter identifier (name or numeric id, supports -f123 shorthand)
    #[arg(short = 'f', long = "filter", value_name = "ID")]
    pub filter: Option<String>,

    /// Path to configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List available Jira filters and exit
    #[arg(long)]
    pub ls: bool,

    /// Output report using tab-separated fields
    #[arg(long)]
    pub tabs: bool,

    /// Output report formatted as a document table (HTML/RTF)
    #[arg(long)]
    pub docs: bool,

    /// Output report formatted as slide bullets grouped by status
    #[arg(long)]
    pub slides: bool,

    /// Log requests and raw filter responses to stderr
    #[arg(long)]
    pub debug: bool,

    /// Show the full error chain on failure
    #[arg(long, short)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    pub fn output_mode(&self) -> ReportFormat {
        if self.docs {
            ReportFormat::Docs
        } else if self.slides {
            ReportFormat::Slides
        } else if self.tabs {
            ReportFormat::Tabs
        } else {
            ReportFormat::Table
        }
    }
}
