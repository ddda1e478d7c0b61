//! Notebook-style presentation helpers.
//!
//! Objects that have a Markdown representation implement [`ToMarkdown`];
//! where it goes is decided by an injected [`NotebookDisplay`]. The default
//! [`NoDisplay`] drops everything, so library code never prints unless the
//! caller asks for it.

pub mod query_str;
pub mod timer;

pub use query_str::{FormatOptions, KeywordCase, QueryStr};
pub use timer::{timeit, ExecutionTimer, Timing};

use crate::tap::AsyncJob;

/// Something that can render itself as Markdown.
pub trait ToMarkdown {
    fn to_markdown(&self) -> String;
}

/// Destination for rendered Markdown.
pub trait NotebookDisplay {
    fn show_markdown(&self, markdown: &str);

    fn show(&self, item: &dyn ToMarkdown) {
        self.show_markdown(&item.to_markdown());
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplay;

impl NotebookDisplay for NoDisplay {
    fn show_markdown(&self, _markdown: &str) {}
}

/// Prints Markdown to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDisplay;

impl NotebookDisplay for StdoutDisplay {
    fn show_markdown(&self, markdown: &str) {
        println!("{}", markdown);
    }
}

/// Sends Markdown to the `log` facade at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDisplay;

impl NotebookDisplay for LogDisplay {
    fn show_markdown(&self, markdown: &str) {
        log::info!("{}", markdown);
    }
}

impl ToMarkdown for AsyncJob {
    fn to_markdown(&self) -> String {
        AsyncJob::to_markdown(self)
    }
}
