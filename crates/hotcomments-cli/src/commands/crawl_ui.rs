use crate::output::{Output, OutputFormat};
use hotcomments_core::{CrawlObserver, PageSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Console progress for a crawl: a page bar on a terminal, plain lines otherwise.
pub struct CrawlUI<'a> {
    output: &'a Output,
    bar: Option<ProgressBar>,
}

impl<'a> CrawlUI<'a> {
    pub fn new(page_count: u32, output: &'a Output) -> Self {
        let bar = (is_interactive() && output.format() == OutputFormat::Human).then(|| {
            let pb = ProgressBar::new(u64::from(page_count));
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} pages {msg}")
            {
                pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
            }
            pb
        });

        if bar.is_none() {
            tracing::debug!(operation = "ui_init", mode = "non_interactive", "Progress bar disabled");
        }

        Self { output, bar }
    }

    fn line(&self, msg: String) {
        match &self.bar {
            Some(pb) => pb.println(msg),
            None => self.output.info(msg),
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_and_clear();
        }
    }
}

impl CrawlObserver for CrawlUI<'_> {
    fn page_started(&self, page: u32, _page_count: u32) {
        match &self.bar {
            Some(pb) => pb.set_message(format!("fetching page {}", page + 1)),
            None => self.output.info(format!("Fetching page {}...", page + 1)),
        }
    }

    fn page_finished(&self, summary: &PageSummary) {
        let page = summary.page + 1;
        match &summary.fetch_error {
            Some(error) => self.line(format!("Page {} failed: {}", page, error)),
            None if summary.failed_items > 0 => self.line(format!(
                "Page {}: {} comments ({} skipped)",
                page, summary.records, summary.failed_items
            )),
            None => self.line(format!("Page {}: {} comments", page, summary.records)),
        }
        if let Some(pb) = &self.bar {
            pb.inc(1);
        }
    }

    fn pausing(&self, delay: Duration) {
        match &self.bar {
            Some(pb) => pb.set_message(format!("pausing {:.2}s", delay.as_secs_f64())),
            None => self.output.info(format!("Pausing {:.2} s", delay.as_secs_f64())),
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
