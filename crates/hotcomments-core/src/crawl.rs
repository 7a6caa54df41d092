use crate::pacing::PolitenessDelay;
use chrono::{DateTime, Utc};
use hotcomments_config::CrawlerConfig;
use hotcomments_models::CommentRecord;
use hotcomments_sources::{PageFetch, PageSource};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// What happened to one page of the crawl.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    /// 0-based page index
    pub page: u32,
    pub records: usize,
    pub failed_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl PageSummary {
    fn from_fetch(page: u32, fetch: &PageFetch) -> Self {
        Self {
            page,
            records: fetch.records.len(),
            failed_items: fetch.failed_items,
            fetch_error: fetch.fetch_error.clone(),
        }
    }
}

/// Summary of a finished crawl. The records themselves stay with the controller.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub movie_id: String,
    pub pages_planned: u32,
    pub pages: Vec<PageSummary>,
    pub total_records: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.fetch_error.is_some()).count()
    }

    pub fn failed_items(&self) -> usize {
        self.pages.iter().map(|p| p.failed_items).sum()
    }
}

/// Hooks for reporting crawl progress. Every method defaults to a no-op.
pub trait CrawlObserver {
    fn page_started(&self, _page: u32, _page_count: u32) {}
    fn page_finished(&self, _summary: &PageSummary) {}
    fn pausing(&self, _delay: Duration) {}
}

pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}

/// Walks a listing page by page and accumulates its records.
///
/// Pages are fetched strictly in order, one at a time, with a politeness
/// delay after each. A page that fails contributes nothing, and the crawl
/// always attempts exactly `page_count` pages.
pub struct CrawlController<S> {
    source: S,
    movie_id: String,
    delay: PolitenessDelay,
    pause_after_last_page: bool,
    records: Vec<CommentRecord>,
}

impl<S: PageSource> CrawlController<S> {
    pub fn new(source: S, movie_id: impl Into<String>, config: &CrawlerConfig) -> Self {
        Self {
            source,
            movie_id: movie_id.into(),
            delay: PolitenessDelay::from_config(config),
            pause_after_last_page: config.pause_after_last_page,
            records: Vec::new(),
        }
    }

    pub fn with_delay(mut self, delay: PolitenessDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    pub fn records(&self) -> &[CommentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CommentRecord> {
        self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub async fn crawl_all(&mut self, page_count: u32) -> CrawlReport {
        self.crawl_all_with(page_count, &NoopObserver).await
    }

    pub async fn crawl_all_with(&mut self, page_count: u32, observer: &dyn CrawlObserver) -> CrawlReport {
        let started_at = Utc::now();
        info!(
            movie_id = %self.movie_id,
            source = self.source.source_name(),
            pages = page_count,
            "Starting hot comment crawl"
        );

        let mut pages = Vec::new();
        for page in 0..page_count {
            observer.page_started(page, page_count);

            let fetch = self.source.fetch_page(page).await;
            let summary = PageSummary::from_fetch(page, &fetch);
            if let Some(error) = &summary.fetch_error {
                warn!(page = page + 1, error = %error, "Page yielded no comments");
            }
            self.records.extend(fetch.records);
            observer.page_finished(&summary);
            pages.push(summary);

            let is_last = page + 1 == page_count;
            if !is_last || self.pause_after_last_page {
                let delay = self.delay.next_delay();
                observer.pausing(delay);
                tokio::time::sleep(delay).await;
            }
        }

        let report = CrawlReport {
            movie_id: self.movie_id.clone(),
            pages_planned: page_count,
            pages,
            total_records: self.records.len(),
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            movie_id = %report.movie_id,
            records = report.total_records,
            failed_pages = report.failed_pages(),
            skipped_items = report.failed_items(),
            "Crawl finished"
        );
        report
    }
}
