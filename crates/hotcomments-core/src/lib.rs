pub mod crawl;
pub mod export;
pub mod pacing;

pub use crawl::{CrawlController, CrawlObserver, CrawlReport, NoopObserver, PageSummary};
pub use export::{export_csv, export_json, load_json, write_csv, write_json, ExportError, ExportOutcome};
pub use pacing::PolitenessDelay;
