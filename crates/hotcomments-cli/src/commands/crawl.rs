use super::config::load_config;
use super::crawl_ui::CrawlUI;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use hotcomments_config::export_file_names;
use hotcomments_core::{export_csv, export_json, CrawlController, ExportOutcome};
use hotcomments_sources::DoubanClient;
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct CrawlArgs {
    pub movie_id: String,
    pub pages: u32,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
}

fn validate_movie_id(movie_id: &str) -> Result<()> {
    if movie_id.is_empty() || movie_id.contains(['/', '?', '#']) || movie_id.chars().any(char::is_whitespace) {
        return Err(eyre!("Invalid movie id '{}'", movie_id));
    }
    Ok(())
}

pub async fn run_crawl(args: CrawlArgs, output: &Output) -> Result<()> {
    tracing::debug!("Crawl command started");
    validate_movie_id(&args.movie_id)?;

    let config = load_config(args.config.as_deref())?;
    let client = DoubanClient::new(args.movie_id.clone(), &config)
        .wrap_err("Failed to create Douban client")?;

    let rule = "=".repeat(50);
    output.info(&rule);
    output.info(format!("Crawling hot comments for movie {}", args.movie_id));
    output.info(format!("Planned pages: {}", args.pages));
    output.info(&rule);

    let mut crawler = CrawlController::new(client, args.movie_id.clone(), &config);
    let ui = CrawlUI::new(args.pages, output);
    let report = crawler.crawl_all_with(args.pages, &ui).await;
    ui.finish();

    output.info(&rule);
    output.success(format!("Crawl finished: {} comments", report.total_records));
    if report.failed_pages() > 0 {
        output.warn(format!("{} of {} pages failed", report.failed_pages(), report.pages_planned));
    }
    if report.failed_items() > 0 {
        output.warn(format!("{} comments could not be parsed", report.failed_items()));
    }
    output.info(&rule);

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        // The exporters report the resulting failures themselves
        tracing::warn!(path = %args.output_dir.display(), error = %e, "Could not create output directory");
    }

    let (json_name, csv_name) = export_file_names(&args.movie_id);
    let json_outcome = export_json(crawler.records(), &args.output_dir.join(json_name));
    report_outcome(output, "JSON", &json_outcome);
    let csv_outcome = export_csv(crawler.records(), &args.output_dir.join(csv_name));
    report_outcome(output, "CSV", &csv_outcome);

    if output.format() != OutputFormat::Human {
        let report_value = serde_json::to_value(&report).wrap_err("Failed to serialize crawl report")?;
        output.json(&json!({
            "type": "report",
            "report": report_value,
            "exports": {
                "json": outcome_json(&json_outcome),
                "csv": outcome_json(&csv_outcome),
            }
        }));
    }

    Ok(())
}

fn report_outcome(output: &Output, label: &str, outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Written { path, records } => {
            output.success(format!("Saved {} comments to {} ({})", records, path.display(), label));
        }
        ExportOutcome::NothingToSave => output.warn(format!("No comments to save ({})", label)),
        ExportOutcome::Failed { path, error } => {
            output.error(format!("Failed to save {} file {}: {}", label, path.display(), error));
        }
    }
}

fn outcome_json(outcome: &ExportOutcome) -> serde_json::Value {
    fn path_str(path: &Path) -> String {
        path.display().to_string()
    }

    match outcome {
        ExportOutcome::Written { path, records } => {
            json!({ "status": "written", "path": path_str(path), "records": records })
        }
        ExportOutcome::NothingToSave => json!({ "status": "nothing_to_save" }),
        ExportOutcome::Failed { path, error } => {
            json!({ "status": "failed", "path": path_str(path), "error": error.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert!(validate_movie_id("34780991").is_ok());
        assert!(validate_movie_id("").is_err());
        assert!(validate_movie_id("123/comments").is_err());
        assert!(validate_movie_id("12 34").is_err());
    }
}
