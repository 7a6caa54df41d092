use crate::error::ExtractionError;
use hotcomments_models::{CommentRecord, StarRating, ANONYMOUS_USERNAME};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

static COMMENT_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("div.comment-item"));
static COMMENT_BODY: LazyLock<Selector> = LazyLock::new(|| selector("div.comment"));
static COMMENT_INFO: LazyLock<Selector> = LazyLock::new(|| selector("span.comment-info"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector("span.rating"));
static SHORT: LazyLock<Selector> = LazyLock::new(|| selector("span.short"));
static VOTES: LazyLock<Selector> = LazyLock::new(|| selector("span.vote-count"));
static COMMENT_TIME: LazyLock<Selector> = LazyLock::new(|| selector("span.comment-time"));

const RATING_CLASS_PREFIX: &str = "allstar";

/// Records extracted from one page, plus the items that had to be skipped.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub records: Vec<CommentRecord>,
    pub failures: Vec<ExtractionError>,
}

/// Parse comment listing page `page` (0-based).
///
/// Each `div.comment-item` is extracted on its own; a malformed item is logged
/// and skipped without affecting the rest of the page.
pub fn parse_page(page: u32, html: &str) -> PageOutcome {
    let document = Html::parse_document(html);
    let mut outcome = PageOutcome::default();

    for (index, item) in document.select(&COMMENT_ITEM).enumerate() {
        match extract_comment(page, index, item) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!(page = page + 1, item = index, error = %e, "Skipping comment item");
                outcome.failures.push(e);
            }
        }
    }

    debug!(
        page = page + 1,
        records = outcome.records.len(),
        skipped = outcome.failures.len(),
        "Parsed comment page"
    );
    outcome
}

/// Extract one comment. `page` and `index` locate the item and are only used
/// for error reporting.
pub fn extract_comment(page: u32, index: usize, item: ElementRef<'_>) -> Result<CommentRecord, ExtractionError> {
    // Everything except the id lives under the comment body
    let body = item
        .select(&COMMENT_BODY)
        .next()
        .ok_or(ExtractionError::MissingSubtree { page, index, element: "div.comment" })?;

    let comment_id = item.value().attr("data-cid").unwrap_or_default().to_string();

    let username = body
        .select(&COMMENT_INFO)
        .next()
        .and_then(|info| info.select(&LINK).next())
        .map(element_text)
        .unwrap_or_else(|| ANONYMOUS_USERNAME.to_string());

    let rating = body
        .select(&RATING)
        .next()
        .and_then(|el| el.value().attr("class"))
        .and_then(rating_from_classes);

    let content = body.select(&SHORT).next().map(element_text).unwrap_or_default();

    let votes = body
        .select(&VOTES)
        .next()
        .and_then(|el| element_text(el).parse::<u32>().ok())
        .unwrap_or(0);

    let time = body
        .select(&COMMENT_TIME)
        .next()
        .and_then(|el| el.value().attr("title"))
        .map(|title| title.trim().to_string())
        .unwrap_or_default();

    Ok(CommentRecord {
        comment_id,
        username,
        rating,
        content,
        votes,
        time,
    })
}

/// Find the first `allstarNN` token in a class list and convert it to stars.
pub fn rating_from_classes(classes: &str) -> Option<StarRating> {
    let value = classes.split_whitespace().find_map(|token| {
        let digits = token.strip_prefix(RATING_CLASS_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u32>().ok()
    })?;
    StarRating::from_class_value(value)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests;
