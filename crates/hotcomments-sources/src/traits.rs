use async_trait::async_trait;
use hotcomments_models::CommentRecord;

/// Result of requesting one listing page.
///
/// A failed request is not an error at this level: it yields no records and
/// carries the failure message for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageFetch {
    pub records: Vec<CommentRecord>,
    /// Items present in the page markup that could not be extracted
    pub failed_items: usize,
    pub fetch_error: Option<String>,
}

impl PageFetch {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failed_items: 0,
            fetch_error: Some(message.into()),
        }
    }
}

#[async_trait]
pub trait PageSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch and extract page `page` (0-based). Never fails; see [`PageFetch`].
    async fn fetch_page(&self, page: u32) -> PageFetch;
}
