use crate::douban::parser;
use crate::error::{FetchError, SourceError};
use crate::traits::{PageFetch, PageSource};
use async_trait::async_trait;
use hotcomments_config::CrawlerConfig;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Fetches a movie's hot comment listing from Douban, one page per request.
pub struct DoubanClient {
    client: Client,
    movie_id: String,
    comments_url: String,
    page_size: u32,
    status: String,
    sort: String,
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, SourceError> {
    HeaderValue::from_str(value).map_err(|source| SourceError::InvalidHeader { name, source })
}

impl DoubanClient {
    pub fn new(movie_id: impl Into<String>, config: &CrawlerConfig) -> Result<Self, SourceError> {
        let movie_id = movie_id.into();

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, header_value("User-Agent", &config.headers.user_agent)?);
        headers.insert(header::ACCEPT, header_value("Accept", &config.headers.accept)?);
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header_value("Accept-Language", &config.headers.accept_language)?,
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            comments_url: config.comments_url(&movie_id),
            movie_id,
            page_size: config.page_size,
            status: config.status.clone(),
            sort: config.sort.clone(),
        })
    }

    pub fn comments_url(&self) -> &str {
        &self.comments_url
    }

    /// Offset of the first comment on `page`.
    pub fn offset(&self, page: u32) -> u64 {
        u64::from(page) * u64::from(self.page_size)
    }

    /// Request one page and return its decoded body.
    pub async fn try_fetch_page(&self, page: u32) -> Result<String, FetchError> {
        let offset = self.offset(page);
        debug!(movie_id = %self.movie_id, page, offset, url = %self.comments_url, "Requesting comment page");

        let response = self
            .client
            .get(&self.comments_url)
            .query(&[
                ("start", offset.to_string()),
                ("limit", self.page_size.to_string()),
                ("status", self.status.clone()),
                ("sort", self.sort.clone()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(page, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { page, status: status.as_u16() });
        }

        // Douban serves UTF-8; decode lossily rather than trusting the declared charset
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(page, e))?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl PageSource for DoubanClient {
    fn source_name(&self) -> &str {
        "douban"
    }

    async fn fetch_page(&self, page: u32) -> PageFetch {
        match self.try_fetch_page(page).await {
            Ok(body) => {
                let outcome = parser::parse_page(page, &body);
                info!(
                    page = page + 1,
                    records = outcome.records.len(),
                    skipped = outcome.failures.len(),
                    "Fetched comment page"
                );
                PageFetch {
                    records: outcome.records,
                    failed_items: outcome.failures.len(),
                    fetch_error: None,
                }
            }
            Err(e) => {
                warn!(page = page + 1, error = %e, "Failed to fetch comment page");
                PageFetch::failed(e.to_string())
            }
        }
    }
}
