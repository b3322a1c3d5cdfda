//! HTTP source backed by the remote sheet-export service.

use async_trait::async_trait;
use tracing::instrument;

use quizdeck_core::FetchError;

use crate::source::QuestionSource;

const DEFAULT_BASE_URL: &str = "https://quizdeck-sheets.workers.dev";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches partition CSV over HTTP GET, parameterized by a sheet id and
/// a partition (sheet tab) name. Query parameters are URL-encoded by
/// the client.
pub struct SheetSource {
    sheet_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl SheetSource {
    pub fn new(sheet_id: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            sheet_id: sheet_id.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[async_trait]
impl QuestionSource for SheetSource {
    fn name(&self) -> &str {
        "sheet"
    }

    #[instrument(skip(self), fields(sheet_id = %self.sheet_id))]
    async fn fetch_raw(&self, partition: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("sheetId", self.sheet_id.as_str()), ("sheetName", partition)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
