use crate::constants::endpoints::GCS_UPLOAD_BASE_URL;
use crate::error::BeerGameError;
use crate::storage::RecordStore;
use std::path::Path;

/// Uploads records to a Google Cloud Storage bucket using the JSON API's
/// simple media upload. Obtaining the OAuth token is the caller's concern.
pub struct GcsStore {
    client: reqwest::Client,
    bucket: String,
    token: String,
    base_url: String,
}

impl GcsStore {
    pub fn new(bucket: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bucket: bucket.into(),
            token: token.into(),
            base_url: GCS_UPLOAD_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn upload_url(&self, name: &str) -> String {
        format!(
            "{}/b/{}/o?uploadType=media&name={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.bucket),
            urlencoding::encode(name)
        )
    }
}

#[async_trait::async_trait]
impl RecordStore for GcsStore {
    async fn upload(&self, name: &str, path: &Path) -> Result<(), BeerGameError> {
        let body = tokio::fs::read(path).await?;

        let response = self
            .client
            .post(self.upload_url(name))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "text/csv; charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BeerGameError::storage(format!(
                "GCS upload to {} failed ({}): {}",
                self.bucket, status, text
            )));
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("gs://{}", self.bucket)
    }
}
