use std::time::Duration;

use sprout_constants::USER_AGENT;
use sprout_error::{Result, SproutError};

pub struct DownloadClient {
    client: reqwest::Client,
}

impl DownloadClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(45))
            .connect_timeout(Duration::from_secs(20))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SproutError::IoError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    pub async fn download_tarball(&self, package: &str, url: &str) -> Result<Vec<u8>> {
        sprout_logger::status(&format!("Downloading {package}..."));

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SproutError::InstallFailed(package.to_string(), e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SproutError::InstallFailed(
                package.to_string(),
                format!("HTTP {} for {url}", resp.status()),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SproutError::InstallFailed(package.to_string(), e.to_string()))?;

        sprout_logger::debug(&format!("Downloaded {package} ({} bytes)", bytes.len()));
        Ok(bytes.to_vec())
    }
}
