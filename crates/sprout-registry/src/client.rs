use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::VersionSource;
use crate::metadata::VersionMetadata;
use sprout_constants::USER_AGENT;
use sprout_error::{Result, SproutError};
use sprout_resolver::select_compatible;

/// Thin client over an npm-compatible registry.
///
/// Every call goes to the network: there is no retry and no response
/// cache, so a failed request surfaces to the caller immediately.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SproutError::RegistryUnreachable(
                    base_url.to_string(),
                    format!("failed to build HTTP client: {e}"),
                )
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(name))
    }

    pub async fn fetch_versions(&self, name: &str) -> Result<Vec<String>> {
        let json = self.get_json(name, &self.package_url(name)).await?;

        let versions = json
            .get("versions")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SproutError::MalformedResponse(
                    name.to_string(),
                    "missing `versions` object".to_string(),
                )
            })?;

        let versions: Vec<String> = versions.keys().cloned().collect();
        sprout_logger::debug(&format!(
            "{name}: {} published version(s) on {}",
            versions.len(),
            self.base_url
        ));
        Ok(versions)
    }

    pub async fn fetch_version_metadata(
        &self,
        name: &str,
        version: &str,
    ) -> Result<VersionMetadata> {
        let url = format!(
            "{}/{}",
            self.package_url(name),
            urlencoding::encode(version)
        );
        let json = self.get_json(name, &url).await?;

        serde_json::from_value(json).map_err(|e| {
            SproutError::MalformedResponse(format!("{name}@{version}"), e.to_string())
        })
    }

    /// Newest version of `name` that is caret-compatible with `base_version`.
    pub async fn semver_version(&self, name: &str, base_version: &str) -> Result<Option<String>> {
        let versions = self.fetch_versions(name).await?;
        Ok(select_compatible(base_version, &versions))
    }

    async fn get_json(&self, name: &str, url: &str) -> Result<Value> {
        sprout_logger::debug(&format!("GET {url}"));

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| unreachable(name, &e))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SproutError::PackageNotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(SproutError::RegistryUnreachable(
                name.to_string(),
                format!("HTTP {status} from {url}"),
            ));
        }

        let text = resp.text().await.map_err(|e| unreachable(name, &e))?;

        serde_json::from_str(&text).map_err(|e| {
            SproutError::MalformedResponse(
                name.to_string(),
                format!("invalid JSON (response length: {}): {e}", text.len()),
            )
        })
    }
}

impl VersionSource for RegistryClient {
    fn fetch_versions(&self, name: &str) -> impl Future<Output = Result<Vec<String>>> + Send {
        Self::fetch_versions(self, name)
    }
}

fn unreachable(name: &str, e: &reqwest::Error) -> SproutError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        format!("network error: {e}")
    };
    SproutError::RegistryUnreachable(name.to_string(), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    /// Answers exactly one request and reports the request line it saw.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> std::io::Result<(String, oneshot::Receiver<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = sock.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(buf.get(..n).unwrap_or_default());
                let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(response.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });

        Ok((format!("http://{addr}"), rx))
    }

    fn client(base: &str) -> Result<RegistryClient> {
        RegistryClient::new(base, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fetch_versions_reads_keys() -> TestResult {
        let body = r#"{"name":"tpl","versions":{"1.0.0":{},"1.1.0":{},"2.0.0-beta.1":{}}}"#;
        let (base, _) = serve_once("200 OK", body.to_string()).await?;

        let mut versions = client(&base)?.fetch_versions("tpl").await?;
        versions.sort();
        assert_eq!(versions, vec!["1.0.0", "1.1.0", "2.0.0-beta.1"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_scoped_name_is_encoded() -> TestResult {
        let (base, seen) = serve_once("200 OK", r#"{"versions":{}}"#.to_string()).await?;

        let versions = client(&base)?.fetch_versions("@scope/tpl").await?;
        assert!(versions.is_empty());
        assert_eq!(seen.await?, "GET /%40scope%2Ftpl HTTP/1.1");
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found() -> TestResult {
        let (base, _) = serve_once("404 Not Found", r#"{"error":"Not found"}"#.to_string()).await?;

        let err = client(&base)?.fetch_versions("missing").await;
        assert!(matches!(err, Err(SproutError::PackageNotFound(name)) if name == "missing"));
        Ok(())
    }

    #[tokio::test]
    async fn test_server_error_is_unreachable() -> TestResult {
        let (base, _) = serve_once("503 Service Unavailable", String::new()).await?;

        let err = client(&base)?.fetch_versions("tpl").await;
        assert!(matches!(err, Err(e) if e.is_unreachable()));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json() -> TestResult {
        let (base, _) = serve_once("200 OK", "<html>".to_string()).await?;

        let err = client(&base)?.fetch_versions("tpl").await;
        assert!(matches!(err, Err(SproutError::MalformedResponse(..))));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_versions_object() -> TestResult {
        let (base, _) = serve_once("200 OK", r#"{"name":"tpl"}"#.to_string()).await?;

        let err = client(&base)?.fetch_versions("tpl").await;
        assert!(
            matches!(err, Err(SproutError::MalformedResponse(_, reason)) if reason.contains("versions"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let err = client(&format!("http://{addr}"))?.fetch_versions("tpl").await;
        assert!(matches!(err, Err(e) if e.is_unreachable()));
        Ok(())
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Ok((sock, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(sock);
            }
        });

        let client = RegistryClient::new(&format!("http://{addr}"), Duration::from_millis(200))?;
        let err = client.fetch_versions("tpl").await;
        assert!(
            matches!(err, Err(SproutError::RegistryUnreachable(_, reason)) if reason.contains("timed out"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_and_compatible() -> TestResult {
        let body = r#"{"versions":{"1.2.0":{},"1.3.0":{},"2.0.0":{}}}"#;
        let (base, _) = serve_once("200 OK", body.to_string()).await?;
        assert_eq!(client(&base)?.latest_version("tpl").await?, "2.0.0");

        let (base, _) = serve_once("200 OK", body.to_string()).await?;
        assert_eq!(
            client(&base)?.semver_version("tpl", "1.2.0").await?,
            Some("1.3.0".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_of_empty_registry_entry() -> TestResult {
        let (base, _) = serve_once("200 OK", r#"{"versions":{}}"#.to_string()).await?;

        let err = client(&base)?.latest_version("tpl").await;
        assert!(matches!(err, Err(SproutError::NoVersions(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_version_metadata() -> TestResult {
        let body = r#"{"name":"tpl","version":"1.0.0","dist":{"tarball":"http://x/tpl-1.0.0.tgz","shasum":"abc"}}"#;
        let (base, seen) = serve_once("200 OK", body.to_string()).await?;

        let meta = client(&base)?.fetch_version_metadata("tpl", "1.0.0").await?;
        assert_eq!(meta.dist.tarball, "http://x/tpl-1.0.0.tgz");
        assert_eq!(meta.dist.shasum.as_deref(), Some("abc"));
        assert_eq!(seen.await?, "GET /tpl/1.0.0 HTTP/1.1");
        Ok(())
    }

    #[test]
    fn test_base_url_trailing_slash() -> Result<()> {
        let client = RegistryClient::new("https://mirror.example/", Duration::from_secs(1))?;
        assert_eq!(client.package_url("tpl"), "https://mirror.example/tpl");
        Ok(())
    }
}
