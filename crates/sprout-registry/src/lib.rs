pub mod client;
pub mod metadata;

pub use client::RegistryClient;
pub use metadata::{Dist, VersionMetadata};

use std::future::Future;

use sprout_error::{Result, SproutError};
use sprout_resolver::select_latest;

/// Anything that can list the published versions of a package.
pub trait VersionSource: Sync {
    fn fetch_versions(&self, name: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Newest published version of `name`; `NoVersions` when nothing usable
    /// is published.
    fn latest_version(&self, name: &str) -> impl Future<Output = Result<String>> + Send {
        async move {
            let versions = self.fetch_versions(name).await?;
            select_latest(&versions).map_err(|_| SproutError::NoVersions(format!("'{name}'")))
        }
    }
}
