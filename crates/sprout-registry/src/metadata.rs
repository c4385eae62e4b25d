use serde::Deserialize;

/// The per-version document served at `<registry>/<name>/<version>`.
#[derive(Deserialize, Debug, Clone)]
pub struct VersionMetadata {
    pub name: String,
    pub version: String,
    pub dist: Dist,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Dist {
    pub tarball: String,
    #[serde(default)]
    pub shasum: Option<String>,
    #[serde(default)]
    pub integrity: Option<String>,
}
