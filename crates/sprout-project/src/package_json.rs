use indexmap::IndexMap;
use serde::Deserialize;

/// The subset of a package manifest this tool reads. Unknown fields are kept.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PackageJson {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub main: Option<String>,
    // Catch-all for other fields
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

impl PackageJson {
    /// The declared entry file, ignoring blank values.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.main
            .as_deref()
            .map(str::trim)
            .filter(|main| !main.is_empty())
    }
}
