use std::fmt;
use std::str::FromStr;

use semver::Version;
use sprout_constants::LATEST_TAG;
use sprout_error::SproutError;

/// A requested version: either a concrete semver string or the `latest` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Latest,
    Concrete(String),
}

impl FromStr for VersionSpec {
    type Err = SproutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == LATEST_TAG {
            return Ok(Self::Latest);
        }

        let cleaned = s.strip_prefix('v').unwrap_or(s);
        Version::parse(cleaned)
            .map(|_| Self::Concrete(cleaned.to_string()))
            .map_err(|e| SproutError::InvalidPackageSpec(format!("version '{s}': {e}")))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST_TAG),
            Self::Concrete(v) => f.write_str(v),
        }
    }
}
