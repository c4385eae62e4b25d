use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SproutError {
    PackageNotFound(String),
    RegistryUnreachable(String, String),
    MalformedResponse(String, String),
    NoVersions(String),
    TargetMissing(PathBuf),
    InvalidPackageSpec(String),
    InstallFailed(String, String),
    IoError(String),
}

impl SproutError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PackageNotFound(_))
    }

    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::RegistryUnreachable(..))
    }
}

impl fmt::Display for SproutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageNotFound(name) => {
                write!(f, "Package '{name}' not found in the registry")
            }
            Self::RegistryUnreachable(name, reason) => {
                write!(f, "Could not resolve versions for '{name}': {reason}")
            }
            Self::MalformedResponse(name, reason) => {
                write!(f, "Malformed registry response for '{name}': {reason}")
            }
            Self::NoVersions(name) => {
                write!(f, "No published versions available for {name}")
            }
            Self::TargetMissing(path) => {
                write!(f, "Target path {} does not exist", path.display())
            }
            Self::InvalidPackageSpec(spec) => {
                write!(f, "Invalid package specification: {spec}")
            }
            Self::InstallFailed(pkg, reason) => {
                write!(f, "Failed to install {pkg}: {reason}")
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for SproutError {}

impl From<std::io::Error> for SproutError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SproutError>;
