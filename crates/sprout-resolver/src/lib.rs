pub mod select;
pub mod version_spec;

pub use select::{is_newer, select_compatible, select_latest, sort_versions};
pub use version_spec::VersionSpec;
