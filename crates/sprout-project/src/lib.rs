pub mod io;
pub mod package_json;

pub use io::{find_package_root, read_package_json};
pub use package_json::PackageJson;
