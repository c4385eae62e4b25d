pub mod package_spec;
pub mod path_utils;

pub use package_spec::{parse_package_spec, validate_package_name};
pub use path_utils::*;
