/// Split `name@version` into its parts. A missing version yields `"latest"`.
/// Scoped names keep their leading `@`.
#[must_use]
pub fn parse_package_spec(spec: &str) -> (String, String) {
    let spec = spec.trim();
    let (scope_offset, rest) = match spec.strip_prefix('@') {
        Some(rest) => (1, rest),
        None => (0, spec),
    };

    match rest.split_once('@') {
        Some((name, version)) if !name.is_empty() => {
            let name_end = scope_offset + name.len();
            (
                spec.get(..name_end).unwrap_or(spec).to_string(),
                version.to_string(),
            )
        }
        _ => (spec.to_string(), "latest".to_string()),
    }
}

const MAX_NAME_LENGTH: usize = 214;

/// Check `name` against the registry's naming rules: plain `name` or
/// `@scope/name`, URL-safe characters, no leading `.` or `_`.
pub fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("package name must not be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(format!("package name exceeds {MAX_NAME_LENGTH} characters"));
    }

    match name.strip_prefix('@') {
        Some(scoped) => {
            let Some((scope, bare)) = scoped.split_once('/') else {
                return Err(format!("scoped name {name} must look like @scope/name"));
            };
            validate_segment(name, scope)?;
            validate_segment(name, bare)
        }
        None => validate_segment(name, name),
    }
}

fn validate_segment(name: &str, segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err(format!("{name} has an empty name segment"));
    }
    if segment.starts_with('.') || segment.starts_with('_') {
        return Err(format!("{name} must not start with '.' or '_'"));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')))
    {
        return Err(format!("{name} contains invalid character {bad:?}"));
    }
    Ok(())
}
