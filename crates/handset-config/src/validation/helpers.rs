//! Shared range-validation helpers.

/// `None` if `value` is inside `[min, max]`, otherwise the problem.
pub(crate) fn check_range(name: &str, value: u64, min: u64, max: u64) -> Option<String> {
    (value < min || value > max)
        .then(|| format!("{name} = {value} is out of range [{min}, {max}]"))
}

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    errors.extend(check_range(name, value, min, max));
}

/// No scheme, path, port or whitespace.
pub(crate) fn is_bare_hostname(value: &str) -> bool {
    !(value.is_empty()
        || value.contains("://")
        || value.contains('/')
        || value.contains(':')
        || value.chars().any(char::is_whitespace))
}

/// Push an error unless `value` is a bare hostname.
pub(crate) fn validate_hostname(errors: &mut Vec<String>, name: &str, value: &str) {
    if !is_bare_hostname(value) {
        errors.push(format!("{name} = {value:?} is not a bare hostname"));
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
pub(crate) fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
