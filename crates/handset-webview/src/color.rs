//! Validation of theme colors reported by content pages.
//!
//! A reported color ends up in the trusted UI's stylesheet, so only plain
//! color syntax gets through:
//! - Hex colors: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()`, `rgba()`, `hsl()`, `hsla()` with numeric arguments
//! - Bare named colors (`white`, `rebeccapurple`)
//!
//! Anything containing `url(`, `expression(`, `;`, braces or angle brackets
//! is rejected.

/// Maximum accepted length of a color string.
const MAX_COLOR_LEN: usize = 64;

/// Validate and normalize a theme color. Returns the trimmed, lowercased value.
pub fn normalize_theme_color(value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("empty color value".to_string());
    }
    if trimmed.len() > MAX_COLOR_LEN {
        return Err(format!("color value too long ({} bytes)", trimmed.len()));
    }

    check_injection_patterns(trimmed)?;

    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with('#') {
        validate_hex_color(&lower)?;
    } else if let Some((name, args)) = split_function(&lower) {
        validate_color_function(name, args, &lower)?;
    } else if !lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("invalid color: '{trimmed}'"));
    }

    Ok(lower)
}

pub fn is_valid_theme_color(value: &str) -> bool {
    normalize_theme_color(value).is_ok()
}

fn check_injection_patterns(value: &str) -> Result<(), String> {
    let lower = value.to_lowercase();

    let dangerous = [
        "expression(",
        "url(",
        "javascript:",
        "eval(",
        "import",
        "behavior:",
        "-moz-binding",
    ];

    for pattern in &dangerous {
        if lower.contains(pattern) {
            return Err(format!("color rejected: contains '{pattern}'"));
        }
    }

    for ch in [';', '{', '}', '<', '>', '"', '\'', '\\'] {
        if value.contains(ch) {
            return Err(format!("color rejected: contains '{ch}'"));
        }
    }

    Ok(())
}

fn validate_hex_color(value: &str) -> Result<(), String> {
    let hex = &value[1..];

    if !matches!(hex.len(), 3 | 4 | 6 | 8) {
        return Err(format!(
            "invalid hex color length: expected 3/4/6/8 digits, got {} in '{value}'",
            hex.len()
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: non-hex character in '{value}'"));
    }

    Ok(())
}

fn split_function(value: &str) -> Option<(&str, &str)> {
    let (name, rest) = value.split_once('(')?;
    let args = rest.strip_suffix(')')?;
    Some((name.trim(), args))
}

fn validate_color_function(name: &str, args: &str, value: &str) -> Result<(), String> {
    // The legacy `a` spellings take the same arguments in modern CSS.
    let (min, max) = match name {
        "rgb" | "rgba" | "hsl" | "hsla" => (3, 4),
        _ => return Err(format!("unsupported color function '{name}' in '{value}'")),
    };

    // Both the comma form and the space form with `/ alpha` are accepted.
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() < min || parts.len() > max {
        return Err(format!(
            "expected {min}-{max} arguments in {name}(), got {} in '{value}'",
            parts.len()
        ));
    }

    for (i, part) in parts.iter().enumerate() {
        let numeric = part
            .strip_suffix('%')
            .or_else(|| part.strip_suffix("deg"))
            .unwrap_or(part);
        if numeric.parse::<f64>().is_err() {
            return Err(format!(
                "non-numeric argument at position {i} in '{value}': '{part}'"
            ));
        }
    }

    Ok(())
}
