// Hex color codec for embed accents

use thiserror::Error;

/// Largest value a Discord embed color can hold
pub const MAX_COLOR: u32 = 0xFF_FFFF;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),
}

/// Strip surrounding whitespace and an optional leading `#`
pub fn normalize_hex_color(input: &str) -> String {
    let trimmed = input.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).to_string()
}

/// Parse a hex color (`#00FF00`, `00ff00`, `fff`, `0x00ff00`, `ff_00_00`...)
/// into a 24-bit integer. Any number of hex digits is accepted as long as the
/// value fits. A leading `+`, a `0x` prefix and single `_` separators are
/// tolerated so colors saved by older versions keep working.
pub fn parse_hex_color(input: &str) -> Result<u32, ColorError> {
    let invalid = || ColorError::InvalidColor(input.to_string());

    let normalized = normalize_hex_color(input);
    let rest = normalized.strip_prefix('+').unwrap_or(normalized.as_str());
    let rest = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        // `0x_ff` is allowed, the separator may follow the prefix
        Some(after) => after.strip_prefix('_').unwrap_or(after),
        None => rest,
    };

    let mut digits = String::with_capacity(rest.len());
    for group in rest.split('_') {
        if group.is_empty() || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        digits.push_str(group);
    }

    // Leading zeros don't count against the 24-bit limit
    let significant = digits.trim_start_matches('0');
    if significant.len() > 6 {
        return Err(invalid());
    }
    if significant.is_empty() {
        return Ok(0);
    }

    u32::from_str_radix(significant, 16)
        .ok()
        .filter(|value| *value <= MAX_COLOR)
        .ok_or_else(invalid)
}
