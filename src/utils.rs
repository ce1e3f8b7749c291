// src/utils.rs

//! Utility functions for the Monad MCP server

/// Returns the value when it is present and not blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Returns the value, or `default` when it is absent or blank.
pub fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}

/// Returns true for empty or whitespace-only strings.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Adds the `0x` prefix to a hex string when it is missing.
pub fn with_hex_prefix(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        trimmed.to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_fall_back_to_default() {
        assert_eq!(or_default(None, "0"), "0");
        assert_eq!(or_default(Some("  ".into()), "0"), "0");
        assert_eq!(or_default(Some("12".into()), "0"), "12");
    }

    #[test]
    fn test_hex_prefix_is_added_once() {
        assert_eq!(with_hex_prefix("abcd"), "0xabcd");
        assert_eq!(with_hex_prefix("0xabcd"), "0xabcd");
    }
}
