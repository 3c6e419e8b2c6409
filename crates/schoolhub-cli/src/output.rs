//! Output formatting helpers.

use anyhow::Result;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{:<12} {}", format!("{}:", label), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Display an optional value, with a dash for missing ones.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

/// Shorten text to `max` characters for table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("Math")), "Math");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Introduction to Algebra", 10), "Introduct…");
        assert_eq!(truncate("Introduction to Algebra", 10).chars().count(), 10);
    }
}
