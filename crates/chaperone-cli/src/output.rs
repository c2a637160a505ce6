//! Formatted output helpers for CLI commands.

/// Formats an optional uid for display (e.g., "1000", or "-" when unknown).
#[must_use]
pub fn format_uid(uid: Option<u32>) -> String {
    uid.map_or_else(|| "-".to_string(), |u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uid_displays_value() {
        assert_eq!(format_uid(Some(1000)), "1000");
    }

    #[test]
    fn format_uid_displays_placeholder_when_unknown() {
        assert_eq!(format_uid(None), "-");
    }
}
