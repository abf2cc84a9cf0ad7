pub mod format;
pub mod serde;

/// Treats blank strings the same as missing ones. Providers tend to send `""`
/// for unknown gates and terminals.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(non_empty(Some(" B12 ".to_owned())), Some("B12".to_owned()));
        assert_eq!(non_empty(Some("  ".to_owned())), None);
        assert_eq!(non_empty(None), None);
    }
}
