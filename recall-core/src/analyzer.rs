//! Answer-analysis response parsing.
//!
//! The analysis prompt asks the model for a comma-separated list of
//! matched fragments, or a literal sentinel when nothing matched. The
//! parser trusts the model's output verbatim aside from trimming; any
//! other formatting passes through the split unchanged.

/// Sentinel token the model returns when no fragment matched.
pub const NO_MATCH_SENTINEL: &str = "NONE";

/// Parse the analysis response into matched fragment names.
///
/// The sentinel (compared case-insensitively after trimming) maps to an
/// empty result; otherwise the text is split on commas, each piece
/// trimmed, and empty pieces dropped.
pub fn parse_matches(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case(NO_MATCH_SENTINEL) {
        return Vec::new();
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_maps_to_empty() {
        assert!(parse_matches("NONE").is_empty());
        assert!(parse_matches("none").is_empty());
        assert!(parse_matches("  None  ").is_empty());
    }

    #[test]
    fn test_comma_list_is_split_and_trimmed() {
        assert_eq!(
            parse_matches(" graduation , rain,hall "),
            vec!["graduation", "rain", "hall"]
        );
    }

    #[test]
    fn test_single_match() {
        assert_eq!(parse_matches("rain"), vec!["rain"]);
    }

    #[test]
    fn test_empty_and_stray_commas() {
        assert!(parse_matches("").is_empty());
        assert!(parse_matches(" , ,").is_empty());
        assert_eq!(parse_matches("rain,,hall,"), vec!["rain", "hall"]);
    }

    #[test]
    fn test_unexpected_formatting_passes_through() {
        // Not specially handled: anything that is not the sentinel is
        // split structurally and later ignored by the queue if it names
        // no known fragment.
        assert_eq!(
            parse_matches("The keywords are: rain"),
            vec!["The keywords are: rain"]
        );
    }
}
