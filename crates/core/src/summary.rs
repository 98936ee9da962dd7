//! Summary text normalization.

/// Maximum summary length in characters, ellipsis included.
pub const MAX_SUMMARY_LENGTH: usize = 200;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: char = '…';

/// Trim and bound article text for display.
///
/// Returns an empty string for missing or blank input. Text longer than
/// [`MAX_SUMMARY_LENGTH`] characters is cut to its first 199 characters,
/// trailing whitespace removed, and terminated with [`ELLIPSIS`].
pub fn truncate_summary(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let summary = text.trim();
    if summary.chars().count() <= MAX_SUMMARY_LENGTH {
        return summary.to_string();
    }

    let cut = summary
        .char_indices()
        .nth(MAX_SUMMARY_LENGTH - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(summary.len());

    let mut truncated = summary[..cut].trim_end().to_string();
    truncated.push(ELLIPSIS);
    truncated
}
