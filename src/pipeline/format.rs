//! Reply text formatting.

use super::ErrorNotice;

/// Maximum number of characters of the original shown in a reply.
pub const PREVIEW_LIMIT: usize = 200;

const ELLIPSIS: char = '…';

/// Cuts `original` to at most [`PREVIEW_LIMIT`] characters.
///
/// Longer texts keep their first `PREVIEW_LIMIT - 3` characters followed by
/// an ellipsis.
pub fn preview(original: &str) -> String {
    if original.chars().count() <= PREVIEW_LIMIT {
        return original.to_string();
    }

    let mut cut: String = original.chars().take(PREVIEW_LIMIT - 3).collect();
    cut.push(ELLIPSIS);
    cut
}

impl ErrorNotice {
    /// The notice posted in place of a translation.
    pub fn text(&self) -> String {
        format!("Translation error for `{}`: {}", self.pair, self.error)
    }
}
