use crate::token::ItemType;

const FILE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico", "css", "scss", "sass",
];

/// Classify the body of a quoted literal as [`ItemType::File`] or
/// [`ItemType::Text`].
///
/// A literal is a file when it contains a `/` separator or a glob
/// wildcard, or ends in a known file extension. Backslashes are left
/// alone since quoted bodies keep their escapes.
#[must_use]
pub fn classify_literal(text: &str) -> ItemType {
    if text.contains(['/', '*', '?']) || has_file_extension(text) {
        ItemType::File
    } else {
        ItemType::Text
    }
}

fn has_file_extension(text: &str) -> bool {
    text.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty()
            && FILE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
    })
}
