//! Language detection for files handed to the CLI.
//!
//! Order: explicit id, then the configured `filetypes` tables, then the bare
//! file extension as a last-resort language id.

use std::path::Path;

use crate::config::NavigatorSettings;

/// Extension of `path` without the leading dot.
///
/// Hidden files without an extension (e.g. `.bashrc`) yield None.
pub fn detect_from_extension(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let dot = file_name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    let ext = &file_name[dot + 1..];
    (!ext.is_empty()).then(|| ext.to_string())
}

/// Pick the language id for `path`
pub fn detect_language(
    path: &Path,
    explicit: Option<&str>,
    settings: &NavigatorSettings,
) -> Option<String> {
    if let Some(language) = explicit {
        return Some(language.to_string());
    }

    let ext = detect_from_extension(path)?;
    settings.language_for_filetype(&ext).or(Some(ext))
}
