//! Filename extraction from response headers, sanitization, and path resolution.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Filename used when the backend does not suggest one.
pub const DEFAULT_FILENAME: &str = "track.mp3";

/// Matches the simple quoted form `filename="value"` only.
///
/// Escaped quotes and the RFC 5987 `filename*=` form are not recognized.
#[allow(clippy::expect_used)]
static QUOTED_FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename="([^"]+)""#).expect("filename regex is valid") // Static pattern, safe to panic
});

/// Extracts the suggested filename from a `Content-Disposition` header value.
///
/// Returns `None` when the header carries no `filename="..."` parameter;
/// callers fall back to [`DEFAULT_FILENAME`].
///
/// # Examples
///
/// ```
/// use soundgrab_core::parse_content_disposition;
///
/// assert_eq!(
///     parse_content_disposition(r#"attachment; filename="song.mp3""#).as_deref(),
///     Some("song.mp3")
/// );
/// assert_eq!(parse_content_disposition("attachment"), None);
/// ```
#[must_use]
pub fn parse_content_disposition(header: &str) -> Option<String> {
    QUOTED_FILENAME_PATTERN
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decodes raw header bytes as ISO-8859-1.
///
/// HTTP servers commonly emit non-ASCII filenames as latin-1 octets, which
/// `HeaderValue::to_str` rejects.
#[must_use]
pub fn decode_header_latin1(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}

/// Resolves the suggested filename for an optional header value.
#[must_use]
pub fn suggested_filename(header: Option<&str>) -> String {
    header
        .and_then(parse_content_disposition)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

/// Resolves a unique file path in `dir`, adding `_2`, `_3`, ... if the name is taken.
pub(crate) fn resolve_unique_path(dir: &Path, filename: &str) -> PathBuf {
    let filename = {
        let sanitized = sanitize_filename(filename);
        if sanitized.trim_matches('_').is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            sanitized
        }
    };
    let base_path = dir.join(&filename);

    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) if pos > 0 => (&filename[..pos], &filename[pos..]),
        _ => (filename.as_str(), ""),
    };

    for i in 2..1000 {
        let new_path = dir.join(format!("{stem}_{i}{ext}"));
        if !new_path.exists() {
            return new_path;
        }
    }

    // Fallback (extremely unlikely)
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}_{timestamp}{ext}"))
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
