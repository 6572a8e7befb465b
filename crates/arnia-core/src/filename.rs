//! Filename and MIME helpers for the upload pipeline.
//!
//! All functions here are pure and total: there are no error conditions,
//! only default fallbacks. Unknown or unusable inputs degrade to `.jpg` /
//! `image/jpeg`, which is what the capture sources produce in practice.

use std::time::{SystemTime, UNIX_EPOCH};

/// Image extensions recognized when inferring from a source reference.
const KNOWN_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".heic", ".heif"];

/// Infer a file extension from the trailing path segment of a source
/// reference, ignoring any query string. Case-insensitive; defaults to
/// `.jpg` when nothing matches.
pub fn infer_extension(source_ref: &str) -> &'static str {
    let without_query = source_ref.split('?').next().unwrap_or("");
    let segment = without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .to_lowercase();

    KNOWN_EXTENSIONS
        .iter()
        .find(|ext| segment.ends_with(*ext))
        .copied()
        .unwrap_or(".jpg")
}

/// Trim the candidate, fall back when it is empty, and replace every
/// character outside `[A-Za-z0-9._-]` with `_`. Idempotent.
pub fn sanitize_filename(candidate: &str, fallback: &str) -> String {
    let trimmed = candidate.trim();
    let base = if trimmed.is_empty() { fallback } else { trimmed };
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve the filename for the multipart file part.
///
/// A blank or absent suggestion falls back to the trailing path segment of
/// the source reference when that carries a usable name (a direct path or
/// `file://` URI ending in a recognized extension), and synthesizes
/// `photo_<unix_millis><ext>` otherwise (provider URIs, query-string URLs).
/// A suggestion without an extension (no `.`, or a trailing `.`) gets the
/// extension inferred from the source reference appended; anything else is
/// used as-is after sanitization.
pub fn ensure_filename(suggested: Option<&str>, source_ref: &str) -> String {
    ensure_filename_at(suggested, source_ref, unix_millis())
}

/// Deterministic variant of [`ensure_filename`] for a fixed timestamp.
pub fn ensure_filename_at(suggested: Option<&str>, source_ref: &str, unix_millis: u128) -> String {
    let suggestion = suggested.map(str::trim).filter(|s| !s.is_empty());

    match suggestion {
        None => source_basename(source_ref)
            .unwrap_or_else(|| format!("photo_{}{}", unix_millis, infer_extension(source_ref))),
        Some(name) => {
            let sanitized = sanitize_filename(name, "photo");
            if has_extension(&sanitized) {
                sanitized
            } else {
                let stem = sanitized.trim_end_matches('.');
                format!("{}{}", stem, infer_extension(source_ref))
            }
        }
    }
}

/// Guess the MIME type from the filename suffix, case-insensitive.
/// Everything unrecognized is treated as JPEG.
pub fn guess_mime_type(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".heic") || lower.ends_with(".heif") {
        "image/heic"
    } else {
        "image/jpeg"
    }
}

/// Trailing path segment of a direct reference, when it names a real file.
///
/// Provider URIs segment by opaque ids and query-string URLs by tokens, so
/// neither yields a trustworthy name; both return `None` and the caller
/// synthesizes one instead.
fn source_basename(source_ref: &str) -> Option<String> {
    if source_ref.contains('?') {
        return None;
    }
    if source_ref.contains("://") && !source_ref.starts_with("file://") {
        return None;
    }

    let segment = source_ref.rsplit(['/', '\\']).next().unwrap_or("");
    let lower = segment.to_lowercase();
    let usable = KNOWN_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext) && lower.len() > ext.len());
    if usable {
        Some(sanitize_filename(segment, "photo"))
    } else {
        None
    }
}

fn has_extension(name: &str) -> bool {
    match name.rfind('.') {
        // A trailing dot is not a usable extension.
        Some(idx) => idx + 1 < name.len(),
        None => false,
    }
}

/// Milliseconds since the Unix epoch, used for synthesized and
/// collision-resistant cache names.
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_extension_basic() {
        assert_eq!(infer_extension("file:///tmp/img.jpg"), ".jpg");
        assert_eq!(infer_extension("/photos/tray.PNG"), ".png");
        assert_eq!(infer_extension("content://media/1234.HEIC"), ".heic");
        assert_eq!(infer_extension("shot.webp"), ".webp");
        assert_eq!(infer_extension("scan.heif"), ".heif");
        assert_eq!(infer_extension("picture.JPEG"), ".jpeg");
    }

    #[test]
    fn test_infer_extension_ignores_query() {
        assert_eq!(infer_extension("https://host/img.png?token=xyz"), ".png");
        assert_eq!(infer_extension("https://host/img?format=png"), ".jpg");
    }

    #[test]
    fn test_infer_extension_defaults() {
        assert_eq!(infer_extension(""), ".jpg");
        assert_eq!(infer_extension("content://media/external/1234"), ".jpg");
        assert_eq!(infer_extension("no_extension_here"), ".jpg");
    }

    #[test]
    fn test_sanitize_charset() {
        let out = sanitize_filename("tray photo (1).jpg", "photo");
        assert_eq!(out, "tray_photo__1_.jpg");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn test_sanitize_idempotent() {
        let once = sanitize_filename("arnia #3 / est.png", "photo");
        let twice = sanitize_filename(&once, "photo");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_fallback() {
        assert_eq!(sanitize_filename("   ", "photo"), "photo");
        assert_eq!(sanitize_filename("", "fall back"), "fall_back");
    }

    #[test]
    fn test_ensure_filename_appends_inferred_extension() {
        assert_eq!(
            ensure_filename_at(Some("tray_shot"), "/tmp/img.png", 0),
            "tray_shot.png"
        );
        assert_eq!(
            ensure_filename_at(Some("tray_shot."), "/tmp/img.webp", 0),
            "tray_shot.webp"
        );
    }

    #[test]
    fn test_ensure_filename_preserves_existing_extension() {
        assert_eq!(
            ensure_filename_at(Some("img.JPG"), "/tmp/other.png", 0),
            "img.JPG"
        );
        assert_eq!(
            ensure_filename_at(Some("img.jpeg"), "anything", 0),
            "img.jpeg"
        );
    }

    #[test]
    fn test_ensure_filename_derives_basename_from_direct_source() {
        assert_eq!(
            ensure_filename_at(None, "file:///tmp/img.jpg", 42),
            "img.jpg"
        );
        assert_eq!(
            ensure_filename_at(None, "/photos/tray shot.PNG", 42),
            "tray_shot.PNG"
        );
        assert_eq!(
            ensure_filename_at(Some("   "), "/tmp/shot.jpg", 42),
            "shot.jpg"
        );
    }

    #[test]
    fn test_ensure_filename_synthesizes_when_source_has_no_usable_name() {
        assert_eq!(
            ensure_filename_at(None, "https://host/pic.png?token=xyz", 1700000000000),
            "photo_1700000000000.png"
        );
        assert_eq!(
            ensure_filename_at(None, "content://media/external/1234", 42),
            "photo_42.jpg"
        );
        // An extension alone is not a name.
        assert_eq!(
            ensure_filename_at(None, "/tmp/.jpg", 42),
            "photo_42.jpg"
        );
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("a.png"), "image/png");
        assert_eq!(guess_mime_type("a.WEBP"), "image/webp");
        assert_eq!(guess_mime_type("a.heic"), "image/heic");
        assert_eq!(guess_mime_type("a.heif"), "image/heic");
        assert_eq!(guess_mime_type("a.jpg"), "image/jpeg");
        assert_eq!(guess_mime_type("no_extension"), "image/jpeg");
    }

    #[test]
    fn test_guess_mime_type_idempotent_through_filenames() {
        // Feeding a typical filename for each MIME back in reproduces the MIME.
        for name in ["x.jpg", "x.jpeg", "x.png", "x.webp", "x.heic", "x.heif"] {
            let mime = guess_mime_type(name);
            let typical = format!("photo.{}", mime.rsplit('/').next().unwrap());
            // image/heic -> photo.heic, image/jpeg -> photo.jpeg, etc.
            assert_eq!(guess_mime_type(&typical), mime);
        }
    }
}
