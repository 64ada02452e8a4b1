//! Filename derivation and sanitising.

use url::Url;

use crate::error::{Error, Result};

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error for `.`, `..` and names containing separators.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Last non-empty path segment of a URL, without query or fragment.
pub fn url_basename(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url) {
        return parsed
            .path_segments()?
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string);
    }

    // Not an absolute URL: treat it as a bare path
    let path = url.split(['?', '#']).next()?;
    path.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Lowercase extension of the URL basename, if it has one.
pub fn url_extension(url: &str) -> Option<String> {
    let basename = url_basename(url)?;
    let (stem, ext) = basename.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() || ext.len() > 10 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext.to_lowercase())
}

/// Safe on-disk name for the content behind `url`.
pub fn file_name_for_url(url: &str) -> Result<String> {
    let basename = url_basename(url)
        .ok_or_else(|| Error::InvalidFilename(format!("No file name in URL '{}'", url)))?;
    sanitize_filename(&basename)
}
