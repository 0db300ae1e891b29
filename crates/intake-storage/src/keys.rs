//! Storage key generation.
//!
//! Key format: `requests/{timestamp_millis}_{sanitized_name}`. The timestamp
//! prefix keeps two submissions that reuse the same original file name from
//! colliding.

/// Sanitize an original file name for use in a storage key.
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`, and runs of `_`
/// collapse to a single one. The extension survives because `.` is kept.
/// Degenerate input falls back to `file`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_underscore = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            out.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }
    if out.is_empty() || out.chars().all(|c| c == '_' || c == '.') {
        "file".to_string()
    } else {
        out
    }
}

/// Generate the storage key for one attachment of a submission.
///
/// `submitted_at_millis` is shared by all files of the same submission, so a
/// batch stays grouped under one prefix.
pub fn storage_key(submitted_at_millis: i64, original_name: &str) -> String {
    format!(
        "requests/{}_{}",
        submitted_at_millis,
        sanitize_file_name(original_name)
    )
}
