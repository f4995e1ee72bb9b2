use std::time::SystemTime;

use httpdate::parse_http_date;

/// Weak ETag derived from content size and modification time.
pub(crate) fn entity_tag(size: u64, modified: SystemTime) -> String {
    let mtime_secs = modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    format!("W/\"{:x}-{:x}\"", size, mtime_secs)
}

/// Whether the ETag matches an If-None-Match header value. Comparison is
/// weak: `W/` prefixes are stripped on both sides.
pub(crate) fn none_match(etag: &str, if_none_match: &str) -> bool {
    if if_none_match.trim() == "*" {
        return true;
    }

    for candidate in if_none_match.split(',') {
        let candidate = candidate.trim();
        let candidate_value = candidate.strip_prefix("W/").unwrap_or(candidate);
        let etag_value = etag.strip_prefix("W/").unwrap_or(etag);
        if candidate_value == etag_value {
            return true;
        }
    }

    false
}

/// Whether content has been modified since the given HTTP date.
pub(crate) fn modified_since(modified: SystemTime, if_modified_since: &str) -> bool {
    let since = match parse_http_date(if_modified_since) {
        Ok(t) => t,
        Err(_) => return true, // unparseable header, assume modified
    };

    // HTTP dates carry 1-second resolution; sub-second deltas count as
    // not modified.
    match modified.duration_since(since) {
        Ok(delta) => delta.as_secs() >= 1,
        Err(_) => false,
    }
}
