use std::path::PathBuf;

use crate::config::FileServerSettings;

/// Outcome of mapping a request path onto the filesystem.
///
/// Resolution always terminates with one of these; whether the file exists
/// is discovered later by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request should be answered with a permanent redirect.
    Redirect(String),
    /// Candidate path under the files root.
    File(PathBuf),
}

/// Maps a raw request path to a redirect target or a filesystem path.
///
/// The path is percent-decoded exactly once, given an index-file
/// substitution when it names a directory, lexically normalized, and joined
/// under the configured root. Normalization clamps `..` at the root, so the
/// produced path can never escape it.
pub fn resolve_request_path(raw_path: &str, settings: &FileServerSettings) -> Resolution {
    let decoded = percent_encoding::percent_decode_str(raw_path).decode_utf8_lossy();
    let mut path = decoded.into_owned();

    let index = settings.index_file_name.as_str();

    // Answer .../{index} with a redirect to .../ before anything else.
    if settings.redirect_index_to_root && !index.is_empty() {
        if let Some(stripped) = path.strip_suffix(index) {
            if stripped.ends_with('/') {
                return Resolution::Redirect(stripped.to_string());
            }
        }
    }

    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    // A directory request (trailing slash, including the bare root) gets the
    // index file name appended. With no index name configured the directory
    // itself is left to fail later; directories are never served.
    if path.ends_with('/') && !index.is_empty() {
        path.push_str(index);
    }

    Resolution::File(settings.root.join(normalize(&path)))
}

/// Lexical normalization: collapses duplicate separators, drops `.`
/// segments, and resolves `..` against the segments seen so far. `..` at
/// the root is dropped rather than rejected, mirroring how a rooted path
/// cleans: `/../../etc/passwd` becomes `etc/passwd` under the root.
fn normalize(path: &str) -> PathBuf {
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    stack.into_iter().collect()
}
