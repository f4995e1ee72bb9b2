use http::{HeaderMap, HeaderName, HeaderValue, header};

use crate::serve::range::ByteRange;

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    /// Inserts (or removes) a header from the map.
    ///
    /// Values that do not survive the `HeaderValue` conversion, or convert
    /// to an empty value, remove the header instead.
    pub(crate) fn insert(&mut self, name: HeaderName, value: &str) {
        let header_value = HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static(""));
        if header_value.is_empty() {
            self.headers.remove(name);
        } else {
            self.headers.insert(name, header_value);
        }
    }

    pub(crate) fn accept_ranges(&mut self) {
        self.insert(header::ACCEPT_RANGES, "bytes");
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_length(&mut self, value: &str) {
        self.insert(header::CONTENT_LENGTH, value);
    }

    pub(crate) fn content_range(&mut self, range: &ByteRange, len: u64) {
        self.insert(
            header::CONTENT_RANGE,
            &format!("bytes {}-{}/{}", range.start, range.end, len),
        );
    }

    pub(crate) fn etag(&mut self, value: &str) {
        self.insert(header::ETAG, value);
    }

    pub(crate) fn last_modified(&mut self, value: &str) {
        self.insert(header::LAST_MODIFIED, value);
    }

    pub(crate) fn location(&mut self, value: &str) {
        self.insert(header::LOCATION, value);
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
