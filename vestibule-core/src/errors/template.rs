use http::StatusCode;

/// Rendered when no registered responder answers an error.
pub const FALLBACK_ERROR_TEMPLATE: &str =
    "<html><body><h1>Error {{ code }}</h1><h2>{{ message }}</h2></body></html>";

pub(crate) fn reason_phrase(code: StatusCode) -> &'static str {
    code.canonical_reason().unwrap_or("Unknown Error")
}

/// HTML template with `{{ code }}` and `{{ message }}` placeholders.
#[derive(Debug, Clone)]
pub struct ErrorPageTemplate(String);

impl ErrorPageTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Substitutes the numeric code and its canonical reason phrase.
    pub fn render(&self, code: StatusCode) -> String {
        self.0
            .replace("{{ code }}", code.as_str())
            .replace("{{ message }}", reason_phrase(code))
    }
}
