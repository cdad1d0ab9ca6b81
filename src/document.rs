//! Output record for one listed item

use serde::Serialize;

/// One listed item resolved to its detail page
///
/// `text` is `None` when the detail page could not be fetched or had no
/// text region. Such a document is still written, with an empty text field,
/// so "listed but unreadable" stays distinguishable from "not listed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Absolute URL of the detail page
    pub url: String,

    /// Full document text, if extraction succeeded
    pub text: Option<String>,
}

impl Document {
    pub fn new(url: impl Into<String>, text: Option<String>) -> Self {
        Self {
            url: url.into(),
            text,
        }
    }

    /// Returns true if the text could not be extracted
    pub fn is_degraded(&self) -> bool {
        self.text.is_none()
    }
}
