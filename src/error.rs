//! Error types for the page controller

use thiserror::Error;

/// Errors raised while reading or mutating the page.
///
/// Every variant here is a setup defect: the page does not contain what the
/// configuration says it contains. They are reported, never recovered from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("Element '{0}' not found in page")]
    ElementNotFound(String),

    #[error("Element '{id}' is not a {expected}")]
    UnexpectedElement { id: String, expected: &'static str },

    #[error("Disclosure trigger '{0}' is not configured")]
    UnknownTrigger(String),

    #[error("Browser window is not available")]
    NoWindow,

    #[error("Invalid page configuration: {0}")]
    InvalidConfig(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PageError> for wasm_bindgen::JsValue {
    fn from(err: PageError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::InvalidConfig(err.to_string())
    }
}

/// Result type for page operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors raised by the `/chat` round trip.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    Decode(String),
}
