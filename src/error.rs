use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a contact form submission was rejected. The `Display` text is what the
/// visitor sees in the error notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("browser global `{0}` is not available")]
    MissingGlobal(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type PageResult<T> = Result<T, PageError>;
