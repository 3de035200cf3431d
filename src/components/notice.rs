use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement};

use crate::error::PageResult;

pub const NOTICE_CLASS: &str = "form-message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }

    fn palette(&self) -> &'static str {
        match self {
            NoticeKind::Success => "background: #d1f2df; color: #0f5132; border: 1px solid #b3e5c7;",
            NoticeKind::Error => "background: #f8d7da; color: #842029; border: 1px solid #f1aeb5;",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn class_name(&self) -> String {
        format!("{} {}-{}", NOTICE_CLASS, NOTICE_CLASS, self.kind.as_str())
    }

    pub fn css_text(&self) -> String {
        format!(
            "padding: 12px; margin: 16px 0; border-radius: 8px; font-weight: 500; text-align: center; {}",
            self.kind.palette()
        )
    }
}

/// Somewhere a single notice can be shown.
pub trait NoticeHost {
    fn remove_notice(&self);
    fn insert_notice(&self, notice: &Notice);

    /// Replaces whatever notice is showing. Never leaves two behind.
    fn show_notice(&self, notice: &Notice) {
        self.remove_notice();
        self.insert_notice(notice);
    }
}

/// Notices rendered as the first child of the contact form.
#[derive(Clone)]
pub struct FormNotices {
    document: Document,
    form: HtmlFormElement,
}

impl FormNotices {
    pub fn new(document: Document, form: HtmlFormElement) -> Self {
        Self { document, form }
    }

    fn build(&self, notice: &Notice) -> PageResult<HtmlElement> {
        let el = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| crate::error::PageError::Dom("created div is not an HtmlElement".into()))?;
        el.set_class_name(&notice.class_name());
        el.set_text_content(Some(&notice.text));
        el.style().set_css_text(&notice.css_text());
        Ok(el)
    }
}

impl NoticeHost for FormNotices {
    fn remove_notice(&self) {
        if let Ok(Some(existing)) = self.form.query_selector(&format!(".{}", NOTICE_CLASS)) {
            existing.remove();
        }
    }

    fn insert_notice(&self, notice: &Notice) {
        let inserted = self.build(notice).and_then(|el| {
            let first = self.form.first_child();
            self.form.insert_before(&el, first.as_ref())?;
            Ok(())
        });
        if let Err(e) = inserted {
            log::error!("Failed to show form notice: {}", e);
        }
    }
}
