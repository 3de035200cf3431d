use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, Window};

use crate::config::SiteConfig;
use crate::error::{PageError, PageResult};

pub const MENU_TOGGLE: &str = ".mobile-menu-toggle";
pub const NAV_LINKS: &str = ".nav-links";
pub const NAV_BAR: &str = ".nav";
pub const CONTACT_FORM: &str = ".contact-form-element";
pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
pub const NAV_ANCHORS: &str = ".nav-links a[href^=\"#\"]";
pub const SECTIONS: &str = "section[id]";

/// Every element the controller touches, looked up once when the page is
/// ready. Optional pieces are `None` when the markup leaves them out.
pub struct PageView {
    pub window: Window,
    pub document: Document,
    pub body: Option<HtmlElement>,
    pub nav_bar: Option<HtmlElement>,
    pub menu_toggle: Option<Element>,
    pub nav_links: Option<Element>,
    pub contact_form: Option<HtmlFormElement>,
    pub anchors: Vec<Element>,
    pub nav_anchors: Vec<Element>,
    pub sections: Vec<HtmlElement>,
    pub reveal_targets: Vec<Element>,
}

impl PageView {
    pub fn bind(window: Window, config: &SiteConfig) -> PageResult<Self> {
        let document = window.document().ok_or(PageError::MissingGlobal("document"))?;

        let view = Self {
            body: document.body(),
            nav_bar: query_one(&document, NAV_BAR),
            menu_toggle: query_one(&document, MENU_TOGGLE),
            nav_links: query_one(&document, NAV_LINKS),
            contact_form: query_one(&document, CONTACT_FORM),
            anchors: query_all(&document, IN_PAGE_ANCHORS),
            nav_anchors: query_all(&document, NAV_ANCHORS),
            sections: query_all(&document, SECTIONS),
            reveal_targets: query_all(&document, &config.reveal_selector()),
            window,
            document,
        };

        for (selector, present) in [
            (NAV_BAR, view.nav_bar.is_some()),
            (MENU_TOGGLE, view.menu_toggle.is_some()),
            (NAV_LINKS, view.nav_links.is_some()),
            (CONTACT_FORM, view.contact_form.is_some()),
        ] {
            if !present {
                warn!("No {} on this page, its behavior is disabled", selector);
            }
        }
        debug!(
            "Bound {} anchors, {} sections, {} reveal targets",
            view.anchors.len(),
            view.sections.len(),
            view.reveal_targets.len()
        );

        Ok(view)
    }
}

pub fn query_one<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_all<T: JsCast>(root: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        warn!("Invalid selector {:?}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn query_all_within<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}
