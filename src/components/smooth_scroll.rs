use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::view::PageView;

/// Id an in-page anchor points at, or `None` for a bare `#`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that puts a section's top just below the fixed header.
pub fn scroll_top_for(offset_top: f64, header_offset: f64) -> f64 {
    (offset_top - header_offset).max(0.0)
}

fn scroll_to_anchor(window: &Window, link: &Element, header_offset: f64) {
    let Some(href) = link.get_attribute("href") else {
        return;
    };
    let Some(id) = anchor_target_id(&href) else {
        return;
    };
    let Some(target) = window
        .document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("Anchor #{} has no target", id);
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(scroll_top_for(f64::from(target.offset_top()), header_offset));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn wire(view: &PageView, header_offset: f64) -> Vec<EventListener> {
    let listeners: Vec<_> = view
        .anchors
        .iter()
        .map(|link| {
            let window = view.window.clone();
            let anchor = link.clone();
            EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    scroll_to_anchor(&window, &anchor, header_offset);
                },
            )
        })
        .collect();

    info!("Smooth scrolling wired for {} anchors", listeners.len());
    listeners
}
