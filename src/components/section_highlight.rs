use gloo_events::EventListener;
use log::info;
use web_sys::{Element, HtmlElement, Window};

use crate::view::PageView;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    fn measure(section: &HtmlElement) -> Self {
        Self {
            id: section.id(),
            top: f64::from(section.offset_top()),
            height: f64::from(section.client_height()),
        }
    }

    fn contains(&self, offset: f64, lead: f64) -> bool {
        let start = self.top - lead;
        offset >= start && offset < start + self.height
    }
}

/// The section the reader is in. When spans overlap the later one wins.
pub fn current_section(spans: &[SectionSpan], offset: f64, lead: f64) -> Option<&str> {
    spans
        .iter()
        .rev()
        .find(|span| span.contains(offset, lead))
        .map(|span| span.id.as_str())
}

pub fn links_to(href: Option<&str>, id: &str) -> bool {
    href.and_then(|h| h.strip_prefix('#')) == Some(id)
}

/// Which links end up active, in order: the one pointing at the current
/// section, every other link cleared.
pub fn active_links(hrefs: &[Option<String>], current: Option<&str>) -> Vec<bool> {
    hrefs
        .iter()
        .map(|href| current.is_some_and(|id| links_to(href.as_deref(), id)))
        .collect()
}

fn highlight(window: &Window, sections: &[HtmlElement], links: &[Element], lead: f64) {
    let offset = window.page_y_offset().unwrap_or(0.0);
    let spans: Vec<_> = sections.iter().map(SectionSpan::measure).collect();
    let current = current_section(&spans, offset, lead);

    let hrefs: Vec<_> = links.iter().map(|link| link.get_attribute("href")).collect();
    for (link, active) in links.iter().zip(active_links(&hrefs, current)) {
        let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }
}

pub fn wire(view: &PageView, lead: f64) -> Option<EventListener> {
    if view.sections.is_empty() || view.nav_anchors.is_empty() {
        return None;
    }
    let window = view.window.clone();
    let sections = view.sections.clone();
    let links = view.nav_anchors.clone();

    info!("Section highlight wired for {} sections", sections.len());
    Some(EventListener::new(&view.window, "scroll", move |_| {
        highlight(&window, &sections, &links, lead);
    }))
}
