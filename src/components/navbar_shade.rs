use std::cell::RefCell;

use gloo_events::EventListener;
use log::{info, warn};
use web_sys::HtmlElement;

use crate::utils::throttle::{BrowserClock, Throttle};
use crate::view::PageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavShade {
    Default,
    Scrolled,
}

impl NavShade {
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            NavShade::Scrolled
        } else {
            NavShade::Default
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            NavShade::Default => "rgba(255, 255, 255, 0.95)",
            NavShade::Scrolled => "rgba(255, 255, 255, 0.98)",
        }
    }

    pub fn box_shadow(&self) -> &'static str {
        match self {
            NavShade::Default => "none",
            NavShade::Scrolled => "0 2px 10px rgba(0, 0, 0, 0.1)",
        }
    }

    fn apply(&self, nav: &HtmlElement) {
        let style = nav.style();
        if style.set_property("background", self.background()).is_err()
            || style.set_property("box-shadow", self.box_shadow()).is_err()
        {
            warn!("Could not restyle the navbar");
        }
    }
}

pub fn wire(view: &PageView, threshold: f64, throttle_ms: u32) -> Option<EventListener> {
    let nav = view.nav_bar.clone()?;
    let window = view.window.clone();

    let throttle = RefCell::new(Throttle::new(BrowserClock, throttle_ms, move || {
        let offset = window.page_y_offset().unwrap_or(0.0);
        NavShade::for_offset(offset, threshold).apply(&nav);
    }));

    info!("Navbar shading wired ({}ms throttle)", throttle_ms);
    Some(EventListener::new(&view.window, "scroll", move |_| {
        throttle.borrow_mut().call();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_flips_strictly_past_threshold() {
        assert_eq!(NavShade::for_offset(0.0, 50.0), NavShade::Default);
        assert_eq!(NavShade::for_offset(50.0, 50.0), NavShade::Default);
        assert_eq!(NavShade::for_offset(50.5, 50.0), NavShade::Scrolled);
    }

    #[test]
    fn scrolled_look_adds_a_shadow() {
        assert_eq!(NavShade::Scrolled.background(), "rgba(255, 255, 255, 0.98)");
        assert_eq!(NavShade::Scrolled.box_shadow(), "0 2px 10px rgba(0, 0, 0, 0.1)");
        assert_eq!(NavShade::Default.box_shadow(), "none");
    }
}
