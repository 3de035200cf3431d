use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, error, info};
use web_sys::Window;

use crate::components::contact_form::{ContactForm, DomContactForm};
use crate::components::notice::FormNotices;
use crate::components::reveal::{RevealObserver, RevealOptions};
use crate::components::{nav_toggle, navbar_shade, section_highlight, smooth_scroll};
use crate::config::SiteConfig;
use crate::error::{PageError, PageResult};
use crate::styles::{self, INTERACTION_STYLES, LOADED_CLASS, LOAD_FADE_STYLES};
use crate::utils::scheduler::Scheduler;
use crate::view::PageView;

/// Owns everything the page's interactions hang off: listeners, the reveal
/// observer and pending timers. Dropping it detaches all of them.
pub struct PageController {
    config: Rc<SiteConfig>,
    scheduler: Scheduler,
    listeners: Vec<EventListener>,
    reveal: Option<RevealObserver>,
}

impl PageController {
    pub fn mount(window: Window) -> PageResult<Self> {
        let document = window.document().ok_or(PageError::MissingGlobal("document"))?;
        let config = Rc::new(SiteConfig::from_document(&document));
        let view = PageView::bind(window, &config)?;

        let mut controller = Self {
            config,
            scheduler: Scheduler::new(),
            listeners: Vec::new(),
            reveal: None,
        };

        controller.listeners.extend(nav_toggle::wire(&view));
        controller
            .listeners
            .extend(smooth_scroll::wire(&view, controller.config.header_offset_px));
        controller.wire_contact_form(&view);
        match RevealObserver::observe(&view.reveal_targets, RevealOptions::from_config(&controller.config)) {
            Ok(reveal) => controller.reveal = reveal,
            Err(e) => error!("Scroll animations disabled: {}", e),
        }
        controller
            .listeners
            .extend(section_highlight::wire(&view, controller.config.section_lead_px));
        controller.listeners.extend(navbar_shade::wire(
            &view,
            controller.config.scrolled_threshold_px,
            controller.config.scroll_throttle_ms,
        ));

        keep_going("inject interaction styles", styles::inject(&view.document, INTERACTION_STYLES));
        controller.wire_load_fade(&view);

        info!("Page interactions mounted ({} listeners)", controller.listeners.len());
        Ok(controller)
    }

    fn wire_contact_form(&mut self, view: &PageView) {
        let Some(form) = view.contact_form.clone() else {
            return;
        };
        let notices = FormNotices::new(view.document.clone(), form.clone());
        let surface = Rc::new(DomContactForm::new(view.window.clone(), form.clone(), notices));
        let contact = ContactForm::new(surface, self.scheduler.clone(), self.config.clone());

        self.listeners.push(EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                contact.submit();
            },
        ));
        info!("Contact form wired");
    }

    fn wire_load_fade(&mut self, view: &PageView) {
        let Some(body) = view.body.clone() else {
            return;
        };
        let document = view.document.clone();
        let fade_in = move || {
            keep_going("inject load styles", styles::inject(&document, LOAD_FADE_STYLES));
            let _ = body.class_list().add_1(LOADED_CLASS);
        };

        if view.document.ready_state() == "complete" {
            fade_in();
        } else {
            self.listeners
                .push(EventListener::once(&view.window, "load", move |_| fade_in()));
        }
    }
}

/// Logs a failed setup step so the rest of the mount can carry on. Returns
/// whether the step worked.
fn keep_going(step: &str, result: PageResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to {}: {}", step, e);
            false
        }
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        debug!(
            "Disposing page controller: {} listeners, {} pending tasks",
            self.listeners.len(),
            self.scheduler.pending_count()
        );
        self.scheduler.cancel_all();
    }
}
