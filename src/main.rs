use std::cell::RefCell;

use gloo_events::EventListener;
use log::{error, info};
use web_sys::window;

mod config;
mod controller;
mod error;
mod styles;
mod view;
mod utils {
    pub mod scheduler;
    pub mod throttle;
}
mod components {
    pub mod contact_form;
    pub mod nav_toggle;
    pub mod navbar_shade;
    pub mod notice;
    pub mod reveal;
    pub mod section_highlight;
    pub mod smooth_scroll;
}

use controller::PageController;

thread_local! {
    static CONTROLLER: RefCell<Option<PageController>> = const { RefCell::new(None) };
}

/// Builds a fresh controller, dropping (and so detaching) any previous one.
fn mount() {
    let Some(window) = window() else {
        error!("No window, nothing to mount");
        return;
    };
    // Drop the old controller first so its listeners never see the new page.
    CONTROLLER.with(|slot| slot.borrow_mut().take());

    match PageController::mount(window) {
        Ok(controller) => CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller)),
        Err(e) => error!("Failed to mount page interactions: {}", e),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        web_sys::console::error_1(&format!("error initializing log: {}", e).into());
    }

    info!("Starting page interactions");

    let Some(document) = window().and_then(|w| w.document()) else {
        error!("No document available");
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount()).forget();
    } else {
        mount();
    }
}
