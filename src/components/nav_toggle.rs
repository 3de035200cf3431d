use std::rc::Rc;

use gloo_events::EventListener;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use crate::view::{query_all_within, PageView};

pub const PANEL_OPEN_CLASS: &str = "mobile-menu-open";
pub const TOGGLE_ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    Toggle,
    Link,
    /// Any click reaching the document, with where its target sits.
    Document { in_toggle: bool, in_panel: bool },
}

/// A click anywhere but the toggle or the panel counts as leaving the menu.
pub fn is_outside(in_toggle: bool, in_panel: bool) -> bool {
    !in_toggle && !in_panel
}

/// The open/closed look of the mobile menu.
pub trait MenuPanel {
    fn is_open(&self) -> bool;
    fn set_open(&self, open: bool);
}

pub fn handle_click<P: MenuPanel + ?Sized>(panel: &P, click: MenuClick) {
    match click {
        MenuClick::Toggle => panel.set_open(!panel.is_open()),
        MenuClick::Link => panel.set_open(false),
        MenuClick::Document { in_toggle, in_panel } => {
            if is_outside(in_toggle, in_panel) {
                panel.set_open(false);
            }
        }
    }
}

/// The toggle button and the panel it slides in.
struct DomMenu {
    toggle: Element,
    panel: Element,
}

impl MenuPanel for DomMenu {
    fn is_open(&self) -> bool {
        self.panel.class_list().contains(PANEL_OPEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        let _ = self.panel.class_list().toggle_with_force(PANEL_OPEN_CLASS, open);
        let _ = self.toggle.class_list().toggle_with_force(TOGGLE_ACTIVE_CLASS, open);
    }
}

pub fn wire(view: &PageView) -> Vec<EventListener> {
    let (Some(toggle), Some(panel)) = (view.menu_toggle.clone(), view.nav_links.clone()) else {
        return Vec::new();
    };
    let menu = Rc::new(DomMenu { toggle, panel });
    let mut listeners = Vec::new();

    {
        let menu = menu.clone();
        listeners.push(EventListener::new(&menu.toggle.clone(), "click", move |_| {
            handle_click(menu.as_ref(), MenuClick::Toggle)
        }));
    }

    for link in query_all_within::<Element>(&menu.panel, "a") {
        let menu = menu.clone();
        listeners.push(EventListener::new(&link, "click", move |_| {
            handle_click(menu.as_ref(), MenuClick::Link)
        }));
    }

    {
        let menu = menu.clone();
        listeners.push(EventListener::new(&view.document, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            let click = MenuClick::Document {
                in_toggle: menu.toggle.contains(Some(&target)),
                in_panel: menu.panel.contains(Some(&target)),
            };
            handle_click(menu.as_ref(), click);
        }));
    }

    info!("Mobile navigation wired");
    listeners
}
