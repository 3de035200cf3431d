use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::SiteConfig;
use crate::error::PageResult;

pub const PENDING_CLASS: &str = "animate-element";
pub const REVEALED_CLASS: &str = "animate-in";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub bottom_margin_px: u32,
}

impl RevealOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            bottom_margin_px: config.reveal_bottom_margin_px,
        }
    }

    /// Shrinks the viewport from the bottom so elements have to come in a bit
    /// before they count as seen.
    pub fn root_margin(&self) -> String {
        if self.bottom_margin_px == 0 {
            "0px".to_string()
        } else {
            format!("0px 0px -{}px 0px", self.bottom_margin_px)
        }
    }
}

/// Reveals elements the first time they scroll into view. Each element is
/// unobserved once revealed, so the class never comes off again.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn observe(targets: &[Element], options: RevealOptions) -> PageResult<Option<Self>> {
        if targets.is_empty() {
            return Ok(None);
        }

        let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for target in targets {
            let _ = target.class_list().add_1(PENDING_CLASS);
            observer.observe(target);
        }
        info!("Observing {} elements for reveal", targets.len());

        Ok(Some(Self { observer, _callback: callback }))
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
