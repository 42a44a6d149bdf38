use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, Document, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Storage,
    Window,
};

use crate::config::{EffectsConfig, CONFIG_ELEMENT_ID};
use crate::error::{js_error, InitError};
use crate::scheduler::{BrowserScheduler, Scheduler};

pub struct PageSession {
    window: Window,
    document: Document,
    scheduler: Rc<dyn Scheduler>,
    config: EffectsConfig,
}

impl PageSession {
    pub fn attach() -> Result<Self, InitError> {
        let window = window().ok_or_else(|| InitError::missing("session", "window"))?;
        let document = window
            .document()
            .ok_or_else(|| InitError::missing("session", "document"))?;
        let config = read_config(&document);

        Ok(Self {
            window,
            document,
            scheduler: Rc::new(BrowserScheduler),
            config,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler)
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn local_storage(&self) -> Option<Storage> {
        self.window.local_storage().ok().flatten()
    }

    pub fn require_id(&self, component: &'static str, id: &str) -> Result<HtmlElement, InitError> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| InitError::missing(component, format!("#{id}")))
    }

    pub fn require(
        &self,
        component: &'static str,
        selector: &str,
    ) -> Result<HtmlElement, InitError> {
        self.query(selector)
            .ok_or_else(|| InitError::missing(component, selector))
    }

    pub fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    pub fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);

    (width, height)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Registers a page-lifetime listener; the closure is intentionally leaked.
pub fn listen(
    target: &EventTarget,
    component: &'static str,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), InitError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(js_error(component))?;
    callback.forget();
    Ok(())
}

fn read_config(document: &Document) -> EffectsConfig {
    let Some(source) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return EffectsConfig::default();
    };

    EffectsConfig::from_json(&source).unwrap_or_else(|error| {
        log::warn!("ignoring malformed #{CONFIG_ELEMENT_ID} block: {error}");
        EffectsConfig::default()
    })
}
