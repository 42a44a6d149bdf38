use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, AddEventListenerOptions};

use crate::orchestrator::{document_is_parsed, initialize_all, Mount};
use crate::session::PageSession;
use crate::{code_rain, navigation, parallax, reveal, scroll_top, skills, theme, typing};

const COMPONENTS: [(&str, Mount<PageSession>); 8] = [
    ("theme", theme::mount),
    ("typing", typing::mount),
    ("code_rain", code_rain::mount),
    ("navigation", navigation::mount),
    ("reveal", reveal::mount),
    ("skills", skills::mount),
    ("parallax", parallax::mount),
    ("scroll_to_top", scroll_top::mount),
];

fn start() {
    let session = match PageSession::attach() {
        Ok(session) => session,
        Err(error) => {
            log::error!("error initializing portfolio: {error}");
            return;
        }
    };
    log::set_max_level(session.config().log_level);

    initialize_all(&session, &COMPONENTS);
}

/// Runs `start` now, or once the document has finished parsing.
pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        log::error!("error initializing portfolio: no document");
        return;
    };

    if document_is_parsed(&document.ready_state()) {
        start();
        return;
    }

    let callback = Closure::once_into_js(start);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(error) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref(),
        &options,
    ) {
        log::error!("error initializing portfolio: {error:?}");
    }
}
