const BASE_STYLE: &str = "position: fixed; bottom: 2rem; right: 2rem; width: 50px; height: 50px; \
border-radius: 50%; background-color: var(--color-primary); color: white; border: none; \
font-size: 1.5rem; cursor: pointer; transition: all 0.3s ease; z-index: 999; \
box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);";

pub fn button_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn button_style(visible: bool, hovered: bool) -> String {
    let (opacity, visibility) = if visible {
        ("1", "visible")
    } else {
        ("0", "hidden")
    };
    let lift = if hovered { "-4px" } else { "0" };

    format!("{BASE_STYLE} opacity: {opacity}; visibility: {visibility}; transform: translateY({lift});")
}

#[cfg(target_arch = "wasm32")]
pub use dom::mount;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::rc::Rc;

    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{window, Event, MouseEvent};
    use yew::prelude::*;

    use super::{button_style, button_visible};
    use crate::error::{js_error, InitError};
    use crate::scheduler::BrowserScheduler;
    use crate::session::{smooth_scroll_to, PageSession};
    use crate::utils::throttle;

    const COMPONENT: &str = "scroll_to_top";

    #[derive(Properties, PartialEq)]
    struct ScrollToTopProps {
        threshold: f64,
        throttle_ms: u32,
    }

    #[function_component(ScrollToTop)]
    fn scroll_to_top(props: &ScrollToTopProps) -> Html {
        let visible = use_state_eq(|| false);
        let hovered = use_state_eq(|| false);

        {
            let visible = visible.clone();
            let threshold = props.threshold;
            let throttle_ms = props.throttle_ms;
            use_effect_with((), move |_| {
                let listener = window().and_then(|win| {
                    let source = win.clone();
                    let handler = throttle(Rc::new(BrowserScheduler), throttle_ms, move |_: Event| {
                        let scroll_y = source.scroll_y().unwrap_or(0.0);
                        visible.set(button_visible(scroll_y, threshold));
                    });
                    let callback = Closure::<dyn FnMut(Event)>::new(handler);
                    win.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                        .ok()
                        .map(|()| (win, callback))
                });

                move || {
                    if let Some((win, callback)) = listener {
                        let _ = win.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            });
        }

        let onclick = Callback::from(|_: MouseEvent| {
            if let Some(win) = window() {
                smooth_scroll_to(&win, 0.0);
            }
        });

        let onmouseenter = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(true))
        };

        let onmouseleave = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(false))
        };

        html! {
            <button
                class="scroll-to-top"
                type="button"
                aria-label="Scroll to top"
                style={button_style(*visible, *hovered)}
                onclick={onclick}
                onmouseenter={onmouseenter}
                onmouseleave={onmouseleave}
            >
                {"↑"}
            </button>
        }
    }

    pub fn mount(session: &PageSession) -> Result<(), InitError> {
        let document = session.document();
        let body = document
            .body()
            .ok_or_else(|| InitError::missing(COMPONENT, "body"))?;
        let host = document
            .create_element("div")
            .map_err(js_error(COMPONENT))?;
        host.set_class_name("scroll-to-top-host");
        body.append_child(&host).map_err(js_error(COMPONENT))?;

        yew::Renderer::<ScrollToTop>::with_root_and_props(
            host,
            ScrollToTopProps {
                threshold: session.config().scroll_top_threshold,
                throttle_ms: session.config().scroll_throttle_ms,
            },
        )
        .render();
        Ok(())
    }
}
