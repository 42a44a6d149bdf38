pub const SKILL_SELECTOR: &str = ".skill-item";
pub const PROGRESS_SELECTOR: &str = ".skill-progress";
pub const LEVEL_ATTRIBUTE: &str = "data-level";
pub const LEVEL_PROPERTY: &str = "--skill-level";
pub const ANIMATE_CLASS: &str = "animate";

/// Level in percent, clamped to `0..=100`. `None` when absent or not a number.
pub fn parse_level(raw: Option<&str>) -> Option<f64> {
    raw?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|level| level.is_finite())
        .map(|level| level.clamp(0.0, 100.0))
}

pub fn level_css(level: f64) -> String {
    format!("{level}%")
}

#[cfg(target_arch = "wasm32")]
pub fn mount(session: &crate::session::PageSession) -> Result<(), crate::error::InitError> {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlElement};

    use crate::error::InitError;
    use crate::visibility::{observe_once, schedule_marks};

    const COMPONENT: &str = "skills";

    let items = session.query_all(SKILL_SELECTOR);
    for item in &items {
        let raw = item.get_attribute(LEVEL_ATTRIBUTE);
        let level = parse_level(raw.as_deref()).unwrap_or_else(|| {
            log::warn!("skills: unusable {LEVEL_ATTRIBUTE} {raw:?}, drawing an empty bar");
            0.0
        });

        let progress = item
            .query_selector(PROGRESS_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| {
                InitError::missing(COMPONENT, format!("{SKILL_SELECTOR} {PROGRESS_SELECTOR}"))
            })?;
        let _ = progress.style().set_property(LEVEL_PROPERTY, &level_css(level));
    }

    let scheduler = session.scheduler();
    let delay_ms = session.config().skill_animation_delay_ms;
    let mark: Rc<dyn Fn(&Element)> = Rc::new(|element: &Element| {
        let _ = element.class_list().add_1(ANIMATE_CLASS);
    });

    observe_once(
        COMPONENT,
        &items,
        session.config().skill_observer_threshold,
        "0px",
        move |fired| schedule_marks(fired, scheduler.as_ref(), delay_ms, 0, &mark),
    )
}
