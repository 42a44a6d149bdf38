pub const PROFILE_SELECTOR: &str = ".profile-image";

/// Offset for a pointer at `(client_x, client_y)`: zero at the viewport
/// centre, `±amplitude / 2` at the edges. A zero-sized viewport gives zero.
pub fn parallax_offset(
    client_x: f64,
    client_y: f64,
    viewport: (f64, f64),
    amplitude: f64,
) -> (f64, f64) {
    let axis = |position: f64, extent: f64| {
        if extent > 0.0 {
            (position / extent - 0.5) * amplitude
        } else {
            0.0
        }
    };

    (axis(client_x, viewport.0), axis(client_y, viewport.1))
}

pub fn translate_css(x: f64, y: f64) -> String {
    format!("translate({x:.2}px, {y:.2}px)")
}

#[cfg(target_arch = "wasm32")]
pub fn mount(session: &crate::session::PageSession) -> Result<(), crate::error::InitError> {
    use wasm_bindgen::JsCast;
    use web_sys::{Event, MouseEvent};

    use crate::session::{listen, viewport_size};
    use crate::utils::throttle;

    let Some(profile) = session.query(PROFILE_SELECTOR) else {
        log::debug!("parallax: no {PROFILE_SELECTOR} on this page");
        return Ok(());
    };

    let window = session.window().clone();
    let amplitude = session.config().parallax_amplitude;
    let handler = throttle(
        session.scheduler(),
        session.config().pointer_throttle_ms,
        move |event: Event| {
            let Ok(event) = event.dyn_into::<MouseEvent>() else {
                return;
            };
            let (x, y) = parallax_offset(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                viewport_size(&window),
                amplitude,
            );
            let _ = profile.style().set_property("transform", &translate_css(x, y));
        },
    );

    listen(session.document(), "parallax", "mousemove", handler)
}
