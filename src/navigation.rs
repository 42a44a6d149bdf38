#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Where to scroll so the target clears the fixed header.
pub fn anchor_scroll_top(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

/// Index of the first section, in document order, whose span holds
/// `scroll_y + probe_offset`.
pub fn active_section(scroll_y: f64, probe_offset: f64, sections: &[SectionSpan]) -> Option<usize> {
    let position = scroll_y + probe_offset;
    sections.iter().position(|span| span.contains(position))
}

pub fn link_targets(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

#[cfg(target_arch = "wasm32")]
pub use dom::mount;

#[cfg(target_arch = "wasm32")]
mod dom {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, HtmlElement, Window};

    use super::{active_section, anchor_scroll_top, is_scrolled, link_targets, SectionSpan};
    use crate::error::InitError;
    use crate::session::{listen, smooth_scroll_to, PageSession};
    use crate::utils::throttle;

    const COMPONENT: &str = "navigation";

    pub fn mount(session: &PageSession) -> Result<(), InitError> {
        let nav = session.require(COMPONENT, ".nav")?;
        let links = session.query_all(r##".nav-links a[href^="#"]"##);
        let sections = session.query_all("section[id]");
        log::debug!(
            "navigation: {} anchor links, {} sections",
            links.len(),
            sections.len()
        );

        setup_scroll_effect(session, nav)?;
        setup_smooth_scroll(session, &links)?;
        setup_active_link(session, links, sections)
    }

    fn setup_scroll_effect(session: &PageSession, nav: HtmlElement) -> Result<(), InitError> {
        let window = session.window().clone();
        let threshold = session.config().scroll_threshold;

        let handler = throttle(
            session.scheduler(),
            session.config().scroll_throttle_ms,
            move |_event: Event| {
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                let _ = nav
                    .class_list()
                    .toggle_with_force("scrolled", is_scrolled(scroll_y, threshold));
            },
        );

        listen(session.window(), COMPONENT, "scroll", handler)
    }

    fn setup_smooth_scroll(session: &PageSession, links: &[HtmlElement]) -> Result<(), InitError> {
        let header_offset = session.config().header_offset;

        for link in links {
            let window = session.window().clone();
            let document = session.document().clone();
            let href_source = link.clone();

            listen(link, COMPONENT, "click", move |event: Event| {
                event.prevent_default();
                let Some(target) = href_source
                    .get_attribute("href")
                    .and_then(|href| find_section(&document, &href))
                else {
                    return;
                };

                scroll_to_section(&window, &target, header_offset);
            })?;
        }

        Ok(())
    }

    fn setup_active_link(
        session: &PageSession,
        links: Vec<HtmlElement>,
        sections: Vec<HtmlElement>,
    ) -> Result<(), InitError> {
        let window = session.window().clone();
        let probe_offset = session.config().active_probe_offset;

        let handler = throttle(
            session.scheduler(),
            session.config().scroll_throttle_ms,
            move |_event: Event| {
                let spans: Vec<SectionSpan> = sections
                    .iter()
                    .map(|section| SectionSpan {
                        top: f64::from(section.offset_top()),
                        height: f64::from(section.offset_height()),
                    })
                    .collect();
                let scroll_y = window.scroll_y().unwrap_or(0.0);

                let Some(index) = active_section(scroll_y, probe_offset, &spans) else {
                    return;
                };
                let section_id = sections[index].id();

                for link in &links {
                    let href = link.get_attribute("href").unwrap_or_default();
                    let _ = link
                        .class_list()
                        .toggle_with_force("active", link_targets(&href, &section_id));
                }
            },
        );

        listen(session.window(), COMPONENT, "scroll", handler)
    }

    fn find_section(document: &Document, href: &str) -> Option<HtmlElement> {
        document
            .query_selector(href)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn scroll_to_section(window: &Window, target: &HtmlElement, header_offset: f64) {
        let top = anchor_scroll_top(f64::from(target.offset_top()), header_offset);
        smooth_scroll_to(window, top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans() -> Vec<SectionSpan> {
        vec![
            SectionSpan {
                top: 0.0,
                height: 100.0,
            },
            SectionSpan {
                top: 100.0,
                height: 150.0,
            },
        ]
    }

    #[test]
    fn probe_below_first_section_activates_second() {
        assert_eq!(active_section(40.0, 100.0, &spans()), Some(1));
    }

    #[test]
    fn section_bounds_are_half_open() {
        assert_eq!(active_section(0.0, 0.0, &spans()), Some(0));
        assert_eq!(active_section(0.0, 99.9, &spans()), Some(0));
        assert_eq!(active_section(0.0, 100.0, &spans()), Some(1));
        assert_eq!(active_section(150.0, 100.0, &spans()), None);
    }

    #[test]
    fn overlapping_sections_resolve_to_document_order() {
        let overlapping = [
            SectionSpan {
                top: 0.0,
                height: 300.0,
            },
            SectionSpan {
                top: 100.0,
                height: 100.0,
            },
        ];
        assert_eq!(active_section(50.0, 100.0, &overlapping), Some(0));
    }

    #[test]
    fn scrolled_state_is_strictly_above_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }

    #[test]
    fn anchor_target_clears_header() {
        assert_eq!(anchor_scroll_top(640.0, 80.0), 560.0);
        assert_eq!(anchor_scroll_top(20.0, 80.0), -60.0);
    }

    #[test]
    fn link_matching_requires_exact_fragment() {
        assert!(link_targets("#about", "about"));
        assert!(!link_targets("#about-me", "about"));
        assert!(!link_targets("about", "about"));
    }
}
