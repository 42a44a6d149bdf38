pub const REVEAL_SELECTOR: &str =
    ".section-title, .about-text, .skill-category, .project-card, .contact-intro, .contact-item";

/// Starts revealing slightly before the element reaches the bottom edge.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const VISIBLE_CLASS: &str = "visible";

#[cfg(target_arch = "wasm32")]
pub fn mount(session: &crate::session::PageSession) -> Result<(), crate::error::InitError> {
    use std::rc::Rc;

    use web_sys::Element;

    use crate::visibility::{observe_once, schedule_marks};

    let targets = session.query_all(REVEAL_SELECTOR);
    log::debug!("reveal: observing {} elements", targets.len());

    let scheduler = session.scheduler();
    let stagger_ms = session.config().reveal_stagger_ms;
    let mark: Rc<dyn Fn(&Element)> = Rc::new(|element: &Element| {
        let _ = element.class_list().add_1(VISIBLE_CLASS);
    });

    observe_once(
        "reveal",
        &targets,
        session.config().observer_threshold,
        REVEAL_ROOT_MARGIN,
        move |fired| schedule_marks(fired, scheduler.as_ref(), 0, stagger_ms, &mark),
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::visibility::{schedule_marks, TriggerOnce, VisibilityEntry};

    struct Page {
        scheduler: Rc<ManualScheduler>,
        trigger: TriggerOnce<&'static str>,
        visible: Rc<RefCell<HashSet<&'static str>>>,
        mark: Rc<dyn Fn(&&'static str)>,
    }

    impl Page {
        fn new(targets: &[&'static str]) -> Self {
            let mut trigger = TriggerOnce::new(0.15);
            for target in targets {
                trigger.arm(*target);
            }
            let visible = Rc::new(RefCell::new(HashSet::new()));
            let sink = Rc::clone(&visible);

            Self {
                scheduler: ManualScheduler::new(),
                trigger,
                visible,
                mark: Rc::new(move |target: &&'static str| {
                    sink.borrow_mut().insert(*target);
                }),
            }
        }

        fn notify(&mut self, batch: &[(&'static str, bool, f64)]) {
            let fired = self.trigger.fire(batch.iter().map(|(target, is_intersecting, ratio)| {
                VisibilityEntry {
                    target: *target,
                    is_intersecting: *is_intersecting,
                    ratio: *ratio,
                }
            }));
            schedule_marks(fired, self.scheduler.as_ref(), 0, 50, &self.mark);
        }

        fn is_visible(&self, target: &str) -> bool {
            self.visible.borrow().contains(target)
        }
    }

    #[test]
    fn below_threshold_element_is_never_revealed() {
        let mut page = Page::new(&["title"]);
        page.notify(&[("title", true, 0.1)]);
        page.scheduler.advance(1_000);

        assert!(!page.is_visible("title"));
    }

    #[test]
    fn revealed_element_stays_revealed_after_leaving_view() {
        let mut page = Page::new(&["card"]);
        page.notify(&[("card", true, 0.4)]);
        page.scheduler.advance(0);
        assert!(page.is_visible("card"));

        page.notify(&[("card", false, 0.0)]);
        page.scheduler.advance(1_000);
        assert!(page.is_visible("card"));
    }

    #[test]
    fn intersecting_entries_are_staggered_by_position() {
        let mut page = Page::new(&["a", "b", "c"]);
        page.notify(&[("a", true, 0.5), ("b", false, 0.0), ("c", true, 0.9)]);

        page.scheduler.advance(0);
        assert!(page.is_visible("a"));
        assert!(!page.is_visible("c"));

        page.scheduler.advance(50);
        assert!(page.is_visible("c"));
        assert!(!page.is_visible("b"));
    }
}
