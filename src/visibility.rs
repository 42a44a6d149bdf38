use std::rc::Rc;

use crate::scheduler::Scheduler;

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Targets still waiting to be seen. Each fires at most once.
pub struct TriggerOnce<T> {
    armed: Vec<T>,
    threshold: f64,
}

impl<T: PartialEq> TriggerOnce<T> {
    pub fn new(threshold: f64) -> Self {
        Self {
            armed: Vec::new(),
            threshold,
        }
    }

    pub fn arm(&mut self, target: T) {
        if !self.armed.contains(&target) {
            self.armed.push(target);
        }
    }

    pub fn is_armed(&self, target: &T) -> bool {
        self.armed.contains(target)
    }

    pub fn armed_len(&self) -> usize {
        self.armed.len()
    }

    /// Targets that became visible in this batch, in batch order.
    pub fn fire(&mut self, entries: impl IntoIterator<Item = VisibilityEntry<T>>) -> Vec<T> {
        let mut fired = Vec::new();

        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            let Some(index) = self.armed.iter().position(|armed| *armed == entry.target) else {
                continue;
            };
            fired.push(self.armed.remove(index));
        }

        fired
    }
}

/// Schedules `mark` for each fired target; the k-th runs after
/// `base_ms + k * stagger_ms`.
pub fn schedule_marks<T: 'static>(
    fired: Vec<T>,
    scheduler: &dyn Scheduler,
    base_ms: u32,
    stagger_ms: u32,
    mark: &Rc<dyn Fn(&T)>,
) {
    let mut delay_ms = base_ms;
    for target in fired {
        let mark = Rc::clone(mark);
        scheduler.after(delay_ms, Box::new(move || mark(&target)));
        delay_ms = delay_ms.saturating_add(stagger_ms);
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::observe_once;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::Array;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{
        Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit,
    };

    use super::{TriggerOnce, VisibilityEntry};
    use crate::error::{js_error, InitError};

    /// Watches `targets` and hands each batch of first-time crossings to
    /// `on_fire`. Fired targets are unobserved before `on_fire` runs.
    pub fn observe_once(
        component: &'static str,
        targets: &[HtmlElement],
        threshold: f64,
        root_margin: &str,
        mut on_fire: impl FnMut(Vec<Element>) + 'static,
    ) -> Result<(), InitError> {
        let trigger = Rc::new(RefCell::new(TriggerOnce::<Element>::new(threshold)));

        let armed = Rc::clone(&trigger);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });

                let fired = armed.borrow_mut().fire(entries);
                for target in &fired {
                    observer.unobserve(target);
                }
                if !fired.is_empty() {
                    on_fire(fired);
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(js_error(component))?;
        callback.forget();

        for target in targets {
            trigger.borrow_mut().arm(Element::from(target.clone()));
            observer.observe(target);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::scheduler::ManualScheduler;

    fn entry(
        target: &'static str,
        is_intersecting: bool,
        ratio: f64,
    ) -> VisibilityEntry<&'static str> {
        VisibilityEntry {
            target,
            is_intersecting,
            ratio,
        }
    }

    #[test]
    fn below_threshold_never_fires() {
        let mut trigger = TriggerOnce::new(0.15);
        trigger.arm("card");

        assert!(trigger.fire([entry("card", true, 0.05)]).is_empty());
        assert!(trigger.fire([entry("card", false, 0.0)]).is_empty());
        assert!(trigger.is_armed(&"card"));
    }

    #[test]
    fn fires_once_then_ignores_later_notifications() {
        let mut trigger = TriggerOnce::new(0.15);
        trigger.arm("card");

        assert_eq!(trigger.fire([entry("card", true, 0.2)]), vec!["card"]);
        assert!(!trigger.is_armed(&"card"));
        assert!(trigger.fire([entry("card", false, 0.0)]).is_empty());
        assert!(trigger.fire([entry("card", true, 1.0)]).is_empty());
    }

    #[test]
    fn batch_order_is_preserved_and_unknown_targets_skipped() {
        let mut trigger = TriggerOnce::new(0.5);
        for target in ["a", "b", "c"] {
            trigger.arm(target);
        }
        trigger.arm("a");
        assert_eq!(trigger.armed_len(), 3);

        let fired = trigger.fire([
            entry("c", true, 0.6),
            entry("stranger", true, 1.0),
            entry("b", false, 0.0),
            entry("a", true, 0.5),
        ]);

        assert_eq!(fired, vec!["c", "a"]);
        assert_eq!(trigger.armed_len(), 1);
    }

    #[test]
    fn ratio_exactly_at_threshold_fires_and_just_under_does_not() {
        let mut trigger = TriggerOnce::new(0.15);
        trigger.arm("title");

        assert!(trigger.fire([entry("title", true, 0.149_9)]).is_empty());
        assert!(trigger.is_armed(&"title"));
        assert_eq!(trigger.fire([entry("title", true, 0.15)]), vec!["title"]);
    }

    #[test]
    fn marks_are_staggered_from_the_base_delay() {
        let scheduler = ManualScheduler::new();
        let marked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&marked);
        let mark: Rc<dyn Fn(&&'static str)> =
            Rc::new(move |target: &&'static str| sink.borrow_mut().push(*target));

        schedule_marks(vec!["a", "b", "c"], scheduler.as_ref(), 100, 50, &mark);

        scheduler.advance(99);
        assert!(marked.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*marked.borrow(), vec!["a"]);
        scheduler.advance(100);
        assert_eq!(*marked.borrow(), vec!["a", "b", "c"]);
    }
}
