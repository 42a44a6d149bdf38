use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::scheduler::Scheduler;

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

#[cfg(target_arch = "wasm32")]
pub struct MathRandom;

#[cfg(target_arch = "wasm32")]
impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Integer in `min..=max`. A reversed range is read as its swap.
pub fn random_int(rng: &mut impl RandomSource, min: i32, max: i32) -> i32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = f64::from(high) - f64::from(low) + 1.0;
    let offset = (rng.next_unit().clamp(0.0, 1.0) * span).floor();

    (f64::from(low) + offset).min(f64::from(high)) as i32
}

/// Runs `f` at most once per `limit_ms`. Calls made while closed are dropped.
pub fn throttle<A: 'static>(
    scheduler: Rc<dyn Scheduler>,
    limit_ms: u32,
    mut f: impl FnMut(A) + 'static,
) -> impl FnMut(A) + 'static {
    let closed = Rc::new(Cell::new(false));

    move |args| {
        if closed.get() {
            return;
        }

        f(args);
        closed.set(true);
        let closed = Rc::clone(&closed);
        scheduler.after(limit_ms, Box::new(move || closed.set(false)));
    }
}

/// Runs `f` with the latest arguments once calls stop for `wait_ms`.
pub fn debounce<A: 'static>(
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    f: impl FnMut(A) + 'static,
) -> impl FnMut(A) + 'static {
    let f = Rc::new(RefCell::new(f));
    let generation = Rc::new(Cell::new(0_u64));

    move |args| {
        let current = generation.get().wrapping_add(1);
        generation.set(current);

        let generation = Rc::clone(&generation);
        let f = Rc::clone(&f);
        scheduler.after(
            wait_ms,
            Box::new(move || {
                // superseded by a later call
                if generation.get() != current {
                    return;
                }
                let mut callback = f.borrow_mut();
                (*callback)(args);
            }),
        );
    }
}

#[cfg(test)]
pub(crate) struct SequenceRandom {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl SequenceRandom {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
