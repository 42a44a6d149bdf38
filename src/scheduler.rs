/// Fire-and-forget timers. Nothing scheduled here is ever cancelled.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>);
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_timers::callback::{Interval, Timeout};

    use super::Scheduler;

    /// Page-lifetime timers backed by `gloo-timers`.
    pub struct BrowserScheduler;

    impl Scheduler for BrowserScheduler {
        fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            Timeout::new(delay_ms, task).forget();
        }

        fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) {
            Interval::new(period_ms, task).forget();
        }
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::Scheduler;

    enum Task {
        Once(Box<dyn FnOnce()>),
        Repeat {
            period_ms: u64,
            task: Box<dyn FnMut()>,
        },
    }

    struct Job {
        due_ms: u64,
        seq: u64,
        task: Task,
    }

    /// Virtual clock: timers only run inside `advance`.
    #[derive(Default)]
    pub(crate) struct ManualScheduler {
        now_ms: Cell<u64>,
        next_seq: Cell<u64>,
        jobs: RefCell<Vec<Job>>,
    }

    impl ManualScheduler {
        pub(crate) fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub(crate) fn now_ms(&self) -> u64 {
            self.now_ms.get()
        }

        pub(crate) fn pending(&self) -> usize {
            self.jobs.borrow().len()
        }

        /// Runs every timer due within the next `ms`, in due order and then
        /// scheduling order. Timers scheduled while advancing run too if due.
        pub(crate) fn advance(&self, ms: u64) {
            let target = self.now_ms.get() + ms;

            loop {
                let next = {
                    let jobs = self.jobs.borrow();
                    jobs.iter()
                        .enumerate()
                        .filter(|(_, job)| job.due_ms <= target)
                        .min_by_key(|(_, job)| (job.due_ms, job.seq))
                        .map(|(index, _)| index)
                };
                let Some(index) = next else {
                    break;
                };

                let job = self.jobs.borrow_mut().swap_remove(index);
                self.now_ms.set(job.due_ms);

                match job.task {
                    Task::Once(task) => task(),
                    Task::Repeat {
                        period_ms,
                        mut task,
                    } => {
                        task();
                        self.push(job.due_ms + period_ms, Task::Repeat { period_ms, task });
                    }
                }
            }

            self.now_ms.set(target);
        }

        fn push(&self, due_ms: u64, task: Task) {
            let seq = self.next_seq.get();
            self.next_seq.set(seq + 1);
            self.jobs.borrow_mut().push(Job { due_ms, seq, task });
        }
    }

    impl Scheduler for ManualScheduler {
        fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.push(self.now_ms.get() + u64::from(delay_ms), Task::Once(task));
        }

        fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) {
            let period_ms = u64::from(period_ms.max(1));
            self.push(self.now_ms.get() + period_ms, Task::Repeat { period_ms, task });
        }
    }
}
