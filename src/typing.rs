use std::cell::RefCell;
use std::rc::Rc;

use crate::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub speed_ms: u32,
    pub pause_ms: u32,
    pub restart_pause_ms: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Tick<'a> {
    pub text: &'a str,
    pub changed: bool,
    pub delay_ms: u32,
}

pub struct TypingMachine {
    text: String,
    // byte offset after each char, starting with 0
    boundaries: Vec<usize>,
    index: usize,
    phase: Phase,
    timings: TypingTimings,
}

impl TypingMachine {
    pub fn new(text: impl Into<String>, timings: TypingTimings) -> Self {
        let text = text.into();
        let boundaries = std::iter::once(0)
            .chain(text.char_indices().map(|(offset, ch)| offset + ch.len_utf8()))
            .collect();

        Self {
            text,
            boundaries,
            index: 0,
            phase: Phase::Typing,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn displayed(&self) -> &str {
        &self.text[..self.boundaries[self.index]]
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.phase = Phase::Typing;
    }

    /// Advances one step. A tick at either end of the text changes nothing on
    /// screen; it flips the phase and returns the matching pause.
    pub fn tick(&mut self) -> Tick<'_> {
        let len = self.boundaries.len() - 1;

        let (changed, delay_ms) = match self.phase {
            Phase::Typing if self.index < len => {
                self.index += 1;
                (true, self.timings.speed_ms)
            }
            Phase::Typing => {
                self.phase = Phase::Deleting;
                (false, self.timings.pause_ms)
            }
            Phase::Deleting if self.index > 0 => {
                self.index -= 1;
                (true, self.timings.speed_ms / 2)
            }
            Phase::Deleting => {
                self.phase = Phase::Typing;
                (false, self.timings.restart_pause_ms)
            }
        };

        Tick {
            text: self.displayed(),
            changed,
            delay_ms,
        }
    }
}

/// Ticks `machine` now and then forever, rescheduling itself after each
/// tick's delay.
pub fn drive(
    machine: Rc<RefCell<TypingMachine>>,
    scheduler: Rc<dyn Scheduler>,
    render: Rc<dyn Fn(&str)>,
) {
    let delay_ms = {
        let mut machine = machine.borrow_mut();
        let tick = machine.tick();
        if tick.changed {
            render(tick.text);
        }
        tick.delay_ms
    };

    let next = Rc::clone(&scheduler);
    scheduler.after(
        delay_ms,
        Box::new(move || drive(machine, next, render)),
    );
}

#[cfg(target_arch = "wasm32")]
pub fn mount(session: &crate::session::PageSession) -> Result<(), crate::error::InitError> {
    let element = session.require_id("typing", "typingText")?;
    let config = session.config();
    let machine = TypingMachine::new(
        config.typing_text.clone(),
        TypingTimings {
            speed_ms: config.typing_speed_ms,
            pause_ms: config.typing_pause_ms,
            restart_pause_ms: config.typing_restart_pause_ms,
        },
    );

    element.set_text_content(Some(""));
    drive(
        Rc::new(RefCell::new(machine)),
        session.scheduler(),
        Rc::new(move |text: &str| element.set_text_content(Some(text))),
    );
    Ok(())
}
