use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::scheduler::Scheduler;
use crate::utils::{random_int, RandomSource};

pub const CODE_SNIPPETS: [&str; 10] = [
    "const build = () => scalable();",
    "function deploy() { return production; }",
    "class Engineer { construct() }",
    "import { precision } from \"craft\";",
    "export default purpose;",
    "async function innovate() {}",
    "return quality.code();",
    "while(learning) { grow(); }",
    "if(challenge) solve();",
    "const future = await build();",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSpec {
    pub snippet: &'static str,
    pub left_percent: i32,
    pub duration_s: i32,
    pub delay_s: i32,
}

impl LineSpec {
    pub fn random(rng: &mut impl RandomSource) -> Self {
        let last = i32::try_from(CODE_SNIPPETS.len() - 1).unwrap_or(0);
        let index = usize::try_from(random_int(rng, 0, last)).unwrap_or(0);

        Self {
            snippet: CODE_SNIPPETS[index],
            left_percent: random_int(rng, 0, 100),
            duration_s: random_int(rng, 10, 20),
            delay_s: random_int(rng, 0, 5),
        }
    }
}

/// The container lines are drawn into.
pub trait RainCanvas {
    type Line: Clone;

    fn spawn(&self, spec: &LineSpec) -> Option<Self::Line>;

    /// Detaches `line`; does nothing if it is already gone.
    fn remove(&self, line: &Self::Line);
}

pub struct CodeRain<C: RainCanvas, R> {
    canvas: C,
    rng: R,
    lines: VecDeque<C::Line>,
    max_lines: usize,
}

impl<C: RainCanvas, R: RandomSource> CodeRain<C, R> {
    pub fn new(canvas: C, rng: R, max_lines: usize) -> Self {
        Self {
            canvas,
            rng,
            lines: VecDeque::with_capacity(max_lines),
            max_lines: max_lines.max(1),
        }
    }

    pub fn add_line(&mut self) -> Option<C::Line> {
        if self.lines.len() >= self.max_lines {
            if let Some(oldest) = self.lines.pop_front() {
                self.canvas.remove(&oldest);
            }
        }

        let spec = LineSpec::random(&mut self.rng);
        let line = self.canvas.spawn(&spec)?;
        self.lines.push_back(line.clone());
        Some(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &C::Line> {
        self.lines.iter()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RainTimings {
    pub seed_stagger_ms: u32,
    pub spawn_interval_ms: u32,
    pub lifetime_ms: u32,
}

/// Seeds a full screen of lines, staggered, then keeps adding one per interval.
pub fn start<C, R>(rain: Rc<RefCell<CodeRain<C, R>>>, scheduler: Rc<dyn Scheduler>, timings: RainTimings)
where
    C: RainCanvas + 'static,
    C::Line: 'static,
    R: RandomSource + 'static,
{
    let seed_count = rain.borrow().max_lines;
    let mut delay_ms: u32 = 0;
    for _ in 0..seed_count {
        let rain = Rc::clone(&rain);
        let inner = Rc::clone(&scheduler);
        scheduler.after(
            delay_ms,
            Box::new(move || spawn_with_lifetime(&rain, inner.as_ref(), timings.lifetime_ms)),
        );
        delay_ms = delay_ms.saturating_add(timings.seed_stagger_ms);
    }

    let inner = Rc::clone(&scheduler);
    scheduler.every(
        timings.spawn_interval_ms,
        Box::new(move || spawn_with_lifetime(&rain, inner.as_ref(), timings.lifetime_ms)),
    );
}

fn spawn_with_lifetime<C, R>(rain: &Rc<RefCell<CodeRain<C, R>>>, scheduler: &dyn Scheduler, lifetime_ms: u32)
where
    C: RainCanvas + 'static,
    C::Line: 'static,
    R: RandomSource + 'static,
{
    let Some(line) = rain.borrow_mut().add_line() else {
        log::debug!("code rain: could not create line");
        return;
    };

    let rain = Rc::clone(rain);
    scheduler.after(
        lifetime_ms,
        Box::new(move || rain.borrow().canvas().remove(&line)),
    );
}

#[cfg(target_arch = "wasm32")]
pub use dom::mount;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement};

    use super::{start, CodeRain, LineSpec, RainCanvas, RainTimings};
    use crate::error::InitError;
    use crate::session::PageSession;
    use crate::utils::MathRandom;

    struct DomRainCanvas {
        document: Document,
        container: HtmlElement,
    }

    impl RainCanvas for DomRainCanvas {
        type Line = HtmlElement;

        fn spawn(&self, spec: &LineSpec) -> Option<HtmlElement> {
            let line = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            line.set_class_name("code-line");
            line.set_text_content(Some(spec.snippet));

            let style = line.style();
            let _ = style.set_property("left", &format!("{}%", spec.left_percent));
            let _ = style.set_property("animation-duration", &format!("{}s", spec.duration_s));
            let _ = style.set_property("animation-delay", &format!("{}s", spec.delay_s));

            self.container.append_child(&line).ok()?;
            Some(line)
        }

        fn remove(&self, line: &HtmlElement) {
            // no-op when the line has no parent
            line.remove();
        }
    }

    pub fn mount(session: &PageSession) -> Result<(), InitError> {
        let container = session.require_id("code_rain", "codeRain")?;
        let config = session.config();
        let canvas = DomRainCanvas {
            document: session.document().clone(),
            container,
        };
        let rain = Rc::new(RefCell::new(CodeRain::new(canvas, MathRandom, config.max_lines)));

        start(
            rain,
            session.scheduler(),
            RainTimings {
                seed_stagger_ms: config.line_seed_stagger_ms,
                spawn_interval_ms: config.line_spawn_interval_ms,
                lifetime_ms: config.line_lifetime_ms,
            },
        );
        Ok(())
    }
}
