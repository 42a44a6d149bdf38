//! Page effects for the portfolio site.

pub mod code_rain;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod orchestrator;
pub mod parallax;
pub mod reveal;
pub mod scheduler;
pub mod scroll_top;
pub mod skills;
pub mod theme;
pub mod typing;
pub mod utils;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
#[cfg(target_arch = "wasm32")]
pub mod session;
