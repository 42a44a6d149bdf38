use log::LevelFilter;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;
const DEFAULT_OBSERVER_THRESHOLD: f64 = 0.15;
const DEFAULT_SKILL_OBSERVER_THRESHOLD: f64 = 0.5;
const DEFAULT_SKILL_ANIMATION_DELAY_MS: u32 = 100;
const DEFAULT_TYPING_SPEED_MS: u32 = 80;
const DEFAULT_TYPING_PAUSE_MS: u32 = 2_000;
const DEFAULT_TYPING_RESTART_PAUSE_MS: u32 = 500;
const DEFAULT_TYPING_TEXT: &str = "Building scalable systems with precision and purpose";
const DEFAULT_MAX_LINES: usize = 15;
const DEFAULT_LINE_SPAWN_INTERVAL_MS: u32 = 2_000;
const DEFAULT_LINE_SEED_STAGGER_MS: u32 = 300;
const DEFAULT_LINE_LIFETIME_MS: u32 = 20_000;
const DEFAULT_HEADER_OFFSET: f64 = 80.0;
const DEFAULT_ACTIVE_PROBE_OFFSET: f64 = 100.0;
const DEFAULT_SCROLL_TOP_THRESHOLD: f64 = 500.0;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 100;
const DEFAULT_POINTER_THROTTLE_MS: u32 = 50;
const DEFAULT_PARALLAX_AMPLITUDE: f64 = 20.0;
const DEFAULT_REVEAL_STAGGER_MS: u32 = 50;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

const SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const OBSERVER_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const SKILL_ANIMATION_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const TYPING_PAUSE_MS_BOUNDS: (u32, u32) = (0, 60_000);
const MAX_LINES_BOUNDS: (usize, usize) = (1, 100);
const LINE_SPAWN_INTERVAL_MS_BOUNDS: (u32, u32) = (100, 60_000);
const LINE_SEED_STAGGER_MS_BOUNDS: (u32, u32) = (0, 10_000);
const LINE_LIFETIME_MS_BOUNDS: (u32, u32) = (1_000, 120_000);
const OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const THROTTLE_MS_BOUNDS: (u32, u32) = (0, 1_000);
const PARALLAX_AMPLITUDE_BOUNDS: (f64, f64) = (0.0, 200.0);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 1_000);

/// Overridable from `#portfolio-config`; out-of-bounds values keep the default.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub scroll_threshold: f64,
    pub observer_threshold: f64,
    pub skill_observer_threshold: f64,
    pub skill_animation_delay_ms: u32,
    pub typing_speed_ms: u32,
    pub typing_pause_ms: u32,
    pub typing_restart_pause_ms: u32,
    pub typing_text: String,
    pub max_lines: usize,
    pub line_spawn_interval_ms: u32,
    pub line_seed_stagger_ms: u32,
    pub line_lifetime_ms: u32,
    pub header_offset: f64,
    pub active_probe_offset: f64,
    pub scroll_top_threshold: f64,
    pub scroll_throttle_ms: u32,
    pub pointer_throttle_ms: u32,
    pub parallax_amplitude: f64,
    pub reveal_stagger_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            observer_threshold: DEFAULT_OBSERVER_THRESHOLD,
            skill_observer_threshold: DEFAULT_SKILL_OBSERVER_THRESHOLD,
            skill_animation_delay_ms: DEFAULT_SKILL_ANIMATION_DELAY_MS,
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            typing_pause_ms: DEFAULT_TYPING_PAUSE_MS,
            typing_restart_pause_ms: DEFAULT_TYPING_RESTART_PAUSE_MS,
            typing_text: DEFAULT_TYPING_TEXT.to_string(),
            max_lines: DEFAULT_MAX_LINES,
            line_spawn_interval_ms: DEFAULT_LINE_SPAWN_INTERVAL_MS,
            line_seed_stagger_ms: DEFAULT_LINE_SEED_STAGGER_MS,
            line_lifetime_ms: DEFAULT_LINE_LIFETIME_MS,
            header_offset: DEFAULT_HEADER_OFFSET,
            active_probe_offset: DEFAULT_ACTIVE_PROBE_OFFSET,
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            pointer_throttle_ms: DEFAULT_POINTER_THROTTLE_MS,
            parallax_amplitude: DEFAULT_PARALLAX_AMPLITUDE,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Overrides as written by the page; every field is optional.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEffectsConfig {
    scroll_threshold: Option<f64>,
    observer_threshold: Option<f64>,
    skill_observer_threshold: Option<f64>,
    skill_animation_delay_ms: Option<u32>,
    typing_speed_ms: Option<u32>,
    typing_pause_ms: Option<u32>,
    typing_restart_pause_ms: Option<u32>,
    typing_text: Option<String>,
    max_lines: Option<usize>,
    line_spawn_interval_ms: Option<u32>,
    line_seed_stagger_ms: Option<u32>,
    line_lifetime_ms: Option<u32>,
    header_offset: Option<f64>,
    active_probe_offset: Option<f64>,
    scroll_top_threshold: Option<f64>,
    scroll_throttle_ms: Option<u32>,
    pointer_throttle_ms: Option<u32>,
    parallax_amplitude: Option<f64>,
    reveal_stagger_ms: Option<u32>,
    log_level: Option<String>,
}

impl EffectsConfig {
    /// Parses an override block. Malformed JSON is reported so the caller can
    /// log it; individual out-of-range values silently keep their default.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawEffectsConfig = serde_json::from_str(source)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEffectsConfig) -> Self {
        Self {
            scroll_threshold: bounded_f64(
                raw.scroll_threshold,
                DEFAULT_SCROLL_THRESHOLD,
                SCROLL_THRESHOLD_BOUNDS,
            ),
            observer_threshold: bounded_f64(
                raw.observer_threshold,
                DEFAULT_OBSERVER_THRESHOLD,
                OBSERVER_THRESHOLD_BOUNDS,
            ),
            skill_observer_threshold: bounded_f64(
                raw.skill_observer_threshold,
                DEFAULT_SKILL_OBSERVER_THRESHOLD,
                OBSERVER_THRESHOLD_BOUNDS,
            ),
            skill_animation_delay_ms: bounded(
                raw.skill_animation_delay_ms,
                DEFAULT_SKILL_ANIMATION_DELAY_MS,
                SKILL_ANIMATION_DELAY_MS_BOUNDS,
            ),
            typing_speed_ms: bounded(
                raw.typing_speed_ms,
                DEFAULT_TYPING_SPEED_MS,
                TYPING_SPEED_MS_BOUNDS,
            ),
            typing_pause_ms: bounded(
                raw.typing_pause_ms,
                DEFAULT_TYPING_PAUSE_MS,
                TYPING_PAUSE_MS_BOUNDS,
            ),
            typing_restart_pause_ms: bounded(
                raw.typing_restart_pause_ms,
                DEFAULT_TYPING_RESTART_PAUSE_MS,
                TYPING_PAUSE_MS_BOUNDS,
            ),
            typing_text: raw
                .typing_text
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_TYPING_TEXT.to_string()),
            max_lines: bounded(raw.max_lines, DEFAULT_MAX_LINES, MAX_LINES_BOUNDS),
            line_spawn_interval_ms: bounded(
                raw.line_spawn_interval_ms,
                DEFAULT_LINE_SPAWN_INTERVAL_MS,
                LINE_SPAWN_INTERVAL_MS_BOUNDS,
            ),
            line_seed_stagger_ms: bounded(
                raw.line_seed_stagger_ms,
                DEFAULT_LINE_SEED_STAGGER_MS,
                LINE_SEED_STAGGER_MS_BOUNDS,
            ),
            line_lifetime_ms: bounded(
                raw.line_lifetime_ms,
                DEFAULT_LINE_LIFETIME_MS,
                LINE_LIFETIME_MS_BOUNDS,
            ),
            header_offset: bounded_f64(raw.header_offset, DEFAULT_HEADER_OFFSET, OFFSET_BOUNDS),
            active_probe_offset: bounded_f64(
                raw.active_probe_offset,
                DEFAULT_ACTIVE_PROBE_OFFSET,
                OFFSET_BOUNDS,
            ),
            scroll_top_threshold: bounded_f64(
                raw.scroll_top_threshold,
                DEFAULT_SCROLL_TOP_THRESHOLD,
                SCROLL_THRESHOLD_BOUNDS,
            ),
            scroll_throttle_ms: bounded(
                raw.scroll_throttle_ms,
                DEFAULT_SCROLL_THROTTLE_MS,
                THROTTLE_MS_BOUNDS,
            ),
            pointer_throttle_ms: bounded(
                raw.pointer_throttle_ms,
                DEFAULT_POINTER_THROTTLE_MS,
                THROTTLE_MS_BOUNDS,
            ),
            parallax_amplitude: bounded_f64(
                raw.parallax_amplitude,
                DEFAULT_PARALLAX_AMPLITUDE,
                PARALLAX_AMPLITUDE_BOUNDS,
            ),
            reveal_stagger_ms: bounded(
                raw.reveal_stagger_ms,
                DEFAULT_REVEAL_STAGGER_MS,
                REVEAL_STAGGER_MS_BOUNDS,
            ),
            log_level: parse_log_level(raw.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn bounded<T: PartialOrd + Copy>(value: Option<T>, default: T, bounds: (T, T)) -> T {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn bounded_f64(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    bounded(value.filter(|value| value.is_finite()), default, bounds)
}

fn parse_log_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    match value
        .map(|value| value.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = EffectsConfig::from_json("  ").expect("blank config is valid");
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.max_lines, 15);
        assert_eq!(config.typing_speed_ms, 80);
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = EffectsConfig::from_json(
            r#"{"maxLines": 4, "typingText": "  hello  ", "logLevel": "DEBUG", "headerOffset": 64}"#,
        )
        .expect("valid config");

        assert_eq!(config.max_lines, 4);
        assert_eq!(config.typing_text, "  hello  ");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.scroll_throttle_ms, 100);
    }

    #[test]
    fn out_of_range_values_keep_defaults() {
        let config = EffectsConfig::from_json(
            r#"{"maxLines": 0, "observerThreshold": 1.5, "typingText": "", "logLevel": "loud"}"#,
        )
        .expect("valid config");

        assert_eq!(config.max_lines, 15);
        assert_eq!(config.observer_threshold, 0.15);
        assert_eq!(config.typing_text, DEFAULT_TYPING_TEXT);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn unknown_keys_are_ignored_and_malformed_json_is_an_error() {
        assert!(EffectsConfig::from_json(r#"{"accent": "teal"}"#).is_ok());
        assert!(EffectsConfig::from_json("{maxLines: 3").is_err());
    }
}
