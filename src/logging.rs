use log::Level;

/// Emits one JSON line: `{"event": ..., ...fields}`.
pub fn log_event(level: Level, event: &str, fields: serde_json::Value) {
    if level > log::max_level() {
        return;
    }
    log::log!(level, "{}", event_payload(event, fields));
}

pub fn event_payload(event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

/// Browser console logging. Until the page config is read only `info` and
/// above get through.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(Level::Debug).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
