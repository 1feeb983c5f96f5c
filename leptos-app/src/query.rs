use web_sys::window;

use width_observer_core::ObserverConfig;

/// Build a provider config from URL query parameters.
///
/// `config` may hold a whole JSON config; the individual keys
/// (`measureBeforeMount`, `breakpointFromViewport`, `resizeDelay`, `className`,
/// `style`) override it. Unparseable values are logged and ignored.
pub fn config_from_query(param: impl Fn(&str) -> Option<String>) -> ObserverConfig {
    let mut config = match param("config") {
        Some(json) => ObserverConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            ObserverConfig::default()
        }),
        None => ObserverConfig::default(),
    };

    if let Some(flag) = param("measureBeforeMount").and_then(|v| parse_flag("measureBeforeMount", &v)) {
        config.measure_before_mount = flag;
    }
    if let Some(flag) = param("breakpointFromViewport").and_then(|v| parse_flag("breakpointFromViewport", &v)) {
        config.breakpoint_from_viewport = flag;
    }
    if let Some(value) = param("resizeDelay") {
        match value.parse::<u32>() {
            Ok(millis) => config.resize_delay = millis,
            Err(_) => tracing::warn!("ignoring resizeDelay={:?}, expected milliseconds", value),
        }
    }
    if let Some(class) = param("className") {
        config.class_name = Some(class);
    }
    if let Some(style) = param("style") {
        config.style = Some(style);
    }
    config
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value {
        "" | "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => {
            tracing::warn!("ignoring {}={:?}, expected a boolean", key, value);
            None
        }
    }
}

/// Provider config taken from the current page URL, or the default outside a browser.
pub fn config_from_location() -> ObserverConfig {
    let params = window()
        .and_then(|win| win.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());
    match params {
        Some(params) => config_from_query(|key| params.get(key)),
        None => ObserverConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ObserverConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        config_from_query(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_query_is_default() {
        assert_eq!(query(&[]), ObserverConfig::default());
    }

    #[test]
    fn individual_keys_are_read() {
        let config = query(&[("resizeDelay", "150"), ("breakpointFromViewport", "true"), ("measureBeforeMount", ""), ("className", "grid")]);
        assert_eq!(config.resize_delay, 150);
        assert!(config.breakpoint_from_viewport);
        assert!(config.measure_before_mount);
        assert_eq!(config.class_name.as_deref(), Some("grid"));
    }

    #[test]
    fn keys_override_json_config() {
        let config = query(&[("config", r#"{"resizeDelay": 80, "breakpointFromViewport": true}"#), ("breakpointFromViewport", "0")]);
        assert_eq!(config.resize_delay, 80);
        assert!(!config.breakpoint_from_viewport);
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = query(&[("config", "{not json"), ("resizeDelay", "-3"), ("measureBeforeMount", "maybe")]);
        assert_eq!(config, ObserverConfig::default());
    }
}
