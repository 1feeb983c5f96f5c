use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration owned by the width provider itself.
///
/// None of these fields are ever forwarded to the wrapped component. Keys use
/// camelCase on the wire so a config can be written as
/// `{"measureBeforeMount": true, "resizeDelay": 150}`; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObserverConfig {
    /// If true, nothing but a placeholder is rendered until the first mount-time
    /// measurement completes. Avoids a visible resize right after mount.
    pub measure_before_mount: bool,
    /// Also track `window.innerWidth` and inject it as the viewport width.
    pub breakpoint_from_viewport: bool,
    /// Debounce window between a resize signal and the re-measurement, in milliseconds.
    pub resize_delay: u32,
    /// Class applied to the placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Inline style applied to the placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ObserverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure_before_mount(mut self, value: bool) -> Self {
        self.measure_before_mount = value;
        self
    }

    pub fn breakpoint_from_viewport(mut self, value: bool) -> Self {
        self.breakpoint_from_viewport = value;
        self
    }

    pub fn resize_delay(mut self, millis: u32) -> Self {
        self.resize_delay = millis;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// The debounce window as a `Duration`.
    pub fn resize_delay_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.resize_delay))
    }

    /// Parse a (possibly partial) JSON config object.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid observer config: {}", e))
    }
}
