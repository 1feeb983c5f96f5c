use serde::{Deserialize, Serialize};

/// Width used for both fields until the first real measurement.
pub const DEFAULT_WIDTH: f64 = 1280.0;

/// Live measurements injected into the wrapped component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub width: f64,
    pub viewport_width: f64,
}

impl Default for Measurement {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, viewport_width: DEFAULT_WIDTH }
    }
}

impl Measurement {
    /// Merge a staged update. Returns true if any value actually changed.
    pub fn merge(&mut self, update: MeasurementUpdate) -> bool {
        let before = *self;
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(viewport_width) = update.viewport_width {
            self.viewport_width = viewport_width;
        }
        *self != before
    }
}

/// Values collected during one measurement pass, not yet applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasurementUpdate {
    pub width: Option<f64>,
    pub viewport_width: Option<f64>,
}

impl MeasurementUpdate {
    pub fn stage_width(&mut self, width: f64) {
        self.width = Some(sanitize(width));
    }

    pub fn stage_viewport_width(&mut self, width: f64) {
        self.viewport_width = Some(sanitize(width));
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.viewport_width.is_none()
    }
}

// Layout never reports a negative width, but a detached node can report NaN.
fn sanitize(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 { width } else { 0.0 }
}
