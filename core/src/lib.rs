//! Container width tracking for component trees.
//!
//! A [`WidthObserver`] follows one provider instance through mount, resize and
//! unmount. It reads the width of a hidden full-width probe element through a
//! [`Host`], debounces resize signals, and asks the renderer to re-render the
//! wrapped component whenever the measured width (or, optionally, the viewport
//! width) changes.

pub mod config;
pub mod host;
pub mod measurement;
pub mod observer;
pub mod props;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ObserverConfig;
pub use host::Host;
pub use measurement::{DEFAULT_WIDTH, Measurement, MeasurementUpdate};
pub use observer::{Frame, ObserverRef, Phase, WidthObserver};
pub use props::{ProviderProps, WidthProps};
