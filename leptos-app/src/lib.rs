//! Leptos bindings for `width-observer-core`: the browser [`WebHost`], the
//! [`WidthProvider`] component and the [`with_width`] decorator.

mod debug_overlay;
pub mod query;
mod require;
pub mod web_host;
mod width_provider;

pub use debug_overlay::DebugOverlay;
pub use web_host::WebHost;
pub use width_observer_core::{Measurement, ObserverConfig, ProviderProps, WidthProps};
pub use width_provider::{LiveWidthProps, WidthProvider, WidthProviderRef, WithWidth, live_props, with_width};
