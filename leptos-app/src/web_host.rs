use std::time::Duration;

use leptos::html::{Div, Iframe, Span};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::window;

use width_observer_core::Host;

use crate::require::Require;

/// Inline style for the probe: takes the container's full width and nothing else.
pub const PROBE_STYLE: &str = "height: 0; margin: 0; padding: 0; opacity: 0; overflow: hidden; border-width: 0; \
     position: absolute; background-color: transparent; width: 100%; pointer-events: none";

/// Resize subscription on the probe iframe's own window.
pub struct ResizeSubscription {
    window: web_sys::Window,
    callback: Closure<dyn Fn()>,
}

/// Browser host for one `WidthProvider` instance.
///
/// The probe is a zero-height `<iframe>`: its `contentWindow` fires `resize`
/// whenever the iframe's width changes, which is exactly when the container
/// width changes. Until the probe is rendered, the placeholder `<div>` stands in
/// for width readings.
#[derive(Clone, Copy, Default)]
pub struct WebHost {
    pub root: NodeRef<Span>,
    pub probe: NodeRef<Iframe>,
    pub placeholder: NodeRef<Div>,
}

impl WebHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for WebHost {
    type Listener = ResizeSubscription;
    type Timeout = TimeoutHandle;

    fn root_is_element(&self) -> bool {
        let root = self.root.get_untracked().map(|el| el.is_connected());
        let placeholder = self.placeholder.get_untracked().map(|el| el.is_connected());
        root.or(placeholder).unwrap_or(false)
    }

    fn probe_width(&self) -> Option<f64> {
        if let Some(probe) = self.probe.get_untracked() {
            return Some(f64::from(probe.offset_width()));
        }
        self.placeholder.get_untracked().map(|el| f64::from(el.offset_width()))
    }

    fn viewport_width(&self) -> Option<f64> {
        window().and_then(|w| w.inner_width().ok()).and_then(|v| v.as_f64())
    }

    fn add_resize_listener(&self, on_resize: Box<dyn Fn()>) -> Result<Option<ResizeSubscription>, String> {
        let Some(probe) = self.probe.get_untracked() else { return Ok(None) };
        let window = probe.content_window().require("probe content window")?;
        let callback = Closure::<dyn Fn()>::wrap(on_resize);
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref()).require("add resize listener")?;
        Ok(Some(ResizeSubscription { window, callback }))
    }

    fn remove_resize_listener(&self, listener: ResizeSubscription) -> Result<(), String> {
        let ResizeSubscription { window, callback } = listener;
        window.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref()).require("remove resize listener")
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<TimeoutHandle, String> {
        set_timeout_with_handle(callback, delay).require("schedule remeasure")
    }

    fn clear_timeout(&self, timeout: TimeoutHandle) {
        timeout.clear();
    }
}
