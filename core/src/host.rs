use std::time::Duration;

/// Capabilities the rendering host supplies to a [`WidthObserver`](crate::WidthObserver).
///
/// The browser implementation lives in the Leptos crate; tests use
/// `testing::FakeHost`. All calls happen on the host's single
/// event-loop thread, so callbacks are plain `'static` closures without `Send`.
pub trait Host: 'static {
    /// Subscription returned by [`Host::add_resize_listener`].
    type Listener;
    /// Pending one-shot timer returned by [`Host::set_timeout`].
    type Timeout;

    /// Whether the instance's rendered root is a real element (not text or nothing).
    fn root_is_element(&self) -> bool;

    /// Current offset width of the probe, or `None` if the probe is not rendered.
    fn probe_width(&self) -> Option<f64>;

    /// Global viewport width, or `None` when there is no viewport.
    fn viewport_width(&self) -> Option<f64>;

    /// Subscribe to resize signals of the window containing the probe.
    ///
    /// Returns `Ok(None)` when the probe is not rendered yet.
    fn add_resize_listener(&self, on_resize: Box<dyn Fn()>) -> Result<Option<Self::Listener>, String>;

    fn remove_resize_listener(&self, listener: Self::Listener) -> Result<(), String>;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<Self::Timeout, String>;

    fn clear_timeout(&self, timeout: Self::Timeout);
}
