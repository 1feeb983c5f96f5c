use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    config::ObserverConfig,
    host::Host,
    measurement::{Measurement, MeasurementUpdate},
};

/// Lifecycle of one provider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    /// Mounted, but the mount-time measurement pass has not finished.
    AwaitingFirstMeasurement,
    Measured,
}

impl Phase {
    pub fn is_mounted(self) -> bool {
        !matches!(self, Phase::Unmounted)
    }
}

/// What the provider should render right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Only the placeholder container; the wrapped component is not rendered.
    Placeholder,
    /// The probe plus the wrapped component, fed with these measurements.
    Content(Measurement),
}

impl Frame {
    pub fn measurement(&self) -> Option<Measurement> {
        match self {
            Frame::Placeholder => None,
            Frame::Content(m) => Some(*m),
        }
    }
}

struct Shared<H: Host> {
    host: H,
    state: RefCell<State<H>>,
}

struct State<H: Host> {
    config: ObserverConfig,
    phase: Phase,
    measurement: Measurement,
    listener: Option<H::Listener>,
    pending: Option<H::Timeout>,
    on_render: Option<Rc<dyn Fn(Frame)>>,
}

impl<H: Host> State<H> {
    fn frame(&self) -> Frame {
        if self.config.measure_before_mount && self.phase != Phase::Measured {
            Frame::Placeholder
        } else {
            Frame::Content(self.measurement)
        }
    }
}

/// Tracks the rendered width of one provider instance.
///
/// Cloning yields another handle to the same instance. Listener and timer
/// callbacks only hold weak handles, so dropping every `WidthObserver` drops the
/// instance even while a debounce is still pending.
pub struct WidthObserver<H: Host> {
    shared: Rc<Shared<H>>,
}

impl<H: Host> Clone for WidthObserver<H> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<H: Host> WidthObserver<H> {
    pub fn new(host: H, config: ObserverConfig) -> Self {
        let state = State {
            config,
            phase: Phase::Unmounted,
            measurement: Measurement::default(),
            listener: None,
            pending: None,
            on_render: None,
        };
        Self { shared: Rc::new(Shared { host, state: RefCell::new(state) }) }
    }

    /// Register the callback that re-renders the provider with a new [`Frame`].
    pub fn set_on_render(&self, on_render: impl Fn(Frame) + 'static) {
        self.shared.state.borrow_mut().on_render = Some(Rc::new(on_render));
    }

    pub fn host(&self) -> &H {
        &self.shared.host
    }

    pub fn config(&self) -> ObserverConfig {
        self.shared.state.borrow().config.clone()
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub fn measurement(&self) -> Measurement {
        self.shared.state.borrow().measurement
    }

    pub fn frame(&self) -> Frame {
        self.shared.state.borrow().frame()
    }

    /// Whether a debounced remeasure is scheduled.
    pub fn has_pending_remeasure(&self) -> bool {
        self.shared.state.borrow().pending.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.shared.state.borrow().listener.is_some()
    }

    /// Mark the instance mounted, subscribe to resizes and measure right away.
    ///
    /// The mount-time pass ignores `resize_delay`. Mounting twice is a no-op.
    pub fn mount(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase.is_mounted() {
                return;
            }
            state.phase = Phase::AwaitingFirstMeasurement;
        }
        tracing::debug!("width observer mounted");
        self.attach_listener();
        self.remeasure();
    }

    /// Subscribe to the probe window's resize signal if not subscribed yet.
    ///
    /// Returns whether a listener is attached afterwards. With
    /// `measure_before_mount` the probe only appears after the first
    /// measurement, so the renderer calls this again once it is in the tree.
    /// A subscription made after the first measurement is followed by a pass,
    /// since that measurement was taken from the placeholder.
    pub fn attach_listener(&self) -> bool {
        let late = {
            let mut state = self.shared.state.borrow_mut();
            if !state.phase.is_mounted() {
                return false;
            }
            if state.listener.is_some() {
                return true;
            }

            let weak = Rc::downgrade(&self.shared);
            let on_resize = Box::new(move || {
                if let Some(observer) = Self::upgrade(&weak) {
                    observer.on_resize();
                }
            });
            match self.shared.host.add_resize_listener(on_resize) {
                Ok(Some(listener)) => {
                    tracing::debug!("resize listener attached");
                    state.listener = Some(listener);
                    state.phase == Phase::Measured
                }
                Ok(None) => {
                    tracing::debug!("probe not rendered, resize listener deferred");
                    return false;
                }
                Err(e) => {
                    tracing::warn!("Failed to attach resize listener: {}", e);
                    return false;
                }
            }
        };

        if late {
            self.remeasure();
        }
        true
    }

    /// Handle one resize signal: restart the debounce window.
    pub fn on_resize(&self) {
        let mut state = self.shared.state.borrow_mut();
        if !state.phase.is_mounted() {
            return;
        }
        if let Some(pending) = state.pending.take() {
            self.shared.host.clear_timeout(pending);
        }

        let weak = Rc::downgrade(&self.shared);
        let fire = Box::new(move || {
            if let Some(observer) = Self::upgrade(&weak) {
                observer.shared.state.borrow_mut().pending = None;
                observer.remeasure();
            }
        });
        match self.shared.host.set_timeout(state.config.resize_delay_duration(), fire) {
            Ok(timeout) => state.pending = Some(timeout),
            Err(e) => tracing::warn!("Failed to schedule remeasure: {}", e),
        }
    }

    /// Run one measurement pass now. No-op unless mounted.
    ///
    /// Returns whether a re-render was requested.
    pub fn remeasure(&self) -> bool {
        let (on_render, frame) = {
            let mut state = self.shared.state.borrow_mut();
            if !state.phase.is_mounted() {
                tracing::trace!("measurement skipped, not mounted");
                return false;
            }

            let host = &self.shared.host;
            let mut update = MeasurementUpdate::default();
            if host.root_is_element() {
                match host.probe_width() {
                    Some(width) => update.stage_width(width),
                    None => tracing::debug!("probe not rendered, width not measured"),
                }
            }
            if state.config.breakpoint_from_viewport {
                if let Some(width) = host.viewport_width() {
                    update.stage_viewport_width(width);
                }
            }

            let first = state.phase == Phase::AwaitingFirstMeasurement;
            state.phase = Phase::Measured;
            let changed = !update.is_empty() && state.measurement.merge(update);
            // Leaving the placeholder is a visible change even if the numbers are not.
            let reveal = first && state.config.measure_before_mount;
            if !changed && !reveal {
                return false;
            }
            tracing::trace!(width = state.measurement.width, viewport_width = state.measurement.viewport_width, "measurement changed");
            (state.on_render.clone(), state.frame())
        };

        if let Some(on_render) = on_render {
            on_render(frame);
        }
        true
    }

    /// Mark the instance unmounted and drop the resize subscription.
    ///
    /// A pending debounce is left alone; it finds the instance unmounted when
    /// it fires and does nothing.
    pub fn unmount(&self) {
        let listener = {
            let mut state = self.shared.state.borrow_mut();
            if !state.phase.is_mounted() {
                return;
            }
            state.phase = Phase::Unmounted;
            state.listener.take()
        };
        if let Some(listener) = listener {
            if let Err(e) = self.shared.host.remove_resize_listener(listener) {
                tracing::warn!("Failed to detach resize listener: {}", e);
            }
        }
        tracing::debug!("width observer unmounted");
    }

    fn upgrade(weak: &Weak<Shared<H>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn downgrade(&self) -> Weak<Shared<H>> {
        Rc::downgrade(&self.shared)
    }
}

/// Caller-held handle that resolves to the provider instance it was passed to.
///
/// Empty until the provider mounts and cleared again on unmount. It only holds
/// a weak reference, so it never keeps an instance alive.
pub struct ObserverRef<H: Host> {
    target: Rc<RefCell<Weak<Shared<H>>>>,
}

impl<H: Host> Clone for ObserverRef<H> {
    fn clone(&self) -> Self {
        Self { target: self.target.clone() }
    }
}

impl<H: Host> Default for ObserverRef<H> {
    fn default() -> Self {
        Self { target: Rc::new(RefCell::new(Weak::new())) }
    }
}

impl<H: Host> ObserverRef<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<WidthObserver<H>> {
        WidthObserver::upgrade(&self.target.borrow())
    }

    /// Point this handle at `observer`.
    pub fn forward(&self, observer: &WidthObserver<H>) {
        *self.target.borrow_mut() = observer.downgrade();
    }

    pub fn clear(&self) {
        *self.target.borrow_mut() = Weak::new();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn frame_follows_phase() {
        let observer = WidthObserver::new(FakeHost::new(), ObserverConfig::new().measure_before_mount(true));
        assert_eq!(observer.frame(), Frame::Placeholder);
        observer.mount();
        assert_eq!(observer.phase(), Phase::Measured);
        assert!(matches!(observer.frame(), Frame::Content(_)));
    }

    #[test]
    fn remeasure_is_inert_before_mount() {
        let host = FakeHost::new();
        host.set_probe_width(Some(300.0));
        let observer = WidthObserver::new(host, ObserverConfig::default());
        assert!(!observer.remeasure());
        assert_eq!(observer.measurement(), Measurement::default());
    }

    #[test]
    fn text_root_stages_no_width() {
        let host = FakeHost::new();
        host.set_probe_width(Some(300.0));
        host.set_root_is_element(false);
        let observer = WidthObserver::new(host, ObserverConfig::default());
        observer.mount();
        assert_eq!(observer.measurement().width, 1280.0);
    }

    #[test]
    fn unchanged_width_does_not_render() {
        let host = FakeHost::new();
        host.set_probe_width(Some(1280.0));
        let observer = WidthObserver::new(host, ObserverConfig::default());
        let renders = Rc::new(Cell::new(0));
        observer.set_on_render({
            let renders = renders.clone();
            move |_| renders.set(renders.get() + 1)
        });
        observer.mount();
        assert_eq!(renders.get(), 0);
        assert_eq!(observer.phase(), Phase::Measured);
    }

    #[test]
    fn mount_twice_attaches_once() {
        let host = FakeHost::new();
        let observer = WidthObserver::new(host, ObserverConfig::default());
        observer.mount();
        observer.mount();
        assert_eq!(observer.host().listener_count(), 1);
    }

    #[test]
    fn observer_ref_resolves_and_clears() {
        let observer = WidthObserver::new(FakeHost::new(), ObserverConfig::default());
        let handle = ObserverRef::new();
        assert!(handle.get().is_none());

        handle.forward(&observer);
        let resolved = handle.get().unwrap();
        assert!(Rc::ptr_eq(&resolved.shared, &observer.shared));

        handle.clear();
        assert!(handle.get().is_none());
    }

    #[test]
    fn observer_ref_does_not_keep_instance_alive() {
        let handle = ObserverRef::new();
        {
            let observer = WidthObserver::new(FakeHost::new(), ObserverConfig::default());
            handle.forward(&observer);
        }
        assert!(handle.get().is_none());
    }
}
