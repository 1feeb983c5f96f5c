//! Deterministic in-memory [`Host`] for driving a [`WidthObserver`](crate::WidthObserver)
//! without a browser.
//!
//! Time only moves when [`FakeHost::advance`] is called, resize signals are
//! delivered with [`FakeHost::fire_resize`], and every layout reading is set by hand.

use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{host::Host, measurement::DEFAULT_WIDTH};

struct Timer {
    id: u64,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

struct FakeState {
    now: Duration,
    next_id: u64,
    root_is_element: bool,
    probe_rendered: bool,
    probe_width: Option<f64>,
    viewport_width: Option<f64>,
    probe_reads: usize,
    fail_listeners: bool,
    listeners: Vec<(u64, Rc<dyn Fn()>)>,
    timers: Vec<Timer>,
}

pub struct FakeHost {
    state: RefCell<FakeState>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// A host whose root is an element and whose probe is rendered at the default width.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FakeState {
                now: Duration::ZERO,
                next_id: 1,
                root_is_element: true,
                probe_rendered: true,
                probe_width: Some(DEFAULT_WIDTH),
                viewport_width: Some(DEFAULT_WIDTH),
                probe_reads: 0,
                fail_listeners: false,
                listeners: Vec::new(),
                timers: Vec::new(),
            }),
        }
    }

    pub fn set_root_is_element(&self, value: bool) {
        self.state.borrow_mut().root_is_element = value;
    }

    /// Whether the probe is in the tree, which decides if a listener can attach.
    pub fn set_probe_rendered(&self, value: bool) {
        self.state.borrow_mut().probe_rendered = value;
    }

    pub fn set_probe_width(&self, width: Option<f64>) {
        self.state.borrow_mut().probe_width = width;
    }

    pub fn set_viewport_width(&self, width: Option<f64>) {
        self.state.borrow_mut().viewport_width = width;
    }

    /// Make every following `add_resize_listener` call fail.
    pub fn set_fail_listeners(&self, value: bool) {
        self.state.borrow_mut().fail_listeners = value;
    }

    /// Virtual time elapsed since the host was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// How many times the probe width has been read, i.e. measurement passes
    /// that got as far as reading layout.
    pub fn probe_reads(&self) -> usize {
        self.state.borrow().probe_reads
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Deliver a resize signal to every attached listener.
    pub fn fire_resize(&self) {
        let listeners: Vec<_> = self.state.borrow().listeners.iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener();
        }
    }

    /// Move the clock forward, running due timers in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let timer = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let timer = state.timers.remove(i);
                        state.now = timer.due;
                        timer
                    }
                    None => break,
                }
            };
            (timer.callback)();
        }
        self.state.borrow_mut().now = target;
    }

    /// Run everything scheduled with a zero delay.
    pub fn tick(&self) {
        self.advance(Duration::ZERO);
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

impl Host for FakeHost {
    type Listener = u64;
    type Timeout = u64;

    fn root_is_element(&self) -> bool {
        self.state.borrow().root_is_element
    }

    fn probe_width(&self) -> Option<f64> {
        let mut state = self.state.borrow_mut();
        state.probe_reads += 1;
        state.probe_width
    }

    fn viewport_width(&self) -> Option<f64> {
        self.state.borrow().viewport_width
    }

    fn add_resize_listener(&self, on_resize: Box<dyn Fn()>) -> Result<Option<u64>, String> {
        {
            let state = self.state.borrow();
            if state.fail_listeners {
                return Err("listener rejected".to_string());
            }
            if !state.probe_rendered {
                return Ok(None);
            }
        }
        let id = self.next_id();
        self.state.borrow_mut().listeners.push((id, Rc::from(on_resize)));
        Ok(Some(id))
    }

    fn remove_resize_listener(&self, listener: u64) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(id, _)| *id != listener);
        if state.listeners.len() == before {
            return Err(format!("unknown listener {}", listener));
        }
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Result<u64, String> {
        let id = self.next_id();
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        state.timers.push(Timer { id, due, callback });
        Ok(id)
    }

    fn clear_timeout(&self, timeout: u64) {
        self.state.borrow_mut().timers.retain(|t| t.id != timeout);
    }
}
