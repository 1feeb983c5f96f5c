use std::sync::Arc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use width_observer_core::{Frame, Measurement, ObserverConfig, ObserverRef, ProviderProps, WidthObserver, WidthProps};

use crate::web_host::{PROBE_STYLE, WebHost};

/// Handle that resolves to a mounted [`WidthProvider`]'s observer.
pub type WidthProviderRef = ObserverRef<WebHost>;

/// Props of a component wrapped by [`with_width`]: caller props plus width signals.
pub type LiveWidthProps<P> = WidthProps<P, Signal<f64>>;

/// Caller props joined with width signals derived from `measurement`.
pub fn live_props<P>(props: P, measurement: Signal<Measurement>) -> LiveWidthProps<P> {
    WidthProps::from_parts(
        props,
        Signal::derive(move || measurement.get().width),
        Signal::derive(move || measurement.get().viewport_width),
    )
}

/// Renders `children` with the live width of the surrounding container.
///
/// `children` runs once; later measurements reach it through the signal, so
/// the children's own state survives resizes.
///
/// A zero-height probe `<iframe>` is rendered next to the children; its
/// window's `resize` event drives remeasurement, debounced by
/// `config.resize_delay`. With `config.measure_before_mount` only a placeholder
/// `<div>` (carrying `class_name` and `style`) is rendered until the first
/// measurement.
#[component]
pub fn WidthProvider<F, V>(
    /// Provider configuration; never reaches `children`.
    #[prop(optional)]
    config: ObserverConfig,
    /// Resolves to this instance's observer while it is mounted.
    #[prop(optional_no_strip)]
    observer_ref: Option<WidthProviderRef>,
    /// Builds the content from the live measurement.
    children: F,
) -> impl IntoView
where
    F: Fn(Signal<Measurement>) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let host = WebHost::new();
    let observer = WidthObserver::new(host, config.clone());
    let frame = RwSignal::new(observer.frame());
    // try_set: a stale debounce may land after the owner is disposed
    observer.set_on_render(move |next| {
        let _ = frame.try_set(next);
    });

    let observer = SendWrapper::new(observer);
    let observer_ref = SendWrapper::new(observer_ref);

    // First run is the mount. Later runs happen when the probe enters the
    // tree, which is when a deferred listener can finally attach.
    Effect::new({
        let observer = observer.clone();
        let observer_ref = observer_ref.clone();
        move |prev: Option<()>| {
            let probe_rendered = host.probe.get().is_some();
            if prev.is_none() {
                if let Some(handle) = &*observer_ref {
                    handle.forward(&observer);
                }
                observer.mount();
            } else if probe_rendered {
                observer.attach_listener();
            }
        }
    });

    on_cleanup(move || {
        observer.unmount();
        if let Some(handle) = &*observer_ref {
            handle.clear();
        }
    });

    let showing_placeholder = Memo::new(move |_| frame.get() == Frame::Placeholder);
    let measurement = Memo::new(move |_| frame.get().measurement().unwrap_or_default());

    let children = Arc::new(children);
    let class = config.class_name.unwrap_or_default();
    let style = config.style.unwrap_or_default();

    view! {
        <Show
            when=move || !showing_placeholder.get()
            fallback=move || view! { <div node_ref=host.placeholder class=class.clone() style=style.clone()></div> }
        >
            {
                let children = children.clone();
                view! {
                    <span node_ref=host.root>
                        <iframe node_ref=host.probe style=PROBE_STYLE tabindex="-1" aria-hidden="true"></iframe>
                        {children(measurement.into())}
                    </span>
                }
            }
        </Show>
    }
}

/// A component made width-aware by [`with_width`].
#[derive(Clone)]
pub struct WithWidth<C> {
    composed: C,
}

/// Wrap `composed` so it is rendered with its caller's props plus live
/// `width` and `viewport_width` signals.
///
/// ```ignore
/// let grid = with_width(|p: LiveWidthProps<GridProps>| view! { <Grid cols=p.cols width=p.width /> });
/// view! { {grid.render(ProviderProps::new(GridProps { cols: 12 }).with_config(config))} }
/// ```
pub fn with_width<C>(composed: C) -> WithWidth<C> {
    WithWidth { composed }
}

impl<C> WithWidth<C> {
    pub fn render<P, V>(&self, props: ProviderProps<P>) -> AnyView
    where
        C: Fn(LiveWidthProps<P>) -> V + Clone + Send + Sync + 'static,
        P: Clone + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        self.render_inner(props, None)
    }

    /// Like [`render`](Self::render), resolving `observer_ref` to the provider instance.
    pub fn render_with_ref<P, V>(&self, props: ProviderProps<P>, observer_ref: WidthProviderRef) -> AnyView
    where
        C: Fn(LiveWidthProps<P>) -> V + Clone + Send + Sync + 'static,
        P: Clone + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        self.render_inner(props, Some(observer_ref))
    }

    fn render_inner<P, V>(&self, props: ProviderProps<P>, observer_ref: Option<WidthProviderRef>) -> AnyView
    where
        C: Fn(LiveWidthProps<P>) -> V + Clone + Send + Sync + 'static,
        P: Clone + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        let (config, forwarded) = props.split();
        let composed = self.composed.clone();
        view! {
            <WidthProvider
                config=config
                observer_ref=observer_ref
                children={move |measurement: Signal<Measurement>| composed(live_props(forwarded.clone(), measurement))}
            />
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_props_follow_later_measurements() {
        let measurement = RwSignal::new(Measurement::default());
        let props = live_props("grid", measurement.into());
        assert_eq!(props.width.get_untracked(), 1280.0);

        measurement.set(Measurement { width: 640.0, viewport_width: 900.0 });
        assert_eq!(props.width.get_untracked(), 640.0);
        assert_eq!(props.viewport_width.get_untracked(), 900.0);
        assert_eq!(*props, "grid");

        measurement.set(Measurement { width: 320.0, viewport_width: 900.0 });
        assert_eq!(props.width.get_untracked(), 320.0);
    }
}
