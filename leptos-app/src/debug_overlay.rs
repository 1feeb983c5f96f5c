use leptos::prelude::*;

use width_observer_core::{ObserverConfig, ProviderProps};

use crate::width_provider::{LiveWidthProps, with_width};

fn px(value: f64) -> String {
    format!("{}px", value.round() as i64)
}

/// Debug overlay displaying the container and viewport width it is rendered in.
#[component]
pub fn DebugOverlay(#[prop(optional)] config: ObserverConfig, #[prop(into, optional)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "container".to_string());
    let track_viewport = config.breakpoint_from_viewport;

    let overlay = with_width(move |p: LiveWidthProps<String>| {
        let width = p.width;
        let viewport = p.viewport_width;
        view! {
            <div class="debugOverlay">
                <span class="debugLabel">{format!("{}:", p.props)}</span>
                <span class="debugValue">{move || px(width.get())}</span>
                <Show when=move || track_viewport>
                    <span class="debugLabel">"viewport:"</span>
                    <span class="debugValue">{move || px(viewport.get())}</span>
                </Show>
            </div>
        }
    });

    overlay.render(ProviderProps::new(label).with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_rounds_to_whole_pixels() {
        assert_eq!(px(1279.6), "1280px");
        assert_eq!(px(0.0), "0px");
    }
}
