use leptos::prelude::*;

use width_observer_leptos::{DebugOverlay, ObserverConfig, query::config_from_location};

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO) // Only show INFO, WARN, ERROR
            .build(),
    );

    leptos::mount::mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    // e.g. ?resizeDelay=200&breakpointFromViewport=true&measureBeforeMount=true
    let config = config_from_location();
    tracing::info!(?config, "width provider config");

    let sidebar = ObserverConfig { breakpoint_from_viewport: false, ..config.clone() };

    view! {
        <div class="container">
            <DebugOverlay config label="page" />

            <div class="mainContent">
                <div class="sidebar">
                    <DebugOverlay config=sidebar label="sidebar" />
                </div>
            </div>
        </div>
    }
}
