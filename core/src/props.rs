use std::ops::Deref;

use crate::{config::ObserverConfig, measurement::Measurement};

/// Props accepted by a width-aware component: the caller's own props plus
/// the provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProps<P> {
    pub config: ObserverConfig,
    pub props: P,
}

impl<P> ProviderProps<P> {
    pub fn new(props: P) -> Self {
        Self { config: ObserverConfig::default(), props }
    }

    pub fn with_config(mut self, config: ObserverConfig) -> Self {
        self.config = config;
        self
    }

    /// Separate the provider's own configuration from what gets forwarded.
    pub fn split(self) -> (ObserverConfig, P) {
        (self.config, self.props)
    }
}

/// Props handed to the wrapped component: everything the caller passed,
/// plus the live `width` and `viewport_width`.
///
/// `W` is how the widths are delivered: plain `f64` snapshots by default, or a
/// reactive handle when the renderer builds the wrapped component only once.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthProps<P, W = f64> {
    pub props: P,
    pub width: W,
    pub viewport_width: W,
}

impl<P, W> WidthProps<P, W> {
    pub fn from_parts(props: P, width: W, viewport_width: W) -> Self {
        Self { props, width, viewport_width }
    }
}

impl<P> WidthProps<P> {
    pub fn new(props: P, measurement: Measurement) -> Self {
        Self::from_parts(props, measurement.width, measurement.viewport_width)
    }

    pub fn measurement(&self) -> Measurement {
        Measurement { width: self.width, viewport_width: self.viewport_width }
    }
}

impl<P, W> Deref for WidthProps<P, W> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct GridProps {
        cols: u32,
        class_name: &'static str,
    }

    #[test]
    fn split_forwards_only_caller_props() {
        let config = ObserverConfig::new().measure_before_mount(true).resize_delay(100).class_name("placeholder");
        let provider = ProviderProps::new(GridProps { cols: 12, class_name: "grid" }).with_config(config.clone());

        let (own, forwarded) = provider.split();
        assert_eq!(own, config);
        assert_eq!(forwarded, GridProps { cols: 12, class_name: "grid" });
    }

    #[test]
    fn width_props_expose_caller_fields() {
        let measured = WidthProps::new(GridProps { cols: 4, class_name: "grid" }, Measurement { width: 800.0, viewport_width: 1024.0 });
        assert_eq!(measured.cols, 4);
        assert_eq!(measured.width, 800.0);
        assert_eq!(measured.measurement().viewport_width, 1024.0);
    }

    #[test]
    fn widths_can_be_delivered_as_handles() {
        let live = WidthProps::from_parts(GridProps { cols: 2, class_name: "grid" }, "w", "vw");
        assert_eq!(live.cols, 2);
        assert_eq!((live.width, live.viewport_width), ("w", "vw"));
    }
}
