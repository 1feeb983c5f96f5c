use wasm_bindgen::{JsCast, JsValue};

/// Turns browser-side failures into the `String` errors the observer host reports.
pub trait Require<T> {
    fn require(self, what: &str) -> Result<T, String>;
}

impl<T> Require<T> for Result<T, JsValue> {
    fn require(self, what: &str) -> Result<T, String> {
        self.map_err(|e| format!("{}: {}", what, describe(&e)))
    }
}

impl<T> Require<T> for Option<T> {
    fn require(self, what: &str) -> Result<T, String> {
        self.ok_or_else(|| format!("{}: None", what))
    }
}

/// Best-effort readable text for a thrown JS value.
fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(obj) = value.dyn_ref::<js_sys::Object>() {
        return js_sys::JSON::stringify(obj).ok().and_then(|v| v.as_string()).unwrap_or_else(|| "[object]".to_string());
    }
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_names_what_was_required() {
        let missing: Option<u32> = None;
        assert_eq!(missing.require("probe content window").unwrap_err(), "probe content window: None");
        assert_eq!(Some(3).require("unused"), Ok(3));
    }
}
