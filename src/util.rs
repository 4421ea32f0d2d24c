// Console logging helpers
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub fn cerr(msg: &str, raw: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str(msg), raw);
}

/// Millisecond argument for `setTimeout`, saturating instead of wrapping.
pub fn timeout_ms(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}
