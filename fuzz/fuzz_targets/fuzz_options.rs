#![no_main]
use jsonable::Options;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(s) {
            // Parsing either succeeds or reports a caller error; no panics.
            let _ = Options::from_json(&json_value);
        }
    }
});
