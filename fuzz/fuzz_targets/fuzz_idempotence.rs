#![no_main]
use jsonable::{encode, Options, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(s) {
            let opts = Options::default();
            if let Ok(once) = encode(Value::from(json_value), &opts) {
                let twice = encode(Value::from(once.clone()), &opts)
                    .expect("re-encoding a JSON-ready tree cannot fail");
                assert_eq!(once, twice);
            }
        }
    }
});
