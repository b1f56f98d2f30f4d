#![no_main]
use jsonable::{encode, Options, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(s) {
            let _ = encode(Value::from(json_value.clone()), &Options::default());

            let opts = Options {
                exclude_none: true,
                preserve_set: true,
                ..Options::default()
            };
            let _ = encode(Value::from(json_value.clone()), &opts);

            let opts_unsafe = Options {
                sqlalchemy_safe: false,
                ..Options::default()
            };
            let _ = encode(Value::from(json_value), &opts_unsafe);
        }
    }
});
