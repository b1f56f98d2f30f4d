use std::sync::Arc;

use jsonable::{Encoder, Encoders, Json, Kind, Options, Value};

#[test]
fn encoder_reuses_its_bound_options() {
    let enc = Encoder::new(Options {
        exclude_none: true,
        ..Options::default()
    });
    let first = enc.encode(Value::map([("a", Value::Null)])).unwrap();
    let second = enc.encode(Value::map([("b", Value::from(1i64))])).unwrap();
    assert_eq!(serde_json::Value::from(first), serde_json::json!({}));
    assert_eq!(serde_json::Value::from(second), serde_json::json!({"b": 1}));
}

#[test]
fn encoder_layers_caller_encoders_over_builtins() {
    let mut custom = Encoders::new();
    custom.insert_kind(Kind::Date, |_| Ok(Json::String("redacted".into())));
    let enc = Encoder::new(Options::default()).with_encoders(custom);
    let d = chrono::NaiveDate::from_ymd_opt(2021, 3, 9).unwrap();
    assert_eq!(enc.encode(d).unwrap(), Json::String("redacted".into()));
    // The other built-in is untouched.
    use chrono::TimeZone;
    let dt = chrono::Utc.with_ymd_and_hms(2021, 3, 9, 0, 0, 0).unwrap();
    assert_eq!(
        enc.encode(dt).unwrap(),
        Json::String("2021-03-09T00:00:00.000Z".into())
    );
}

#[test]
fn wrap_pipes_a_producer_through_fixed_options() {
    let enc = Encoder::new(Options {
        preserve_set: true,
        ..Options::default()
    });
    let mut calls = 0i64;
    let mut wrapped = enc.wrap(move || {
        calls += 1;
        Value::set([calls, calls])
    });
    assert_eq!(wrapped().unwrap(), Json::Set(vec![1i64.into()]));
    assert_eq!(wrapped().unwrap(), Json::Set(vec![2i64.into()]));
}

#[test]
fn encoder_is_shareable_across_threads() {
    let enc = Arc::new(Encoder::new(Options::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let enc = Arc::clone(&enc);
            std::thread::spawn(move || enc.encode(Value::map([("i", i as i64)])).unwrap())
        })
        .collect();
    for h in handles {
        assert!(matches!(h.join().unwrap(), Json::Object(_)));
    }
}
