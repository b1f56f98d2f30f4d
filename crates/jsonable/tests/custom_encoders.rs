use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use jsonable::{encode_with, Encoders, Json, Kind, Options, Value};

#[test]
fn string_encoder_overrides_every_string_including_nested_and_keys() {
    let mut enc = Encoders::new();
    enc.insert_kind(Kind::String, |v| match v {
        Value::String(s) => Ok(Json::String(s.to_uppercase())),
        _ => unreachable!(),
    });
    let v = Value::map([
        ("word", Value::from("low")),
        ("list", Value::Array(vec![Value::from("deep")])),
    ]);
    let out = encode_with(v, &Options::default(), &enc).unwrap();
    assert_eq!(
        serde_json::Value::from(out),
        serde_json::json!({"WORD": "LOW", "LIST": ["DEEP"]})
    );
}

#[test]
fn custom_datetime_encoder_replaces_the_builtin() {
    use chrono::TimeZone;
    let mut enc = Encoders::new();
    enc.insert_kind(Kind::DateTime, |v| match v {
        Value::DateTime(dt) => Ok(Json::Number(jsonable::Number::I64(dt.timestamp()))),
        _ => unreachable!(),
    });
    let dt = chrono::Utc.with_ymd_and_hms(1970, 1, 1, 0, 1, 0).unwrap();
    let out = encode_with(Value::from(dt), &Options::default(), &enc).unwrap();
    assert_eq!(out, Json::Number(jsonable::Number::I64(60)));
}

#[test]
fn custom_result_is_returned_without_further_recursion() {
    let mut enc = Encoders::new();
    enc.insert_kind(Kind::Set, |_| {
        Ok(Json::Object(vec![("_sa_kept".into(), Json::Bool(true))]))
    });
    let out = encode_with(Value::set([1i64]), &Options::default(), &enc).unwrap();
    // The engine does not post-process the custom result, so the _sa key
    // survives even under the default sqlalchemy_safe.
    assert_eq!(
        out,
        Json::Object(vec![("_sa_kept".into(), Json::Bool(true))])
    );
}

#[test]
fn structural_matchers_scan_in_registration_order() {
    let mut enc = Encoders::new();
    enc.insert_match(
        |v| matches!(v, Value::Array(items) if items.is_empty()),
        |_| Ok(Json::String("empty".into())),
    );
    enc.insert_match(
        |v| matches!(v, Value::Array(_)),
        |_| Ok(Json::String("any".into())),
    );
    let opts = Options::default();
    assert_eq!(
        encode_with(Value::Array(vec![]), &opts, &enc).unwrap(),
        Json::String("empty".into())
    );
    assert_eq!(
        encode_with(Value::Array(vec![1i64.into()]), &opts, &enc).unwrap(),
        Json::String("any".into())
    );
}

#[test]
fn exact_kind_match_beats_structural_matchers() {
    let mut enc = Encoders::new();
    enc.insert_match(|_| true, |_| Ok(Json::String("matcher".into())));
    enc.insert_kind(Kind::Bool, |_| Ok(Json::String("exact".into())));
    let out = encode_with(true, &Options::default(), &enc).unwrap();
    assert_eq!(out, Json::String("exact".into()));
}

#[test]
fn exact_type_encoder_for_opaque_payloads() {
    let mut enc = Encoders::new();
    enc.insert_type::<Duration, _>(|d| Ok(Json::from(d.as_millis() as i64)));
    let out = encode_with(
        Value::opaque(Duration::from_millis(1500)),
        &Options::default(),
        &enc,
    )
    .unwrap();
    assert_eq!(out, Json::from(1500i64));
}

#[test]
fn concrete_type_entry_beats_a_blanket_opaque_kind_entry() {
    let mut enc = Encoders::new();
    enc.insert_kind(Kind::Opaque, |_| Ok(Json::String("blanket".into())));
    enc.insert_type::<Duration, _>(|d| Ok(Json::from(d.as_secs() as i64)));
    let opts = Options::default();
    assert_eq!(
        encode_with(Value::opaque(Duration::from_secs(3)), &opts, &enc).unwrap(),
        Json::from(3i64)
    );
    // Other opaque types still fall to the kind entry.
    let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(
        encode_with(Value::opaque(ip), &opts, &enc).unwrap(),
        Json::String("blanket".into())
    );
}

#[test]
fn duration_leaf_encodes_as_fractional_seconds() {
    let out = jsonable::encode(Value::opaque(Duration::from_millis(2500)), &Options::default())
        .unwrap();
    assert_eq!(out, Json::from(2.5f64));
}

#[test]
fn network_addresses_encode_as_display_strings() {
    let opts = Options::default();
    let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(
        jsonable::encode(Value::opaque(ip), &opts).unwrap(),
        Json::from("10.0.0.1")
    );
    let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
    assert_eq!(
        jsonable::encode(Value::opaque(addr), &opts).unwrap(),
        Json::from("127.0.0.1:8080")
    );
}
