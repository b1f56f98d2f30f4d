use jsonable::{encode, FieldFilter, Options, Record, Value};

fn to_json(v: impl Into<Value>, opts: &Options) -> serde_json::Value {
    serde_json::Value::from(encode(v, opts).unwrap())
}

#[test]
fn record_flattens_to_an_ordered_object() {
    let r = Record::new()
        .field("x", 1i64)
        .field("y", "two")
        .field("z", Value::Null);
    assert_eq!(
        to_json(r, &Options::default()),
        serde_json::json!({"x": 1, "y": "two", "z": null})
    );
}

#[test]
fn record_fields_are_filtered_like_mapping_keys() {
    // Unlike a model, a record has no encoding metadata; the current
    // options apply to its own fields directly.
    let opts = Options {
        include: Some(FieldFilter::keys(["x", "y"])),
        exclude: Some(FieldFilter::keys(["y"])),
        ..Options::default()
    };
    let r = Record::new().field("x", 1i64).field("y", 2i64).field("w", 3i64);
    assert_eq!(to_json(r, &opts), serde_json::json!({"x": 1}));
}

#[test]
fn record_honors_exclude_none_and_sqlalchemy_safe() {
    let opts = Options {
        exclude_none: true,
        ..Options::default()
    };
    let r = Record::new()
        .field("_sa_adapter", "drop")
        .field("gone", Value::Null)
        .field("kept", 1i64);
    assert_eq!(to_json(r, &opts), serde_json::json!({"kept": 1}));
}

#[test]
fn nested_records_recurse() {
    let inner = Record::new().field("b", 2i64);
    let r = Record::new().field("a", inner);
    assert_eq!(
        to_json(r, &Options::default()),
        serde_json::json!({"a": {"b": 2}})
    );
}
