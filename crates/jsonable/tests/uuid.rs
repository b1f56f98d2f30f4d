#![cfg(feature = "uuid")]

use jsonable::{encode, Json, Options, Value};

#[test]
fn uuid_encodes_as_hyphenated_string() {
    let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    let out = encode(Value::opaque(id), &Options::default()).unwrap();
    assert_eq!(
        out,
        Json::String("67e55044-10b1-426f-9247-bb680e5fe0c8".into())
    );
}

#[test]
fn custom_uuid_encoder_wins_over_the_leaf_table() {
    let mut enc = jsonable::Encoders::new();
    enc.insert_type::<uuid::Uuid, _>(|u| Ok(Json::String(u.simple().to_string())));
    let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    let out = jsonable::encode_with(Value::opaque(id), &Options::default(), &enc).unwrap();
    assert_eq!(
        out,
        Json::String("67e5504410b1426f9247bb680e5fe0c8".into())
    );
}
