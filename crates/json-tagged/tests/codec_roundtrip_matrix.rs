use json_tagged::wire::{from_json, to_json};
use json_tagged::{decode, encode, parse, stringify, Object, ObjectKind, Value, WireValue};
use serde_json::json;

fn roundtrip(v: &Value) -> Value {
    decode(&encode(v))
}

#[test]
fn example_shapes_from_wire_contract() {
    let arr = Value::Array(vec![Value::from(1), Value::from("a"), Value::Null]);
    assert_eq!(to_json(&encode(&arr)), json!([1, "a", null]));

    let set = Value::set([Value::from(1), Value::from(2)]);
    assert_eq!(to_json(&encode(&set)), json!({"__t": "Set", "__v": [1, 2]}));

    let decoded = decode(&from_json(json!({"__t": "Set", "__v": [1, 2]})));
    assert_eq!(decoded, Value::set([Value::from(2), Value::from(1)]));
}

#[test]
fn encode_is_identity_on_scalars() {
    let cases = [
        (Value::Null, WireValue::Null),
        (Value::Undefined, WireValue::Undefined),
        (Value::Bool(false), WireValue::Bool(false)),
        (Value::Integer(i64::MIN), WireValue::Integer(i64::MIN)),
        (Value::Float(-0.5), WireValue::Float(-0.5)),
        (Value::from(""), WireValue::Str(String::new())),
    ];
    for (value, wire) in cases {
        assert_eq!(encode(&value), wire);
        assert_eq!(decode(&wire), value);
    }
}

#[test]
fn date_tag_fidelity() {
    for ms in [0_i64, 1, -86_400_000, 1_700_000_000_000, 8_640_000_000_000_000] {
        let wire = encode(&Value::Date(ms));
        assert_eq!(to_json(&wire), json!({"__t": "Date", "__v": ms}));
        assert_eq!(decode(&from_json(json!({"__t": "Date", "__v": ms}))), Value::Date(ms));
    }
}

#[test]
fn roundtrip_matrix() {
    let cases = vec![
        Value::Date(1_234_567_890_123),
        Value::Bytes(vec![]),
        Value::Bytes((0..=255).collect()),
        Value::set([]),
        Value::set([Value::from("a"), Value::Date(5), Value::Bytes(vec![1])]),
        Value::map([]),
        Value::map([
            (Value::Date(1), Value::from("one")),
            (Value::set([Value::from(1)]), Value::Null),
            (Value::record([("k", 1)]), Value::Array(vec![Value::Undefined])),
        ]),
        Value::Array(vec![]),
        Value::Array(vec![Value::Undefined, Value::Null, Value::Float(f64::NAN)]),
        Value::record([("a", Value::Undefined), ("b", Value::Null)]),
        Value::Object(Object::with_kind(ObjectKind::Bare)),
        Value::record([(
            "deep",
            Value::record([(
                "deeper",
                Value::Array(vec![Value::map([(
                    Value::Bytes(vec![0xde, 0xad]),
                    Value::set([Value::Date(-1), Value::record([("x", true)])]),
                )])]),
            )]),
        )]),
    ];
    for case in cases {
        assert_eq!(roundtrip(&case), case, "{case:?}");
    }
}

#[test]
fn set_order_independence() {
    let a = Value::set([Value::from(1), Value::from("two"), Value::Date(3)]);
    let b = Value::set([Value::Date(3), Value::from(1), Value::from("two")]);
    assert_ne!(encode(&a), encode(&b));
    assert_eq!(roundtrip(&a), roundtrip(&b));
}

#[test]
fn map_order_independence() {
    let a = Value::map([
        (Value::from("x"), Value::from(1)),
        (Value::from(2), Value::from("y")),
    ]);
    let b = Value::map([
        (Value::from(2), Value::from("y")),
        (Value::from("x"), Value::from(1)),
    ]);
    assert_ne!(encode(&a), encode(&b));
    assert_eq!(roundtrip(&a), roundtrip(&b));
}

#[test]
fn record_key_order_survives_the_wire() {
    let v = Value::record([("z", 1), ("a", 2), ("m", 3)]);
    let text = stringify(&v).unwrap();
    assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
    let Value::Object(obj) = parse(&text).unwrap() else {
        panic!("expected record");
    };
    let keys: Vec<&str> = obj.fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn unsupported_kinds_become_undefined_in_place() {
    let v = Value::record([
        ("re", Value::instance("RegExp")),
        ("f", Value::instance("Function")),
        ("ok", Value::from(1)),
    ]);
    let expected = Value::record([
        ("re", Value::Undefined),
        ("f", Value::Undefined),
        ("ok", Value::from(1)),
    ]);
    assert_eq!(roundtrip(&v), expected);
    assert!(encode(&v).contains_undefined());
}

#[test]
fn json_text_roundtrip_without_undefined() {
    let v = Value::record([
        ("when", Value::Date(1_600_000_000_000)),
        ("blob", Value::Bytes(vec![1, 2, 3])),
        ("tags", Value::set([Value::from("a"), Value::from("b")])),
        (
            "index",
            Value::map([(Value::from(1), Value::Array(vec![Value::Float(0.25)]))]),
        ),
    ]);
    assert_eq!(parse(&stringify(&v).unwrap()).unwrap(), v);
}

// Absent has no JSON text form: record fields drop out, array slots read
// back as null. In-memory wire values keep it.
#[test]
fn undefined_convention_through_json_text() {
    let v = Value::record([
        ("gone", Value::Undefined),
        ("slots", Value::Array(vec![Value::Undefined, Value::from(1)])),
    ]);
    assert_eq!(roundtrip(&v), v);

    let text = stringify(&v).unwrap();
    assert_eq!(text, r#"{"slots":[null,1]}"#);
    assert_eq!(
        parse(&text).unwrap(),
        Value::record([("slots", Value::Array(vec![Value::Null, Value::from(1)]))])
    );
    assert_eq!(stringify(&Value::Undefined).unwrap(), "null");
}

#[test]
fn record_colliding_with_tag_field_is_reinterpreted() {
    // Documented ambiguity: a plain record that happens to look tagged.
    let v = Value::record([("__t", Value::from("Date")), ("__v", Value::from(7))]);
    assert_eq!(roundtrip(&v), Value::Date(7));
}
