use json_tagged::wire::from_json;
use json_tagged::{decode, Value};
use serde_json::json;

fn dec(v: serde_json::Value) -> Value {
    decode(&from_json(v))
}

#[test]
fn map_with_non_array_payload_is_empty() {
    assert_eq!(dec(json!({"__t": "Map", "__v": "not-an-array"})), Value::map([]));
    assert_eq!(dec(json!({"__t": "Map", "__v": null})), Value::map([]));
    assert_eq!(dec(json!({"__t": "Map"})), Value::map([]));
}

#[test]
fn map_pair_missing_value_becomes_undefined_pair() {
    assert_eq!(
        dec(json!({"__t": "Map", "__v": [[1]]})),
        Value::map([(Value::Undefined, Value::Undefined)])
    );
}

#[test]
fn malformed_pairs_collapse_to_a_single_undefined_key() {
    let v = dec(json!({"__t": "Map", "__v": [[], 5, [1, 2, 3]]}));
    let Value::Map(map) = v else {
        panic!("expected map");
    };
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Value::Undefined), Some(&Value::Undefined));
}

#[test]
fn malformed_subtree_does_not_abort_siblings() {
    let v = dec(json!({
        "bad_set": {"__t": "Set", "__v": {"a": 1}},
        "bad_buf": {"__t": "Buffer", "__v": "AQID"},
        "good": {"__t": "Date", "__v": 9},
        "list": [{"__t": "Map", "__v": [[1]]}, 2]
    }));
    let expected = Value::record([
        ("bad_set", Value::set([])),
        ("bad_buf", Value::Bytes(vec![])),
        ("good", Value::Date(9)),
        (
            "list",
            Value::Array(vec![
                Value::map([(Value::Undefined, Value::Undefined)]),
                Value::from(2),
            ]),
        ),
    ]);
    assert_eq!(v, expected);
}

#[test]
fn nested_tagged_payloads_are_decoded() {
    let v = dec(json!({"__t": "Set", "__v": [
        {"__t": "Buffer", "__v": [104, 105]},
        {"__t": "Set", "__v": [{"__t": "Date", "__v": 1}]}
    ]}));
    assert_eq!(
        v,
        Value::set([
            Value::Bytes(b"hi".to_vec()),
            Value::set([Value::Date(1)]),
        ])
    );
}

#[test]
fn unknown_tags_stay_as_records() {
    for tag in ["date", "BigInt", "", "Uint8Array"] {
        let v = dec(json!({"__t": tag, "__v": [1]}));
        assert_eq!(
            v,
            Value::record([("__t", Value::from(tag)), ("__v", Value::Array(vec![Value::from(1)]))]),
            "{tag}"
        );
    }
}
