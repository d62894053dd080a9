use crate::value::{ObjectKind, Value};

/// Whether `value` is a record built with no specialized kind attached.
///
/// Holds for records with the generic base structure and for records built
/// with no base structure at all. Specialized kinds (`ObjectKind::Instance`)
/// and every non-record variant fail the test.
pub fn is_plain_record(value: &Value) -> bool {
    match value {
        Value::Object(obj) => matches!(obj.kind, ObjectKind::Plain | ObjectKind::Bare),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    #[test]
    fn plain_and_bare_records_qualify() {
        assert!(is_plain_record(&Value::Object(Object::new())));
        assert!(is_plain_record(&Value::Object(Object::with_kind(ObjectKind::Bare))));
    }

    #[test]
    fn specialized_kinds_do_not_qualify() {
        assert!(!is_plain_record(&Value::instance("RegExp")));
        assert!(!is_plain_record(&Value::instance("Function")));
    }

    #[test]
    fn non_records_do_not_qualify() {
        for v in [
            Value::Null,
            Value::Array(vec![]),
            Value::set([]),
            Value::map([]),
            Value::Date(0),
            Value::Bytes(vec![]),
        ] {
            assert!(!is_plain_record(&v), "{v:?}");
        }
    }
}
