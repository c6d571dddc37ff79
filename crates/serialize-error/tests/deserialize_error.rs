//! Behavior of `deserialize_error`: error reconstruction, enumerability,
//! depth limits and `NonError` wrapping.

use serde_json::json;
use serialize_error::{
    deserialize_error, deserialize_error_from_json, serialize_error, stringify, ErrorObject,
    Object, ObjectKind, Options, Value,
};

fn deserialize_non_error(value: Value) {
    let expected = stringify(&value).unwrap().unwrap_or_default();
    let deserialized = deserialize_error(&value, &Options::default()).unwrap();
    assert!(deserialized.as_object().is_error());
    assert!(deserialized.is_non_error());
    assert_eq!(deserialized.name(), "NonError");
    assert_eq!(deserialized.message(), expected);
}

fn deserialize(value: serde_json::Value) -> ErrorObject {
    deserialize_error_from_json(&value, &Options::default()).unwrap()
}

// ---------------------------------------------------------------- NonError

#[test]
fn test_deserialize_null() {
    deserialize_non_error(Value::Null);
    let error = deserialize_error(&Value::Null, &Options::default()).unwrap();
    assert_eq!(error.message(), "null");
}

#[test]
fn test_deserialize_number() {
    deserialize_non_error(Value::from(1));
}

#[test]
fn test_deserialize_boolean() {
    deserialize_non_error(Value::from(true));
}

#[test]
fn test_deserialize_string() {
    deserialize_non_error(Value::from("123"));
    let error = deserialize_error(&Value::from("123"), &Options::default()).unwrap();
    assert_eq!(error.message(), "\"123\"");
}

#[test]
fn test_deserialize_array() {
    deserialize_non_error(Value::from(json!([1])));
    let error = deserialize(json!([1]));
    assert_eq!(error.message(), "[1]");
}

#[test]
fn test_deserialize_function() {
    let error = deserialize_error(&Object::function(Some("f")).into(), &Options::default()).unwrap();
    assert!(error.is_non_error());
    assert_eq!(error.message(), "");
}

#[test]
fn test_deserialize_cyclic_array_falls_back_to_string() {
    let array = Object::array_from([Value::from(1)]);
    array.push(&array);
    let error = deserialize_error(&array.into(), &Options::default()).unwrap();
    assert!(error.is_non_error());
    assert_eq!(error.message(), "1,");
}

// ---------------------------------------------------------------- Errors

#[test]
fn test_deserialize_error_returns_it_unchanged() {
    let original = Object::error(Some("test"));
    let deserialized = deserialize_error(&Value::from(&original), &Options::default()).unwrap();
    assert!(deserialized.as_object().ptr_eq(&original));
    assert_eq!(deserialized.message(), "test");
}

#[test]
fn test_deserialize_and_preserve_existing_properties() {
    let deserialized = deserialize(json!({"message": "foo", "customProperty": true}));
    assert_eq!(deserialized.message(), "foo");
    assert_eq!(deserialized.get("customProperty").unwrap(), Value::from(true));
}

#[test]
fn test_deserialize_plain_object() {
    let deserialized = deserialize(json!({
        "message": "error message",
        "stack": "at <anonymous>:1:13",
        "name": "name",
        "code": "code",
    }));
    assert!(deserialized.as_object().is_error());
    assert_eq!(deserialized.message(), "error message");
    assert_eq!(deserialized.stack().as_deref(), Some("at <anonymous>:1:13"));
    assert_eq!(deserialized.name(), "name");
    assert_eq!(deserialized.code().as_deref(), Some("code"));
    assert!(!deserialized.is_non_error());
}

#[test]
fn test_payload_named_non_error_is_a_regular_error() {
    let deserialized = deserialize(json!({"name": "NonError", "message": "x"}));
    assert_eq!(deserialized.name(), "NonError");
    assert_eq!(
        deserialized.as_object().kind(),
        ObjectKind::Error {
            constructor: "Error".to_string()
        }
    );
    assert!(!deserialized.is_non_error());
}

#[test]
fn test_name_stack_and_message_are_not_enumerable_other_props_are() {
    let deserialized = deserialize(json!({
        "message": "error message",
        "stack": "at <anonymous>:1:13",
        "name": "name",
        "code": "code",
        "path": "./path",
        "errno": 1,
        "syscall": "syscall",
        "randomProperty": "random",
    }));
    let keys = deserialized.keys();
    for hidden in ["name", "stack", "message"] {
        assert!(!keys.contains(&hidden.to_string()), "{} should be hidden", hidden);
    }
    for shown in ["code", "path", "errno", "syscall", "randomProperty"] {
        assert!(keys.contains(&shown.to_string()), "{} should be enumerable", shown);
    }
}

#[test]
fn test_nested_objects_are_copied() {
    let source = Object::plain();
    let details = Object::plain();
    details.set("retries", 3);
    source.set("details", &details);
    let error = deserialize_error(&source.into(), &Options::default()).unwrap();
    let copy = error.get("details").unwrap();
    assert!(!copy.as_object().unwrap().ptr_eq(&details));
    assert_eq!(copy.to_json().unwrap(), json!({"retries": 3}));
}

#[test]
fn test_cycles_in_source_become_markers() {
    let source = Object::plain();
    source.set("message", "loop");
    let child = Object::plain();
    child.set("back", &source);
    source.set("child", &child);
    let error = deserialize_error(&source.into(), &Options::default()).unwrap();
    let child_copy = error.get("child").unwrap();
    assert_eq!(child_copy.as_object().unwrap().get("back").unwrap(), Value::from("[Circular]"));
    assert_eq!(error.message(), "loop");
}

#[test]
fn test_top_level_hook_leaves_error_empty() {
    let source = Object::plain();
    source.set("message", "ignored");
    source.set_to_json(|_| Ok(json!({"message": "from hook"})));
    let error = deserialize_error(&source.into(), &Options::default()).unwrap();
    assert_eq!(error.message(), "");
    assert!(error.keys().is_empty());
}

// ---------------------------------------------------------------- Depth

#[test]
fn test_deserialize_properties_up_to_max_depth() {
    let error = Object::error(Some("errorMessage"));
    let stack = error.get("stack").unwrap();
    let object = json!({
        "message": "errorMessage",
        "name": "Error",
        "stack": stack.as_str().unwrap(),
        "one": {"two": {"three": {}}},
    });
    let at = |depth| deserialize_error_from_json(&object, &Options::new().with_max_depth(depth)).unwrap();

    let level_zero = at(0);
    assert_eq!(level_zero.message(), "");
    assert!(level_zero.keys().is_empty());
    assert_eq!(level_zero.name(), "Error");

    let level_one = at(1);
    assert_eq!(level_one.message(), "errorMessage");
    assert_eq!(level_one.stack(), stack.as_str().map(str::to_string));
    assert_eq!(level_one.keys(), vec!["one"]);
    assert_eq!(level_one.get("one").unwrap().to_json().unwrap(), json!({}));

    let level_two = at(2);
    assert_eq!(level_two.get("one").unwrap().to_json().unwrap(), json!({"two": {}}));

    let level_three = at(3);
    assert_eq!(
        level_three.get("one").unwrap().to_json().unwrap(),
        json!({"two": {"three": {}}})
    );
}

// ---------------------------------------------------------------- Round trip

#[test]
fn test_round_trip() {
    let options = Options::default();
    let original = Object::error(Some("x"));
    original.set("code", "E_X");
    let serialized = serialize_error(&original.into(), &options).unwrap();
    let restored = deserialize_error(&serialized, &options).unwrap();
    assert_eq!(restored.message(), "x");
    assert_eq!(restored.name(), "Error");
    assert_eq!(restored.code().as_deref(), Some("E_X"));
    assert_eq!(restored.keys(), vec!["code"]);
}

#[test]
fn test_round_trip_through_json_text() {
    let options = Options::default();
    let original = Object::error_with_constructor("RangeError", Some("out of range"));
    let text = serde_json::to_string(
        &serialize_error(&original.into(), &options).unwrap().to_json().unwrap(),
    )
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let restored = deserialize_error_from_json(&parsed, &options).unwrap();
    assert_eq!(restored.to_string(), "RangeError: out of range");
}
