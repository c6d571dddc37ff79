use crate::destroy_circular::DestroyCircular;
use crate::error::ConvertError;
use crate::options::Options;
use crate::value::Value;
use tracing::debug;

/// Flattens `value` into a fresh tree of plain objects, arrays and
/// primitives that is safe to render as JSON.
///
/// - Objects and arrays are copied by the circular-safe traversal, with
///   `name`, `message`, `stack` and `code` always exposed as enumerable.
/// - A function becomes the string `"[Function: <name>]"`.
/// - Primitives are returned unchanged.
///
/// Only a failing getter or `to_json` hook makes this return an error.
pub fn serialize_error(value: &Value, options: &Options) -> Result<Value, ConvertError> {
    match value {
        Value::Object(object) if object.is_function() => {
            let name = object
                .function_name()
                .unwrap_or_else(|| "anonymous".to_string());
            Ok(Value::String(format!("[Function: {}]", name)))
        }
        Value::Object(object) => {
            debug!(max_depth = ?options.max_depth, "serializing error");
            DestroyCircular {
                options,
                force_enumerable: true,
            }
            .run(object, None)
        }
        primitive => Ok(primitive.clone()),
    }
}

/// [`serialize_error`] rendered straight to JSON data.
///
/// # Examples
///
/// ```
/// use serialize_error::{serialize_error_to_json, Object, Options, Value};
/// use serde_json::json;
///
/// let error = Object::error(Some("🦄"));
/// error.set("one", Value::from(json!({"two": {"three": {}}})));
///
/// let serialized = serialize_error_to_json(&error.into(), &Options::new().with_max_depth(1)).unwrap();
/// assert_eq!(serialized["name"], "Error");
/// assert_eq!(serialized["message"], "🦄");
/// assert_eq!(serialized["one"], json!({}));
/// ```
pub fn serialize_error_to_json(
    value: &Value,
    options: &Options,
) -> Result<serde_json::Value, ConvertError> {
    serialize_error(value, options)?.to_json()
}
