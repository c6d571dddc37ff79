use crate::destroy_circular::DestroyCircular;
use crate::error::ConvertError;
use crate::error_object::ErrorObject;
use crate::non_error::NonError;
use crate::options::Options;
use crate::value::Value;
use tracing::debug;

/// Turns a plain value back into an error instance.
///
/// - An error instance is returned as-is.
/// - A plain (non-array) object is copied onto a new `Error`: `name`,
///   `message` and `stack` become non-enumerable, everything else, `code`
///   included, stays enumerable.
/// - Anything else is wrapped in a [`NonError`].
///
/// # Examples
///
/// ```
/// use serialize_error::{deserialize_error_from_json, Options};
/// use serde_json::json;
///
/// let error = deserialize_error_from_json(
///     &json!({"name": "TypeError", "message": "bad", "code": "E_BAD"}),
///     &Options::default(),
/// )
/// .unwrap();
/// assert_eq!(error.to_string(), "TypeError: bad");
/// assert_eq!(error.keys(), vec!["code"]);
/// ```
pub fn deserialize_error(value: &Value, options: &Options) -> Result<ErrorObject, ConvertError> {
    let object = match value {
        Value::Object(object) => object,
        other => return Ok(NonError::new(other)),
    };
    if let Some(error) = ErrorObject::from_object(object.clone()) {
        return Ok(error);
    }
    if object.is_array() || object.is_function() {
        return Ok(NonError::new(value));
    }

    debug!(max_depth = ?options.max_depth, "deserializing error");
    let error = ErrorObject::new(None);
    // A top-level `to_json` hook short-circuits the copy; the error stays empty.
    DestroyCircular {
        options,
        force_enumerable: false,
    }
    .run(object, Some(error.as_object().clone()))?;
    Ok(error)
}

/// [`deserialize_error`] for JSON data, e.g. a parsed log line.
pub fn deserialize_error_from_json(
    value: &serde_json::Value,
    options: &Options,
) -> Result<ErrorObject, ConvertError> {
    deserialize_error(&Value::from(value.clone()), options)
}
