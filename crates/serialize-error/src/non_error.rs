//! Wrapper for thrown values that are not error-shaped.

use crate::error_object::ErrorObject;
use crate::stringify::{stringify, to_display_string};
use crate::value::Value;
use tracing::debug;

/// The error class used for values that were never errors.
///
/// The message is the JSON text of the wrapped value, or its plain string
/// form when it has no JSON text (a cycle, a failing getter).
///
/// # Examples
///
/// ```
/// use serialize_error::{NonError, Value};
///
/// let error = NonError::new(&Value::from("123"));
/// assert_eq!(error.name(), "NonError");
/// assert_eq!(error.message(), "\"123\"");
/// assert!(error.is_non_error());
/// ```
pub struct NonError;

impl NonError {
    pub const NAME: &'static str = "NonError";

    pub fn new(message: &Value) -> ErrorObject {
        debug!("wrapping non-error value");
        let text = Self::prepare_message(message);
        let error = ErrorObject::with_constructor(Self::NAME, text.as_deref());
        // `name` is an own, enumerable field of this class.
        error.as_object().define("name", Self::NAME, true);
        error
    }

    /// `None` when the value has no text at all (`undefined`, a function);
    /// such errors carry the empty inherited message.
    pub fn prepare_message(message: &Value) -> Option<String> {
        match stringify(message) {
            Ok(text) => text,
            Err(_) => Some(to_display_string(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    #[test]
    fn test_message_is_json_text() {
        assert_eq!(NonError::new(&Value::Null).message(), "null");
        assert_eq!(NonError::new(&Value::from(1)).message(), "1");
        assert_eq!(NonError::new(&Value::from(true)).message(), "true");
        let array = Object::array_from([Value::from(1)]);
        assert_eq!(NonError::new(&Value::from(array)).message(), "[1]");
    }

    #[test]
    fn test_undefined_has_empty_message() {
        let error = NonError::new(&Value::Undefined);
        assert_eq!(error.message(), "");
        assert!(!error.as_object().has_own("message"));
    }

    #[test]
    fn test_falls_back_to_display_string() {
        let object = Object::plain();
        object.set("self", &object);
        assert_eq!(NonError::new(&Value::from(object)).message(), "[object Object]");
    }

    #[test]
    fn test_name_is_enumerable() {
        let error = NonError::new(&Value::Null);
        assert_eq!(error.keys(), vec!["name"]);
        assert_eq!(error.to_string(), "NonError: null");
    }
}
