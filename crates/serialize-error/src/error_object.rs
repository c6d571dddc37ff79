use crate::error::ConvertError;
use crate::non_error::NonError;
use crate::value::{Object, ObjectKind, Value};
use std::fmt;

/// An error instance produced by [`deserialize_error`](crate::deserialize_error).
///
/// Thin typed view over an [`Object`] of the `Error` class, usable as a
/// regular Rust error.
#[derive(Clone)]
pub struct ErrorObject(Object);

impl ErrorObject {
    /// A new `Error` with an optional message.
    pub fn new(message: Option<&str>) -> Self {
        ErrorObject(Object::error(message))
    }

    pub fn with_constructor(constructor: &str, message: Option<&str>) -> Self {
        ErrorObject(Object::error_with_constructor(constructor, message))
    }

    /// `None` unless `object` is an error instance.
    pub fn from_object(object: Object) -> Option<Self> {
        object.is_error().then_some(ErrorObject(object))
    }

    pub fn name(&self) -> String {
        self.string("name").unwrap_or_default()
    }

    pub fn message(&self) -> String {
        self.string("message").unwrap_or_default()
    }

    pub fn stack(&self) -> Option<String> {
        self.string("stack")
    }

    pub fn code(&self) -> Option<String> {
        self.string("code")
    }

    pub fn get(&self, key: &str) -> Result<Value, ConvertError> {
        self.0.get(key)
    }

    /// Own enumerable keys.
    pub fn keys(&self) -> Vec<String> {
        self.0.keys()
    }

    /// Decided by class, not by the `name` string, which any payload may carry.
    pub fn is_non_error(&self) -> bool {
        matches!(self.0.kind(), ObjectKind::Error { constructor } if constructor == NonError::NAME)
    }

    pub fn as_object(&self) -> &Object {
        &self.0
    }

    pub fn into_object(self) -> Object {
        self.0
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Ok(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<ErrorObject> for Value {
    fn from(error: ErrorObject) -> Self {
        Value::Object(error.0)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();
        if message.is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}: {}", self.name(), message)
        }
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorObject")
            .field("name", &self.name())
            .field("message", &self.message())
            .field("keys", &self.keys())
            .finish()
    }
}

impl std::error::Error for ErrorObject {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ErrorObject::new(Some("boom")).to_string(), "Error: boom");
        assert_eq!(ErrorObject::new(None).to_string(), "Error");
        assert_eq!(
            ErrorObject::with_constructor("TypeError", Some("x")).to_string(),
            "TypeError: x"
        );
    }

    #[test]
    fn test_from_object_requires_error_class() {
        assert!(ErrorObject::from_object(Object::plain()).is_none());
        assert!(ErrorObject::from_object(Object::error(None)).is_some());
    }

    #[test]
    fn test_usable_as_std_error() {
        fn fails() -> Result<(), Box<dyn std::error::Error>> {
            Err(ErrorObject::new(Some("nope")).into())
        }
        assert_eq!(fails().unwrap_err().to_string(), "Error: nope");
    }
}
