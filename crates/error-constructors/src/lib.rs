//! Well-known error classes by name.
//!
//! Serialized errors keep their class only as a `name` string. Callers that
//! want a typed error back, rather than the generic `Error` that
//! [`serialize_error::deserialize_error`] builds, look the name up here.
//!
//! # Example
//!
//! ```
//! use serialize_error::Environment;
//! use serialize_error_constructors::constructor_for;
//!
//! let make = constructor_for("TypeError", Environment::Server).unwrap();
//! let error = make(Some("not a function"));
//! assert_eq!(error.to_string(), "TypeError: not a function");
//!
//! assert!(constructor_for("SystemError", Environment::Browser).is_none());
//! ```

use indexmap::IndexMap;
use serialize_error::{Environment, ErrorObject};
use std::sync::OnceLock;

/// Builds an error of one class from an optional message.
pub type ErrorConstructor = fn(Option<&str>) -> ErrorObject;

pub type ErrorConstructors = IndexMap<&'static str, ErrorConstructor>;

macro_rules! constructors {
    ($($name:literal),* $(,)?) => {
        [$(($name, (|message: Option<&str>| ErrorObject::with_constructor($name, message)) as ErrorConstructor)),*]
    };
}

/// Language-level classes, available everywhere.
fn native() -> impl Iterator<Item = (&'static str, ErrorConstructor)> {
    constructors![
        "EvalError",
        "RangeError",
        "ReferenceError",
        "SyntaxError",
        "TypeError",
        "URIError",
        "DOMException",
    ]
    .into_iter()
}

/// Classes only a server runtime provides.
fn server_only() -> impl Iterator<Item = (&'static str, ErrorConstructor)> {
    constructors!["AssertionError", "SystemError"].into_iter()
}

/// Every known class for `environment`, in a fixed order.
pub fn error_constructors(environment: Environment) -> &'static ErrorConstructors {
    static SERVER: OnceLock<ErrorConstructors> = OnceLock::new();
    static BROWSER: OnceLock<ErrorConstructors> = OnceLock::new();
    match environment {
        Environment::Server => SERVER.get_or_init(|| native().chain(server_only()).collect()),
        Environment::Browser => BROWSER.get_or_init(|| native().collect()),
    }
}

pub fn constructor_for(name: &str, environment: Environment) -> Option<ErrorConstructor> {
    error_constructors(environment).get(name).copied()
}

/// Rebuilds `error` as an instance of the class its `name` names, carrying
/// over its message, stack and own properties. Unknown names yield `None`.
pub fn reconstruct(error: &ErrorObject, environment: Environment) -> Option<ErrorObject> {
    let construct = constructor_for(&error.name(), environment)?;
    let typed = construct(Some(&error.message()));
    let target = typed.as_object();
    let source = error.as_object();
    for key in source.own_keys() {
        if key == "message" {
            continue;
        }
        if let Ok(value) = source.get(&key) {
            target.define(key.as_str(), value, source.is_enumerable(&key));
        }
    }
    Some(typed)
}
