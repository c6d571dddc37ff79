//! Convert thrown values into plain, JSON-safe data and back.
//!
//! Errors carry diagnostic fields (`name`, `message`, `stack`, `code`, and
//! whatever else was attached) that should survive logs, IPC and network
//! responses. This crate copies them out of an arbitrary object graph without
//! tripping over cycles, host objects (buffers, streams), functions or
//! unbounded nesting, and rebuilds error instances on the other side.
//!
//! # Example
//!
//! ```
//! use serialize_error::{deserialize_error, serialize_error_to_json, Object, Options, Value};
//!
//! let error = Object::error(Some("disk full"));
//! error.set("code", "ENOSPC");
//! error.set("self", &error);
//!
//! let json = serialize_error_to_json(&error.into(), &Options::default()).unwrap();
//! assert_eq!(json["code"], "ENOSPC");
//! assert_eq!(json["self"], "[Circular]");
//! assert_eq!(json["message"], "disk full");
//!
//! let back = deserialize_error(&Value::from(json), &Options::default()).unwrap();
//! assert_eq!(back.message(), "disk full");
//! assert_eq!(back.code().as_deref(), Some("ENOSPC"));
//! ```

mod ancestors;
pub mod common_properties;
pub mod deserialize;
pub mod destroy_circular;
pub mod error;
pub mod error_object;
pub mod non_error;
pub mod options;
pub mod serialize;
pub mod stringify;
pub mod value;

pub use common_properties::{CommonProperty, COMMON_PROPERTIES};
pub use deserialize::{deserialize_error, deserialize_error_from_json};
pub use destroy_circular::{BUFFER_MARKER, CIRCULAR_MARKER, STREAM_MARKER};
pub use error::ConvertError;
pub use error_object::ErrorObject;
pub use non_error::NonError;
pub use options::{Environment, Options};
pub use serialize::{serialize_error, serialize_error_to_json};
pub use stringify::{stringify, to_display_string};
pub use value::{Object, ObjectKind, StreamKind, Value};
