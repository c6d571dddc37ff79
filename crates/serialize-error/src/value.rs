//! In-memory object graph that errors are converted from and into.
//!
//! [`Value`] mirrors the dynamic values a program may throw: primitives plus
//! shared, mutable [`Object`]s compared by identity. Objects keep their own
//! properties in insertion order, each either plain data or a getter, and each
//! flagged enumerable or not.

use crate::error::ConvertError;
use chrono::{DateTime, SecondsFormat};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Computed property accessor.
pub type Getter = Rc<dyn Fn() -> Result<Value, ConvertError>>;

/// Custom conversion hook. Receives the object it is installed on and
/// returns its JSON form, replacing the default flattening.
pub type ToJsonHook = Rc<dyn Fn(&Object) -> Result<serde_json::Value, ConvertError>>;

/// Any value a program can hold or throw.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Object),
}

impl Value {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Renders the value as JSON data. Object graphs must be acyclic.
    ///
    /// A root that has no JSON form (`undefined`, a function) becomes `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, ConvertError> {
        Ok(crate::stringify::json_value(self)?.unwrap_or(serde_json::Value::Null))
    }
}

/// Primitives compare by value, objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<&Object> for Value {
    fn from(object: &Object) -> Self {
        Value::Object(object.clone())
    }
}

/// Builds a fresh tree; every container becomes a new object.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Object(Object::array_from(arr.into_iter().map(Value::from)))
            }
            serde_json::Value::Object(map) => {
                let object = Object::plain();
                for (key, value) in map {
                    object.set(key, Value::from(value));
                }
                Value::Object(object)
            }
        }
    }
}

/// Stream classes recognized as opaque host objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stream,
    Readable,
    Writable,
    Duplex,
    Transform,
    PassThrough,
}

/// The class of an object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Plain,
    Array,
    /// An error instance; `constructor` doubles as its inherited `name`.
    Error { constructor: String },
    Function { name: Option<String> },
    Date { epoch_ms: f64 },
    /// Binary blob.
    Buffer(Vec<u8>),
    Stream(StreamKind),
}

#[derive(Clone)]
pub enum Slot {
    Data(Value),
    Getter(Getter),
}

impl Slot {
    /// Reads the slot, invoking the getter if there is one.
    pub fn resolve(&self, key: &str) -> Result<Value, ConvertError> {
        match self {
            Slot::Data(value) => Ok(value.clone()),
            Slot::Getter(getter) => getter().map_err(|e| ConvertError::Getter {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Slot::Getter(_) => f.write_str("Getter(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub slot: Slot,
    pub enumerable: bool,
}

struct ObjectData {
    kind: ObjectKind,
    properties: IndexMap<String, Property>,
    to_json: Option<ToJsonHook>,
}

/// Shared handle to a mutable object. Cloning the handle aliases the object.
///
/// Graphs with cycles keep themselves alive; that is acceptable for the
/// short-lived values passed through a conversion.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            kind,
            properties: IndexMap::new(),
            to_json: None,
        })))
    }

    pub fn plain() -> Self {
        Self::new(ObjectKind::Plain)
    }

    pub fn array() -> Self {
        Self::new(ObjectKind::Array)
    }

    pub fn array_from(values: impl IntoIterator<Item = Value>) -> Self {
        let array = Self::array();
        for value in values {
            array.push(value);
        }
        array
    }

    /// A generic `Error` carrying `message`.
    pub fn error(message: Option<&str>) -> Self {
        Self::error_with_constructor("Error", message)
    }

    /// An error of the named class. `message` and `stack` are own,
    /// non-enumerable properties; `name` is inherited from the class.
    pub fn error_with_constructor(constructor: &str, message: Option<&str>) -> Self {
        let error = Self::new(ObjectKind::Error {
            constructor: constructor.to_string(),
        });
        let header = match message {
            Some(m) if !m.is_empty() => format!("{}: {}", constructor, m),
            _ => constructor.to_string(),
        };
        error.define("stack", format!("{}\n    at <anonymous>", header), false);
        if let Some(message) = message {
            error.define("message", message, false);
        }
        error
    }

    pub fn function(name: Option<&str>) -> Self {
        Self::new(ObjectKind::Function {
            name: name.map(str::to_string),
        })
    }

    pub fn date(epoch_ms: f64) -> Self {
        Self::new(ObjectKind::Date { epoch_ms })
    }

    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(ObjectKind::Buffer(bytes.into()))
    }

    pub fn stream(kind: StreamKind) -> Self {
        Self::new(ObjectKind::Stream(kind))
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity for the lifetime of the object.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Array)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Error { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Function { .. })
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Stream(_))
    }

    /// `None` for anything but a named function.
    pub fn function_name(&self) -> Option<String> {
        match &self.0.borrow().kind {
            ObjectKind::Function { name } => name.clone(),
            _ => None,
        }
    }

    /// Assigns `key`. An existing property keeps its enumerability; a new
    /// one is enumerable.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let slot = Slot::Data(value.into());
        match self.0.borrow_mut().properties.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().slot = slot,
            Entry::Vacant(entry) => {
                entry.insert(Property {
                    slot,
                    enumerable: true,
                });
            }
        }
    }

    /// Defines `key` with explicit enumerability. Redefining keeps the
    /// property's position.
    pub fn define(&self, key: impl Into<String>, value: impl Into<Value>, enumerable: bool) {
        self.0.borrow_mut().properties.insert(
            key.into(),
            Property {
                slot: Slot::Data(value.into()),
                enumerable,
            },
        );
    }

    pub fn define_getter<F>(&self, key: impl Into<String>, getter: F, enumerable: bool)
    where
        F: Fn() -> Result<Value, ConvertError> + 'static,
    {
        self.0.borrow_mut().properties.insert(
            key.into(),
            Property {
                slot: Slot::Getter(Rc::new(getter)),
                enumerable,
            },
        );
    }

    pub fn remove(&self, key: &str) -> bool {
        self.0.borrow_mut().properties.shift_remove(key).is_some()
    }

    /// Appends to an array-like object.
    pub fn push(&self, value: impl Into<Value>) {
        let index = self.array_len();
        self.set(index.to_string(), value);
    }

    /// One past the highest index key.
    pub fn array_len(&self) -> usize {
        self.0
            .borrow()
            .properties
            .keys()
            .filter_map(|key| key.parse::<usize>().ok())
            .map(|index| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Reads `key`, falling back to what the object's class provides.
    pub fn get(&self, key: &str) -> Result<Value, ConvertError> {
        let slot = self.0.borrow().properties.get(key).map(|p| p.slot.clone());
        match slot {
            Some(slot) => slot.resolve(key),
            None => Ok(self.byte(key).unwrap_or_else(|| self.inherited(key))),
        }
    }

    /// Indexed read of a buffer's bytes.
    fn byte(&self, key: &str) -> Option<Value> {
        match &self.0.borrow().kind {
            ObjectKind::Buffer(bytes) => {
                let index = key.parse::<usize>().ok()?;
                bytes.get(index).map(|b| Value::Number(f64::from(*b)))
            }
            _ => None,
        }
    }

    /// A buffer enumerates its bytes ahead of its named properties.
    fn byte_slots(&self) -> Vec<(String, Slot)> {
        match &self.0.borrow().kind {
            ObjectKind::Buffer(bytes) => bytes
                .iter()
                .enumerate()
                .map(|(index, b)| (index.to_string(), Slot::Data(Value::Number(f64::from(*b)))))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn inherited(&self, key: &str) -> Value {
        match (&self.0.borrow().kind, key) {
            (ObjectKind::Error { constructor }, "name") => Value::String(constructor.clone()),
            (ObjectKind::Error { .. }, "message") => Value::String(String::new()),
            _ => Value::Undefined,
        }
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    pub fn is_enumerable(&self, key: &str) -> bool {
        self.0
            .borrow()
            .properties
            .get(key)
            .is_some_and(|p| p.enumerable)
    }

    /// Own enumerable keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.enumerable_slots()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    /// All own keys, enumerable or not.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Snapshot of own enumerable slots. Taken up front so getters and hooks
    /// may touch the object while the caller iterates.
    pub fn enumerable_slots(&self) -> Vec<(String, Slot)> {
        let mut slots = self.byte_slots();
        slots.extend(
            self.0
                .borrow()
                .properties
                .iter()
                .filter(|(_, p)| p.enumerable)
                .map(|(key, p)| (key.clone(), p.slot.clone())),
        );
        slots
    }

    pub fn set_to_json<F>(&self, hook: F)
    where
        F: Fn(&Object) -> Result<serde_json::Value, ConvertError> + 'static,
    {
        self.0.borrow_mut().to_json = Some(Rc::new(hook));
    }

    /// The installed hook, else the one the object's class provides.
    pub fn to_json_hook(&self) -> Option<ToJsonHook> {
        let data = self.0.borrow();
        match (&data.to_json, &data.kind) {
            (Some(hook), _) => Some(Rc::clone(hook)),
            (None, ObjectKind::Date { .. }) => Some(Rc::new(date_to_json) as ToJsonHook),
            _ => None,
        }
    }
}

/// ISO-8601 in UTC with milliseconds. An invalid date renders as `null`.
fn date_to_json(date: &Object) -> Result<serde_json::Value, ConvertError> {
    let epoch_ms = match date.kind() {
        ObjectKind::Date { epoch_ms } if epoch_ms.is_finite() => epoch_ms,
        _ => return Ok(serde_json::Value::Null),
    };
    Ok(DateTime::from_timestamp_millis(epoch_ms.trunc() as i64)
        .map(|time| serde_json::Value::String(time.to_rfc3339_opts(SecondsFormat::Millis, true)))
        .unwrap_or(serde_json::Value::Null))
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys only: printing values would recurse forever on cycles.
        match self.0.try_borrow() {
            Ok(data) => f
                .debug_struct("Object")
                .field("kind", &data.kind)
                .field("keys", &data.properties.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => f.write_str("Object(<borrowed>)"),
        }
    }
}
