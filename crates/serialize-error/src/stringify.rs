//! JSON text and plain string renderings of arbitrary values.
//!
//! [`stringify`] follows JSON text rules: only enumerable own data is
//! written, `undefined` and functions vanish from objects and become `null`
//! in arrays, non-finite numbers become `null`, `to_json` hooks are honored
//! and a cycle is an error. [`to_display_string`] is the lossy fallback used
//! when no JSON text can be produced.

use crate::ancestors::Ancestors;
use crate::error::ConvertError;
use crate::value::{Object, ObjectKind, Value};
use serde_json::json;

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Renders `value` as JSON text. `Ok(None)` means the value has no JSON
/// form at all (`undefined`, a function).
///
/// # Examples
///
/// ```
/// use serialize_error::{stringify, Object, Value};
///
/// assert_eq!(stringify(&Value::Null).unwrap(), Some("null".to_string()));
/// assert_eq!(stringify(&Value::from("123")).unwrap(), Some("\"123\"".to_string()));
/// assert_eq!(stringify(&Value::Undefined).unwrap(), None);
///
/// let object = Object::plain();
/// object.set("self", &object);
/// assert!(stringify(&Value::from(object)).is_err());
/// ```
pub fn stringify(value: &Value) -> Result<Option<String>, ConvertError> {
    match json_value(value)? {
        Some(json) => serde_json::to_string(&json)
            .map(Some)
            .map_err(|e| ConvertError::Thrown(e.to_string())),
        None => Ok(None),
    }
}

pub(crate) fn json_value(value: &Value) -> Result<Option<serde_json::Value>, ConvertError> {
    render(value, None)
}

fn render(
    value: &Value,
    seen: Option<&Ancestors<'_>>,
) -> Result<Option<serde_json::Value>, ConvertError> {
    match value {
        Value::Undefined => Ok(None),
        Value::Null => Ok(Some(serde_json::Value::Null)),
        Value::Bool(b) => Ok(Some(serde_json::Value::Bool(*b))),
        Value::Number(n) => Ok(Some(number(*n))),
        Value::String(s) => Ok(Some(serde_json::Value::String(s.clone()))),
        Value::Object(object) => render_object(object, seen),
    }
}

fn render_object(
    object: &Object,
    seen: Option<&Ancestors<'_>>,
) -> Result<Option<serde_json::Value>, ConvertError> {
    if let Some(hook) = object.to_json_hook() {
        return hook(object).map(Some);
    }
    if seen.is_some_and(|path| path.contains(object)) {
        return Err(ConvertError::CircularStructure);
    }
    let path = Ancestors::new(object, seen);
    match object.kind() {
        ObjectKind::Function { .. } => Ok(None),
        ObjectKind::Buffer(bytes) => Ok(Some(json!({"type": "Buffer", "data": bytes}))),
        ObjectKind::Array => {
            let mut items = Vec::new();
            for index in 0..object.array_len() {
                let item = object.get(&index.to_string())?;
                items.push(render(&item, Some(&path))?.unwrap_or(serde_json::Value::Null));
            }
            Ok(Some(serde_json::Value::Array(items)))
        }
        _ => {
            let mut map = serde_json::Map::new();
            for (key, slot) in object.enumerable_slots() {
                let item = slot.resolve(&key)?;
                if let Some(json) = render(&item, Some(&path))? {
                    map.insert(key, json);
                }
            }
            Ok(Some(serde_json::Value::Object(map)))
        }
    }
}

/// Integral doubles are written without a fraction so `1.0` reads `1`.
fn number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Converts any value to a string without failing.
///
/// # Examples
///
/// ```
/// use serialize_error::{to_display_string, Object, Value};
///
/// assert_eq!(to_display_string(&Value::Undefined), "undefined");
/// assert_eq!(to_display_string(&Value::from(1.5)), "1.5");
/// assert_eq!(to_display_string(&Value::from(Object::plain())), "[object Object]");
/// ```
pub fn to_display_string(value: &Value) -> String {
    display(value, None)
}

fn display(value: &Value, seen: Option<&Ancestors<'_>>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Object(object) => display_object(object, seen),
    }
}

fn display_object(object: &Object, seen: Option<&Ancestors<'_>>) -> String {
    match object.kind() {
        ObjectKind::Array => {
            // A cyclic array joins to an empty string at the repeat.
            if seen.is_some_and(|path| path.contains(object)) {
                return String::new();
            }
            let path = Ancestors::new(object, seen);
            (0..object.array_len())
                .map(|index| match object.get(&index.to_string()) {
                    Ok(Value::Undefined | Value::Null) | Err(_) => String::new(),
                    Ok(item) => display(&item, Some(&path)),
                })
                .collect::<Vec<_>>()
                .join(",")
        }
        ObjectKind::Error { constructor } => {
            let name = string_property(object, "name").unwrap_or(constructor);
            let message = string_property(object, "message").unwrap_or_default();
            match (name.is_empty(), message.is_empty()) {
                (true, _) => message,
                (false, true) => name,
                (false, false) => format!("{}: {}", name, message),
            }
        }
        ObjectKind::Function { name } => {
            format!("function {}() {{ [native code] }}", name.unwrap_or_default())
        }
        ObjectKind::Buffer(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        _ => "[object Object]".to_string(),
    }
}

fn string_property(object: &Object, key: &str) -> Option<String> {
    match object.get(key) {
        Ok(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Shortest round-trip rendering with exponent forms outside `[1e-6, 1e21)`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exponent = format!("{:e}", n);
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exponent,
    }
}
