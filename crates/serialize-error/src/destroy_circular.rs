//! The traversal shared by serialization and deserialization.
//!
//! It walks the own enumerable properties of a source object and writes a
//! fresh copy into a target, replacing what cannot travel as plain data:
//!
//! - a repeat of an object already on the current path becomes `"[Circular]"`,
//! - buffers become `"[object Buffer]"`, streams `"[object Stream]"` (server
//!   only),
//! - functions are dropped,
//! - containers at the depth limit are left empty.
//!
//! The source is never written to.

use crate::ancestors::Ancestors;
use crate::common_properties::COMMON_PROPERTIES;
use crate::error::ConvertError;
use crate::options::Options;
use crate::value::{Object, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::{debug, trace};

pub const CIRCULAR_MARKER: &str = "[Circular]";
pub const BUFFER_MARKER: &str = "[object Buffer]";
pub const STREAM_MARKER: &str = "[object Stream]";

thread_local! {
    /// Objects whose `to_json` hook is running on this thread.
    static CONVERTING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Marks an object as converting for as long as the guard lives.
struct HookGuard(usize);

impl HookGuard {
    /// `None` when the object's hook is already on the stack.
    fn enter(object: &Object) -> Option<Self> {
        let id = object.id();
        CONVERTING
            .with(|converting| converting.borrow_mut().insert(id))
            .then(|| HookGuard(id))
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        CONVERTING.with(|converting| {
            converting.borrow_mut().remove(&self.0);
        });
    }
}

/// Traversal settings fixed for one conversion.
pub(crate) struct DestroyCircular<'o> {
    pub options: &'o Options,
    /// Expose every common property as enumerable.
    pub force_enumerable: bool,
}

impl DestroyCircular<'_> {
    /// Converts `from`, writing into `target` when given.
    ///
    /// The result is the target, or whatever a `to_json` hook on `from`
    /// returned.
    pub(crate) fn run(&self, from: &Object, target: Option<Object>) -> Result<Value, ConvertError> {
        self.visit(from, None, target, 0)
    }

    fn visit(
        &self,
        from: &Object,
        seen: Option<&Ancestors<'_>>,
        target: Option<Object>,
        depth: usize,
    ) -> Result<Value, ConvertError> {
        let to = target.unwrap_or_else(|| {
            if from.is_array() {
                Object::array()
            } else {
                Object::plain()
            }
        });
        let path = Ancestors::new(from, seen);

        if self.options.exceeds(depth) {
            trace!(depth, "depth limit reached, emitting empty container");
            return Ok(Value::Object(to));
        }

        if let Some(hook) = from.to_json_hook() {
            if let Some(_guard) = HookGuard::enter(from) {
                debug!(depth, "converting through to_json hook");
                return Ok(Value::from(hook(from)?));
            }
        }

        for (key, slot) in from.enumerable_slots() {
            let value = slot.resolve(&key)?;
            let object = match value {
                Value::Object(object) => object,
                primitive => {
                    to.set(key, primitive);
                    continue;
                }
            };

            if object.is_buffer() {
                to.set(key, BUFFER_MARKER);
            } else if object.is_stream() && self.options.environment.has_streams() {
                to.set(key, STREAM_MARKER);
            } else if object.is_function() {
                continue;
            } else if path.contains(&object) {
                trace!(key = key.as_str(), "circular reference");
                to.set(key, CIRCULAR_MARKER);
            } else {
                let copy = self.visit(&object, Some(&path), None, depth + 1)?;
                to.set(key, copy);
            }
        }

        for common in COMMON_PROPERTIES {
            if let Value::String(value) = from.get(common.property)? {
                to.define(
                    common.property,
                    value,
                    self.force_enumerable || common.enumerable,
                );
            }
        }

        Ok(Value::Object(to))
    }
}
