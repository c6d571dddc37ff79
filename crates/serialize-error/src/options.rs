//! Conversion options.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Host flavour the conversion runs under.
///
/// Stream objects are only replaced by a marker on the server side; in a
/// browser they are flattened like any other object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    Server,
    Browser,
}

impl Environment {
    /// The environment of the running process, resolved once.
    pub fn current() -> Self {
        static CURRENT: OnceLock<Environment> = OnceLock::new();
        *CURRENT.get_or_init(|| {
            if cfg!(target_family = "wasm") {
                Environment::Browser
            } else {
                Environment::Server
            }
        })
    }

    pub fn has_streams(self) -> bool {
        self == Environment::Server
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::current()
    }
}

/// Options shared by [`serialize_error`](crate::serialize_error) and
/// [`deserialize_error`](crate::deserialize_error).
///
/// # Example
///
/// ```
/// use serialize_error::Options;
///
/// let options = Options::from_json_str(r#"{"maxDepth": 2}"#).unwrap();
/// assert_eq!(options.max_depth, Some(2));
/// assert_eq!(Options::default().max_depth, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// The maximum depth of properties to preserve. `None` is unbounded.
    ///
    /// With a limit of `n`, containers at depth `n` are emitted empty.
    pub max_depth: Option<usize>,
    pub environment: Environment,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: None,
            environment: Environment::current(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Parses options from JSON configuration text. Missing fields keep
    /// their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(text).map_err(|e| ConvertError::InvalidOptions(e.to_string()))
    }

    pub(crate) fn exceeds(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
