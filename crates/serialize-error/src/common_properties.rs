//! Diagnostic fields copied onto every converted object when present as
//! strings, even if the source hides them from enumeration.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonProperty {
    pub property: &'static str,
    /// Enumerability on deserialized errors. Serialization exposes all of them.
    pub enumerable: bool,
}

pub const COMMON_PROPERTIES: [CommonProperty; 4] = [
    CommonProperty {
        property: "name",
        enumerable: false,
    },
    CommonProperty {
        property: "message",
        enumerable: false,
    },
    CommonProperty {
        property: "stack",
        enumerable: false,
    },
    CommonProperty {
        property: "code",
        enumerable: true,
    },
];
