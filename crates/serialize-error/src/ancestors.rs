//! Path-scoped record of the objects between the traversal root and the
//! current node.
//!
//! Each frame lives on the stack of the call that pushed it and points at its
//! parent, so sibling branches never see each other's nodes. An object reached
//! twice through unrelated branches is therefore not mistaken for a cycle.

use crate::value::Object;

#[derive(Clone, Copy)]
pub(crate) struct Ancestors<'a> {
    node: &'a Object,
    parent: Option<&'a Ancestors<'a>>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(node: &'a Object, parent: Option<&'a Ancestors<'a>>) -> Self {
        Self { node, parent }
    }

    /// Identity lookup along the path.
    pub(crate) fn contains(&self, object: &Object) -> bool {
        self.iter().any(|node| node.ptr_eq(object))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a Object> + '_ {
        let mut frame = Some(self);
        std::iter::from_fn(move || {
            let current = frame?;
            frame = current.parent;
            Some(current.node)
        })
    }
}
