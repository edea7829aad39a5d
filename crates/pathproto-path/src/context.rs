//! Lenient, read-only view over a document node.

use serde_json::Value;

use crate::eval::eval;
use crate::types::PathExpr;

/// A read-only evaluation context rooted at one node of a document.
///
/// Every lookup is lenient: a path that resolves to nothing — or to a JSON
/// `null`, which counts as a node with no underlying value — yields absence,
/// never an error. Contexts are cheap handles; narrowing produces a new
/// context borrowing the same document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    root: &'a Value,
}

impl<'a> DocumentContext<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// The node this context is rooted at.
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Single-value lookup: the first match in document order, or `None`
    /// when the path resolves to nothing or to `null`.
    pub fn value(&self, path: &PathExpr) -> Option<&'a Value> {
        eval(path, self.root)
            .into_iter()
            .next()
            .filter(|value| !value.is_null())
    }

    /// Multi-value lookup over every match of `path`.
    ///
    /// A matched array contributes its elements, so a path that lands on a
    /// collection iterates its members; any other match contributes itself.
    /// Flattening is one level deep. The iterator is finite and single-pass.
    pub fn iterate(&self, path: &PathExpr) -> ValueIter<'a> {
        let matches = eval(path, self.root);
        let mut values = Vec::with_capacity(matches.len());
        for value in matches {
            match value {
                Value::Array(elements) => values.extend(elements.iter()),
                other => values.push(other),
            }
        }
        ValueIter { inner: values.into_iter() }
    }

    /// Narrowing: a new context rooted at the first match of `path`, or
    /// `None` when the path is unresolved or resolves to `null`.
    pub fn relative_context(&self, path: &PathExpr) -> Option<DocumentContext<'a>> {
        self.value(path).map(DocumentContext::new)
    }
}

/// Iterator returned by [`DocumentContext::iterate`].
pub struct ValueIter<'a> {
    inner: std::vec::IntoIter<&'a Value>,
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ValueIter<'_> {}
