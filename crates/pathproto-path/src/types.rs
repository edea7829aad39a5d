//! Path expression types.

/// Selector kinds a single segment can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Object member access by name: `author`, `['store name']`
    Name(String),
    /// Array element access, 0-based, negative counts from the end: `[0]`, `[-1]`
    Index(isize),
    /// All member values of an object or all elements of an array: `*`, `[*]`
    Wildcard,
}

/// One step of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The selector applied at this step.
    pub selector: Selector,
    /// Whether the selector matches at any depth below the current node (`a//b`).
    pub descendant: bool,
}

impl Segment {
    pub fn new(selector: Selector, descendant: bool) -> Self {
        Self { selector, descendant }
    }
}

/// A parsed path expression.
///
/// Paths are relative to the context node they are evaluated against. An
/// empty segment list selects the context node itself (the paths `.` and `/`
/// parse to this).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub segments: Vec<Segment>,
}

impl PathExpr {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}
