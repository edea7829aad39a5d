//! Lenient path evaluation.

use serde_json::Value;

use crate::types::{PathExpr, Segment, Selector};

/// Evaluate a path against a document node.
///
/// Returns every match in document order, borrowed from the document. An
/// unmatched path yields an empty vector; evaluation itself never fails.
pub fn eval<'a>(path: &PathExpr, root: &'a Value) -> Vec<&'a Value> {
    let mut current = vec![root];
    for segment in &path.segments {
        let mut next = Vec::new();
        for value in current {
            eval_segment(value, segment, &mut next);
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }
    current
}

fn eval_segment<'a>(value: &'a Value, segment: &Segment, out: &mut Vec<&'a Value>) {
    if segment.descendant {
        eval_descendant(value, &segment.selector, out);
    } else {
        eval_selector(value, &segment.selector, out);
    }
}

fn eval_selector<'a>(value: &'a Value, selector: &Selector, out: &mut Vec<&'a Value>) {
    match selector {
        Selector::Name(name) => match value {
            Value::Object(map) => {
                if let Some(child) = map.get(name) {
                    out.push(child);
                }
            }
            // Member access through an array maps over its elements, so
            // `items/asset_id` selects the id of every item. One level only.
            Value::Array(arr) => {
                for element in arr {
                    if let Value::Object(map) = element {
                        if let Some(child) = map.get(name) {
                            out.push(child);
                        }
                    }
                }
            }
            _ => {}
        },
        Selector::Index(index) => {
            if let Value::Array(arr) = value {
                if let Some(child) = lookup_index(arr, *index) {
                    out.push(child);
                }
            }
        }
        Selector::Wildcard => match value {
            Value::Object(map) => out.extend(map.values()),
            Value::Array(arr) => out.extend(arr.iter()),
            _ => {}
        },
    }
}

/// Matches at the current node first, then in every child, so results come
/// out in document order with parents before children. Uses strict member
/// matching — the recursion itself visits array elements, so the mapping
/// behavior of [`eval_selector`] would double-count them here.
fn eval_descendant<'a>(value: &'a Value, selector: &Selector, out: &mut Vec<&'a Value>) {
    match_selector(value, selector, out);
    match value {
        Value::Object(map) => {
            for child in map.values() {
                eval_descendant(child, selector, out);
            }
        }
        Value::Array(arr) => {
            for child in arr {
                eval_descendant(child, selector, out);
            }
        }
        _ => {}
    }
}

fn match_selector<'a>(value: &'a Value, selector: &Selector, out: &mut Vec<&'a Value>) {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(map) = value {
                if let Some(child) = map.get(name) {
                    out.push(child);
                }
            }
        }
        Selector::Index(index) => {
            if let Value::Array(arr) = value {
                if let Some(child) = lookup_index(arr, *index) {
                    out.push(child);
                }
            }
        }
        Selector::Wildcard => match value {
            Value::Object(map) => out.extend(map.values()),
            Value::Array(arr) => out.extend(arr.iter()),
            _ => {}
        },
    }
}

fn lookup_index(arr: &[Value], index: isize) -> Option<&Value> {
    let idx = if index < 0 {
        arr.len().checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    arr.get(idx)
}
