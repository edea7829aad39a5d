//! Slash-separated path expressions with lenient evaluation over JSON.
//!
//! This crate provides parsing and evaluation of a small, document-relative
//! path dialect: `a/b/c` member access, `items[0]` / `items[-1]` indexing,
//! `['quoted name']` for awkward keys, `*` wildcards and `a//b` descendant
//! search. Evaluation is always lenient — an unresolved path yields absence,
//! never an error — and [`DocumentContext`] packages the three lookup styles
//! a copier needs: single value, iteration, and narrowing.
//!
//! # Example
//!
//! ```
//! use pathproto_path::{parse, DocumentContext};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "feed": {
//!         "items": [
//!             {"id": "a1", "views": 10},
//!             {"id": "b2", "views": 20}
//!         ]
//!     }
//! });
//!
//! let ctx = DocumentContext::new(&doc);
//! let path = parse("feed/items/id").unwrap();
//! let ids: Vec<_> = ctx.iterate(&path).collect();
//! assert_eq!(ids, vec![&json!("a1"), &json!("b2")]);
//!
//! let first = parse("feed/items[0]/views").unwrap();
//! assert_eq!(ctx.value(&first), Some(&json!(10)));
//! ```

mod types;
pub use types::{PathExpr, Segment, Selector};

mod parser;
pub use parser::{parse, ParseError};

mod eval;
pub use eval::eval;

mod context;
pub use context::{DocumentContext, ValueIter};
