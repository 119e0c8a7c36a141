//! # jptr-core
//!
//! RFC 6901 JSON Pointer resolution with RFC 6902 `add` / `replace` / `remove`
//! semantics, applied to an immutable, structurally shared JSON tree.
//!
//! Every operation returns a new document. Only the containers along the
//! pointer's path are rebuilt; all other subtrees are shared with the input, so
//! the cost of an edit is proportional to the pointer depth (times the width of
//! each container on the path), not to the document size.
//!
//! ## Quick start
//!
//! ```rust
//! use jptr_core::{JsonValue, Pointer};
//! use serde_json::json;
//!
//! let doc = JsonValue::from(json!({"a": [1, 2, 3]}));
//! let ptr = Pointer::parse("/a/1").unwrap();
//!
//! assert_eq!(ptr.get(&doc).unwrap(), JsonValue::from(2i64));
//!
//! let added = ptr.add(&doc, JsonValue::from(9i64)).unwrap();
//! assert_eq!(added, JsonValue::from(json!({"a": [1, 9, 2, 3]})));
//!
//! let removed = ptr.remove(&doc).unwrap();
//! assert_eq!(removed, JsonValue::from(json!({"a": [1, 3]})));
//!
//! // The input is untouched.
//! assert_eq!(doc, JsonValue::from(json!({"a": [1, 2, 3]})));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `JsonValue` tree, kinds, structural "with" updates, serde interop
//! - [`pointer`] — Pointer parsing, token escaping/unescaping
//! - [`index`] — Array index token grammar
//! - [`resolve`] — Pointer → leaf-first chain of node references
//! - [`ops`] — get / add / replace / remove and the spine rebuild
//! - [`error`] — Error taxonomy

pub mod error;
pub mod index;
pub mod ops;
pub mod pointer;
pub mod resolve;
pub mod value;

pub use error::{ErrorKind, PointerError, Result};
pub use index::ArrayIndex;
pub use ops::{add, get, remove, replace, Operation};
pub use pointer::{escape_token, parse_pointer, unescape_token, Pointer};
pub use resolve::{resolve, NodeReference, ReferenceChain};
pub use value::{JsonValue, ValueKind};
