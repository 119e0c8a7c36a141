//! Get / add / replace / remove at a pointer.
//!
//! Each structural operation resolves the pointer, builds a new container at
//! the leaf, then rebuilds every ancestor with the new child ("spine rebuild").
//! Only the containers on the pointer's path are reallocated; every sibling
//! subtree in the result is the same `Arc` as in the input. The input document
//! is never modified, on success or on error.
//!
//! | op      | object leaf               | array leaf                          | root (`""`)          |
//! |---------|---------------------------|-------------------------------------|----------------------|
//! | get     | member must exist         | `0 <= i < len`                      | whole document       |
//! | add     | insert or overwrite       | insert before `i`, `0 <= i <= len`  | value becomes doc    |
//! | replace | member must exist         | `0 <= i < len`, no shifting         | `InvalidOperation`   |
//! | remove  | member must exist         | `0 <= i < len`, shifts left         | `InvalidOperation`   |
//!
//! The append token `-` is accepted only by add.

use crate::error::{PointerError, Result};
use crate::index::ArrayIndex;
use crate::pointer::Pointer;
use crate::resolve::{missing_slot, resolve, NodeReference};
use crate::value::{self, JsonValue};
use log::debug;
use std::fmt;

/// The four pointer-addressed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Add,
    Replace,
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Get => "get",
            Operation::Add => "add",
            Operation::Replace => "replace",
            Operation::Remove => "remove",
        };
        f.write_str(s)
    }
}

/// Value at `pointer`.
///
/// The empty pointer returns the whole document. The result shares structure
/// with `document`.
///
/// # Errors
///
/// Resolution errors, or [`PointerError::NoSuchMember`] /
/// [`PointerError::IndexOutOfRange`] when the addressed slot is empty
/// (including `-`).
///
/// # Examples
///
/// ```
/// use jptr_core::{get, JsonValue, Pointer};
/// use serde_json::json;
///
/// let doc = JsonValue::from(json!({"a": [1, 2, 3]}));
/// let ptr = Pointer::parse("/a/1").unwrap();
/// assert_eq!(get(&ptr, &doc).unwrap(), JsonValue::from(2i64));
/// ```
pub fn get(pointer: &Pointer, document: &JsonValue) -> Result<JsonValue> {
    logged(Operation::Get, pointer, || {
        let chain = resolve(pointer, document)?;
        chain
            .leaf
            .get()
            .cloned()
            .ok_or_else(|| missing_slot(pointer, &chain.leaf))
    })
}

/// New document with `value` added at `pointer`.
///
/// - Object member: inserted, or overwritten in place if the key exists.
/// - Array element: inserted before the index, later elements shift right;
///   `-` (or an index equal to the length) appends.
/// - Empty pointer: `value` becomes the new document. Its kind is not
///   checked against the old root.
///
/// # Errors
///
/// Resolution errors, or [`PointerError::IndexOutOfRange`] when an array
/// index is greater than the length.
///
/// # Examples
///
/// ```
/// use jptr_core::{add, JsonValue, Pointer};
/// use serde_json::json;
///
/// let doc = JsonValue::from(json!({"a": [1, 2, 3]}));
/// let ptr = Pointer::parse("/a/1").unwrap();
/// let out = add(&ptr, &doc, JsonValue::from(9i64)).unwrap();
/// assert_eq!(out, JsonValue::from(json!({"a": [1, 9, 2, 3]})));
/// ```
pub fn add(pointer: &Pointer, document: &JsonValue, value: JsonValue) -> Result<JsonValue> {
    execute(Operation::Add, pointer, document, |leaf| match leaf {
        NodeReference::Root(_) => Ok(value),
        NodeReference::Member { object, key } => Ok(value::with_member(object, key, value)),
        NodeReference::Element { array, index } => {
            let at = index.position(array.len());
            if at > array.len() {
                return Err(missing_slot(pointer, &leaf));
            }
            Ok(value::with_element_inserted(array, at, value))
        }
    })
}

/// New document with the existing value at `pointer` overwritten.
///
/// Array elements are overwritten in place without shifting.
///
/// # Errors
///
/// Resolution errors, [`PointerError::NoSuchMember`] /
/// [`PointerError::IndexOutOfRange`] when nothing is there to replace, or
/// [`PointerError::InvalidOperation`] for the empty pointer.
pub fn replace(pointer: &Pointer, document: &JsonValue, value: JsonValue) -> Result<JsonValue> {
    execute(Operation::Replace, pointer, document, |leaf| {
        Ok(match existing_slot(Operation::Replace, pointer, leaf)? {
            Existing::Member(object, key) => value::with_member(object, key, value),
            Existing::Element(array, i) => value::with_element_replaced(array, i, value),
        })
    })
}

/// New document with the value at `pointer` removed.
///
/// Remaining object members keep their order; later array elements shift
/// left. Removing after an add does not restore a value the add overwrote.
///
/// # Errors
///
/// Same as [`replace`].
pub fn remove(pointer: &Pointer, document: &JsonValue) -> Result<JsonValue> {
    execute(Operation::Remove, pointer, document, |leaf| {
        Ok(match existing_slot(Operation::Remove, pointer, leaf)? {
            Existing::Member(object, key) => value::without_member(object, key),
            Existing::Element(array, i) => value::with_element_removed(array, i),
        })
    })
}

/// Resolve, rebuild the leaf container with `apply`, then rebuild the spine.
fn execute<F>(
    operation: Operation,
    pointer: &Pointer,
    document: &JsonValue,
    apply: F,
) -> Result<JsonValue>
where
    F: FnOnce(NodeReference<'_>) -> Result<JsonValue>,
{
    logged(operation, pointer, || {
        let chain = resolve(pointer, document)?;
        let container = apply(chain.leaf)?;
        Ok(chain.propagate(container))
    })
}

fn logged<F>(operation: Operation, pointer: &Pointer, run: F) -> Result<JsonValue>
where
    F: FnOnce() -> Result<JsonValue>,
{
    let result = run();
    match &result {
        Ok(_) => debug!("{operation} '{pointer}': ok"),
        Err(e) => debug!("{operation} '{pointer}': {e}"),
    }
    result
}

/// A leaf slot known to hold a value.
enum Existing<'a> {
    Member(&'a [(String, JsonValue)], &'a str),
    Element(&'a [JsonValue], usize),
}

fn existing_slot<'a>(
    operation: Operation,
    pointer: &Pointer,
    leaf: NodeReference<'a>,
) -> Result<Existing<'a>> {
    match leaf {
        NodeReference::Root(_) => Err(PointerError::InvalidOperation { operation }),
        NodeReference::Member { object, key } if value::lookup(object, key).is_some() => {
            Ok(Existing::Member(object, key))
        }
        NodeReference::Element {
            array,
            index: ArrayIndex::At(i),
        } if i < array.len() => Ok(Existing::Element(array, i)),
        other => Err(missing_slot(pointer, &other)),
    }
}
