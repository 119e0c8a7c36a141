//! Resolve a pointer against a document into a chain of node references.
//!
//! Each [`NodeReference`] names one slot: the parent container plus the key or
//! index of the child. The chain is returned leaf first so the executor can
//! apply an operation at the leaf and then fold the new child back up through
//! the ancestors without walking the tree a second time.
//!
//! References borrow from the document and the pointer, so they cannot outlive
//! the operation that created them.

use crate::error::{PointerError, Result};
use crate::index::{parse_index, ArrayIndex};
use crate::pointer::Pointer;
use crate::value::{self, JsonValue};
use log::trace;

/// One slot in a document.
#[derive(Debug, Clone, Copy)]
pub enum NodeReference<'a> {
    /// The document itself; there is no parent container.
    Root(&'a JsonValue),
    /// Member `key` of an object. The key may be absent.
    Member {
        object: &'a [(String, JsonValue)],
        key: &'a str,
    },
    /// Element `index` of an array. The index may be past the end.
    Element {
        array: &'a [JsonValue],
        index: ArrayIndex,
    },
}

impl<'a> NodeReference<'a> {
    /// The value currently in this slot, if any.
    ///
    /// `Append` never refers to an existing element.
    pub fn get(&self) -> Option<&'a JsonValue> {
        match *self {
            NodeReference::Root(value) => Some(value),
            NodeReference::Member { object, key } => value::lookup(object, key),
            NodeReference::Element { array, index } => match index {
                ArrayIndex::At(i) => array.get(i),
                ArrayIndex::Append => None,
            },
        }
    }

    /// Rebuild this slot's container with `child` in the slot.
    ///
    /// Used for ancestors during propagation, where resolution has already
    /// proven the slot exists. For the root the child becomes the document.
    pub fn with_child(&self, child: JsonValue) -> JsonValue {
        match *self {
            NodeReference::Root(_) => child,
            NodeReference::Member { object, key } => value::with_member(object, key, child),
            NodeReference::Element { array, index } => {
                value::with_element_replaced(array, index.position(array.len()), child)
            }
        }
    }
}

/// Resolved references for one pointer, leaf first.
#[derive(Debug, Clone)]
pub struct ReferenceChain<'a> {
    /// The slot the pointer addresses.
    pub leaf: NodeReference<'a>,
    /// Enclosing slots, nearest parent first, ending at the top-level slot.
    pub ancestors: Vec<NodeReference<'a>>,
}

impl<'a> ReferenceChain<'a> {
    /// Fold a rebuilt leaf container up through the ancestors to a new root.
    pub fn propagate(&self, leaf_container: JsonValue) -> JsonValue {
        self.ancestors
            .iter()
            .fold(leaf_container, |child, reference| reference.with_child(child))
    }
}

/// Walk `document` along `pointer`.
///
/// Every token but the last must name an existing member or element. The last
/// token only has to be well-formed for its container: an object key may be
/// missing and an array index may be `-` or out of range, leaving the
/// operation to decide.
///
/// # Errors
///
/// - [`PointerError::NotContainer`] when a token would descend into a scalar
///   (including a scalar document with a non-empty pointer).
/// - [`PointerError::NoSuchMember`] for a missing intermediate key.
/// - [`PointerError::MalformedIndex`] for an invalid token against an array.
/// - [`PointerError::IndexOutOfRange`] for an intermediate `-` or an
///   intermediate index past the end.
pub fn resolve<'a>(pointer: &'a Pointer, document: &'a JsonValue) -> Result<ReferenceChain<'a>> {
    if pointer.is_root() {
        return Ok(ReferenceChain {
            leaf: NodeReference::Root(document),
            ancestors: Vec::new(),
        });
    }

    let tokens = pointer.tokens();
    let last = tokens.len() - 1;
    let mut path = Vec::with_capacity(tokens.len());
    let mut current = document;

    for (i, token) in tokens.iter().enumerate() {
        trace!("resolve '{}': token {} {:?} on {}", pointer, i, token, current.kind());
        let reference = match current {
            JsonValue::Object(members) => NodeReference::Member {
                object: members.as_slice(),
                key: token.as_str(),
            },
            JsonValue::Array(items) => {
                let index = parse_index(token).map_err(|_| PointerError::MalformedIndex {
                    pointer: pointer.to_string(),
                    token: token.clone(),
                })?;
                NodeReference::Element {
                    array: items.as_slice(),
                    index,
                }
            }
            other => {
                return Err(PointerError::NotContainer {
                    pointer: pointer.to_string(),
                    found: other.kind(),
                })
            }
        };

        if i < last {
            current = reference
                .get()
                .ok_or_else(|| missing_slot(pointer, &reference))?;
        }
        path.push(reference);
    }

    // `path` is root to leaf and holds at least one reference.
    let leaf = path.pop().unwrap_or(NodeReference::Root(document));
    path.reverse();
    Ok(ReferenceChain {
        leaf,
        ancestors: path,
    })
}

/// Error for a slot that had to exist but does not.
pub(crate) fn missing_slot(pointer: &Pointer, reference: &NodeReference<'_>) -> PointerError {
    match *reference {
        NodeReference::Member { key, .. } => PointerError::NoSuchMember {
            pointer: pointer.to_string(),
            member: key.to_string(),
        },
        NodeReference::Element { array, index } => PointerError::IndexOutOfRange {
            pointer: pointer.to_string(),
            index,
            len: array.len(),
        },
        NodeReference::Root(_) => unreachable!("the root slot always exists"),
    }
}
