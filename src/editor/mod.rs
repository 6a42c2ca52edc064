//! Editing components over the document store.
//!
//! Each component here receives an explicit `&DocumentStore` /
//! `&mut DocumentStore` handle per operation; none of them owns document
//! data. [`binding`] is the single-field primitive, [`collection`] the
//! generic CRUD/reorder layer over the three authored collections,
//! [`tags`] the global tag registry, and [`refs`] the resolver that keeps
//! homepage references from dangling.

pub mod binding;
pub mod collection;
pub mod refs;
pub mod tags;

use serde_json::Value;

/// Swap `index` with the previous element. Boundary and out-of-range
/// indices are no-ops, not errors.
pub(crate) fn shift_up(list: &mut [Value], index: usize) -> bool {
    if index == 0 || index >= list.len() {
        return false;
    }
    list.swap(index, index - 1);
    true
}

/// Swap `index` with the next element. Boundary and out-of-range indices
/// are no-ops, not errors.
pub(crate) fn shift_down(list: &mut [Value], index: usize) -> bool {
    if list.len() < 2 || index >= list.len() - 1 {
        return false;
    }
    list.swap(index, index + 1);
    true
}

/// Remove the element at `index`, if in range.
pub(crate) fn remove_at(list: &mut Vec<Value>, index: usize) -> Option<Value> {
    (index < list.len()).then(|| list.remove(index))
}
