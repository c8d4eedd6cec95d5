//! Content-derived identifiers for selectors and declarations.
//!
//! Ids come from a 31-multiplier polynomial hash over UTF-16 code units,
//! wrapped to 32-bit signed range at every step. Identical content always
//! yields the same id, which is what lets a merge drop duplicate declarations.

use crate::style::declaration::{UnitKind, Value};

/// Prefix for every issued id, so an id never reads as a bare number.
pub const ID_PREFIX: char = 'c';

/// Polynomial string hash (`h = h * 31 + unit`), wrapping in `i32`.
pub fn hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Id derived from a selector name.
pub fn selector_id(name: &str) -> String {
    format!("{}{}", ID_PREFIX, hash(name))
}

/// Fallback id for a selector whose plain id is already held by another
/// name with the same hash: `c` + hash(`name#attempt`).
pub fn salted_selector_id(name: &str, attempt: u32) -> String {
    selector_id(&format!("{}#{}", name, attempt))
}

/// Id derived from a declaration's `(property, value, unit)` triple.
///
/// The `important` flag is deliberately not part of the key.
pub fn declaration_id(property: &str, value: &Value, unit: UnitKind) -> String {
    let key = format!("{}{}{}", property, value.key(), unit.code());
    format!("{}{}", ID_PREFIX, hash(&key))
}
