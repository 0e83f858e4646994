//! Plugin id derivation
//!
//! A plugin's manifest key is derived from its display name once, at publish
//! time, and reused as the lookup key across independent runs. The same input
//! must therefore always produce the same id.

use crate::error::{Result, ShipwrightError};

/// Derive a URL- and filesystem-safe id from a display name.
///
/// Lowercases the input and collapses every run of non-alphanumeric
/// characters into a single hyphen. Leading and trailing separators are
/// dropped, so `"My Cool Plugin!"` becomes `"my-cool-plugin"`.
///
/// Names that contain no alphanumeric characters at all (including the empty
/// string) have no usable id and are rejected.
pub fn normalize_id(display_name: &str) -> Result<String> {
    let mut id = String::with_capacity(display_name.len());
    let mut pending_separator = false;

    for c in display_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !id.is_empty() {
                id.push('-');
            }
            id.push(c.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    if id.is_empty() {
        return Err(ShipwrightError::InvalidPluginName {
            name: display_name.to_string(),
        });
    }

    Ok(id)
}
