//! # Docfill Common
//!
//! Leaf helpers shared by the field resolution and fragment merge crates.
//!
//! ## Modules
//!
//! - [`truthy`] - The single boolean interpretation used for every flag-like schema value
//! - [`sanitize`] - Key, text, class and attribute-name sanitizers plus integer coercion
//! - [`logging`] - Formatting helpers for `tracing` output
//!
//! Every function here is total: malformed input degrades to an empty or
//! default result instead of an error.

pub mod logging;
pub mod sanitize;
pub mod truthy;

pub use logging::Pretty;
pub use sanitize::{
    parse_int, sanitize_attr_name, sanitize_html_class, sanitize_key, sanitize_text_field,
    sanitize_textarea_field, strip_tags,
};
pub use truthy::is_truthy;
