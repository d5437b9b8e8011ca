//! Schema-driven field resolution
//!
//! `docfill-fields` turns loosely-typed, per-document-type field schemas into
//! a small closed vocabulary a form renderer can act on: a control type, a
//! concrete input type, an ordered HTML attribute set, an option set and a
//! class list.
//!
//! # Architecture
//!
//! - **Total**: every function returns a value for any input shape; unknown
//!   tokens fall back to safe defaults and malformed numbers are dropped
//! - **Table-driven**: type and class resolution are ordered lookup tables,
//!   never ad-hoc branching
//! - **First writer wins**: top-level schema keys beat their `parameters`
//!   synonyms
//!
//! ```
//! use docfill_fields::{describe_field, ControlType, InputType, RawFieldSchema};
//! use serde_json::json;
//!
//! let raw = RawFieldSchema::from(json!({
//!     "slug": "due",
//!     "type": "date",
//!     "minvalue": "2024-01-01",
//!     "parameters": {"required": "yes"}
//! }));
//! let field = describe_field("single", &raw);
//! assert_eq!(field.control, ControlType::Single);
//! assert_eq!(field.input, Some(InputType::Date));
//! assert_eq!(field.attributes.get("min"), Some("2024-01-01"));
//! ```

pub mod attributes;
pub mod class;
pub mod control;
pub mod descriptor;
pub mod input;
pub mod options;
pub mod schema;

pub use attributes::{build_attributes, AttributeSet};
pub use class::build_class;
pub use control::{resolve_control_type, ControlType};
pub use descriptor::{describe_field, FieldDescriptor, ValidationDescriptor};
pub use docfill_common::is_truthy;
pub use input::{map_input_type, InputType};
pub use options::{get_placeholder, parse_options, OptionSet};
pub use schema::RawFieldSchema;
