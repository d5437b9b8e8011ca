//! Logging utilities for Docfill
//!
//! This module provides utilities for formatting and displaying log messages.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing types in logs as YAML
///
/// Use this in tracing statements to format descriptors and lookup tables
/// as YAML with a newline before the content:
///
/// ```ignore
/// use docfill_common::Pretty;
/// use tracing::debug;
///
/// debug!("resolved field: {}", Pretty(&descriptor));
/// ```
///
/// Types must implement Serialize + Debug. Debug is used as a fallback if
/// YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    struct Sample {
        slug: &'static str,
        rows: u32,
    }

    #[test]
    fn test_pretty_renders_yaml_with_leading_newline() {
        let rendered = Pretty(&Sample {
            slug: "summary",
            rows: 4,
        })
        .to_string();
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("slug: summary"));
        assert!(rendered.contains("rows: 4"));
    }

    #[test]
    fn test_pretty_debug_matches_display() {
        let value = vec!["a", "b"];
        assert_eq!(format!("{:?}", Pretty(&value)), format!("{}", Pretty(&value)));
    }
}
