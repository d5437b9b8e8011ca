//! CSS class lists for rendered controls.

use docfill_common::sanitize_html_class;

use crate::input::InputType;

/// Class present on every control.
pub const BASE_CLASS: &str = "field-input";

/// Modifier used for any input without a dedicated entry.
const DEFAULT_MODIFIER: &str = "regular-text";

/// Build the class list for a control rendered as `input`.
///
/// Always `field-input field-input-{type}` followed by one modifier class.
/// Every class is reduced to `[a-z0-9_-]` and duplicates are dropped.
pub fn build_class(input: InputType) -> String {
    let type_class = format!("{BASE_CLASS}-{}", input.as_str());
    join_classes([BASE_CLASS, type_class.as_str(), modifier_for(input)])
}

fn modifier_for(input: InputType) -> &'static str {
    match input {
        InputType::Textarea => "large-text",
        InputType::Checkbox => "field-toggle",
        InputType::Select => "field-choice",
        _ => DEFAULT_MODIFIER,
    }
}

/// Sanitize, de-duplicate and space-join a class list, keeping first occurrences.
pub fn join_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen: Vec<String> = Vec::new();
    for class in classes {
        let class = sanitize_html_class(class);
        if !class.is_empty() && !seen.contains(&class) {
            seen.push(class);
        }
    }
    seen.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InputType::Text, "field-input field-input-text regular-text")]
    #[case(InputType::Number, "field-input field-input-number regular-text")]
    #[case(
        InputType::DateTimeLocal,
        "field-input field-input-datetime-local regular-text"
    )]
    #[case(InputType::Textarea, "field-input field-input-textarea large-text")]
    #[case(InputType::Checkbox, "field-input field-input-checkbox field-toggle")]
    #[case(InputType::Select, "field-input field-input-select field-choice")]
    fn test_build_class(#[case] input: InputType, #[case] expected: &str) {
        assert_eq!(build_class(input), expected);
    }

    #[test]
    fn test_join_classes_sanitizes_and_dedupes() {
        assert_eq!(
            join_classes(["Field-Input", "field-input", "a b", "", "$$", "x_y"]),
            "field-input ab x_y"
        );
    }
}
