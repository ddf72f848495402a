//! Free-text tag values carried in two renderings.

use serde::Serialize;

/// What to do with characters that have no ASCII rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AsciiPolicy {
    /// Substitute `?` for each unrepresentable character
    Replace,
    /// Drop unrepresentable characters
    #[default]
    Ignore,
}

impl AsciiPolicy {
    /// ASCII-only output replaces, everything else drops.
    pub fn from_ascii_only(ascii_only: bool) -> Self {
        if ascii_only { Self::Replace } else { Self::Ignore }
    }
}

/// Render `text` using ASCII characters only.
pub fn to_ascii(text: &str, policy: AsciiPolicy) -> String {
    match policy {
        AsciiPolicy::Replace => text
            .chars()
            .map(|c| if c.is_ascii() { c } else { '?' })
            .collect(),
        AsciiPolicy::Ignore => text.chars().filter(char::is_ascii).collect(),
    }
}

/// A free-text field as displayed, plus its ASCII rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValue {
    pub display: String,
    pub ascii: String,
}

impl TagValue {
    pub fn new(display: impl Into<String>, policy: AsciiPolicy) -> Self {
        let display = display.into();
        let ascii = to_ascii(&display, policy);
        Self { display, ascii }
    }

    /// Pick a rendering.
    pub fn form(&self, ascii: bool) -> &str {
        if ascii { &self.ascii } else { &self.display }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(to_ascii("Song 2", AsciiPolicy::Replace), "Song 2");
        assert_eq!(to_ascii("Song 2", AsciiPolicy::Ignore), "Song 2");
    }

    #[test]
    fn test_ascii_replace_and_ignore() {
        assert_eq!(to_ascii("Björk", AsciiPolicy::Replace), "Bj?rk");
        assert_eq!(to_ascii("Björk", AsciiPolicy::Ignore), "Bjrk");
        assert_eq!(to_ascii("東京", AsciiPolicy::Replace), "??");
        assert_eq!(to_ascii("東京", AsciiPolicy::Ignore), "");
    }

    #[test]
    fn test_policy_follows_ascii_only_flag() {
        assert_eq!(AsciiPolicy::from_ascii_only(true), AsciiPolicy::Replace);
        assert_eq!(AsciiPolicy::from_ascii_only(false), AsciiPolicy::Ignore);
    }

    #[test]
    fn test_tag_value_forms() {
        let value = TagValue::new("Sigur Rós", AsciiPolicy::Replace);
        assert_eq!(value.form(false), "Sigur Rós");
        assert_eq!(value.form(true), "Sigur R?s");
    }

    proptest! {
        /// Transliterated text never contains non-ASCII characters
        #[test]
        fn ascii_output_is_ascii(input in ".{0,40}") {
            prop_assert!(to_ascii(&input, AsciiPolicy::Replace).is_ascii());
            prop_assert!(to_ascii(&input, AsciiPolicy::Ignore).is_ascii());
        }

        /// Replace keeps one output character per input character
        #[test]
        fn replace_preserves_char_count(input in ".{0,40}") {
            let out = to_ascii(&input, AsciiPolicy::Replace);
            prop_assert_eq!(out.chars().count(), input.chars().count());
        }

        /// ASCII input is left untouched by both policies
        #[test]
        fn ascii_input_unchanged(input in "[ -~]{0,40}") {
            prop_assert_eq!(to_ascii(&input, AsciiPolicy::Ignore), input.clone());
            prop_assert_eq!(to_ascii(&input, AsciiPolicy::Replace), input);
        }
    }
}
