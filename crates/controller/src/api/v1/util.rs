// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Helper function to deserialize Option<Option<T>>
/// https://github.com/serde-rs/serde/issues/984
pub(super) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Slugs end up in the public RSVP link and must stay url safe
pub(super) fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid_length = (3..=64).contains(&slug.len());
    let valid_chars = slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if valid_length && valid_chars {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

/// Trims the value, mapping blank strings to `None`
pub(super) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Test {
        #[serde(default, deserialize_with = "deserialize_some")]
        test: Option<Option<String>>,
    }

    #[test]
    fn deserialize_option_option() {
        let none = "{}";
        let some_none = r#"{"test":null}"#;
        let some_some = r#"{"test":"abc"}"#;

        assert_eq!(
            serde_json::from_str::<Test>(none).unwrap(),
            Test { test: None }
        );
        assert_eq!(
            serde_json::from_str::<Test>(some_none).unwrap(),
            Test { test: Some(None) }
        );
        assert_eq!(
            serde_json::from_str::<Test>(some_some).unwrap(),
            Test {
                test: Some(Some("abc".into()))
            }
        );
    }

    #[test]
    fn slugs() {
        assert!(validate_slug("dana-and-noa-2025").is_ok());
        assert!(validate_slug("abc").is_ok());

        assert!(validate_slug("ab").is_err());
        assert!(validate_slug(&"a".repeat(65)).is_err());
        assert!(validate_slug("Dana-and-Noa").is_err());
        assert!(validate_slug("dana and noa").is_err());
        assert!(validate_slug("dana_noa").is_err());
    }

    #[test]
    fn trims_blank_values() {
        assert_eq!(trimmed(Some("  Family  ".into())), Some("Family".into()));
        assert_eq!(trimmed(Some("   ".into())), None);
        assert_eq!(trimmed(None), None);
    }
}
