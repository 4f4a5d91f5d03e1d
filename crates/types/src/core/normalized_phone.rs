// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use phonenumber::{country, Mode, PhoneNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A phone number in the canonical form used to match RSVP submissions
///
/// Numbers that can be parsed are stored in E.164 format (e.g. `+972525551234`). Anything else
/// falls back to its digits, keeping a leading `+`, so the same unusual input still matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    /// Normalize user input, interpreting numbers without country prefix in `default_region`
    ///
    /// Returns [`None`] when the input contains no digits at all.
    pub fn normalize(raw: &str, default_region: country::Id) -> Option<Self> {
        let stripped: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | '-' | '.' | '/') && !c.is_whitespace())
            .collect();

        if !stripped.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        if let Some(phone_number) = parse_phone_number(&stripped, default_region) {
            return Some(Self(phone_number.format().mode(Mode::E164).to_string()));
        }

        let mut fallback = String::with_capacity(stripped.len());
        if stripped.starts_with('+') {
            fallback.push('+');
        }
        fallback.extend(stripped.chars().filter(char::is_ascii_digit));

        Some(Self(fallback))
    }

    /// Wrap an already normalized value, e.g. one loaded from the database
    pub fn from_normalized(normalized: String) -> Self {
        Self(normalized)
    }

    /// The normalized phone number
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destructure this type and extract the inner value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Try to parse a phone number and check its validity
fn parse_phone_number(phone_number: &str, country_code: country::Id) -> Option<PhoneNumber> {
    let phone_number = phone_number.to_owned();

    // Catch panics because the phonenumber crate has some questionable unwraps
    let result =
        std::panic::catch_unwind(move || phonenumber::parse(Some(country_code), phone_number));

    let phone_number = match result {
        Ok(Ok(phone)) => phone,
        Ok(Err(err)) => {
            log::debug!("failed to parse phone number: {:?}", err);
            return None;
        }
        Err(err) => {
            log::error!(
                "phonenumber crate panicked while parsing phone number: {:?}",
                err
            );
            return None;
        }
    };

    if !phonenumber::is_valid(&phone_number) {
        return None;
    }

    Some(phone_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalize(raw: &str) -> Option<String> {
        NormalizedPhone::normalize(raw, country::Id::IL).map(NormalizedPhone::into_inner)
    }

    #[test]
    fn local_and_international_notation_match() {
        let local = normalize("052-555-1234").unwrap();
        let international = normalize("+972 52 555 1234").unwrap();
        let parenthesized = normalize("(052) 555 1234").unwrap();

        assert_eq!(local, "+972525551234");
        assert_eq!(local, international);
        assert_eq!(local, parenthesized);
    }

    #[test]
    fn slashes_and_any_whitespace_are_separators() {
        assert_eq!(
            normalize("052/555\t1234").as_deref(),
            Some("+972525551234")
        );
        assert_eq!(
            normalize("052\u{a0}555\u{a0}1234").as_deref(),
            Some("+972525551234")
        );
    }

    #[test]
    fn unparsable_numbers_fall_back_to_digits() {
        assert_eq!(normalize("12-34").as_deref(), Some("1234"));
        assert_eq!(normalize("+12 (34)").as_deref(), Some("+1234"));
    }

    #[test]
    fn input_without_digits_is_no_phone() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("--()"), None);
        assert_eq!(normalize("n/a"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let phone = NormalizedPhone::from_normalized("+972525551234".into());

        assert_eq!(
            serde_json::to_value(&phone).unwrap(),
            serde_json::json!("+972525551234")
        );
    }
}
