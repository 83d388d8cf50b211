// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Free-text field validation for the console menus.
//!
//! The stores never re-validate field syntax; everything here runs
//! before a value reaches them. Numeric parsers normalize a comma
//! decimal separator to a dot, so `12,50` and `12.50` read the same.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// Letters (including Spanish accented ones), digits, whitespace, and a
/// few punctuation marks. A leading digit is rejected separately.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ0-9\s\-\._']+$").unwrap());

const NAME_MAX_LEN: usize = 100;

/// True when `value` is non-empty after trimming.
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Validates a product/user name: non-empty, at most 100 characters,
/// not starting with a digit, and only reasonable characters.
pub fn is_valid_name(value: &str) -> bool {
    let s = value.trim();
    if s.is_empty() || s.chars().count() > NAME_MAX_LEN {
        return false;
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    NAME_RE.is_match(s)
}

/// Parses a strictly positive integer.
pub fn parse_positive_int(value: &str) -> Option<u32> {
    let n: u32 = value.trim().parse().ok()?;
    (n > 0).then_some(n)
}

/// Parses a non-negative decimal, accepting a comma as the decimal
/// separator.
pub fn parse_price(value: &str) -> Option<Decimal> {
    let normalized = value.trim().replace(',', ".");
    let d: Decimal = normalized.parse().ok()?;
    (d >= Decimal::ZERO).then_some(d)
}

/// Parses a yes/no answer.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "s" | "si" | "1" | "true" => Some(true),
        "n" | "no" | "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn names_accept_letters_and_punctuation() {
        assert!(is_valid_name("Don Quijote"));
        assert!(is_valid_name("O'Reilly - 2nd ed."));
        assert!(is_valid_name("Canción de Hielo"));
    }

    #[test]
    fn names_reject_empty_and_leading_digit() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("1984")); // starts with a digit
        assert!(!is_valid_name("name;drop"));
    }

    #[test]
    fn name_length_limit() {
        assert!(is_valid_name(&"a".repeat(100)));
        assert!(!is_valid_name(&"a".repeat(101)));
    }

    #[test]
    fn positive_int_parsing() {
        assert_eq!(parse_positive_int("3"), Some(3));
        assert_eq!(parse_positive_int(" 42 "), Some(42));
        assert_eq!(parse_positive_int("0"), None);
        assert_eq!(parse_positive_int("-1"), None);
        assert_eq!(parse_positive_int("abc"), None);
    }

    #[test]
    fn price_accepts_comma_separator() {
        assert_eq!(parse_price("12.50"), Some(dec!(12.50)));
        assert_eq!(parse_price("12,50"), Some(dec!(12.50)));
        assert_eq!(parse_price("0"), Some(dec!(0)));
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("free"), None);
    }

    #[test]
    fn yes_no_parsing() {
        assert_eq!(parse_yes_no("y"), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
