//! Numeric field validation.
//!
//! The form's only correction: a value that parses as a negative number is
//! silently cleared. Everything else, including text that does not parse at
//! all, passes through byte-for-byte.

/// Sanitizes one numeric field edit.
pub fn sanitize(value: String) -> String {
    if parses_negative(&value) {
        String::new()
    } else {
        value
    }
}

fn parses_negative(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|number| number < 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_are_cleared() {
        assert_eq!(sanitize("-1".to_string()), "");
        assert_eq!(sanitize("-0.5".to_string()), "");
        assert_eq!(sanitize("  -42  ".to_string()), "");
    }

    #[test]
    fn non_negative_values_are_preserved_byte_for_byte() {
        assert_eq!(sanitize("0".to_string()), "0");
        assert_eq!(sanitize("100000".to_string()), "100000");
        assert_eq!(sanitize(" 7 ".to_string()), " 7 ");
        assert_eq!(sanitize("3.14".to_string()), "3.14");
    }

    #[test]
    fn unparseable_text_is_preserved() {
        assert_eq!(sanitize("".to_string()), "");
        assert_eq!(sanitize("-".to_string()), "-");
        assert_eq!(sanitize("1.2.3".to_string()), "1.2.3");
        assert_eq!(sanitize("abc".to_string()), "abc");
    }

    #[test]
    fn negative_zero_is_preserved() {
        // -0.0 < 0.0 is false, so "-0" is not a negative entry.
        assert_eq!(sanitize("-0".to_string()), "-0");
    }
}
