//! Base converters for primitive attribute kinds.
//!
//! The generated `AttConverter` implements [`BaseConverter`] and adds one
//! `*_to_str` / `str_to_*` pair per generated enumeration.

/// Sentinel stored in integer members that have no value.
pub const UNSET: i32 = -0x7FFF_FFFF;

/// Conversions between primitive attribute values and their text form.
pub trait BaseConverter {
    /// Parses an integer. Unparsable input yields [`UNSET`].
    fn str_to_int(&self, value: &str) -> i32 {
        match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log_unsupported_value("int", value);
                UNSET
            }
        }
    }

    /// Formats an integer.
    fn int_to_str(&self, data: i32) -> String {
        data.to_string()
    }

    /// Parses a double. Unparsable input yields `0.0`.
    fn str_to_dbl(&self, value: &str) -> f64 {
        match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log_unsupported_value("double", value);
                0.0
            }
        }
    }

    /// Formats a double.
    fn dbl_to_str(&self, data: f64) -> String {
        data.to_string()
    }

    /// Parses a single character. Anything else yields `'\0'`.
    fn str_to_char(&self, value: &str) -> char {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                log_unsupported_value("char", value);
                '\0'
            }
        }
    }

    /// Formats a character.
    fn char_to_str(&self, data: char) -> String {
        data.to_string()
    }

    /// Identity conversion for string members.
    fn str_to_str(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Logs a value that a `*_to_str` converter does not know.
pub fn log_unknown_value(type_name: &str, value: i32) {
    tracing::warn!("Unknown value '{}' for {}", value, type_name);
}

/// Logs a string that a `str_to_*` converter could not map.
///
/// Empty strings are not reported.
pub fn log_unsupported_value(type_name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    tracing::warn!("Unsupported value '{}' for {}", value, type_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Converter;

    impl BaseConverter for Converter {}

    #[test]
    fn test_int_round_trip() {
        let conv = Converter;
        assert_eq!(conv.str_to_int("5"), 5);
        assert_eq!(conv.str_to_int(" -3 "), -3);
        assert_eq!(conv.int_to_str(conv.str_to_int("42")), "42");
    }

    #[test]
    fn test_int_invalid_is_unset() {
        let conv = Converter;
        assert_eq!(conv.str_to_int("five"), UNSET);
        assert_eq!(conv.str_to_int(""), UNSET);
    }

    #[test]
    fn test_double_round_trip() {
        let conv = Converter;
        assert_eq!(conv.str_to_dbl("4.5"), 4.5);
        assert_eq!(conv.dbl_to_str(4.5), "4.5");
        assert_eq!(conv.str_to_dbl("x"), 0.0);
    }

    #[test]
    fn test_char_conversion() {
        let conv = Converter;
        assert_eq!(conv.str_to_char("a"), 'a');
        assert_eq!(conv.str_to_char("ab"), '\0');
        assert_eq!(conv.char_to_str('z'), "z");
    }

    #[test]
    fn test_str_identity() {
        let conv = Converter;
        assert_eq!(conv.str_to_str("abc"), "abc");
    }
}
