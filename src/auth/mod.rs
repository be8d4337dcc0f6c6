mod session;
mod tokens;

pub use session::Session;
pub use tokens::{SessionClaims, SessionKeys, SESSION_TTL_SECS};

/// Reduces a dialled string to the ten-digit national subscriber number, so
/// "+91 98765-43210" and "9876543210" identify the same rider.
pub fn normalize_mobile(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() > 10 {
        digits[digits.len() - 10..].into()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_country_code() {
        assert_eq!(normalize_mobile("+91 98765-43210"), "9876543210");
        assert_eq!(normalize_mobile("098 7654 3210"), "9876543210");
    }

    #[test]
    fn normalize_keeps_plain_ten_digit_numbers() {
        assert_eq!(normalize_mobile("9876543210"), "9876543210");
    }

    #[test]
    fn normalize_passes_short_inputs_through() {
        assert_eq!(normalize_mobile("12345"), "12345");
        assert_eq!(normalize_mobile("no digits"), "");
    }
}
