//! Input validation helpers shared by the account flow

/// Characters accepted as the "special character" of a strong password.
pub const PASSWORD_SPECIAL_CHARS: &str = "\\|!#$%&/()=?»«@£§€{}.-;'<>_,";

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Password strength predicate.
///
/// A password is accepted when it has at least 8 characters and contains an
/// uppercase letter, a lowercase letter, a digit and one character from
/// [`PASSWORD_SPECIAL_CHARS`].
pub fn is_password_valid(password: &str) -> bool {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return false;
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    has_upper && has_lower && has_digit && has_special
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(is_password_valid("Abc12345!"));
        assert!(is_password_valid("Zz9_long_enough"));
    }

    #[test]
    fn rejects_missing_uppercase_and_symbol() {
        assert!(!is_password_valid("abc12345"));
    }

    #[test]
    fn rejects_each_missing_class() {
        assert!(!is_password_valid(""));
        assert!(!is_password_valid("Ab1!"));
        assert!(!is_password_valid("ABC12345!"));
        assert!(!is_password_valid("abc12345!"));
        assert!(!is_password_valid("Abcdefgh!"));
        assert!(!is_password_valid("Abc123456"));
    }

    #[test]
    fn symbols_outside_the_set_do_not_count() {
        assert!(!is_password_valid("Abc12345+"));
        assert!(!is_password_valid("Abc12345*"));
        assert!(is_password_valid("Abc12345€"));
    }
}
