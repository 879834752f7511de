//! The general valid-name rule shared by roles, channels and users

/// Non-empty and made only of ASCII letters, digits, `_` and `-`
pub fn is_name_valid(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
