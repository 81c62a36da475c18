//! Pure field validators shared by the sign-up flow.

/// Returns true when `email` has the shape `local@domain.tld`: no whitespace,
/// a single `@`, and at least one dot in the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx < domain.len() - 1)
}

/// Outcome of [`check_password_strength`].
///
/// `errors` accumulates every violated rule in a fixed order (length,
/// lowercase, uppercase, digit); callers surface only the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn check_password_strength(password: &str) -> PasswordStrength {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }

    PasswordStrength {
        is_valid: errors.is_empty(),
        errors,
    }
}
