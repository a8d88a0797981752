/// Trims surrounding whitespace and lower-cases an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims surrounding whitespace; used for passwords and titles
pub fn normalize_text(text: &str) -> String {
    text.trim().to_string()
}
