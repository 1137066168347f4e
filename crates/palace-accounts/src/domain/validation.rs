//! Input checks performed before any provider is contacted.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld`, matched from the start of the input. Nothing beyond
/// that shape is checked; the identity provider has the final say.
static EMAIL_SHAPE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+"));

/// Whether `email` looks like an address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE
        .as_ref()
        .is_ok_and(|shape| shape.is_match(email))
}

/// Whether every sign-up field that must be present is non-blank.
#[must_use]
pub fn has_required_sign_up_fields(email: &str, display_name: &str, username: &str) -> bool {
    is_valid_email(email) && !display_name.trim().is_empty() && !username.trim().is_empty()
}
