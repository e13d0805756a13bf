//! Input Validation
//!
//! Field rules applied by the server before anything reaches the store.
//! Every validator returns the cleaned value (trimmed where trimming is part
//! of the rule) or a `SharedError::ValidationError` naming the field.

use crate::shared::error::SharedError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;
pub const COMMUNITY_NAME_MIN: usize = 3;
pub const COMMUNITY_NAME_MAX: usize = 30;
pub const TITLE_MAX: usize = 300;
pub const BODY_MAX: usize = 40_000;
pub const BIO_MAX: usize = 500;
pub const DESCRIPTION_MAX: usize = 2_000;
pub const BAN_REASON_MAX: usize = 500;
/// Ten years; longer bans should be permanent
pub const BAN_DURATION_MAX_HOURS: u32 = 24 * 365 * 10;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only ASCII letters, digits and underscores
/// - Start with a letter
pub fn validate_username(username: &str) -> Result<&str, SharedError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(SharedError::validation(
            "username",
            format!("Username must be {}-{} characters", USERNAME_MIN, USERNAME_MAX),
        ));
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(SharedError::validation(
                "username",
                "Username must start with a letter",
            ))
        }
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SharedError::validation(
            "username",
            "Username may only contain letters, numbers, and underscores",
        ));
    }

    Ok(username)
}

/// Basic email shape check: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<&str, SharedError> {
    let invalid = || SharedError::validation("email", "Invalid email format");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {
            Ok(email)
        }
        _ => Err(invalid()),
    }
}

pub fn validate_password(password: &str) -> Result<&str, SharedError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN),
        ));
    }
    if len > PASSWORD_MAX {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at most {} characters", PASSWORD_MAX),
        ));
    }
    Ok(password)
}

/// Community names are URL path segments: lowercase, start with a letter,
/// then letters, digits, `_` or `-`.
pub fn validate_community_name(name: &str) -> Result<&str, SharedError> {
    let len = name.chars().count();
    if !(COMMUNITY_NAME_MIN..=COMMUNITY_NAME_MAX).contains(&len) {
        return Err(SharedError::validation(
            "name",
            format!(
                "Community name must be {}-{} characters",
                COMMUNITY_NAME_MIN, COMMUNITY_NAME_MAX
            ),
        ));
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => {
            return Err(SharedError::validation(
                "name",
                "Community name must start with a lowercase letter",
            ))
        }
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
        return Err(SharedError::validation(
            "name",
            "Community name may only contain lowercase letters, digits, '_' and '-'",
        ));
    }

    Ok(name)
}

fn required_text<'a>(field: &str, value: &'a str, max: usize) -> Result<&'a str, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} cannot be empty", capitalize(field))));
    }
    if trimmed.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", capitalize(field), max),
        ));
    }
    Ok(trimmed)
}

fn optional_text<'a>(field: &str, value: &'a str, max: usize) -> Result<&'a str, SharedError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", capitalize(field), max),
        ));
    }
    Ok(trimmed)
}

pub(crate) fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn validate_title(title: &str) -> Result<&str, SharedError> {
    required_text("title", title, TITLE_MAX)
}

pub fn validate_body(body: &str) -> Result<&str, SharedError> {
    required_text("body", body, BODY_MAX)
}

pub fn validate_bio(bio: &str) -> Result<&str, SharedError> {
    optional_text("bio", bio, BIO_MAX)
}

pub fn validate_description(description: &str) -> Result<&str, SharedError> {
    optional_text("description", description, DESCRIPTION_MAX)
}

pub fn validate_ban_reason(reason: &str) -> Result<&str, SharedError> {
    optional_text("reason", reason, BAN_REASON_MAX)
}

/// Temporary ban length in hours, between 1 and `BAN_DURATION_MAX_HOURS`.
pub fn validate_ban_duration(hours: u32) -> Result<u32, SharedError> {
    if hours == 0 {
        return Err(SharedError::validation(
            "duration_hours",
            "duration_hours must be greater than zero",
        ));
    }
    if hours > BAN_DURATION_MAX_HOURS {
        return Err(SharedError::validation(
            "duration_hours",
            format!(
                "duration_hours must be at most {}; omit it for a permanent ban",
                BAN_DURATION_MAX_HOURS
            ),
        ));
    }
    Ok(hours)
}

/// Chat content limit comes from server config.
pub fn validate_chat_content(content: &str, max: usize) -> Result<&str, SharedError> {
    required_text("content", content, max)
}
