//! Field validation rules shared by the account and quiz services.
//!
//! Lengths are counted in characters, not bytes.

use validator::ValidateEmail;

use crate::error::{AdminError, NameField};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const QUIZ_NAME_MIN_LEN: usize = 3;
pub const QUIZ_NAME_MAX_LEN: usize = 30;
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Check that `email` is a plausible mailbox address.
///
/// On top of the `validator` crate's check this rejects local parts with
/// leading, trailing or doubled dots, and domains without a dotted,
/// alphabetic top-level label of at least two characters.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((_, tld)) => is_valid_tld(tld),
        None => false,
    }
}

// Two or more letters, or an IDNA `xn--` label.
fn is_valid_tld(tld: &str) -> bool {
    match tld.strip_prefix("xn--") {
        Some(punycode) => {
            !punycode.is_empty() && punycode.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

pub fn validate_email(email: &str) -> Result<(), AdminError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AdminError::InvalidEmail)
    }
}

/// Person names: ASCII letters, spaces, hyphens and apostrophes, 2 to 20
/// characters. The character set is checked first.
pub fn validate_person_name(name: &str, field: NameField) -> Result<(), AdminError> {
    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\''))
    {
        return Err(AdminError::NameInvalidCharacters(field));
    }
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        return Err(AdminError::NameTooShort(field));
    }
    if len > NAME_MAX_LEN {
        return Err(AdminError::NameTooLong(field));
    }
    Ok(())
}

/// Passwords need 8 or more characters with at least one ASCII letter and
/// one ASCII digit.
pub fn validate_password(password: &str) -> Result<(), AdminError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AdminError::PasswordTooShort);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(AdminError::PasswordTooWeak);
    }
    Ok(())
}

pub fn validate_quiz_name_chars(name: &str) -> Result<(), AdminError> {
    if name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '\''))
    {
        Ok(())
    } else {
        Err(AdminError::QuizNameInvalidCharacters)
    }
}

pub fn validate_quiz_name_len(name: &str) -> Result<(), AdminError> {
    let len = name.chars().count();
    if (QUIZ_NAME_MIN_LEN..=QUIZ_NAME_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(AdminError::QuizNameLength)
    }
}

pub fn validate_description(description: &str) -> Result<(), AdminError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        Err(AdminError::DescriptionTooLong)
    } else {
        Ok(())
    }
}
