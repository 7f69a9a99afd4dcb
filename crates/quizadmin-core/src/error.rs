//! Service error types.
//!
//! Every account and quiz operation returns one of these as a value. Each
//! variant is a distinct failure with its own message, and [`AdminError::kind`]
//! classifies it by cause so callers can branch without string matching.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{QuizId, UserId};

/// Which half of a person's name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameField {
    First,
    Last,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameField::First => write!(f, "first name"),
            NameField::Last => write!(f, "last name"),
        }
    }
}

/// Cause-based classification of an [`AdminError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A user id, quiz id or login email does not exist.
    NotFound,
    /// The caller does not own the quiz, or supplied the wrong password.
    Unauthorized,
    /// Duplicate email or quiz name, or a reused password.
    Conflict,
    /// Malformed email, or a name containing disallowed characters.
    InvalidFormat,
    /// A name, description or password has an unacceptable length, or the
    /// id range is used up.
    OutOfRange,
    /// A password lacks a letter or a digit.
    WeakCredential,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::WeakCredential => "weak_credential",
        };
        f.write_str(s)
    }
}

/// Errors returned by the account and quiz services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// No user has the given id.
    #[error("user {0} is not a valid user")]
    UserNotFound(UserId),

    /// No quiz has the given id.
    #[error("quiz {0} does not refer to a valid quiz")]
    QuizNotFound(QuizId),

    /// The quiz exists but belongs to someone else.
    #[error("quiz {quiz_id} is not owned by user {user_id}")]
    NotQuizOwner { user_id: UserId, quiz_id: QuizId },

    /// Login email is not registered.
    #[error("email does not exist")]
    EmailNotFound,

    /// Login password does not match.
    #[error("password is incorrect for the given email")]
    IncorrectPassword,

    #[error("email is not valid")]
    InvalidEmail,

    /// Email already belongs to another user.
    #[error("email address is already in use")]
    EmailTaken,

    #[error("{0} contains invalid characters")]
    NameInvalidCharacters(NameField),

    #[error("{0} is too short")]
    NameTooShort(NameField),

    #[error("{0} is too long")]
    NameTooLong(NameField),

    #[error("password is less than 8 characters")]
    PasswordTooShort,

    #[error("password must contain at least one number and one letter")]
    PasswordTooWeak,

    /// Old password supplied to a password change is wrong.
    #[error("old password is not correct")]
    OldPasswordIncorrect,

    #[error("old password and new password match exactly")]
    PasswordUnchanged,

    /// New password appears in the user's history.
    #[error("new password has already been used before by this user")]
    PasswordReused,

    #[error("quiz name must be between 3 and 30 characters")]
    QuizNameLength,

    #[error("quiz name contains invalid characters")]
    QuizNameInvalidCharacters,

    /// Quiz names are unique across every owner.
    #[error("quiz with the same name already exists")]
    QuizNameTaken,

    #[error("description is longer than 100 characters")]
    DescriptionTooLong,

    /// The id counter has reached the top of its range.
    #[error("no ids are left to allocate")]
    IdsExhausted,
}

impl AdminError {
    /// Classify this error by cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::UserNotFound(_) | AdminError::QuizNotFound(_) | AdminError::EmailNotFound => {
                ErrorKind::NotFound
            }
            AdminError::NotQuizOwner { .. }
            | AdminError::IncorrectPassword
            | AdminError::OldPasswordIncorrect => ErrorKind::Unauthorized,
            AdminError::EmailTaken
            | AdminError::PasswordUnchanged
            | AdminError::PasswordReused
            | AdminError::QuizNameTaken => ErrorKind::Conflict,
            AdminError::InvalidEmail
            | AdminError::NameInvalidCharacters(_)
            | AdminError::QuizNameInvalidCharacters => ErrorKind::InvalidFormat,
            AdminError::NameTooShort(_)
            | AdminError::NameTooLong(_)
            | AdminError::PasswordTooShort
            | AdminError::QuizNameLength
            | AdminError::DescriptionTooLong
            | AdminError::IdsExhausted => ErrorKind::OutOfRange,
            AdminError::PasswordTooWeak => ErrorKind::WeakCredential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_cause() {
        assert_eq!(AdminError::UserNotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(AdminError::EmailNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            AdminError::NotQuizOwner {
                user_id: 1,
                quiz_id: 0
            }
            .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(AdminError::PasswordReused.kind(), ErrorKind::Conflict);
        assert_eq!(
            AdminError::NameInvalidCharacters(NameField::Last).kind(),
            ErrorKind::InvalidFormat
        );
        assert_eq!(AdminError::DescriptionTooLong.kind(), ErrorKind::OutOfRange);
        assert_eq!(AdminError::PasswordTooWeak.kind(), ErrorKind::WeakCredential);
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            AdminError::NameTooShort(NameField::First).to_string(),
            "first name is too short"
        );
        assert_eq!(
            AdminError::NameInvalidCharacters(NameField::Last).to_string(),
            "last name contains invalid characters"
        );
        assert_eq!(ErrorKind::OutOfRange.to_string(), "out_of_range");
    }
}
