//! Core data model types for quizadmin.
//!
//! `User` and `Quiz` are the stored entities. The remaining types are the
//! projections returned to callers, serialized with the camelCase field names
//! of the external contract.

use serde::{Deserialize, Serialize};

/// Identifier of a registered user.
pub type UserId = u32;

/// Identifier of a quiz.
pub type QuizId = u32;

/// A registered administrator account.
///
/// Passwords are stored and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub auth_user_id: UserId,
    pub email: String,
    pub password: String,
    /// First and last name joined by a single space.
    pub name: String,
    pub num_successful_logins: u32,
    pub num_failed_passwords_since_last_login: u32,
    /// Previously active passwords, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub password_history: Vec<String>,
}

impl User {
    /// Project this user into the public details view.
    pub fn view(&self) -> UserView {
        UserView {
            user_id: self.auth_user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            num_successful_logins: self.num_successful_logins,
            num_failed_passwords_since_last_login: self.num_failed_passwords_since_last_login,
        }
    }
}

/// A quiz owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub quiz_id: QuizId,
    pub quiz_owner: UserId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Seconds since the Unix epoch.
    pub time_created: i64,
    /// Seconds since the Unix epoch.
    pub time_last_edited: i64,
}

impl Quiz {
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            quiz_id: self.quiz_id,
            name: self.name.clone(),
        }
    }

    pub fn view(&self) -> QuizView {
        QuizView {
            quiz_id: self.quiz_id,
            name: self.name.clone(),
            time_created: self.time_created,
            time_last_edited: self.time_last_edited,
            description: self.description.clone(),
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserId {
    pub auth_user_id: UserId,
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub num_successful_logins: u32,
    pub num_failed_passwords_since_last_login: u32,
}

/// Wrapper returned by the user-details lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub user: UserView,
}

/// One entry of a quiz listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub quiz_id: QuizId,
    pub name: String,
}

/// All quizzes owned by one user, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizList {
    pub quizzes: Vec<QuizSummary>,
}

/// Returned by quiz creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCreated {
    pub quiz_id: QuizId,
}

/// Full projection of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub quiz_id: QuizId,
    pub name: String,
    pub time_created: i64,
    pub time_last_edited: i64,
    pub description: String,
}
