//! Quiz service: create, list, inspect, edit and remove quizzes.
//!
//! Every operation first requires a known user. Operations on an existing
//! quiz then require that the quiz exists and that the caller owns it, in
//! that order. Quizzes are always addressed by id.

use crate::clock::Clock;
use crate::error::AdminError;
use crate::model::{Quiz, QuizCreated, QuizId, QuizList, QuizView, UserId};
use crate::store::Store;
use crate::validation::{validate_description, validate_quiz_name_chars, validate_quiz_name_len};

fn require_user(store: &Store, auth_user_id: UserId) -> Result<(), AdminError> {
    match store.user(auth_user_id) {
        Some(_) => Ok(()),
        None => Err(AdminError::UserNotFound(auth_user_id)),
    }
}

/// Resolve a quiz the caller owns, checking user, quiz and owner in turn.
fn owned_quiz_mut(
    store: &mut Store,
    auth_user_id: UserId,
    quiz_id: QuizId,
) -> Result<&mut Quiz, AdminError> {
    require_user(store, auth_user_id)?;
    let quiz = store
        .quiz_mut(quiz_id)
        .ok_or(AdminError::QuizNotFound(quiz_id))?;
    if quiz.quiz_owner != auth_user_id {
        return Err(AdminError::NotQuizOwner {
            user_id: auth_user_id,
            quiz_id,
        });
    }
    Ok(quiz)
}

fn name_in_use(store: &Store, name: &str) -> bool {
    store.quizzes().any(|q| q.name == name)
}

/// All quizzes owned by the user, in creation order.
pub fn list(store: &Store, auth_user_id: UserId) -> Result<QuizList, AdminError> {
    require_user(store, auth_user_id)?;
    let quizzes = store
        .quizzes()
        .filter(|q| q.quiz_owner == auth_user_id)
        .map(Quiz::summary)
        .collect();
    Ok(QuizList { quizzes })
}

pub fn create(
    store: &mut Store,
    clock: &dyn Clock,
    auth_user_id: UserId,
    name: &str,
    description: &str,
) -> Result<QuizCreated, AdminError> {
    require_user(store, auth_user_id)?;
    validate_quiz_name_len(name)?;
    validate_quiz_name_chars(name)?;
    if name_in_use(store, name) {
        return Err(AdminError::QuizNameTaken);
    }
    validate_description(description)?;

    let now = clock.now();
    let quiz_id = store.insert_quiz(|quiz_id| Quiz {
        quiz_id,
        quiz_owner: auth_user_id,
        name: name.to_string(),
        description: description.to_string(),
        time_created: now,
        time_last_edited: now,
    })?;
    tracing::info!(user_id = auth_user_id, quiz_id, "created quiz");

    Ok(QuizCreated { quiz_id })
}

pub fn remove(store: &mut Store, auth_user_id: UserId, quiz_id: QuizId) -> Result<(), AdminError> {
    owned_quiz_mut(store, auth_user_id, quiz_id)?;
    store.remove_quiz(quiz_id);
    tracing::info!(user_id = auth_user_id, quiz_id, "removed quiz");
    Ok(())
}

pub fn info(store: &Store, auth_user_id: UserId, quiz_id: QuizId) -> Result<QuizView, AdminError> {
    require_user(store, auth_user_id)?;
    let quiz = store.quiz(quiz_id).ok_or(AdminError::QuizNotFound(quiz_id))?;
    if quiz.quiz_owner != auth_user_id {
        return Err(AdminError::NotQuizOwner {
            user_id: auth_user_id,
            quiz_id,
        });
    }
    Ok(quiz.view())
}

/// Rename a quiz.
///
/// Uniqueness is checked against every quiz, including this one, so
/// renaming a quiz to its current name is reported as a conflict.
pub fn rename(
    store: &mut Store,
    clock: &dyn Clock,
    auth_user_id: UserId,
    quiz_id: QuizId,
    name: &str,
) -> Result<(), AdminError> {
    owned_quiz_mut(store, auth_user_id, quiz_id)?;
    validate_quiz_name_chars(name)?;
    validate_quiz_name_len(name)?;
    if name_in_use(store, name) {
        return Err(AdminError::QuizNameTaken);
    }

    let quiz = owned_quiz_mut(store, auth_user_id, quiz_id)?;
    quiz.name = name.to_string();
    quiz.time_last_edited = clock.now();
    tracing::debug!(user_id = auth_user_id, quiz_id, "renamed quiz");
    Ok(())
}

pub fn update_description(
    store: &mut Store,
    clock: &dyn Clock,
    auth_user_id: UserId,
    quiz_id: QuizId,
    description: &str,
) -> Result<(), AdminError> {
    let quiz = owned_quiz_mut(store, auth_user_id, quiz_id)?;
    validate_description(description)?;
    quiz.description = description.to_string();
    quiz.time_last_edited = clock.now();
    tracing::debug!(user_id = auth_user_id, quiz_id, "updated quiz description");
    Ok(())
}
