//! Account service: registration, login and profile maintenance.
//!
//! Every function takes the [`Store`] it operates on. Validation runs in a
//! fixed order and the first failing check decides the error.

use crate::error::{AdminError, NameField};
use crate::model::{AuthUserId, User, UserDetails, UserId};
use crate::store::Store;
use crate::validation::{validate_email, validate_password, validate_person_name};

/// Register a new administrator and return their id.
pub fn register(
    store: &mut Store,
    email: &str,
    password: &str,
    name_first: &str,
    name_last: &str,
) -> Result<AuthUserId, AdminError> {
    validate_email(email)?;
    if store.users().any(|u| u.email == email) {
        return Err(AdminError::EmailTaken);
    }
    validate_person_name(name_first, NameField::First)?;
    validate_person_name(name_last, NameField::Last)?;
    validate_password(password)?;

    let id = store.insert_user(|auth_user_id| User {
        auth_user_id,
        email: email.to_string(),
        password: password.to_string(),
        name: format!("{name_first} {name_last}"),
        num_successful_logins: 1,
        num_failed_passwords_since_last_login: 0,
        password_history: Vec::new(),
    })?;
    tracing::info!(user_id = id, "registered user");

    Ok(AuthUserId { auth_user_id: id })
}

/// Log a user in by email and password.
///
/// A wrong password is still recorded against the account before the error
/// is returned.
pub fn login(store: &mut Store, email: &str, password: &str) -> Result<AuthUserId, AdminError> {
    let Some(user) = store.user_by_email_mut(email) else {
        return Err(AdminError::EmailNotFound);
    };

    if user.password == password {
        user.num_successful_logins += 1;
        user.num_failed_passwords_since_last_login = 0;
        tracing::debug!(user_id = user.auth_user_id, "login succeeded");
        Ok(AuthUserId {
            auth_user_id: user.auth_user_id,
        })
    } else {
        user.num_failed_passwords_since_last_login += 1;
        tracing::warn!(
            user_id = user.auth_user_id,
            failures = user.num_failed_passwords_since_last_login,
            "login failed: incorrect password"
        );
        Err(AdminError::IncorrectPassword)
    }
}

pub fn user_details(store: &Store, auth_user_id: UserId) -> Result<UserDetails, AdminError> {
    let user = store
        .user(auth_user_id)
        .ok_or(AdminError::UserNotFound(auth_user_id))?;
    Ok(UserDetails { user: user.view() })
}

/// Replace a user's email and name.
///
/// The email is validated before the user id is looked up, so a malformed
/// email wins over an unknown user.
pub fn update_user_details(
    store: &mut Store,
    auth_user_id: UserId,
    email: &str,
    name_first: &str,
    name_last: &str,
) -> Result<(), AdminError> {
    validate_email(email)?;
    if store
        .users()
        .any(|u| u.email == email && u.auth_user_id != auth_user_id)
    {
        return Err(AdminError::EmailTaken);
    }
    if store.user(auth_user_id).is_none() {
        return Err(AdminError::UserNotFound(auth_user_id));
    }
    validate_person_name(name_first, NameField::First)?;
    validate_person_name(name_last, NameField::Last)?;

    let user = store
        .user_mut(auth_user_id)
        .ok_or(AdminError::UserNotFound(auth_user_id))?;
    user.email = email.to_string();
    user.name = format!("{name_first} {name_last}");
    tracing::debug!(user_id = auth_user_id, "updated user details");

    Ok(())
}

/// Change a user's password, remembering the old one.
pub fn update_password(
    store: &mut Store,
    auth_user_id: UserId,
    old_password: &str,
    new_password: &str,
) -> Result<(), AdminError> {
    let user = store
        .user_mut(auth_user_id)
        .ok_or(AdminError::UserNotFound(auth_user_id))?;

    if user.password != old_password {
        return Err(AdminError::OldPasswordIncorrect);
    }
    if old_password == new_password {
        return Err(AdminError::PasswordUnchanged);
    }
    if user.password_history.iter().any(|p| p == new_password) {
        return Err(AdminError::PasswordReused);
    }
    validate_password(new_password)?;

    let old = std::mem::replace(&mut user.password, new_password.to_string());
    user.password_history.push(old);
    tracing::debug!(user_id = auth_user_id, "updated password");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn store_with_user() -> (Store, UserId) {
        let mut store = Store::new();
        let id = register(
            &mut store,
            "hayden@example.com",
            "OldPass99",
            "Hayden",
            "Smith",
        )
        .unwrap()
        .auth_user_id;
        (store, id)
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut store = Store::new();
        for (i, email) in ["a@example.com", "b@example.com", "c@example.com"]
            .iter()
            .enumerate()
        {
            let before = store.user_count() as UserId;
            let id = register(&mut store, email, "abcd1234", "Ab", "Cd").unwrap();
            assert_eq!(id.auth_user_id, before);
            assert_eq!(id.auth_user_id, i as UserId);
        }
    }

    #[test]
    fn register_stores_initial_counters() {
        let (store, id) = store_with_user();
        let user = store.user(id).unwrap();
        assert_eq!(user.name, "Hayden Smith");
        assert_eq!(user.num_successful_logins, 1);
        assert_eq!(user.num_failed_passwords_since_last_login, 0);
        assert!(user.password_history.is_empty());
        assert_eq!(user.password, "OldPass99");
    }

    #[test]
    fn register_duplicate_email_conflicts() {
        let (mut store, _) = store_with_user();
        let err = register(&mut store, "hayden@example.com", "other999x", "Xy", "Zw").unwrap_err();
        assert_eq!(err, AdminError::EmailTaken);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn register_check_order() {
        let mut store = Store::new();
        // Bad email beats everything else.
        assert_eq!(
            register(&mut store, "bad", "x", "$", "$"),
            Err(AdminError::InvalidEmail)
        );
        // First name before last name.
        assert_eq!(
            register(&mut store, "a@example.com", "x", "Z", "$"),
            Err(AdminError::NameTooShort(NameField::First))
        );
        // Names before password.
        assert_eq!(
            register(&mut store, "a@example.com", "x", "Zed", "V"),
            Err(AdminError::NameTooShort(NameField::Last))
        );
        assert_eq!(
            register(&mut store, "a@example.com", "x", "Zed", "Vee"),
            Err(AdminError::PasswordTooShort)
        );
        assert_eq!(
            register(&mut store, "a@example.com", "abcdefghij", "Zed", "Vee"),
            Err(AdminError::PasswordTooWeak)
        );
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn login_success_updates_counters() {
        let (mut store, id) = store_with_user();
        let result = login(&mut store, "hayden@example.com", "OldPass99").unwrap();
        assert_eq!(result.auth_user_id, id);

        let details = user_details(&store, id).unwrap();
        assert_eq!(details.user.num_successful_logins, 2);
        assert_eq!(details.user.num_failed_passwords_since_last_login, 0);
    }

    #[test]
    fn failed_logins_are_recorded_then_reset() {
        let (mut store, id) = store_with_user();
        for _ in 0..3 {
            assert_eq!(
                login(&mut store, "hayden@example.com", "wrong"),
                Err(AdminError::IncorrectPassword)
            );
        }
        let details = user_details(&store, id).unwrap();
        assert_eq!(details.user.num_failed_passwords_since_last_login, 3);
        assert_eq!(details.user.num_successful_logins, 1);

        login(&mut store, "hayden@example.com", "OldPass99").unwrap();
        let details = user_details(&store, id).unwrap();
        assert_eq!(details.user.num_failed_passwords_since_last_login, 0);
        assert_eq!(details.user.num_successful_logins, 2);
    }

    #[test]
    fn login_unknown_email() {
        let (mut store, _) = store_with_user();
        let err = login(&mut store, "nobody@example.com", "OldPass99").unwrap_err();
        assert_eq!(err, AdminError::EmailNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn user_details_projection() {
        let (store, id) = store_with_user();
        let details = user_details(&store, id).unwrap();
        assert_eq!(details.user.user_id, id);
        assert_eq!(details.user.name, "Hayden Smith");
        assert_eq!(details.user.email, "hayden@example.com");
        assert_eq!(user_details(&store, 99), Err(AdminError::UserNotFound(99)));
    }

    #[test]
    fn update_details_overwrites_email_and_name() {
        let (mut store, id) = store_with_user();
        update_user_details(&mut store, id, "new@example.com", "Jane", "O'Neil").unwrap();
        let user = user_details(&store, id).unwrap().user;
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.name, "Jane O'Neil");

        // Keeping one's own email is fine.
        update_user_details(&mut store, id, "new@example.com", "Jane", "Doe").unwrap();
    }

    #[test]
    fn update_details_checks_email_before_user() {
        let mut store = Store::new();
        assert_eq!(
            update_user_details(&mut store, 7, "not-an-email", "Jane", "Doe"),
            Err(AdminError::InvalidEmail)
        );
        assert_eq!(
            update_user_details(&mut store, 7, "ok@example.com", "Jane", "Doe"),
            Err(AdminError::UserNotFound(7))
        );
    }

    #[test]
    fn update_details_email_owned_by_other_user() {
        let (mut store, id) = store_with_user();
        register(&mut store, "other@example.com", "abcd1234", "Ot", "Her").unwrap();
        assert_eq!(
            update_user_details(&mut store, id, "other@example.com", "Jane", "Doe"),
            Err(AdminError::EmailTaken)
        );
        // Taken email is reported even for an unknown caller.
        assert_eq!(
            update_user_details(&mut store, 42, "other@example.com", "Jane", "Doe"),
            Err(AdminError::EmailTaken)
        );
    }

    #[test]
    fn update_details_validates_names() {
        let (mut store, id) = store_with_user();
        assert_eq!(
            update_user_details(&mut store, id, "h@example.com", "J4ne", "Doe"),
            Err(AdminError::NameInvalidCharacters(NameField::First))
        );
        assert_eq!(
            update_user_details(&mut store, id, "h@example.com", "Jane", "D"),
            Err(AdminError::NameTooShort(NameField::Last))
        );
        assert_eq!(
            update_user_details(&mut store, id, "h@example.com", "Jane", &"D".repeat(21)),
            Err(AdminError::NameTooLong(NameField::Last))
        );
        assert_eq!(store.user(id).unwrap().email, "hayden@example.com");
    }

    #[test]
    fn password_change_and_reuse() {
        let (mut store, id) = store_with_user();
        update_password(&mut store, id, "OldPass99", "NewPass99").unwrap();

        let err = update_password(&mut store, id, "NewPass99", "OldPass99").unwrap_err();
        assert_eq!(err, AdminError::PasswordReused);
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let user = store.user(id).unwrap();
        assert_eq!(user.password, "NewPass99");
        assert_eq!(user.password_history, vec!["OldPass99"]);
    }

    #[test]
    fn password_change_check_order() {
        let (mut store, id) = store_with_user();
        assert_eq!(
            update_password(&mut store, 5, "OldPass99", "NewPass99"),
            Err(AdminError::UserNotFound(5))
        );
        assert_eq!(
            update_password(&mut store, id, "wrong", "NewPass99"),
            Err(AdminError::OldPasswordIncorrect)
        );
        assert_eq!(
            update_password(&mut store, id, "OldPass99", "OldPass99"),
            Err(AdminError::PasswordUnchanged)
        );
        assert_eq!(
            update_password(&mut store, id, "OldPass99", "short1"),
            Err(AdminError::PasswordTooShort)
        );
        assert_eq!(
            update_password(&mut store, id, "OldPass99", "nodigitshere"),
            Err(AdminError::PasswordTooWeak)
        );
        assert_eq!(store.user(id).unwrap().password, "OldPass99");
    }

    #[test]
    fn login_uses_new_password_after_change() {
        let (mut store, id) = store_with_user();
        update_password(&mut store, id, "OldPass99", "NewPass99").unwrap();
        assert_eq!(
            login(&mut store, "hayden@example.com", "OldPass99"),
            Err(AdminError::IncorrectPassword)
        );
        assert_eq!(
            login(&mut store, "hayden@example.com", "NewPass99").unwrap(),
            AuthUserId { auth_user_id: id }
        );
    }

    #[test]
    fn register_fails_cleanly_when_ids_run_out() {
        let mut store: Store = serde_json::from_str(r#"{"nextUserId":4294967295}"#).unwrap();
        let err = register(&mut store, "a@example.com", "abcd1234", "Ab", "Cd").unwrap_err();
        assert_eq!(err, AdminError::IdsExhausted);
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(store.user_count(), 0);
    }
}
