//! The account subcommands: `register`, `login`, `user-details`,
//! `update-details` and `update-password`.

use anyhow::Result;

use quizadmin_core::model::UserId;

use super::{empty, Outcome, Session};

pub fn register(
    session: Session,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Outcome> {
    let result = session
        .admin()
        .register(email, password, first_name, last_name);
    session.commit(result)
}

pub fn login(session: Session, email: &str, password: &str) -> Result<Outcome> {
    let result = session.admin().login(email, password);
    session.commit(result)
}

pub fn user_details(session: Session, user: UserId) -> Result<Outcome> {
    session.respond(session.admin().user_details(user))
}

pub fn update_details(
    session: Session,
    user: UserId,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Outcome> {
    let result = session
        .admin()
        .update_user_details(user, email, first_name, last_name);
    session.commit(empty(result))
}

pub fn update_password(
    session: Session,
    user: UserId,
    old_password: &str,
    new_password: &str,
) -> Result<Outcome> {
    let result = session
        .admin()
        .update_password(user, old_password, new_password);
    session.commit(empty(result))
}
