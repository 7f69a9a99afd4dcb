//! The `quizadmin clear` command.
//!
//! The existing data file is never read, so an unreadable snapshot can still
//! be reset.

use anyhow::Result;

use super::{Empty, Outcome, Session};

pub fn execute(session: Session) -> Result<Outcome> {
    session.admin().reset_all();
    session.commit(Ok(Empty {}))
}
