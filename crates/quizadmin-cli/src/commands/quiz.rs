//! The quiz subcommands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizadmin_core::model::{QuizId, QuizList, UserId};

use super::{empty, Outcome, Session};

pub fn list(session: Session, user: UserId, table: bool) -> Result<Outcome> {
    let result = session.admin().list_quizzes(user);
    match result {
        Ok(list) if table => {
            print_table(&list);
            Ok(Outcome::Success)
        }
        other => session.respond(other),
    }
}

fn print_table(list: &QuizList) {
    if list.quizzes.is_empty() {
        println!("No quizzes.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz ID", "Name"]);
    for quiz in &list.quizzes {
        table.add_row(vec![Cell::new(quiz.quiz_id), Cell::new(&quiz.name)]);
    }
    println!("{table}");
}

pub fn create(session: Session, user: UserId, name: &str, description: &str) -> Result<Outcome> {
    let result = session.admin().create_quiz(user, name, description);
    session.commit(result)
}

pub fn remove(session: Session, user: UserId, quiz: QuizId) -> Result<Outcome> {
    let result = session.admin().remove_quiz(user, quiz);
    session.commit(empty(result))
}

pub fn info(session: Session, user: UserId, quiz: QuizId) -> Result<Outcome> {
    session.respond(session.admin().quiz_info(user, quiz))
}

pub fn rename(session: Session, user: UserId, quiz: QuizId, name: &str) -> Result<Outcome> {
    let result = session.admin().rename_quiz(user, quiz, name);
    session.commit(empty(result))
}

pub fn describe(
    session: Session,
    user: UserId,
    quiz: QuizId,
    description: &str,
) -> Result<Outcome> {
    let result = session
        .admin()
        .update_quiz_description(user, quiz, description);
    session.commit(empty(result))
}
