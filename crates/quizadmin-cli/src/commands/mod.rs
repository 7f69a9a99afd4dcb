//! Subcommand implementations and the shared load/run/save session.

pub mod account;
pub mod clear;
pub mod init;
pub mod quiz;

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use quizadmin_core::{AdminError, QuizAdmin, Store, SystemClock};

/// How a command finished, once I/O has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The operation returned an [`AdminError`]; already printed.
    Rejected,
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// One CLI invocation against the snapshot file.
pub struct Session {
    data_file: PathBuf,
    pretty: bool,
    admin: QuizAdmin,
}

impl Session {
    pub fn open(data_file: PathBuf, pretty: bool) -> Result<Self> {
        let store = Store::load_json(&data_file)?;
        tracing::debug!(
            path = %data_file.display(),
            users = store.user_count(),
            quizzes = store.quiz_count(),
            "loaded store"
        );
        Ok(Self::with_store(data_file, pretty, store))
    }

    /// Start from an empty store without reading `data_file`.
    pub fn fresh(data_file: PathBuf, pretty: bool) -> Self {
        Self::with_store(data_file, pretty, Store::new())
    }

    fn with_store(data_file: PathBuf, pretty: bool, store: Store) -> Self {
        Self {
            data_file,
            pretty,
            admin: QuizAdmin::new(store, std::sync::Arc::new(SystemClock)),
        }
    }

    pub fn admin(&self) -> &QuizAdmin {
        &self.admin
    }

    /// Print a read-only result.
    pub fn respond<T: Serialize>(&self, result: Result<T, AdminError>) -> Result<Outcome> {
        match result {
            Ok(value) => {
                self.print(&value)?;
                Ok(Outcome::Success)
            }
            Err(err) => {
                self.print(&ErrorBody::from(&err))?;
                Ok(Outcome::Rejected)
            }
        }
    }

    /// Persist the store, then print the result.
    ///
    /// The store is saved even when the operation failed, since some
    /// failures (a wrong login password) still change it.
    pub fn commit<T: Serialize>(self, result: Result<T, AdminError>) -> Result<Outcome> {
        self.admin.snapshot().save_json(&self.data_file)?;
        self.respond(result)
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{json}");
        Ok(())
    }
}

/// Map `Ok(())` to the `{}` body.
pub fn empty(result: Result<(), AdminError>) -> Result<Empty, AdminError> {
    result.map(|()| Empty {})
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: String,
}

impl From<&AdminError> for ErrorBody {
    fn from(err: &AdminError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}
