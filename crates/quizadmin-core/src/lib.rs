//! quizadmin-core: account and quiz services over an in-memory store.
//!
//! This crate defines the data model, validation rules and services that
//! the quizadmin CLI drives. Services are plain functions over an explicit
//! [`store::Store`]; [`admin::QuizAdmin`] wraps one store behind a lock.

pub mod account;
pub mod admin;
pub mod clock;
pub mod error;
pub mod model;
pub mod quiz;
pub mod store;
pub mod validation;

pub use admin::QuizAdmin;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AdminError, ErrorKind, NameField};
pub use store::Store;
