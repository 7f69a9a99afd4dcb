//! Store reset and the [`QuizAdmin`] facade.
//!
//! `QuizAdmin` owns a [`Store`] behind a single mutex together with a
//! [`Clock`], and exposes every account and quiz operation as a method. Each
//! call holds the lock for its whole read-check-write pass.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::account;
use crate::clock::{Clock, SystemClock};
use crate::error::AdminError;
use crate::model::{AuthUserId, QuizCreated, QuizId, QuizList, QuizView, UserDetails, UserId};
use crate::quiz;
use crate::store::Store;

/// Reset the store to its freshly started state.
pub fn clear(store: &mut Store) {
    let (users, quizzes) = (store.user_count(), store.quiz_count());
    store.clear();
    tracing::info!(users, quizzes, "cleared store");
}

/// Thread-safe handle over one store and one clock.
pub struct QuizAdmin {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for QuizAdmin {
    fn default() -> Self {
        Self::new(Store::new(), Arc::new(SystemClock))
    }
}

impl QuizAdmin {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
        }
    }

    // Poison is ignored: a panicked operation leaves the store as it was at
    // the point of the panic.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the full current state.
    pub fn snapshot(&self) -> Store {
        self.lock().clone()
    }

    /// Swap in a whole new state.
    pub fn replace(&self, store: Store) {
        *self.lock() = store;
    }

    /// Consume the handle and return its store.
    pub fn into_store(self) -> Store {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        name_first: &str,
        name_last: &str,
    ) -> Result<AuthUserId, AdminError> {
        account::register(&mut self.lock(), email, password, name_first, name_last)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthUserId, AdminError> {
        account::login(&mut self.lock(), email, password)
    }

    pub fn user_details(&self, auth_user_id: UserId) -> Result<UserDetails, AdminError> {
        account::user_details(&self.lock(), auth_user_id)
    }

    pub fn update_user_details(
        &self,
        auth_user_id: UserId,
        email: &str,
        name_first: &str,
        name_last: &str,
    ) -> Result<(), AdminError> {
        account::update_user_details(&mut self.lock(), auth_user_id, email, name_first, name_last)
    }

    pub fn update_password(
        &self,
        auth_user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AdminError> {
        account::update_password(&mut self.lock(), auth_user_id, old_password, new_password)
    }

    pub fn list_quizzes(&self, auth_user_id: UserId) -> Result<QuizList, AdminError> {
        quiz::list(&self.lock(), auth_user_id)
    }

    pub fn create_quiz(
        &self,
        auth_user_id: UserId,
        name: &str,
        description: &str,
    ) -> Result<QuizCreated, AdminError> {
        quiz::create(&mut self.lock(), self.clock.as_ref(), auth_user_id, name, description)
    }

    pub fn remove_quiz(&self, auth_user_id: UserId, quiz_id: QuizId) -> Result<(), AdminError> {
        quiz::remove(&mut self.lock(), auth_user_id, quiz_id)
    }

    pub fn quiz_info(&self, auth_user_id: UserId, quiz_id: QuizId) -> Result<QuizView, AdminError> {
        quiz::info(&self.lock(), auth_user_id, quiz_id)
    }

    pub fn rename_quiz(
        &self,
        auth_user_id: UserId,
        quiz_id: QuizId,
        name: &str,
    ) -> Result<(), AdminError> {
        quiz::rename(&mut self.lock(), self.clock.as_ref(), auth_user_id, quiz_id, name)
    }

    pub fn update_quiz_description(
        &self,
        auth_user_id: UserId,
        quiz_id: QuizId,
        description: &str,
    ) -> Result<(), AdminError> {
        quiz::update_description(
            &mut self.lock(),
            self.clock.as_ref(),
            auth_user_id,
            quiz_id,
            description,
        )
    }

    pub fn reset_all(&self) {
        clear(&mut self.lock());
    }
}
