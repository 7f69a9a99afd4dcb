//! The in-memory data store.
//!
//! Users and quizzes are kept in id-keyed maps. Ids come from counters that
//! only ever increase, so a removed quiz's id is never handed out again and
//! ascending id order is creation order.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::AdminError;
use crate::model::{Quiz, QuizId, User, UserId};

/// All users and quizzes, plus the id allocators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default, with = "entity_list")]
    users: BTreeMap<UserId, User>,
    #[serde(default, with = "entity_list")]
    quizzes: BTreeMap<QuizId, Quiz>,
    #[serde(default)]
    next_user_id: UserId,
    #[serde(default)]
    next_quiz_id: QuizId,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every user and quiz and rewind both id counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Users in creation order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Quizzes in creation order.
    pub fn quizzes(&self) -> impl Iterator<Item = &Quiz> {
        self.quizzes.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// First user, in creation order, whose email matches exactly.
    pub fn user_by_email_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.values_mut().find(|u| u.email == email)
    }

    pub fn quiz(&self, id: QuizId) -> Option<&Quiz> {
        self.quizzes.get(&id)
    }

    pub fn quiz_mut(&mut self, id: QuizId) -> Option<&mut Quiz> {
        self.quizzes.get_mut(&id)
    }

    /// Allocate the next user id and store the user built from it.
    ///
    /// Fails with [`AdminError::IdsExhausted`] once the counter has no
    /// successor; the store is left unchanged.
    pub fn insert_user(
        &mut self,
        build: impl FnOnce(UserId) -> User,
    ) -> Result<UserId, AdminError> {
        let id = self.next_user_id;
        self.next_user_id = id.checked_add(1).ok_or(AdminError::IdsExhausted)?;
        self.users.insert(id, build(id));
        Ok(id)
    }

    /// Allocate the next quiz id and store the quiz built from it.
    pub fn insert_quiz(
        &mut self,
        build: impl FnOnce(QuizId) -> Quiz,
    ) -> Result<QuizId, AdminError> {
        let id = self.next_quiz_id;
        self.next_quiz_id = id.checked_add(1).ok_or(AdminError::IdsExhausted)?;
        self.quizzes.insert(id, build(id));
        Ok(id)
    }

    pub fn remove_quiz(&mut self, id: QuizId) -> Option<Quiz> {
        self.quizzes.remove(&id)
    }

    /// Save the store to a pretty-printed JSON file.
    ///
    /// The JSON is written to a temporary file beside `path` and renamed over
    /// it, so readers see either the old snapshot or the new one.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize store")?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .with_context(|| format!("failed to write store to {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Load a store from a JSON file. A missing file yields an empty store.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read store from {}", path.display()))?;
        let mut store: Store =
            serde_json::from_str(&content).context("failed to parse store JSON")?;
        store
            .repair_counters()
            .with_context(|| format!("invalid store in {}", path.display()))?;
        Ok(store)
    }

    // A hand-edited snapshot may carry counters behind its highest id.
    fn repair_counters(&mut self) -> Result<()> {
        if let Some(&max) = self.users.keys().next_back() {
            let next = max
                .checked_add(1)
                .with_context(|| format!("user id {max} leaves no id to allocate"))?;
            self.next_user_id = self.next_user_id.max(next);
        }
        if let Some(&max) = self.quizzes.keys().next_back() {
            let next = max
                .checked_add(1)
                .with_context(|| format!("quiz id {max} leaves no id to allocate"))?;
            self.next_quiz_id = self.next_quiz_id.max(next);
        }
        Ok(())
    }
}

/// Entities that carry their own map key.
trait Keyed {
    fn key(&self) -> u32;
}

impl Keyed for User {
    fn key(&self) -> u32 {
        self.auth_user_id
    }
}

impl Keyed for Quiz {
    fn key(&self) -> u32 {
        self.quiz_id
    }
}

/// Serializes an id-keyed map as a plain list of entities.
mod entity_list {
    use std::collections::BTreeMap;

    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Keyed;

    pub(super) fn serialize<S, T>(map: &BTreeMap<u32, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(map.values())
    }

    pub(super) fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<u32, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Keyed,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for item in items {
            let key = item.key();
            if map.insert(key, item).is_some() {
                return Err(serde::de::Error::custom(format!("duplicate id {key}")));
            }
        }
        Ok(map)
    }
}
