use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::scoring::ScoreTally;

/// The latest completed submission's tally for one quiz
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResult {
    pub tally: ScoreTally,
    pub completed_at: DateTime<Utc>,
}

impl StoredResult {
    pub fn new(tally: ScoreTally) -> Self {
        Self {
            tally,
            completed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Hex-encoded SHA-256 of the password
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
    /// Latest result per quiz id
    pub results: HashMap<String, StoredResult>,
}

impl UserRecord {
    pub fn new(password_hash: String) -> Self {
        Self {
            password_hash,
            registered_at: Utc::now(),
            results: HashMap::new(),
        }
    }
}

/// Storage for user records, keyed by username.
///
/// The session owns one of these for its lifetime; nothing outlives the
/// process.
pub trait UserRepository {
    fn get(&self, username: &str) -> Option<&UserRecord>;

    fn put(&mut self, username: &str, record: UserRecord);

    fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    /// Latest stored result for a quiz, if the user has completed it
    fn result(&self, username: &str, quiz_id: &str) -> Option<&StoredResult> {
        self.get(username)?.results.get(quiz_id)
    }

    /// Replace the user's result for a quiz. Returns false for unknown users.
    fn store_result(&mut self, username: &str, quiz_id: &str, result: StoredResult) -> bool;
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    users: HashMap<String, UserRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for InMemoryRepository {
    fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    fn put(&mut self, username: &str, record: UserRecord) {
        self.users.insert(username.to_string(), record);
    }

    fn store_result(&mut self, username: &str, quiz_id: &str, result: StoredResult) -> bool {
        match self.users.get_mut(username) {
            Some(record) => {
                record.results.insert(quiz_id.to_string(), result);
                true
            }
            None => false,
        }
    }
}
