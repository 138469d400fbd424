use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use poise::serenity_prelude::UserId;

/// Reason stored when a user goes AFK without giving one.
pub const DEFAULT_REASON: &str = "AFK";

/// In-memory map of users who are currently away, keyed by user id.
///
/// Lives for the whole process and starts empty on every restart.
#[derive(Debug, Default)]
pub struct PresenceStore {
    entries: Mutex<HashMap<UserId, String>>,
}

/// Exclusive view of the store. Anything done through one guard is atomic with
/// respect to every other event handler.
#[derive(Debug)]
pub struct PresenceGuard<'a> {
    entries: MutexGuard<'a, HashMap<UserId, String>>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> PresenceGuard<'_> {
        // a handler panicking mid-operation can't leave a half-written entry behind
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        PresenceGuard { entries }
    }
}

impl PresenceGuard<'_> {
    pub fn set_afk(&mut self, user_id: UserId, reason: impl Into<String>) {
        self.entries.insert(user_id, reason.into());
    }

    pub fn is_afk(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }

    pub fn reason(&self, user_id: UserId) -> Option<&str> {
        self.entries.get(&user_id).map(String::as_str)
    }

    pub fn clear_afk(&mut self, user_id: UserId) -> bool {
        self.entries.remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
