//! Match storage.
//!
//! The store owns the authoritative copy of every match and is responsible
//! for per-id mutual exclusion: `update` runs the whole read-modify-write
//! cycle under the store's write lock, so two concurrent scoring calls on
//! the same match cannot interleave and lose a point.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::MatchError;
use crate::models::{Match, MatchId, MatchStatus};

/// Storage contract required by the match service.
///
/// Implementations return owned snapshots; mutation happens only through
/// [`MatchStore::update`].
pub trait MatchStore: Send + Sync {
    /// Insert or replace a match.
    fn save(&self, tennis_match: Match);

    /// Fetch a snapshot of a match by id.
    fn find_by_id(&self, id: &MatchId) -> Result<Match, MatchError>;

    /// Snapshots of every stored match.
    fn find_all(&self) -> Vec<Match>;

    /// Snapshots of matches with the given status.
    fn find_by_status(&self, status: MatchStatus) -> Vec<Match>;

    /// Remove a match. Fails if the id is unknown.
    fn delete(&self, id: &MatchId) -> Result<(), MatchError>;

    fn exists(&self, id: &MatchId) -> bool;

    /// Mutate a match atomically and return the updated snapshot.
    ///
    /// The closure runs under the store's write lock; if it fails, the match
    /// is left untouched.
    fn update(
        &self,
        id: &MatchId,
        mutate: &mut dyn FnMut(&mut Match) -> Result<(), MatchError>,
    ) -> Result<Match, MatchError>;
}

/// In-memory store backed by a `RwLock`-guarded map. Suitable for
/// development and testing; contents are lost on shutdown.
#[derive(Default)]
pub struct InMemoryMatchStore {
    matches: RwLock<HashMap<MatchId, Match>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<MatchId, Match>> {
        self.matches.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<MatchId, Match>> {
        self.matches.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl MatchStore for InMemoryMatchStore {
    fn save(&self, tennis_match: Match) {
        self.lock_write().insert(tennis_match.id(), tennis_match);
    }

    fn find_by_id(&self, id: &MatchId) -> Result<Match, MatchError> {
        self.lock_read()
            .get(id)
            .cloned()
            .ok_or(MatchError::MatchNotFound(*id))
    }

    fn find_all(&self) -> Vec<Match> {
        self.lock_read().values().cloned().collect()
    }

    fn find_by_status(&self, status: MatchStatus) -> Vec<Match> {
        self.lock_read()
            .values()
            .filter(|m| m.status() == status)
            .cloned()
            .collect()
    }

    fn delete(&self, id: &MatchId) -> Result<(), MatchError> {
        self.lock_write()
            .remove(id)
            .map(|_| ())
            .ok_or(MatchError::MatchNotFound(*id))
    }

    fn exists(&self, id: &MatchId) -> bool {
        self.lock_read().contains_key(id)
    }

    fn update(
        &self,
        id: &MatchId,
        mutate: &mut dyn FnMut(&mut Match) -> Result<(), MatchError>,
    ) -> Result<Match, MatchError> {
        let mut matches = self.lock_write();
        let entry = matches.get_mut(id).ok_or(MatchError::MatchNotFound(*id))?;
        mutate(entry)?;
        Ok(entry.clone())
    }
}
