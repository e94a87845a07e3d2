use std::collections::HashMap;

use super::source::AnimeId;

/// Memo of source lookups for one engine run.
///
/// Every outcome is stored, including "absent" (`None`), so a repeated
/// lookup never goes back to the source. Entries are never invalidated.
#[derive(Debug, Clone, Default)]
pub struct LookupCache {
    synopses: HashMap<AnimeId, Option<String>>,
    episodes: HashMap<(AnimeId, u32), Option<String>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` if never looked up, `Some(None)` if looked up and absent
    pub fn synopsis(&self, id: AnimeId) -> Option<Option<&str>> {
        self.synopses.get(&id).map(Option::as_deref)
    }

    pub fn insert_synopsis(&mut self, id: AnimeId, synopsis: Option<String>) {
        self.synopses.insert(id, synopsis);
    }

    pub fn episode(&self, id: AnimeId, episode: u32) -> Option<Option<&str>> {
        self.episodes.get(&(id, episode)).map(Option::as_deref)
    }

    pub fn insert_episode(&mut self, id: AnimeId, episode: u32, summary: Option<String>) {
        self.episodes.insert((id, episode), summary);
    }

    /// total number of memoized lookups
    pub fn len(&self) -> usize {
        self.synopses.len() + self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
