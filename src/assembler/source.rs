use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// External anime key (AniList style numeric id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimeId(pub u64);

impl Display for AnimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AnimeId {
    fn from(id: u64) -> Self {
        AnimeId(id)
    }
}

/// Metadata lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeMetadata {
    pub id: AnimeId,
    pub title: String,
    /// may carry HTML markup
    pub synopsis: Option<String>,
}

/// One record of the bulk dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub id: AnimeId,
    pub title: String,
    #[serde(default)]
    pub synopsis: String,
}

/// Synopsis lookup by key and/or title.
///
/// `Ok(None)` means no match. `Err` is a transport or remote fault;
/// callers treat both as "no data".
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn search_synopsis(
        &self,
        id: AnimeId,
        title: Option<&str>,
    ) -> Result<Option<AnimeMetadata>, SourceError>;
}

/// Episode summary lookup.
///
/// `Ok(None)` (no summary for that episode) is an expected outcome, not an error.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    async fn episode_summary(
        &self,
        id: AnimeId,
        episode: u32,
    ) -> Result<Option<String>, SourceError>;
}

#[async_trait]
impl<T> MetadataSource for Arc<T>
where
    T: MetadataSource + ?Sized,
{
    async fn search_synopsis(
        &self,
        id: AnimeId,
        title: Option<&str>,
    ) -> Result<Option<AnimeMetadata>, SourceError> {
        (**self).search_synopsis(id, title).await
    }
}

#[async_trait]
impl<T> EpisodeSource for Arc<T>
where
    T: EpisodeSource + ?Sized,
{
    async fn episode_summary(
        &self,
        id: AnimeId,
        episode: u32,
    ) -> Result<Option<String>, SourceError> {
        (**self).episode_summary(id, episode).await
    }
}

/// Source with nothing in it: every lookup is a miss
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

#[async_trait]
impl MetadataSource for NoSource {
    async fn search_synopsis(
        &self,
        _id: AnimeId,
        _title: Option<&str>,
    ) -> Result<Option<AnimeMetadata>, SourceError> {
        Ok(None)
    }
}

#[async_trait]
impl EpisodeSource for NoSource {
    async fn episode_summary(
        &self,
        _id: AnimeId,
        _episode: u32,
    ) -> Result<Option<String>, SourceError> {
        Ok(None)
    }
}

/// In-memory metadata and episode source.
///
/// Synopsis lookup goes by id first, then falls back to the first record whose
/// title contains the requested title (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<DatasetRecord>,
    by_id: HashMap<AnimeId, usize>,
    episodes: HashMap<(AnimeId, u32), String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DatasetRecord>,
    {
        let mut source = Self::new();
        for record in records {
            source.insert(record);
        }
        source
    }

    /// Add a record. An id seen before keeps its first record.
    pub fn insert(&mut self, record: DatasetRecord) -> &mut Self {
        let pos = self.records.len();
        self.by_id.entry(record.id).or_insert(pos);
        self.records.push(record);
        self
    }

    pub fn insert_episode(&mut self, id: AnimeId, episode: u32, summary: impl Into<String>) -> &mut Self {
        self.episodes.insert((id, episode), summary.into());
        self
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    fn find(&self, id: AnimeId, title: Option<&str>) -> Option<&DatasetRecord> {
        if let Some(&pos) = self.by_id.get(&id) {
            return self.records.get(pos);
        }
        let needle = title.map(str::trim).filter(|t| !t.is_empty())?.to_lowercase();
        self.records
            .iter()
            .find(|r| r.title.to_lowercase().contains(&needle))
    }
}

#[async_trait]
impl MetadataSource for StaticSource {
    async fn search_synopsis(
        &self,
        id: AnimeId,
        title: Option<&str>,
    ) -> Result<Option<AnimeMetadata>, SourceError> {
        Ok(self.find(id, title).map(|r| AnimeMetadata {
            id: r.id,
            title: r.title.clone(),
            synopsis: Some(r.synopsis.clone()),
        }))
    }
}

#[async_trait]
impl EpisodeSource for StaticSource {
    async fn episode_summary(
        &self,
        id: AnimeId,
        episode: u32,
    ) -> Result<Option<String>, SourceError> {
        Ok(self.episodes.get(&(id, episode)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str, synopsis: &str) -> DatasetRecord {
        DatasetRecord {
            id: AnimeId(id),
            title: title.to_string(),
            synopsis: synopsis.to_string(),
        }
    }

    #[tokio::test]
    async fn static_source_finds_by_id_then_title() {
        let source = StaticSource::from_records([
            record(1, "Cowboy Bebop", "bounty hunters"),
            record(30, "Neon Genesis Evangelion", "giant robots"),
        ]);
        let by_id = source.search_synopsis(AnimeId(30), None).await.unwrap().unwrap();
        assert_eq!(by_id.title, "Neon Genesis Evangelion");

        let by_title = source
            .search_synopsis(AnimeId(999), Some("  genesis "))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_title.id, AnimeId(30));

        assert!(source.search_synopsis(AnimeId(999), None).await.unwrap().is_none());
        assert!(source.search_synopsis(AnimeId(999), Some("")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_source_episodes() {
        let mut source = StaticSource::new();
        source.insert_episode(AnimeId(1), 1, "Spike meets Jet.");
        assert_eq!(
            source.episode_summary(AnimeId(1), 1).await.unwrap().as_deref(),
            Some("Spike meets Jet.")
        );
        assert!(source.episode_summary(AnimeId(1), 2).await.unwrap().is_none());
    }

    #[test]
    fn dataset_record_from_json() {
        let rec: DatasetRecord = serde_json::from_str(r#"{"id": 5, "title": "X"}"#).unwrap();
        assert_eq!(rec.id, AnimeId(5));
        assert!(rec.synopsis.is_empty());
    }
}
