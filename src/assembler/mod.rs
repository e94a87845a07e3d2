//! Document assembly.
//!
//! Builds the token sequence of one title from a synopsis and, optionally,
//! its episode summaries. Lookups go through async source traits and are
//! memoized per assembler. A failed lookup never aborts assembly: it is
//! logged, recorded as an [`AssemblyWarning`] and treated as "no data".

pub mod cache;
pub mod source;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::SourceError,
    text::{strip_html_tags, Preprocessor},
    Document,
};

use self::cache::LookupCache;
use self::source::{AnimeId, EpisodeSource, MetadataSource};

/// Degraded lookup recorded during assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssemblyWarning {
    /// source had no usable synopsis
    SynopsisUnavailable { id: AnimeId },
    /// synopsis source returned an error
    SynopsisLookupFailed { id: AnimeId, error: SourceError },
    /// episode loop stopped on a failed lookup
    EpisodeLookupFailed { id: AnimeId, episode: u32, error: SourceError },
}

impl Display for AssemblyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyWarning::SynopsisUnavailable { id } => {
                write!(f, "no synopsis available for {id}")
            }
            AssemblyWarning::SynopsisLookupFailed { id, error } => {
                write!(f, "synopsis lookup for {id} failed: {error}")
            }
            AssemblyWarning::EpisodeLookupFailed { id, episode, error } => {
                write!(f, "episode {episode} lookup for {id} failed: {error}")
            }
        }
    }
}

/// Source traffic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupStats {
    pub synopsis_calls: u64,
    pub episode_calls: u64,
    pub cache_hits: u64,
}

impl LookupStats {
    #[inline]
    pub fn remote_calls(&self) -> u64 {
        self.synopsis_calls + self.episode_calls
    }
}

/// Assembles documents from a metadata source and an episode source
#[derive(Debug)]
pub struct DocumentAssembler<M, E> {
    metadata: M,
    episodes: E,
    preprocessor: Preprocessor,
    cache: LookupCache,
    stats: LookupStats,
    warnings: Vec<AssemblyWarning>,
}

impl<M, E> DocumentAssembler<M, E>
where
    M: MetadataSource,
    E: EpisodeSource,
{
    pub fn new(metadata: M, episodes: E, preprocessor: Preprocessor) -> Self {
        Self::with_cache(metadata, episodes, preprocessor, LookupCache::new())
    }

    /// Start from an existing lookup cache
    pub fn with_cache(metadata: M, episodes: E, preprocessor: Preprocessor, cache: LookupCache) -> Self {
        Self {
            metadata,
            episodes,
            preprocessor,
            cache,
            stats: LookupStats::default(),
            warnings: Vec::new(),
        }
    }

    /// Build the document of one title.
    ///
    /// # Arguments
    /// * `id` - title key
    /// * `title` - display title, used as the search term (blank means none)
    /// * `include_episodes` - append episode summaries 1, 2, ... until the first miss
    /// * `known_synopsis` - synopsis already at hand. Used as-is without any lookup
    ///   when episodes are not requested.
    ///
    /// # Returns
    /// * `Document` - possibly empty, never an error
    pub async fn assemble(
        &mut self,
        id: AnimeId,
        title: &str,
        include_episodes: bool,
        known_synopsis: Option<&str>,
    ) -> Document {
        if !include_episodes {
            if let Some(synopsis) = known_synopsis {
                return Document::new(self.preprocessor.preprocess(synopsis));
            }
        }

        info!(%id, title, include_episodes, "assembling document");
        let title = Some(title.trim()).filter(|t| !t.is_empty());
        let mut combined = self.synopsis(id, title).await.unwrap_or_default();

        if include_episodes {
            let summaries = self.episode_summaries(id).await;
            if !summaries.is_empty() {
                combined.push(' ');
                combined.push_str(&summaries.join(" "));
            }
        }

        Document::new(self.preprocessor.preprocess(&combined))
    }

    async fn synopsis(&mut self, id: AnimeId, title: Option<&str>) -> Option<String> {
        if let Some(cached) = self.cache.synopsis(id) {
            self.stats.cache_hits += 1;
            return cached.map(str::to_owned);
        }

        self.stats.synopsis_calls += 1;
        let synopsis = match self.metadata.search_synopsis(id, title).await {
            Ok(found) => {
                let synopsis = found.and_then(|meta| usable(meta.synopsis));
                if synopsis.is_none() {
                    self.warn(AssemblyWarning::SynopsisUnavailable { id });
                }
                synopsis
            }
            Err(error) => {
                self.warn(AssemblyWarning::SynopsisLookupFailed { id, error });
                None
            }
        };
        self.cache.insert_synopsis(id, synopsis.clone());
        synopsis
    }

    /// Summaries of episodes 1, 2, ... up to the first one without a summary.
    /// A gap hides every later episode.
    async fn episode_summaries(&mut self, id: AnimeId) -> Vec<String> {
        let mut summaries = Vec::new();
        let mut episode = 1;
        while let Some(summary) = self.episode_summary(id, episode).await {
            summaries.push(summary);
            episode += 1;
        }
        info!(%id, episodes = summaries.len(), "fetched episode summaries");
        summaries
    }

    async fn episode_summary(&mut self, id: AnimeId, episode: u32) -> Option<String> {
        if let Some(cached) = self.cache.episode(id, episode) {
            self.stats.cache_hits += 1;
            return cached.map(str::to_owned);
        }

        self.stats.episode_calls += 1;
        let summary = match self.episodes.episode_summary(id, episode).await {
            Ok(found) => usable(found),
            Err(error) => {
                self.warn(AssemblyWarning::EpisodeLookupFailed { id, episode, error });
                None
            }
        };
        debug!(%id, episode, found = summary.is_some(), "episode lookup");
        self.cache.insert_episode(id, episode, summary.clone());
        summary
    }

    fn warn(&mut self, warning: AssemblyWarning) {
        warn!(%warning, "lookup degraded");
        self.warnings.push(warning);
    }

    /// Drain the warnings recorded so far
    pub fn take_warnings(&mut self) -> Vec<AssemblyWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }
}

/// Text that is empty once tags are stripped counts as absent.
/// Whitespace left over is still text.
fn usable(text: Option<String>) -> Option<String> {
    text.filter(|t| !strip_html_tags(t).is_empty())
}
