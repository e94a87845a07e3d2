use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    assembler::{
        source::{AnimeId, DatasetRecord, EpisodeSource, MetadataSource},
        AssemblyWarning, DocumentAssembler,
    },
    config::RecommendConfig,
    error::ConfigError,
    text::strip_html_tags,
    vectorizer::{
        evaluate::scoring::{rank, SimilarityTier},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        TFIDFVectorizer,
    },
    Document,
};

/// Characters shown by `Recommendation::synopsis_preview` in listings
pub const PREVIEW_CHARS: usize = 300;

/// One recommended title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1-based
    pub rank: usize,
    pub id: AnimeId,
    pub title: String,
    /// HTML stripped and trimmed
    pub synopsis: String,
    pub score: f64,
    pub tier: SimilarityTier,
}

impl Recommendation {
    /// First `max_chars` characters of the synopsis, `...` appended when cut
    pub fn synopsis_preview(&self, max_chars: usize) -> Cow<'_, str> {
        match self.synopsis.char_indices().nth(max_chars) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &self.synopsis[..cut])),
            None => Cow::Borrowed(&self.synopsis),
        }
    }
}

/// Result of one recommendation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// best first
    pub entries: Vec<Recommendation>,
    /// candidates that entered the corpus, before self-exclusion
    pub candidates_considered: usize,
    /// lookups that degraded during this request
    pub warnings: Vec<AssemblyWarning>,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.entries.iter()
    }
}

/// "Similar titles" workflow.
///
/// The query document goes to corpus position 0, the candidates from the bulk
/// dataset after it. One fit covers the whole corpus, then every candidate is
/// ranked against the query.
#[derive(Debug, Clone)]
pub struct Recommender<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    config: RecommendConfig,
    vectorizer: TFIDFVectorizer<E>,
}

impl<E> Recommender<E>
where
    E: TFIDFEngine,
{
    pub fn new(config: RecommendConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let vectorizer = TFIDFVectorizer::with_config(&config.vectorizer)?;
        Ok(Self { config, vectorizer })
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Recommend titles similar to the query.
    ///
    /// # Arguments
    /// * `assembler` - document assembler, its lookup cache carries over between calls
    /// * `query_id` - key of the query title
    /// * `query_title` - query title, also used to drop self-matches
    /// * `dataset` - bulk dataset, records with a blank synopsis are skipped
    ///
    /// # Returns
    /// * `Recommendations` - at most `top_k` entries, empty is a normal outcome
    pub async fn recommend<M, S>(
        &self,
        assembler: &mut DocumentAssembler<M, S>,
        query_id: AnimeId,
        query_title: &str,
        dataset: &[DatasetRecord],
    ) -> Recommendations
    where
        M: MetadataSource,
        S: EpisodeSource,
    {
        let limit = self.config.dataset_limit.unwrap_or(usize::MAX);
        let candidates: Vec<&DatasetRecord> = dataset
            .iter()
            .filter(|r| !r.synopsis.trim().is_empty())
            .take(limit)
            .collect();

        let mut corpus: Vec<Document> = Vec::with_capacity(candidates.len() + 1);
        corpus.push(
            assembler
                .assemble(query_id, query_title, self.config.query_episodes, None)
                .await,
        );
        for record in &candidates {
            corpus.push(
                assembler
                    .assemble(record.id, &record.title, false, Some(&record.synopsis))
                    .await,
            );
        }

        info!(
            query = %query_id,
            candidates = candidates.len(),
            query_tokens = corpus[0].len(),
            "fitting corpus"
        );
        let vectors = self.vectorizer.fit_transform(&corpus);
        let (query, rest) = match vectors.split_first() {
            Some(split) => split,
            None => return Recommendations::default(),
        };

        let mut hits = rank(query, rest);
        hits.retain(|hit| !same_title(&candidates[hit.key].title, query_title))
            .truncate(self.config.top_k);

        let entries = hits
            .into_iter()
            .enumerate()
            .map(|(pos, hit)| {
                let record = candidates[hit.key];
                Recommendation {
                    rank: pos + 1,
                    id: record.id,
                    title: record.title.clone(),
                    synopsis: strip_html_tags(&record.synopsis).trim().to_string(),
                    score: hit.score,
                    tier: SimilarityTier::from_score(hit.score, &self.config.tiers),
                }
            })
            .collect();

        Recommendations {
            entries,
            candidates_considered: candidates.len(),
            warnings: assembler.take_warnings(),
        }
    }
}

/// Title equality used for self-exclusion: trimmed, case-insensitive
fn same_title(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::source::StaticSource;
    use crate::text::Preprocessor;

    fn record(id: u64, title: &str, synopsis: &str) -> DatasetRecord {
        DatasetRecord {
            id: AnimeId(id),
            title: title.to_string(),
            synopsis: synopsis.to_string(),
        }
    }

    fn dataset() -> Vec<DatasetRecord> {
        vec![
            record(1, "Mecha Wars", "Giant mecha robots fight a brutal war."),
            record(2, "Robot Academy", "Students pilot mecha robots at school."),
            record(3, "Cooking Club", "<b>Friends</b> cook delicious meals after school."),
            record(4, "Blank", "   "),
            record(5, "Space Robots", "Robots wage war in space."),
        ]
    }

    fn recommender(config: RecommendConfig) -> Recommender {
        Recommender::new(config).unwrap()
    }

    fn assembler(data: &[DatasetRecord]) -> DocumentAssembler<StaticSource, StaticSource> {
        let source = StaticSource::from_records(data.to_vec());
        DocumentAssembler::new(source.clone(), source, Preprocessor::english())
    }

    fn no_episodes() -> RecommendConfig {
        RecommendConfig {
            query_episodes: false,
            ..RecommendConfig::default()
        }
    }

    #[tokio::test]
    async fn ranks_similar_titles_and_excludes_self() {
        let data = dataset();
        let mut assembler = assembler(&data);
        let recs = recommender(no_episodes())
            .recommend(&mut assembler, AnimeId(1), " mecha WARS ", &data)
            .await;

        assert_eq!(recs.candidates_considered, 4);
        let ids: Vec<AnimeId> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![AnimeId(5), AnimeId(2), AnimeId(3)]);
        let ranks: Vec<usize> = recs.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        let tiers: Vec<SimilarityTier> = recs.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![SimilarityTier::High, SimilarityTier::High, SimilarityTier::Low]);
        assert_eq!(recs.entries[2].score, 0.0);
        assert_eq!(recs.entries[2].synopsis, "Friends cook delicious meals after school.");
        assert!(recs.warnings.is_empty());
    }

    #[tokio::test]
    async fn top_k_and_dataset_limit() {
        let data = dataset();
        let mut assembler = assembler(&data);

        let top1 = recommender(RecommendConfig { top_k: 1, ..no_episodes() })
            .recommend(&mut assembler, AnimeId(1), "Mecha Wars", &data)
            .await;
        assert_eq!(top1.len(), 1);
        assert_eq!(top1.entries[0].id, AnimeId(5));

        let limited = recommender(RecommendConfig {
            dataset_limit: Some(2),
            ..no_episodes()
        })
        .recommend(&mut assembler, AnimeId(1), "Mecha Wars", &data)
        .await;
        assert_eq!(limited.candidates_considered, 2);
        assert_eq!(limited.entries.iter().map(|r| r.id).collect::<Vec<_>>(), vec![AnimeId(2)]);
    }

    #[tokio::test]
    async fn unknown_query_yields_zero_scores_and_a_warning() {
        let data = dataset();
        let mut assembler = assembler(&data);
        let recs = recommender(RecommendConfig::default())
            .recommend(&mut assembler, AnimeId(42), "", &data)
            .await;

        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|r| r.score == 0.0 && r.tier == SimilarityTier::Low));
        // equal scores keep dataset order
        let ids: Vec<u64> = recs.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 5]);
        assert_eq!(
            recs.warnings,
            vec![AssemblyWarning::SynopsisUnavailable { id: AnimeId(42) }]
        );
    }

    #[tokio::test]
    async fn empty_dataset_is_empty_result() {
        let mut assembler = assembler(&[]);
        let recs = recommender(no_episodes())
            .recommend(&mut assembler, AnimeId(1), "Mecha Wars", &[])
            .await;
        assert!(recs.is_empty());
        assert_eq!(recs.candidates_considered, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RecommendConfig { top_k: 0, ..RecommendConfig::default() };
        assert!(matches!(Recommender::<DefaultTFIDFEngine>::new(config), Err(ConfigError::TopK)));
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        let rec = Recommendation {
            rank: 1,
            id: AnimeId(1),
            title: "T".into(),
            synopsis: "héllo world".into(),
            score: 0.5,
            tier: SimilarityTier::High,
        };
        assert_eq!(rec.synopsis_preview(2), "hé...");
        assert_eq!(rec.synopsis_preview(11), "héllo world");
        assert_eq!(rec.synopsis_preview(PREVIEW_CHARS), "héllo world");
    }
}
