use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::TierThresholds, vectorizer::TFIDFVector};

/// One search result: document key and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry<K> {
    pub key: K,
    pub score: f64,
}

/// Structure to store search results
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// The sort is stable: equal scores keep their current relative order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|e| !e.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep the first `k` entries
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    /// Drop entries for which `keep` returns false, order is kept
    pub fn retain<F>(&mut self, keep: F) -> &mut Self
    where
        F: FnMut(&HitEntry<K>) -> bool,
    {
        self.list.retain(keep);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry<K>> {
        self.list.iter()
    }
}

impl<K> IntoIterator for Hits<K> {
    type Item = HitEntry<K>;
    type IntoIter = std::vec::IntoIter<HitEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for entry in &self.list {
                writeln!(f, "    {:?}: {:.6}", entry.key, entry.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|e| (&e.key, e.score)))
                .finish()
        }
    }
}

impl<K> Display for Hits<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, entry) in self.list.iter().enumerate() {
            writeln!(f, "#{:<3} {} {:.6}", rank + 1, entry.key, entry.score)?;
        }
        Ok(())
    }
}

/// Score every candidate against the query by cosine similarity.
///
/// # Arguments
/// * `query` - query vector
/// * `candidates` - candidate vectors of the same fit
///
/// # Returns
/// * `Hits<usize>` - (candidate position, score), descending by score.
///   Candidates with equal scores keep their input order.
pub fn rank(query: &TFIDFVector, candidates: &[TFIDFVector]) -> Hits<usize> {
    let list: Vec<HitEntry<usize>> = candidates
        .par_iter()
        .enumerate()
        .map(|(key, candidate)| HitEntry {
            key,
            score: query.cosine_similarity(candidate),
        })
        .collect();
    let mut hits = Hits::new(list);
    hits.sort_by_score_desc();
    debug!(
        candidates = candidates.len(),
        best = ?hits.list.first().map(|e| e.score),
        "ranked candidates"
    );
    hits
}

/// Cosine similarity of two vectors of the same fit.
/// 0.0 when either has zero norm.
#[inline]
pub fn cosine_similarity(a: &TFIDFVector, b: &TFIDFVector) -> f64 {
    a.cosine_similarity(b)
}

/// Qualitative bucket of a similarity score, for presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityTier {
    High,
    Medium,
    Low,
}

impl SimilarityTier {
    pub fn from_score(score: f64, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.high {
            SimilarityTier::High
        } else if score >= thresholds.medium {
            SimilarityTier::Medium
        } else {
            SimilarityTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityTier::High => "high",
            SimilarityTier::Medium => "medium",
            SimilarityTier::Low => "low",
        }
    }
}

impl Display for SimilarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::vector::ZeroSpVec;
    use crate::vectorizer::{tfidf::DefaultTFIDFEngine, TFIDFVectorizer};
    use crate::Document;

    fn doc(tokens: &[&str]) -> Document {
        Document::from(tokens)
    }

    #[test]
    fn identical_first_disjoint_last() {
        let corpus = vec![
            doc(&["mecha", "robot", "war"]),
            doc(&["mecha", "robot", "war"]),
            doc(&["cooking", "school", "romance"]),
        ];
        let vectors = TFIDFVectorizer::<DefaultTFIDFEngine>::new().fit_transform(&corpus);
        let hits = rank(&vectors[0], &vectors[1..]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.list[0].key, 0);
        assert!((hits.list[0].score - 1.0).abs() < 1e-12);
        assert_eq!(hits.list[1].key, 1);
        assert_eq!(hits.list[1].score, 0.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let query = ZeroSpVec::from(vec![1.0, 0.0, 0.0]);
        let candidates = vec![
            ZeroSpVec::from(vec![0.0, 1.0, 0.0]),
            ZeroSpVec::from(vec![1.0, 1.0, 0.0]),
            ZeroSpVec::from(vec![0.0, 0.0, 1.0]),
            ZeroSpVec::from(vec![2.0, 2.0, 0.0]),
            ZeroSpVec::from(vec![0.0, 0.0, 0.0]),
        ];
        let hits = rank(&query, &candidates);
        let keys: Vec<usize> = hits.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 3, 0, 2, 4]);
        let scores: Vec<f64> = hits.iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn zero_query_scores_everything_zero() {
        let query: TFIDFVector = ZeroSpVec::zeros(2);
        let candidates = vec![ZeroSpVec::from(vec![1.0, 0.0]), ZeroSpVec::from(vec![0.5, 0.5])];
        let hits = rank(&query, &candidates);
        assert!(hits.iter().all(|e| e.score == 0.0));
        assert_eq!(hits.iter().map(|e| e.key).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn empty_candidates() {
        let query = ZeroSpVec::from(vec![1.0]);
        assert!(rank(&query, &[]).is_empty());
    }

    #[test]
    fn hits_truncate_and_retain() {
        let mut hits = Hits::new(vec![
            HitEntry { key: "a", score: 0.2 },
            HitEntry { key: "b", score: 0.9 },
            HitEntry { key: "c", score: 0.5 },
        ]);
        hits.sort_by_score_desc().retain(|e| e.key != "c").truncate(1);
        assert_eq!(hits.list, vec![HitEntry { key: "b", score: 0.9 }]);
        assert_eq!(format!("{hits}"), "#1   b 0.900000\n");
    }

    #[test]
    fn tiers() {
        let t = TierThresholds::default();
        assert_eq!(SimilarityTier::from_score(0.10, &t), SimilarityTier::High);
        assert_eq!(SimilarityTier::from_score(0.95, &t), SimilarityTier::High);
        assert_eq!(SimilarityTier::from_score(0.08, &t), SimilarityTier::Medium);
        assert_eq!(SimilarityTier::from_score(0.0999, &t), SimilarityTier::Medium);
        assert_eq!(SimilarityTier::from_score(0.0799, &t), SimilarityTier::Low);
        assert_eq!(SimilarityTier::from_score(0.0, &t), SimilarityTier::Low);
        assert_eq!(SimilarityTier::Medium.to_string(), "medium");
    }
}
