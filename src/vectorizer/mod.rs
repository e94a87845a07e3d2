pub mod corpus;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::VectorizerConfig,
    error::ConfigError,
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        corpus::{Corpus, Vocabulary},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
    },
    Document,
};

/// L2 normalized TF-IDF vector.
/// Length equals the size of the IDF table it was projected with.
pub type TFIDFVector = ZeroSpVec<f64>;

/// TF-IDF Vectorizer
///
/// Fits a vocabulary and IDF table over a corpus and projects every document
/// of that same corpus into a normalized TF-IDF vector, in one call.
/// Nothing is kept between calls: each `fit` starts from scratch.
///
/// `TFIDFVectorizer<E>` takes the TF-IDF calculation engine as a generic
/// parameter, `DefaultTFIDFEngine` by default.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    min_df: usize,
    max_df: f64,
    _marker: PhantomData<E>,
}

/// IDF weights of the tokens that passed the document frequency filters.
/// Iteration order is coordinate order of every vector of the same fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdfTable {
    #[serde(with = "indexmap::map::serde_seq")]
    weights: IndexMap<Box<str>, f64>,
}

impl IdfTable {
    #[inline]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Coordinate and weight of a token
    #[inline]
    pub fn get_full(&self, token: &str) -> Option<(usize, f64)> {
        self.weights.get_full(token).map(|(idx, _, &w)| (idx, w))
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.weights.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(token, &w)| (token.as_ref(), w))
    }
}

/// Everything computed by one `fit` call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TFIDFFit {
    /// every distinct token, lexicographic
    pub vocabulary: Vocabulary,
    /// document count and document frequencies
    pub corpus: Corpus,
    /// surviving tokens and their weights
    pub idf: IdfTable,
    /// one vector per input document, same order
    pub vectors: Vec<TFIDFVector>,
}

impl<E> Default for TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    fn default() -> Self {
        Self {
            min_df: 1,
            max_df: 0.95,
            _marker: PhantomData,
        }
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Vectorizer with `min_df = 1`, `max_df = 0.95`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &VectorizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            min_df: config.min_df,
            max_df: config.max_df,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn min_df(&self) -> usize {
        self.min_df
    }

    #[inline]
    pub fn max_df(&self) -> f64 {
        self.max_df
    }

    /// Fit over `documents` and project each of them.
    ///
    /// # Arguments
    /// * `documents` - the whole corpus of this request
    ///
    /// # Returns
    /// * `TFIDFFit` - vocabulary, document frequencies, IDF table and vectors
    pub fn fit(&self, documents: &[Document]) -> TFIDFFit {
        let freqs: Vec<TokenFrequency> = documents
            .par_iter()
            .map(Document::term_frequency)
            .collect();
        let corpus = Corpus::from_frequencies(&freqs);
        let vocabulary = corpus.vocabulary();
        let idf = self.idf_table(&corpus);

        let vectors: Vec<TFIDFVector> = freqs
            .par_iter()
            .map(|freq| Self::tfidf_vec(freq, &idf))
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            dimensions = idf.len(),
            "fitted tf-idf"
        );

        TFIDFFit {
            vocabulary,
            corpus,
            idf,
            vectors,
        }
    }

    /// Fit over `documents` and return only the vectors
    pub fn fit_transform(&self, documents: &[Document]) -> Vec<TFIDFVector> {
        self.fit(documents).vectors
    }

    /// Keep tokens with `min_df <= df` and `df / N <= max_df`, in corpus order
    fn idf_table(&self, corpus: &Corpus) -> IdfTable {
        let doc_num = corpus.get_doc_num();
        let token_dim_sample: Vec<&str> = corpus
            .iter()
            .filter(|&(_, doc_freq)| {
                doc_freq >= self.min_df as u64
                    && doc_freq as f64 / doc_num as f64 <= self.max_df
            })
            .map(|(token, _)| token)
            .collect();
        let idf_vec = E::idf_vec(corpus, &token_dim_sample);
        IdfTable {
            weights: token_dim_sample
                .into_iter()
                .map(Box::<str>::from)
                .zip(idf_vec)
                .collect(),
        }
    }

    /// tf * idf for every token of the IDF table, then L2 normalized
    fn tfidf_vec(freq: &TokenFrequency, idf: &IdfTable) -> TFIDFVector {
        let pairs: Vec<(u32, f64)> = freq
            .iter()
            .filter_map(|(token, count)| {
                idf.get_full(token)
                    .map(|(idx, weight)| (idx as u32, E::tf(freq, count) * weight))
            })
            .collect();
        let mut vec = ZeroSpVec::from_pairs(idf.len(), pairs);
        vec.l2_normalize();
        vec
    }
}
