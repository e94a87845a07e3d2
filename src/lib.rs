//! This crate is an anime recommendation engine built on a TF-IDF vectorizer
//! and cosine similarity over synopsis (and episode summary) text.
pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod recommend;
pub mod text;
pub mod utils;
pub mod vectorizer;

/// A single preprocessed token
pub type Token = String;

/// Document
/// The filtered token sequence of one title.
/// Produced by the `DocumentAssembler`, consumed by the vectorizer.
pub use document::Document;

/// Text Preprocessor
/// Turns raw, possibly HTML bearing, text into a filtered token sequence:
/// - HTML tags stripped
/// - lowercased, only `a`..=`z` and whitespace kept
/// - word/punctuation tokenized
/// - stopwords and tokens shorter than 3 dropped
///
/// The stopword set is an explicit immutable value shared through `Arc`.
pub use text::{Preprocessor, StopWords};

/// TF-IDF Vectorizer
/// Fits a vocabulary and IDF table over a corpus and projects each document
/// into an L2-normalized TF-IDF vector.
///
/// `TFIDFVectorizer<E>` takes the calculation engine as a generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// Nothing is cached between fits.
pub use vectorizer::TFIDFVectorizer;

/// Result of one fit: vocabulary, corpus statistics, IDF table and vectors.
pub use vectorizer::{TFIDFFit, TFIDFVector};

/// Corpus for TF-IDF Vectorizer
/// It does not store document text or IDs; it only manages:
/// - The number of documents
/// - The number of documents in which each token appears across the corpus
///
/// It is used as the base data for IDF (Inverse Document Frequency) calculation.
pub use vectorizer::corpus::{Corpus, Vocabulary};

/// Token Frequency structure
/// A struct for analyzing/managing token occurrence frequency within a document.
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
///
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TokenFrequency;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `TFIDFVectorizer<E>`.
/// A default implementation, `DefaultTFIDFEngine`, is provided: raw count TF and
/// smoothed IDF `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Search Hits and Hit Entry structures
/// Data structures for managing ranking results.
/// - `Hits`: holds a list of results and provides features such as sorting by score
/// - `HitEntry`: represents a single result entry, containing the document key and score
///
/// `rank` scores candidates against a query by cosine similarity.
pub use vectorizer::evaluate::scoring::{cosine_similarity, rank, HitEntry, Hits, SimilarityTier};

/// Document Assembler
/// Builds a document from a synopsis plus optional episode summaries,
/// through async metadata and episode sources with a per-instance lookup cache.
pub use assembler::{AssemblyWarning, DocumentAssembler, LookupStats};

/// Source contracts and the in-memory source
pub use assembler::source::{AnimeId, AnimeMetadata, DatasetRecord, EpisodeSource, MetadataSource, StaticSource};

/// Recommendation workflow
pub use recommend::{Recommendation, Recommendations, Recommender};

pub use config::{RecommendConfig, TierThresholds, VectorizerConfig};
pub use error::{ConfigError, SourceError};
