use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document count and per-token document frequency of one corpus.
///
/// A token is counted once per document that contains it,
/// no matter how often it occurs there.
/// Base data for the IDF calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents
    doc_num: u64,
    /// token -> number of documents containing it
    #[serde(with = "indexmap::map::serde_seq")]
    token_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            token_counts: IndexMap::new(),
        }
    }

    /// Build from the term frequencies of every document.
    /// Tokens end up in lexicographic order.
    pub fn from_frequencies(freqs: &[TokenFrequency]) -> Self {
        let mut corpus = Self::new();
        for freq in freqs {
            corpus.add_set(&freq.token_set_ref_str());
        }
        corpus.sort_tokens();
        corpus
    }

    /// Add one document given its distinct tokens
    pub fn add_set<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for token in tokens {
            match self.token_counts.get_mut(token.as_ref()) {
                Some(count) => *count += 1,
                None => {
                    self.token_counts.insert(token.as_ref().into(), 1);
                }
            }
        }
    }

    /// Put tokens in lexicographic order
    pub fn sort_tokens(&mut self) {
        self.token_counts.sort_keys();
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.token_counts.len()
    }

    /// (token, document frequency) in the current token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.token_counts.iter().map(|(token, &count)| (token.as_ref(), count))
    }

    /// Vocabulary of this corpus, indexed in the current token order
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            tokens: self.token_counts.keys().cloned().collect(),
        }
    }
}

/// Distinct token -> stable index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    tokens: IndexSet<Box<str>>,
}

impl Vocabulary {
    #[inline]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    #[inline]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get_index(index).map(|t| t.as_ref())
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_ref())
    }
}
