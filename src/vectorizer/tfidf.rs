use crate::vectorizer::{corpus::Corpus, token::TokenFrequency};

/// TF-IDF calculation engine.
/// The fitting loop asks the engine for weights; the engine owns the formulas.
pub trait TFIDFEngine {
    /// Build the IDF vector.
    /// # Arguments
    /// * `corpus` - corpus statistics
    /// * `token_dim_sample` - tokens that take a vector coordinate, in coordinate order
    /// # Returns
    /// * `Vec<f64>` - one IDF weight per sample token
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<f64>;

    /// Term frequency weight of a token seen `count` times in the document `freq`
    fn tf(freq: &TokenFrequency, count: u32) -> f64;
}

/// Default TF-IDF engine.
/// - tf: raw count
/// - idf: smoothed, `ln((1 + N) / (1 + df)) + 1`, strictly positive even for
///   tokens present in every document
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        token_dim_sample
            .iter()
            .map(|token| Self::idf_calc(doc_num, corpus.get_token_count(token)))
            .collect()
    }

    #[inline]
    fn tf(_freq: &TokenFrequency, count: u32) -> f64 {
        count as f64
    }
}
