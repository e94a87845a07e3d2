use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::stopwords::StopWords;
use crate::Token;

/// Tokens shorter than this are dropped
pub const MIN_TOKEN_LEN: usize = 3;

// `\s` here also covers the information separators U+001C..U+001F,
// which Unicode White_Space leaves out.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static NON_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s\x1C-\x1F]+").expect("letter pattern"));
static WORD_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+|[^\w\s\x1C-\x1F]+").expect("wordpunct pattern"));

/// Remove HTML-like tags: `<`, one or more non `>` characters, `>`.
/// Text between tags is kept. A lone `<` or `<>` is left as is.
///
/// Returns the input borrowed when there is nothing to strip.
pub fn strip_html_tags(text: &str) -> Cow<'_, str> {
    HTML_TAG.replace_all(text, "")
}

/// Split text into runs of word characters and runs of punctuation.
/// Whitespace only separates.
pub fn word_punct(text: &str) -> impl Iterator<Item = &str> {
    WORD_PUNCT.find_iter(text).map(|m| m.as_str())
}

/// Text preprocessor.
/// Turns raw (possibly HTML bearing) text into the filtered token sequence of a document.
///
/// Steps, in order:
/// 1. empty input gives no tokens
/// 2. strip HTML tags
/// 3. lowercase
/// 4. drop everything but `a`..=`z` and whitespace
/// 5. word/punctuation tokenize
/// 6. drop stopwords and tokens shorter than 3
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stopwords: Arc<StopWords>,
}

impl Preprocessor {
    pub fn new(stopwords: Arc<StopWords>) -> Self {
        Self { stopwords }
    }

    /// Preprocessor with the bundled English stopwords
    pub fn english() -> Self {
        Self::new(Arc::new(StopWords::english()))
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// Preprocess text into tokens.
    ///
    /// # Arguments
    /// * `text` - raw text
    ///
    /// # Returns
    /// * `Vec<Token>` - filtered tokens, in text order
    pub fn preprocess(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }
        let lowered = strip_html_tags(text).to_lowercase();
        let cleaned = NON_LETTER.replace_all(&lowered, "");
        word_punct(&cleaned)
            .filter(|tok| tok.len() >= MIN_TOKEN_LEN && !self.stopwords.contains(tok))
            .map(str::to_owned)
            .collect()
    }

    /// Same as `preprocess`, absent text gives no tokens
    #[inline]
    pub fn preprocess_opt(&self, text: Option<&str>) -> Vec<Token> {
        text.map_or_else(Vec::new, |t| self.preprocess(t))
    }
}
