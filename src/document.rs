use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;
use crate::Token;

/// Token sequence for one anime.
/// Content only: the anime key travels next to it, never inside.
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    tokens: Box<[Token]>,
}

impl Document {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_boxed_slice(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw term counts of this document
    pub fn term_frequency(&self) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&self.tokens);
        freq
    }
}

impl From<Vec<Token>> for Document {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> From<&[&'a str]> for Document {
    fn from(tokens: &[&'a str]) -> Self {
        Self::new(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl FromIterator<Token> for Document {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
