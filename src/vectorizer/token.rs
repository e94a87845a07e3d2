use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TokenFrequency
/// Raw occurrence counts of the tokens of one document.
/// Used as the term frequency side of TF-IDF.
///
/// # Examples
/// ```
/// use anime_similarity::vectorizer::token::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["mecha", "robot", "mecha"]);
///
/// assert_eq!(freq.token_count("mecha"), 2);
/// assert_eq!(freq.token_count("robot"), 1);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
}

/// Adding tokens
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
        }
    }

    /// Add one token
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self
    }

    /// Add several tokens
    ///
    /// # Arguments
    /// * `tokens` - slice of tokens
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

/// Reading counts
impl TokenFrequency {
    /// Occurrences of a token, 0 when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// (token, count) in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Distinct tokens in first-seen order
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repetitions() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["war", "robot", "war", "war"]);
        assert_eq!(freq.token_count("war"), 3);
        assert_eq!(freq.token_count("robot"), 1);
        assert_eq!(freq.token_count("mecha"), 0);
        assert_eq!(freq.token_set_ref_str(), vec!["war", "robot"]);
        assert_eq!(freq.iter().collect::<Vec<_>>(), vec![("war", 3), ("robot", 1)]);
    }

    #[test]
    fn empty_frequency() {
        let freq = TokenFrequency::new();
        assert_eq!(freq.iter().count(), 0);
        assert!(freq.token_set_ref_str().is_empty());
    }
}
