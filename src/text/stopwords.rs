use std::collections::HashSet;
use std::io::BufRead;

/// English stopword list, same content as the NLTK `english` corpus file.
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an",
    "and", "any", "are", "aren", "aren't", "as", "at", "be", "because", "been",
    "before", "being", "below", "between", "both", "but", "by", "can", "couldn",
    "couldn't", "d", "did", "didn", "didn't", "do", "does", "doesn", "doesn't",
    "doing", "don", "don't", "down", "during", "each", "few", "for", "from",
    "further", "had", "hadn", "hadn't", "has", "hasn", "hasn't", "have", "haven",
    "haven't", "having", "he", "he'd", "he'll", "her", "here", "hers", "herself",
    "he's", "him", "himself", "his", "how", "i", "i'd", "if", "i'll", "i'm", "in",
    "into", "is", "isn", "isn't", "it", "it'd", "it'll", "it's", "its", "itself",
    "i've", "just", "ll", "m", "ma", "me", "mightn", "mightn't", "more", "most",
    "mustn", "mustn't", "my", "myself", "needn", "needn't", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "re", "s", "same", "shan", "shan't", "she",
    "she'd", "she'll", "she's", "should", "shouldn", "shouldn't", "should've", "so",
    "some", "such", "t", "than", "that", "that'll", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "they'd", "they'll",
    "they're", "they've", "this", "those", "through", "to", "too", "under", "until",
    "up", "ve", "very", "was", "wasn", "wasn't", "we", "we'd", "we'll", "we're",
    "were", "weren", "weren't", "we've", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "won't", "wouldn", "wouldn't", "y",
    "you", "you'd", "you'll", "your", "you're", "yours", "yourself", "yourselves",
    "you've",
];

/// Immutable set of lowercase stopwords.
///
/// Built once before preprocessing and handed to the `Preprocessor`;
/// there is no global stopword state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// Build from any list of words. Words are trimmed and lowercased.
    pub fn new<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .map(String::into_boxed_str)
            .collect();
        Self { words }
    }

    /// The bundled English list
    pub fn english() -> Self {
        Self::new(ENGLISH)
    }

    /// Parse a newline separated word list (one word per line, blank lines ignored)
    pub fn from_word_list(list: &str) -> Self {
        Self::new(list.lines())
    }

    /// Read a newline separated word list
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(lines))
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_has_common_words() {
        let stop = StopWords::english();
        for word in ["the", "and", "their", "themselves", "about"] {
            assert!(stop.contains(word), "{word} should be a stopword");
        }
        assert!(!stop.contains("robot"));
        assert_eq!(stop.len(), ENGLISH.len());
    }

    #[test]
    fn word_list_is_normalized() {
        let stop = StopWords::from_word_list("  The\nAND\n\n  \nrobot\n");
        assert_eq!(stop.len(), 3);
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        assert!(stop.contains("robot"));
    }

    #[test]
    fn reader_round_trips_lines() {
        let data = b"alpha\nbeta\n" as &[u8];
        let stop = StopWords::from_reader(data).unwrap();
        assert!(stop.contains("alpha") && stop.contains("beta"));
    }
}
