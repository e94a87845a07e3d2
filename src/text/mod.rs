pub mod preprocess;
pub mod stopwords;

pub use preprocess::{strip_html_tags, word_punct, Preprocessor, MIN_TOKEN_LEN};
pub use stopwords::StopWords;
