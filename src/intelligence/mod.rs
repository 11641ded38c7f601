pub mod scorer;

pub use scorer::{is_clean_name, score_token, BANNED_KEYWORDS, MAX_SCORE};
