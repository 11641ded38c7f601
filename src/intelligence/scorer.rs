use crate::models::TokenSnapshot;

/// Substrings in a lowercased token name that mark it as a likely scam or throwaway meme.
pub const BANNED_KEYWORDS: [&str; 10] = [
    "test", "dev", "airdrop", "rug", "scam", "pump", "elon", "420", "rekt", "fuck",
];

pub const MIN_VOLUME_15M: f64 = 3_000.0;
pub const MIN_LIQUIDITY: f64 = 5_000.0;
pub const MIN_HOLDERS: u64 = 100;

/// Highest score `score_token` can return.
pub const MAX_SCORE: u8 = 7;

/// Score a token snapshot in `[0, 7]`.
///
/// Every rule is evaluated independently. An absent field simply fails its
/// own rule, so a partially broken snapshot still gets a partial score.
pub fn score_token(snapshot: &TokenSnapshot) -> u8 {
    let mut score = 0;

    if snapshot.volume_15m.is_some_and(|v| v >= MIN_VOLUME_15M) {
        score += 2;
    }
    if snapshot.liquidity.is_some_and(|l| l >= MIN_LIQUIDITY) {
        score += 2;
    }
    if snapshot.holders.is_some_and(|h| h >= MIN_HOLDERS) {
        score += 2;
    }
    if snapshot.name.as_deref().is_some_and(is_clean_name) {
        score += 1;
    }

    score
}

/// True if the name contains none of the banned keywords (case-insensitive).
pub fn is_clean_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    !BANNED_KEYWORDS.iter().any(|bad| lowered.contains(bad))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
