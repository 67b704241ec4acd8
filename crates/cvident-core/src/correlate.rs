//! Fuzzy name-email correlator.
//!
//! Scores single tokens and adjacent token pairs against the email's
//! local-part and reports the best-matching candidate name with its score.

use crate::similar::ratio;
use crate::text::title_case;

/// Find the token or adjacent token pair most similar to the local-part of
/// `email` (digits stripped, so `jdoe123@` still matches "j doe").
///
/// Candidates, keeping only the best ratio seen:
/// - each single token, unless it is the email address itself;
/// - each adjacent pair concatenated without a separator, in original
///   order, skipped when either token contains `@`;
/// - the same pair concatenated in reversed order.
///
/// Pair candidates are always *reported* space-joined in original order,
/// even when the reversed concatenation produced the winning score. The
/// returned name is title-cased. `("", 0.0)` when nothing matches.
pub fn correlate(tokens: &[String], email: &str) -> (String, f64) {
    let email_lower = email.to_lowercase();
    let target: String = email_lower
        .split('@')
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();

    let mut best_match = String::new();
    let mut best_ratio = 0.0_f64;

    for word in tokens {
        if *word == email_lower {
            continue;
        }
        let score = ratio(&target, word);
        if score > best_ratio {
            best_match = word.clone();
            best_ratio = score;
        }
    }

    for pair in tokens.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if first.contains('@') || second.contains('@') {
            continue;
        }
        let display = format!("{} {}", first, second);

        let forward = format!("{}{}", first, second);
        let score = ratio(&target, &forward);
        if score > best_ratio {
            best_match = display.clone();
            best_ratio = score;
        }

        let reversed = format!("{}{}", second, first);
        let score = ratio(&target, &reversed);
        if score > best_ratio {
            best_match = display;
            best_ratio = score;
        }
    }

    (title_case(&best_match), best_ratio)
}
