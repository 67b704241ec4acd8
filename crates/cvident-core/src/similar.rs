//! Ratcliff/Obershelp string similarity.
//!
//! The resolver's confidence thresholds were tuned against this exact
//! metric, so it is reproduced faithfully rather than swapped for an
//! edit-distance ratio: find the longest matching block (lowest first-index
//! pair on ties), recurse into both unmatched remainders, and normalize the
//! total matched character count by the combined length.

use std::collections::HashMap;

/// Similarity of `a` and `b` in `[0, 1]`: `2 * M / T` where `M` is the
/// number of characters in matching blocks and `T` the combined length.
/// Two empty strings are fully similar.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matches as f64 / total as f64
}

/// Longest matching block of `a[alo..ahi]` and `b[blo..bhi]`, as
/// `(start_in_a, start_in_b, length)`. Ties resolve to the lowest start in
/// `a`, then the lowest start in `b`.
fn find_longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut besti = alo;
    let mut bestj = blo;
    let mut bestsize = 0;

    // j2len[j] = length of the match ending at a[i-1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut newj2len: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if b[j] != a[i] {
                continue;
            }
            let k = if j > blo {
                j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
            } else {
                1
            };
            newj2len.insert(j, k);
            if k > bestsize {
                besti = i + 1 - k;
                bestj = j + 1 - k;
                bestsize = k;
            }
        }
        j2len = newj2len;
    }
    (besti, bestj, bestsize)
}

/// Total matched characters: longest block plus the recursively matched
/// remainders on each side of it.
fn matching_chars(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> usize {
    let (i, j, size) = find_longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matching_chars(a, b, alo, i, blo, j) + matching_chars(a, b, i + size, ahi, j + size, bhi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_strings() {
        assert_close(ratio("josmith", "josmith"), 1.0);
        assert_close(ratio("a", "a"), 1.0);
    }

    #[test]
    fn empty_strings() {
        assert_close(ratio("", ""), 1.0);
        assert_close(ratio("a", ""), 0.0);
        assert_close(ratio("", "abc"), 0.0);
    }

    #[test]
    fn disjoint_strings() {
        assert_close(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn overlapping_block() {
        // longest block "bcd" (3 chars), T = 8
        assert_close(ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn recursion_into_remainders() {
        // "jo" block plus "n" in the right remainder: M = 3, T = 7
        assert_close(ratio("john", "jon"), 6.0 / 7.0);
        // "sm" + "th": M = 4, T = 10
        assert_close(ratio("smith", "smyth"), 0.8);
    }

    #[test]
    fn local_part_scores() {
        // The values the correlator thresholds depend on
        assert_close(ratio("josmith", "smith"), 10.0 / 12.0);
        assert_close(ratio("josmith", "jo"), 4.0 / 9.0);
        assert_close(ratio("josmith", "smithjo"), 10.0 / 14.0);
    }

    #[test]
    fn symmetric() {
        for (a, b) in [
            ("john", "jon"),
            ("smith", "smyth"),
            ("josmith", "smithjo"),
            ("alice", "wong"),
        ] {
            assert_close(ratio(a, b), ratio(b, a));
        }
    }

    #[test]
    fn case_sensitive() {
        assert!(ratio("smith", "SMITH") < 1.0);
    }

    #[test]
    fn unicode_counts_scalars() {
        assert_close(ratio("rené", "rene"), 2.0 * 3.0 / 8.0);
    }
}
