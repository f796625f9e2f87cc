//! Ratcliff/Obershelp string similarity.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` the number of characters in matching blocks. Blocks are found by
//! taking the longest common contiguous run and recursing on the text to its
//! left and right.

use std::collections::BTreeMap;

/// Sequences at least this long get popular characters ignored when
/// searching for matches.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity ratio between two strings, in `[0.0, 1.0]`.
///
/// Two empty strings are identical and score `1.0`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_characters(&a, &b) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`.
fn matched_characters(a: &[char], b: &[char]) -> usize {
    let b2j = index_positions(b);
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Positions of every character in `b`, ascending.
fn index_positions(b: &[char]) -> BTreeMap<char, Vec<usize>> {
    let mut b2j: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (j, ch) in b.iter().enumerate() {
        b2j.entry(*ch).or_default().push(j);
    }

    if b.len() >= AUTOJUNK_MIN_LEN {
        let popular = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= popular);
    }

    b2j
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Among equally long runs the one starting earliest
/// in `a` wins, then the one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &BTreeMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // Length of the run ending at (i - 1, j), keyed by j.
    let mut run_lengths: BTreeMap<usize, usize> = BTreeMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_lengths = BTreeMap::new();
        if let Some(positions) = b2j.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let previous = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0);
                let size = previous + 1;
                next_lengths.insert(j, size);
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            }
        }
        run_lengths = next_lengths;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-12
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity_ratio("revenue", "revenue"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn shifted_strings() {
        // "bcd" is the only common block: 2 * 3 / 8
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn single_substitution_at_end() {
        assert!(approx(similarity_ratio("abcdx", "abcdy"), 0.8));
    }

    #[test]
    fn recurses_on_both_sides_of_the_longest_block() {
        // "_amount" then "sale" on the left: 2 * 11 / 23
        assert!(approx(
            similarity_ratio("sale_amount", "sales_amount"),
            22.0 / 23.0
        ));
    }

    #[test]
    fn block_choice_is_not_symmetric_in_general() {
        // The longest block is picked first, so crossing matches are lost.
        assert!(approx(similarity_ratio("ab", "ba"), 0.5));
    }

    #[test]
    fn longest_match_prefers_earliest_position() {
        let a: Vec<char> = "xaby".chars().collect();
        let b: Vec<char> = "abab".chars().collect();
        let b2j = index_positions(&b);
        assert_eq!(longest_match(&a, &b2j, 0, a.len(), 0, b.len()), (1, 0, 2));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(approx(similarity_ratio("größe", "grösse"), 2.0 * 4.0 / 11.0));
    }
}
