use std::{cmp, mem::swap};

/// Number of leading tokens kept by [`prefix`].
pub(crate) const PREFIX_TOKENS: usize = 2;

/// Levenshtein distance counted in chars.
pub(crate) fn distance(s1_in: &str, s2_in: &str) -> usize {
    if s1_in == s2_in {
        return 0;
    }

    let s1: &str;
    let mut s1_len = s1_in.chars().count();

    let s2: &str;
    let mut s2_len = s2_in.chars().count();

    if s2_len > s1_len {
        s1 = s2_in;
        s2 = s1_in;
        swap(&mut s1_len, &mut s2_len);
    } else {
        s1 = s1_in;
        s2 = s2_in;
    }

    let mut previous: Vec<usize> = (0..=s2_len).collect();
    let mut current = vec![0usize; s2_len + 1];
    for (i, ic) in s1.chars().enumerate() {
        current[0] = i + 1;
        for (j, jc) in s2.chars().enumerate() {
            let sub_cost = if ic == jc { 0 } else { 1 };
            current[j + 1] = cmp::min(
                previous[j] + sub_cost,
                cmp::min(previous[j + 1] + 1, current[j] + 1),
            );
        }
        swap(&mut previous, &mut current);
    }
    previous[s2_len]
}

/// Token by token similarity in `[0, 1]`, averaged over the needle tokens.
pub(crate) fn score(needle: &str, hay: &str) -> f64 {
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    let hay_tokens: Vec<_> = hay.split_whitespace().collect();
    let tokens = needle_tokens.len();
    let runs = cmp::min(needle_tokens.len(), hay_tokens.len());
    let mut score: f64 = 0.0;
    for i in 0..runs {
        score += score_inner(needle_tokens[i], hay_tokens[i]);
    }

    if score == 0.0 {
        0.0
    } else {
        score / tokens as f64
    }
}

fn score_inner(s1: &str, s2: &str) -> f64 {
    let dist = distance(s1, s2);
    if dist == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / cmp::max(s1.chars().count(), s2.chars().count()) as f64)
    }
}

/// Lower cased first [`PREFIX_TOKENS`] whitespace separated tokens of `name`.
pub(crate) fn prefix(name: &str) -> String {
    name.split_whitespace()
        .take(PREFIX_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lenient name match: `hay` lower cased starts with the prefix of the target.
/// An empty prefix never matches.
pub(crate) fn prefix_matches(prefix: &str, hay: &str) -> bool {
    !prefix.is_empty() && hay.to_lowercase().starts_with(prefix)
}

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    let dist = distance("", "abc");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_substitution() {
    let dist = distance("cat", "cut");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_accent_is_one_edit() {
    let dist = distance("hôtel de ville", "hotel de ville");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_longer_sequence() {
    let dist = distance("intention", "execution");
    assert_eq!(dist, 5);
}

#[test]
fn prefix_keeps_two_tokens() {
    assert_eq!(prefix("Hôtel de Ville - Louis Pradel"), "hôtel de");
    assert_eq!(prefix("  Bellecour "), "bellecour");
    assert_eq!(prefix(""), "");
}

#[test]
fn prefix_match_is_case_insensitive() {
    assert!(prefix_matches("bellecour", "BELLECOUR"));
    assert!(prefix_matches("gare part", "Gare Part-Dieu Vivier Merle"));
    assert!(!prefix_matches("", "Bellecour"));
    assert!(!prefix_matches("cordeliers", "Bellecour"));
}
