//! Weighted string similarity for group-name matching.
//!
//! Scores are in `[0, 1]` at whole-percent granularity. The weighted ratio
//! takes the best of a plain indel ratio, substring-aligned partial ratios,
//! and token-sorted / token-set ratios, so reordered words and a name
//! embedded in a longer answer still score high.

use std::collections::{BTreeSet, HashMap};

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const FAR_PARTIAL_SCALE: f64 = 0.60;

/// Weighted similarity of two strings in `[0, 1]`.
///
/// Either side empty after preprocessing scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let p1 = preprocess(a);
    let p2 = preprocess(b);
    if p1.is_empty() || p2.is_empty() {
        return 0.0;
    }

    let len1 = p1.chars().count();
    let len2 = p2.chars().count();
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    let base = percent(ratio(&p1, &p2));

    let best = if len_ratio < 1.5 {
        let tsor = percent(token_sort_ratio(&p1, &p2)) * UNBASE_SCALE;
        let tser = percent(token_set_ratio(&p1, &p2)) * UNBASE_SCALE;
        base.max(tsor).max(tser)
    } else {
        let scale = if len_ratio > 8.0 { FAR_PARTIAL_SCALE } else { PARTIAL_SCALE };
        let partial = percent(partial_ratio(&p1, &p2)) * scale;
        let ptsor = percent(partial_token_sort_ratio(&p1, &p2)) * UNBASE_SCALE * scale;
        let ptser = percent(partial_token_set_ratio(&p1, &p2)) * UNBASE_SCALE * scale;
        base.max(partial).max(ptsor).max(ptser)
    };

    best.round() / 100.0
}

/// Non-word characters become spaces, then lowercase and trim.
pub fn preprocess(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

/// Indel similarity: `2 * LCS / (|a| + |b|)`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let v1: Vec<char> = a.chars().collect();
    let v2: Vec<char> = b.chars().collect();
    if v1.is_empty() || v2.is_empty() {
        return 0.0;
    }
    let lcs = if v1.len() <= v2.len() {
        LcsPattern::new(&v1).lcs(&v2)
    } else {
        LcsPattern::new(&v2).lcs(&v1)
    };
    2.0 * lcs as f64 / (v1.len() + v2.len()) as f64
}

/// Best ratio of the shorter string against equal-length windows of the longer.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let v1: Vec<char> = a.chars().collect();
    let v2: Vec<char> = b.chars().collect();
    let (shorter, longer) = if v1.len() <= v2.len() { (v1, v2) } else { (v2, v1) };
    if shorter.is_empty() {
        return if longer.is_empty() { 1.0 } else { 0.0 };
    }

    let width = shorter.len();
    let pattern = LcsPattern::new(&shorter);
    let mut best = 0.0f64;
    for window in longer.windows(width) {
        let r = pattern.lcs(window) as f64 / width as f64;
        if r > 0.995 {
            return 1.0;
        }
        best = best.max(r);
    }
    best
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, ratio)
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, partial_ratio)
}

fn token_set_with(a: &str, b: &str, score: fn(&str, &str) -> f64) -> f64 {
    let t1: BTreeSet<&str> = a.split_whitespace().collect();
    let t2: BTreeSet<&str> = b.split_whitespace().collect();

    let sect = join(t1.intersection(&t2));
    let diff_1to2 = join(t1.difference(&t2));
    let diff_2to1 = join(t2.difference(&t1));

    let combined_1to2 = format!("{sect} {diff_1to2}").trim().to_string();
    let combined_2to1 = format!("{sect} {diff_2to1}").trim().to_string();

    score(&sect, &combined_1to2)
        .max(score(&sect, &combined_2to1))
        .max(score(&combined_1to2, &combined_2to1))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<S: AsRef<str>>(tokens: impl Iterator<Item = S>) -> String {
    tokens
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn percent(r: f64) -> f64 {
    (r * 100.0).round()
}

/// Bit-parallel LCS length against a fixed pattern (Hyyro's row update).
///
/// Each text character costs one pass over `ceil(|pattern| / 64)` words, so
/// a window of `n` characters scores in `O(n * |pattern| / 64)`. Partial
/// ratios reuse one pattern across every window.
struct LcsPattern {
    len: usize,
    words: usize,
    masks: HashMap<char, Vec<u64>>,
}

impl LcsPattern {
    fn new(pattern: &[char]) -> Self {
        let words = pattern.len().div_ceil(64);
        let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1u64 << (i % 64);
        }
        Self { len: pattern.len(), words, masks }
    }

    fn lcs(&self, text: &[char]) -> usize {
        if self.len == 0 || text.is_empty() {
            return 0;
        }
        let mut row = vec![u64::MAX; self.words];
        for c in text {
            let Some(mask) = self.masks.get(c) else {
                continue;
            };
            let mut carry = 0u64;
            for (v, &m) in row.iter_mut().zip(mask) {
                let u = *v & m;
                let (sum, c1) = v.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry);
                carry = (c1 || c2) as u64;
                *v = sum | (*v & !u);
            }
        }

        // Zero bits within the pattern length count matched positions
        let tail = self.len % 64;
        row.iter()
            .enumerate()
            .map(|(w, &v)| {
                let live = if w + 1 == self.words && tail != 0 { (1u64 << tail) - 1 } else { u64::MAX };
                (!v & live).count_ones() as usize
            })
            .sum()
    }
}
