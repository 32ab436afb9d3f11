//! Letter frequency analysis.
//!
//! A polyalphabetic cipher with a fast rotor is attacked column by column:
//! positions sharing the same residue modulo 26 went through the same rotor
//! offset. [`frequency_tables`] computes one table per residue class, which
//! the client compares against [`REFERENCE_FREQUENCIES`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::alphabet::{self, SIZE};

/// One symbol with its probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub symbol: char,
    pub proba: f64,
}

const fn entry(symbol: char, proba: f64) -> FrequencyEntry {
    FrequencyEntry { symbol, proba }
}

/// Letter frequencies of French text, most frequent first.
pub const REFERENCE_FREQUENCIES: [FrequencyEntry; SIZE] = [
    entry('E', 0.1715),
    entry('A', 0.0812),
    entry('S', 0.0795),
    entry('I', 0.0758),
    entry('T', 0.0724),
    entry('N', 0.0709),
    entry('R', 0.0655),
    entry('U', 0.0637),
    entry('L', 0.0545),
    entry('O', 0.0540),
    entry('D', 0.0367),
    entry('C', 0.0334),
    entry('P', 0.0302),
    entry('M', 0.0297),
    entry('V', 0.0163),
    entry('Q', 0.0136),
    entry('F', 0.0107),
    entry('B', 0.0090),
    entry('G', 0.0087),
    entry('H', 0.0074),
    entry('J', 0.0054),
    entry('X', 0.0039),
    entry('Y', 0.0031),
    entry('Z', 0.0013),
    entry('W', 0.0011),
    entry('K', 0.0005),
];

/// Rounds `value` to `decimals` decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Frequencies of the letters at positions `start`, `start + step`, ...
///
/// Returns one probability per rank, rounded to `decimals` places. Only
/// alphabet letters are counted; a class with no letters is all zeros.
///
/// # Examples
///
/// ```
/// use enigma_task::frequency::residue_frequencies;
///
/// let freqs = residue_frequencies("EAEB", 0, 2, 4);
/// assert_eq!(freqs[4], 1.0);
/// assert_eq!(residue_frequencies("EAEB", 1, 2, 4)[0], 0.5);
/// ```
pub fn residue_frequencies(text: &str, start: usize, step: usize, decimals: u32) -> [f64; SIZE] {
    let mut counts = [0u64; SIZE];
    let mut total = 0u64;
    for c in text.chars().skip(start).step_by(step.max(1)) {
        if let Some(rank) = alphabet::rank(c) {
            counts[rank] += 1;
            total += 1;
        }
    }
    let mut freqs = [0.0; SIZE];
    if total == 0 {
        return freqs;
    }
    for (freq, count) in freqs.iter_mut().zip(counts) {
        *freq = round_to(count as f64 / total as f64, decimals);
    }
    freqs
}

/// One frequency table per residue class modulo 26.
pub fn frequency_tables(text: &str, decimals: u32) -> Vec<[f64; SIZE]> {
    (0..SIZE)
        .map(|start| residue_frequencies(text, start, SIZE, decimals))
        .collect()
}

/// Counts the letters of `text` in the character range `range`.
///
/// The range is clipped to the text length.
pub fn count_symbols(text: &str, range: Range<usize>) -> [u64; SIZE] {
    let mut counts = [0u64; SIZE];
    let len = range.end.saturating_sub(range.start);
    for c in text.chars().skip(range.start).take(len) {
        if let Some(rank) = alphabet::rank(c) {
            counts[rank] += 1;
        }
    }
    counts
}

/// Normalizes per-rank weights into probabilities, most probable first.
///
/// Ties keep alphabet order. All-zero weights give all-zero probabilities.
pub fn normalize_and_sort(weights: &[f64; SIZE]) -> Vec<FrequencyEntry> {
    let total: f64 = weights.iter().sum();
    let mut entries: Vec<FrequencyEntry> = weights
        .iter()
        .enumerate()
        .map(|(rank, &w)| entry(alphabet::symbol(rank), if total > 0.0 { w / total } else { 0.0 }))
        .collect();
    // sort_by is stable, so equal probabilities stay in rank order.
    entries.sort_by(|a, b| b.proba.total_cmp(&a.proba));
    entries
}

/// Sums the residue tables of the selected columns and normalizes the result.
///
/// Columns outside `tables` are ignored.
pub fn combine_tables(tables: &[[f64; SIZE]], columns: &[usize]) -> Vec<FrequencyEntry> {
    let mut sum = [0.0; SIZE];
    for table in columns.iter().filter_map(|&c| tables.get(c)) {
        for (acc, p) in sum.iter_mut().zip(table) {
            *acc += p;
        }
    }
    normalize_and_sort(&sum)
}
