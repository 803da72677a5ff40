// ============================================================
// Layer 2 — Train/Validation Splitter
// ============================================================
// Splits records into a training set and a held-out validation
// set, reproducibly.
//
// Two distinct shuffles are involved, and they are deliberately
// different:
//
//   1. The split itself shuffles with a FIXED seed (42) so the
//      train/validation MEMBERSHIP is identical across runs.
//   2. Each subset is then shuffled again with thread_rng so
//      the iteration ORDER within a subset varies run to run.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The fixed seed for the train/validation split.
pub const SPLIT_SEED: u64 = 42;

/// The size of the held-out validation set, either as a
/// fraction of the total or an absolute record count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValSetSize {
    /// e.g. Fraction(0.1) holds out 10% of records
    Fraction(f64),
    /// e.g. Count(2000) holds out exactly 2000 records
    Count(usize),
}

impl ValSetSize {
    /// Number of validation records for a dataset of `total`.
    /// Clamped to [0, total].
    pub fn resolve(&self, total: usize) -> usize {
        let n = match *self {
            ValSetSize::Fraction(f) => ((total as f64) * f.max(0.0)) as usize,
            ValSetSize::Count(n) => n,
        };
        n.min(total)
    }
}

/// Shuffle `records` with the given seed, then split off the
/// validation tail. Returns (train, validation).
///
/// Membership in each subset is a pure function of
/// (records, val_set_size, seed).
pub fn train_test_split<T>(
    mut records:  Vec<T>,
    val_set_size: ValSetSize,
    seed:         u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    let total = records.len();
    let val_n = val_set_size.resolve(total);

    // split_off(n) removes [n..] and returns it —
    // train keeps the front, validation takes the tail
    let val = records.split_off(total - val_n);

    tracing::debug!(
        "Dataset split: {} training, {} validation (seed {})",
        records.len(),
        val.len(),
        seed,
    );

    (records, val)
}

/// Independent unseeded shuffle, applied to each subset before
/// tokenization. Order varies across runs; membership does not.
pub fn shuffled<T>(mut records: Vec<T>) -> Vec<T> {
    records.shuffle(&mut rand::thread_rng());
    records
}
