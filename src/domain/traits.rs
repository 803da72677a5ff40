// ============================================================
// Layer 1 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types, the
// loader pipeline can swap implementations without changing the
// code that uses them:
//   - JsonSource / CsvSource / a registry entry all implement
//     RecordSource, and the loader only sees RecordSource
//   - FixedLenEncoder implements PromptEncoder over the
//     tokenizers crate; tests implement it with a stub
//
// This is the Dependency Inversion Principle applied with
// Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::record::DataRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load the training split of a dataset.
///
/// Implementations:
///   - JsonSource → .json / .jsonl files
///   - CsvSource  → headered .csv files
///   - NamedSources::resolve → registered named datasets
pub trait RecordSource: std::fmt::Debug {
    /// Load every record of the "train" split, in file order.
    fn load_records(&self) -> Result<Vec<DataRecord>>;
}

// ─── PromptEncoder ────────────────────────────────────────────────────────────
/// Any component that can turn a prompt string into a
/// fixed-length sequence of token ids.
///
/// Implementations:
///   - FixedLenEncoder → tokenizers crate, padded + truncated
///   - test stubs      → whitespace splitting, fixed ids
pub trait PromptEncoder {
    /// Encode `text` into exactly `seq_len()` token ids.
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>>;

    /// The fixed sequence length every encoding is padded or
    /// truncated to.
    fn seq_len(&self) -> usize;
}
