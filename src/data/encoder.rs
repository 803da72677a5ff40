// ============================================================
// Layer 2 — Fixed-Length Encoder
// ============================================================
// Wraps a tokenizers::Tokenizer so that every encoding comes
// back at exactly seq_len ids: shorter prompts are padded to
// max length, longer ones are truncated.
//
// Padding and truncation are configured ONCE at construction
// rather than per call — the tokenizers crate stores them on
// the Tokenizer itself, and a loader run uses a single fixed
// sequence length throughout.
//
// The tokenizers crate returns boxed error trait objects, so
// failures are mapped into anyhow explicitly.
//
// Reference: tokenizers crate documentation

use anyhow::{anyhow, Result};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::domain::traits::PromptEncoder;

/// A tokenizer constrained to fixed-length output.
pub struct FixedLenEncoder {
    tokenizer: Tokenizer,
    seq_len:   usize,
}

impl FixedLenEncoder {
    /// Configure `tokenizer` to pad and truncate to `seq_len`.
    pub fn new(mut tokenizer: Tokenizer, seq_len: usize) -> Result<Self> {
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(seq_len),
            ..PaddingParams::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: seq_len,
                ..TruncationParams::default()
            }))
            .map_err(|e| anyhow!("Cannot configure truncation: {e}"))?;

        Ok(Self { tokenizer, seq_len })
    }
}

impl PromptEncoder for FixedLenEncoder {
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenizer failed on prompt: {e}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn seq_len(&self) -> usize {
        self.seq_len
    }
}
