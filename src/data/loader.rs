// ============================================================
// Layer 2 — DatasetLoader
// ============================================================
// Orchestrates the full data preparation pipeline in order:
//
//   Step 1: Load the prompt template       (Prompter)
//   Step 2: Open the record source         (source.rs)
//   Step 3: Deterministic train/val split  (splitter.rs)
//   Step 4: Shuffle + render + tokenize    (Prompter, encoder)
//   Step 5: Assemble tensor pairs          (example.rs)
//
// All examples for a split are materialized into one in-memory
// Vec before returning — a single sequential pass, fail-fast,
// no retries.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::data::encoder::FixedLenEncoder;
use crate::data::example::TokenizedExample;
use crate::data::prompter::{Prompter, DEFAULT_TEMPLATE_DIR};
use crate::data::source::{open_source, NamedSources};
use crate::data::splitter::{shuffled, train_test_split, ValSetSize, SPLIT_SEED};
use crate::domain::record::DataRecord;
use crate::domain::traits::PromptEncoder;

/// Produces tokenized train/validation example lists from a
/// template name and a data path.
pub struct DatasetLoader {
    template_dir: String,
    named:        NamedSources,
}

impl DatasetLoader {
    /// Loader resolving templates under ./templates and knowing
    /// no named dataset sources.
    pub fn new() -> Self {
        Self {
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            named:        NamedSources::new(),
        }
    }

    /// Override the template directory (default ./templates).
    pub fn with_template_dir(mut self, dir: impl Into<String>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Register a named dataset source so non-file data_paths
    /// can resolve.
    pub fn register_source(&mut self, name: impl Into<String>, path: impl Into<std::path::PathBuf>) {
        self.named.register(name, path);
    }

    /// Load, split, render, and tokenize a dataset.
    ///
    /// Returns (train, validation) lists of TokenizedExample,
    /// every sequence exactly `seq_len` long. Membership of the
    /// two lists is deterministic (fixed split seed); iteration
    /// order within each list is freshly shuffled per call.
    pub fn load<B: Backend>(
        &self,
        template_name: &str,
        data_path:     &str,
        tokenizer:     Tokenizer,
        val_set_size:  ValSetSize,
        seq_len:       usize,
        device:        &B::Device,
    ) -> Result<(Vec<TokenizedExample<B>>, Vec<TokenizedExample<B>>)> {
        let prompter = Prompter::from_dir(&self.template_dir, template_name, false)?;
        let encoder  = FixedLenEncoder::new(tokenizer, seq_len)?;
        self.load_with_encoder(&prompter, data_path, &encoder, val_set_size, device)
    }

    /// Same pipeline with the prompter and encoder injected —
    /// the seam tests use to avoid a real tokenizer model.
    pub fn load_with_encoder<B: Backend>(
        &self,
        prompter:     &Prompter,
        data_path:    &str,
        encoder:      &dyn PromptEncoder,
        val_set_size: ValSetSize,
        device:       &B::Device,
    ) -> Result<(Vec<TokenizedExample<B>>, Vec<TokenizedExample<B>>)> {
        // ── Step 2: resolve and read the record source ────────────────────────
        let source  = open_source(data_path, &self.named)?;
        let records = source.load_records()?;
        tracing::info!("Loaded {} records from '{}'", records.len(), data_path);

        // ── Step 3: deterministic held-out split ──────────────────────────────
        let (train_records, val_records) =
            train_test_split(records, val_set_size, SPLIT_SEED);

        // ── Steps 4-5: per-subset shuffle, render, tokenize ───────────────────
        let train = encode_records(shuffled(train_records), prompter, encoder, device)?;
        let val   = encode_records(shuffled(val_records), prompter, encoder, device)?;

        tracing::info!(
            "Tokenized {} training and {} validation examples (seq_len {})",
            train.len(),
            val.len(),
            encoder.seq_len(),
        );
        Ok((train, val))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render each record's full prompt (label included) and build
/// its tensor pair.
fn encode_records<B: Backend>(
    records:  Vec<DataRecord>,
    prompter: &Prompter,
    encoder:  &dyn PromptEncoder,
    device:   &B::Device,
) -> Result<Vec<TokenizedExample<B>>> {
    records
        .iter()
        .map(|record| {
            let full_prompt = prompter.generate_prompt(
                &record.instruction,
                record.input.as_deref(),
                Some(&record.output),
            );
            let ids = encoder.encode_ids(&full_prompt)?;
            Ok(TokenizedExample::from_ids(&ids, device))
        })
        .collect()
}
