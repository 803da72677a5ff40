// ============================================================
// Layer 2 — Data Pipeline
// ============================================================
// Everything from raw record files to tensor-ready training
// pairs. The pipeline flows in this order:
//
//   template JSON + record file (.json / .jsonl / .csv / named)
//       │
//       ▼
//   Prompter          → renders instruction/input/output into
//       │               one prompt string per record
//       ▼
//   train_test_split  → deterministic (seed 42) held-out split
//       │
//       ▼
//   FixedLenEncoder   → token ids, padded/truncated to seq_len
//       │
//       ▼
//   TokenizedExample  → (input_ids, target_ids) tensor pair
//       │               with all-but-last positions masked
//       ▼
//   DatasetLoader     → orchestrates the above, returns the
//                       train and validation lists
//
// Each module is responsible for exactly one step, so each step
// is independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads a template and renders prompts from records
pub mod prompter;

/// Classifies data paths and reads JSON/JSONL/CSV/named sources
pub mod source;

/// Seeded train/validation split plus independent shuffles
pub mod splitter;

/// Fixed-length wrapper over the tokenizers crate
pub mod encoder;

/// The (input_ids, target_ids) tensor pair
pub mod example;

/// Orchestrates the full load pipeline
pub mod loader;
