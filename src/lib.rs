// ============================================================
// sft-prep — fine-tuning data prep & sparsity inspection
// ============================================================
// Two independent utilities supporting an LLM fine-tuning
// pipeline:
//
//   1. Data preparation (src/data)
//      Renders instruction/input/output records through a JSON
//      prompt template, tokenizes them to a fixed length, and
//      produces (input_ids, target_ids) tensor pairs where only
//      the final position carries a real label.
//
//   2. Weight inspection (src/ml)
//      Walks a model's module tree to locate dense layers
//      (including an int8-quantized variant) and measures the
//      fraction of zero-valued weights per layer and overall.
//
// Layer rules follow the usual discipline:
//   - domain: plain structs and traits, no framework types
//   - data:   file I/O, tokenization, tensor assembly
//   - ml:     everything that touches the module tree / Burn
//
// Reference: Rust Book §7 (Modules)

#![recursion_limit = "256"]

/// Pure domain types and trait seams
pub mod domain;

/// Prompt rendering, dataset sources, tokenization, loading
pub mod data;

/// Module-tree introspection and sparsity measurement
pub mod ml;

pub use data::example::{TokenizedExample, IGNORE_INDEX};
pub use data::loader::DatasetLoader;
pub use data::prompter::Prompter;
pub use data::splitter::ValSetSize;
pub use ml::modules::{find_layers, find_linear_layers, LayerKind, LayerNode};
pub use ml::sparsity::{check_sparsity, InspectableModel};
