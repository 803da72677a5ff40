// ============================================================
// Layer 1 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the pipeline.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO tokenizers types allowed here
//   - NO file I/O
//   - Only plain structs, enums, and traits
//
// Keeping this layer pure means every type in it is unit
// testable without a tokenizer model or a tensor backend,
// and the seams (traits) can be implemented by test doubles.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One instruction/input/output training record
pub mod record;

// The prompt template loaded from a JSON file
pub mod template;

// Trait seams implemented by the data layer
pub mod traits;
