// ============================================================
// Layer 1 — DataRecord Domain Type
// ============================================================
// One row of instruction-tuning data, as found in alpaca-style
// datasets:
//
//   { "instruction": "Translate to French",
//     "input":       "Hello",
//     "output":      "Bonjour" }
//
// `input` is optional — many records are instruction-only, and
// datasets are inconsistent about whether they encode that as a
// missing key or an empty string. Both mean the same thing here
// (see has_input).
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A single instruction/input/output training record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    /// The task description given to the model
    pub instruction: String,

    /// Optional further context for the instruction.
    /// Absent and empty are treated identically.
    #[serde(default)]
    pub input: Option<String>,

    /// The expected response (the training label)
    pub output: String,
}

impl DataRecord {
    /// Create a new DataRecord.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(
        instruction: impl Into<String>,
        input:       Option<&str>,
        output:      impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            input:       input.map(|s| s.to_string()),
            output:      output.into(),
        }
    }

    /// True when the record carries a non-empty input field.
    pub fn has_input(&self) -> bool {
        self.input.as_deref().is_some_and(|s| !s.is_empty())
    }
}
