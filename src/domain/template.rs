// ============================================================
// Layer 1 — PromptTemplate Domain Type
// ============================================================
// The parsed form of a template JSON file such as
// templates/alpaca.json. All four fields are required — serde
// fails deserialization if any is missing, which is exactly the
// invariant we want: a template that loads is a template that
// renders.
//
// The two prompt strings use named placeholders:
//   prompt_input    — {instruction} and {input}
//   prompt_no_input — {instruction} only
//
// Rendering is plain substring substitution; there is no escape
// syntax, matching the original template format.
//
// Reference: Rust Book §8 (Strings)

use serde::{Deserialize, Serialize};

/// A named prompt template defining how instruction/input/output
/// fields compose into one training string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Human-readable summary, logged in verbose mode
    pub description: String,

    /// Format string used when the record has an input field
    pub prompt_input: String,

    /// Format string used when the record has no input field
    pub prompt_no_input: String,

    /// Delimiter separating the prompt from the model's response
    pub response_split: String,
}

impl PromptTemplate {
    /// Render the with-input variant, substituting both placeholders.
    pub fn render_with_input(&self, instruction: &str, input: &str) -> String {
        self.prompt_input
            .replace("{instruction}", instruction)
            .replace("{input}", input)
    }

    /// Render the no-input variant, substituting the instruction only.
    pub fn render_no_input(&self, instruction: &str) -> String {
        self.prompt_no_input.replace("{instruction}", instruction)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> PromptTemplate {
        serde_json::from_str(
            r####"{
                "description":     "t",
                "prompt_input":    "{instruction}\n{input}\n",
                "prompt_no_input": "{instruction}\n",
                "response_split":  "### Response:"
            }"####,
        )
        .unwrap()
    }

    #[test]
    fn test_render_with_input_contains_both() {
        let t = template();
        assert_eq!(t.render_with_input("Translate", "Bonjour"), "Translate\nBonjour\n");
    }

    #[test]
    fn test_render_no_input() {
        let t = template();
        assert_eq!(t.render_no_input("Add 1+1"), "Add 1+1\n");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        // No response_split — must fail to parse, not default
        let r: Result<PromptTemplate, _> = serde_json::from_str(
            r#"{"description":"t","prompt_input":"a","prompt_no_input":"b"}"#,
        );
        assert!(r.is_err());
    }
}
