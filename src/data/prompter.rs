// ============================================================
// Layer 2 — Prompter
// ============================================================
// Loads a named prompt template from disk and renders records
// into full prompt strings. Also extracts a model's response
// from generated text using the template's delimiter.
//
// Template resolution:
//   Prompter::new("alpaca", false) → ./templates/alpaca.json
//   An empty name falls back to "alpaca" so callers can pass
//   a blank config value without breaking.
//
// A missing template file fails at construction with an error
// naming the path — there is no point deferring the failure to
// the first render.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::template::PromptTemplate;

/// Directory searched by Prompter::new, relative to the
/// current working directory.
pub const DEFAULT_TEMPLATE_DIR: &str = "./templates";

/// The template used when the caller passes an empty name.
pub const DEFAULT_TEMPLATE: &str = "alpaca";

/// Renders prompts from a named template.
/// The template is immutable after construction.
#[derive(Debug)]
pub struct Prompter {
    template: PromptTemplate,
    verbose:  bool,
}

impl Prompter {
    /// Load `./templates/{template_name}.json`.
    /// An empty `template_name` defaults to "alpaca".
    pub fn new(template_name: &str, verbose: bool) -> Result<Self> {
        Self::from_dir(DEFAULT_TEMPLATE_DIR, template_name, verbose)
    }

    /// Same as `new`, with an explicit template directory.
    pub fn from_dir(dir: impl AsRef<Path>, template_name: &str, verbose: bool) -> Result<Self> {
        let name = if template_name.is_empty() {
            DEFAULT_TEMPLATE
        } else {
            template_name
        };

        let path: PathBuf = dir.as_ref().join(format!("{name}.json"));
        if !path.exists() {
            bail!("Can't read template file '{}'", path.display());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        let template: PromptTemplate = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid template JSON in '{}'", path.display()))?;

        if verbose {
            tracing::info!("Using prompt template {}: {}", name, template.description);
        }

        Ok(Self { template, verbose })
    }

    /// Render the full prompt for one record.
    ///
    /// A non-empty `input` selects the with-input format string;
    /// an empty or absent one selects the no-input variant. A
    /// non-empty `label` (the expected response) is appended
    /// verbatim, with no separator — the template's format
    /// strings already end where the response should begin.
    pub fn generate_prompt(
        &self,
        instruction: &str,
        input:       Option<&str>,
        label:       Option<&str>,
    ) -> String {
        let mut res = match input {
            Some(inp) if !inp.is_empty() => self.template.render_with_input(instruction, inp),
            _ => self.template.render_no_input(instruction),
        };

        if let Some(label) = label {
            if !label.is_empty() {
                res.push_str(label);
            }
        }

        if self.verbose {
            tracing::debug!("{res}");
        }
        res
    }

    /// Extract the response segment from generated text: the
    /// trimmed text following the first occurrence of the
    /// template's response_split delimiter.
    pub fn get_response(&self, output: &str) -> Result<String> {
        let split = &self.template.response_split;
        match output.split_once(split.as_str()) {
            Some((_, rest)) => Ok(rest.trim().to_string()),
            None => bail!("Response delimiter '{split}' not found in model output"),
        }
    }

    /// The loaded template (read-only).
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TEMPLATE_JSON: &str = r####"{
        "description":     "t",
        "prompt_input":    "{instruction}\n{input}\n",
        "prompt_no_input": "{instruction}\n",
        "response_split":  "### Response:"
    }"####;

    fn write_template(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(format!("{name}.json")), body).unwrap();
    }

    fn prompter() -> (tempfile::TempDir, Prompter) {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "test", TEMPLATE_JSON);
        let p = Prompter::from_dir(dir.path(), "test", false).unwrap();
        (dir, p)
    }

    #[test]
    fn test_missing_template_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Prompter::from_dir(dir.path(), "nope", false).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_empty_name_defaults_to_alpaca() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "alpaca", TEMPLATE_JSON);
        let p = Prompter::from_dir(dir.path(), "", false).unwrap();
        assert_eq!(p.template().description, "t");
    }

    #[test]
    fn test_empty_input_uses_no_input_variant() {
        let (_d, p) = prompter();
        // Empty input and absent input must render identically
        assert_eq!(p.generate_prompt("Add 1+1", Some(""), Some("2")), "Add 1+1\n2");
        assert_eq!(p.generate_prompt("Add 1+1", None, Some("2")), "Add 1+1\n2");
    }

    #[test]
    fn test_input_variant_contains_both_fields() {
        let (_d, p) = prompter();
        assert_eq!(
            p.generate_prompt("Translate", Some("Bonjour"), Some("Hello")),
            "Translate\nBonjour\nHello"
        );
    }

    #[test]
    fn test_label_appended_with_no_separator() {
        let (_d, p) = prompter();
        let out = p.generate_prompt("i", None, Some("LABEL"));
        assert!(out.ends_with("\nLABEL"));
    }

    #[test]
    fn test_get_response_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        write_template(
            dir.path(),
            "rt",
            r####"{
                "description":     "t",
                "prompt_input":    "{instruction}\n{input}\n### Response:",
                "prompt_no_input": "{instruction}\n### Response:",
                "response_split":  "### Response:"
            }"####,
        );
        let p = Prompter::from_dir(dir.path(), "rt", false).unwrap();
        let full = p.generate_prompt("question", None, Some("RESP"));
        assert_eq!(p.get_response(&full).unwrap(), "RESP");
    }

    #[test]
    fn test_get_response_missing_delimiter_fails() {
        let (_d, p) = prompter();
        let err = p.get_response("no delimiter here").unwrap_err();
        assert!(err.to_string().contains("### Response:"));
    }
}
