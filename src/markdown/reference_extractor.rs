//! Inline skill reference extraction for markdown documents.
//!
//! Skill documents can mention other skills in prose with an inline token of
//! the form `[skill:<id>]`, where `<id>` is one or more lowercase letters,
//! digits, or hyphens. This module scans a document's full text (header
//! region included) for those tokens and returns the distinct identifiers in
//! order of first appearance.
//!
//! The extracted list feeds inferred-dependency resolution: references that
//! never appear in the skill's declared `depends_on` list are surfaced as
//! lint signals.
//!
//! # Usage
//!
//! ```rust
//! use skillgraph::markdown::reference_extractor::extract_skill_references;
//!
//! let markdown = r#"
//! Pairs well with [skill:code-review] and [skill:test-runner].
//! See [skill:code-review] again for setup.
//! "#;
//!
//! let refs = extract_skill_references(markdown);
//! assert_eq!(refs, vec!["code-review", "test-runner"]);
//! ```

use regex::Regex;

/// Extract skill references from markdown content.
///
/// Scans the entire text for `[skill:<id>]` tokens and returns the
/// deduplicated identifiers in order of first appearance. The identifier
/// charset is lowercase letters, digits, and hyphens; tokens with any other
/// characters between the colon and the closing bracket are not references.
///
/// The whole document is scanned, including the YAML header and any code
/// blocks. A reference inside a fenced example still counts.
///
/// # Arguments
///
/// * `content` - The markdown content to scan
///
/// # Returns
///
/// A vector of unique skill identifiers found in the content
///
/// # Examples
///
/// ```rust
/// # use skillgraph::markdown::reference_extractor::extract_skill_references;
/// let refs = extract_skill_references("Use [skill:formatter] before [skill:linter].");
/// assert_eq!(refs, vec!["formatter", "linter"]);
///
/// assert!(extract_skill_references("No references here.").is_empty());
/// ```
#[must_use]
pub fn extract_skill_references(content: &str) -> Vec<String> {
    let mut references = Vec::new();

    if let Ok(reference_regex) = Regex::new(r"\[skill:([a-z0-9-]+)\]") {
        for cap in reference_regex.captures_iter(content) {
            if let Some(id) = cap.get(1) {
                references.push(id.as_str().to_string());
            }
        }
    }

    // Deduplicate while preserving order; identifiers are already lowercase
    // by construction, so exact comparison is case-insensitive comparison
    let mut seen = std::collections::HashSet::new();
    references.retain(|r| seen.insert(r.clone()));

    references
}
