//! Markdown document parsing for skill entry points.
//!
//! Every skill ships a SKILL.md document: a YAML header between `---`
//! markers followed by free-form markdown. This module owns the two text
//! analyses the loader runs on that document: header extraction
//! ([`frontmatter`]) and inline skill reference scanning
//! ([`reference_extractor`]).

pub mod frontmatter;
pub mod reference_extractor;

pub use frontmatter::{HeaderError, HeaderParser, PropertyBag};
pub use reference_extractor::extract_skill_references;
