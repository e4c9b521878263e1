//! Category briefs: extraction, normalization, and the summary pages built
//! from them.
//!
//! A brief is a semi-structured text block describing a product category.
//! [`parse_brief`] turns it into a [`ParsedBrief`]; [`render_brief`] writes one
//! back. Summary pages combine a parsed brief with a paragraph produced by a
//! [`SummaryGenerator`].

pub mod error;
pub mod export;
pub mod generate;
pub mod markdown;
pub mod parse;
pub mod reason;
pub mod render;
pub mod session;
pub mod types;

pub use error::SessionError;
pub use export::{build_export, write_export};
pub use generate::{build_full_markdown, FactsOnly, GenerateError, SummaryGenerator, SummaryRequest};
pub use markdown::{assemble_markdown, facts, generation_prompt, product_fact};
pub use parse::{parse_brief, DEFAULT_CATEGORY};
pub use reason::prettify_reason;
pub use render::render_brief;
pub use session::{BriefRow, BriefSession};
pub use types::{ParsedBrief, TopProduct, WorstProduct};
