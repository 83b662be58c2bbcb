//! Scout - job posting extraction
//!
//! Splits pasted text into individual postings, pulls recruiter, company
//! and location out of each with labelled-then-fallback regex heuristics,
//! and drafts an outreach note from a configurable template.

pub mod error;
pub mod extract;
pub mod note;

pub use error::{Result, ScoutError};
pub use extract::{newest_first, Extractor};
pub use note::render_note;
