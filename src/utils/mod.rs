//! Shared utilities: JWT handling, password hashing, request validation and
//! source name extraction.

pub mod jwt;
pub mod password;
pub mod source_extractor;
pub mod validate;

pub use source_extractor::extract_source;
pub use validate::ValidatedJson;
