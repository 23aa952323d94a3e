pub mod deduplicator;
pub mod format_validator;
pub mod name_matcher;
pub mod normalizer;

pub use deduplicator::*;
pub use format_validator::*;
pub use name_matcher::*;
pub use normalizer::*;
