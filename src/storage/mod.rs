pub mod json_file;
pub mod summary;

pub use json_file::*;
