pub mod food_record;
pub mod raw_row;

pub use food_record::*;
pub use raw_row::*;
