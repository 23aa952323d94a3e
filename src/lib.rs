pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod source;
pub mod storage;
