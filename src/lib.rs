pub mod analyzers;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod output;
pub mod parser;
pub mod records;
pub mod report;
pub mod sample;
