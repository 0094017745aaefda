pub mod addresses;
pub mod batch;
pub mod cli;
pub mod config;
pub mod export;
pub mod processor;
pub mod report;
pub mod reporter;
