pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod models;
pub mod probe;
pub mod store;
pub mod tasks;
