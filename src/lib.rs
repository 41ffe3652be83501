pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod llm;
pub mod research;
pub mod synthesis;

// Re-export commonly used types
pub use config::Config;
pub use research::types::{Findings, ResearchOutcome};
pub use research::workflow::launch;
