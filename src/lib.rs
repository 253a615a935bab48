pub mod error;
pub mod harness;
pub mod http;
pub mod logger;
pub mod parser;
pub mod runner;
pub mod variable;

// Re-export commonly used types
pub use error::{Result, RubridgeError};
pub use harness::{AggregateReport, Problem, RunnerPool, SourceMapping};
