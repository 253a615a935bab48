pub mod executor;
pub mod progress;
pub mod types;

pub use executor::CaseExecutor;
pub use progress::ProgressPrinter;
pub use types::{CaseResult, CaseState, RunSummary};
