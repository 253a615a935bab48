pub mod args;
pub mod collector;
pub mod coordinator;
pub mod frame;
pub mod types;

pub use args::{DecodeError, SourceMapping, decode_file_mappings};
pub use collector::ResultCollector;
pub use coordinator::RunnerPool;
pub use frame::{REPORT_SENTINEL, decode_report, encode_report, find_report_line, write_report};
pub use types::{AggregateReport, CaseOutcome, Problem, RunnerEvent};
