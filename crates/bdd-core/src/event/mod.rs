//! Registros de resultado y trait ResultSink.

mod types;
mod sink;

pub use types::{Outcome, ResultRecord, RunSummary, StepResult};
pub use sink::ResultSink;
pub use sink::InMemoryResultSink;
