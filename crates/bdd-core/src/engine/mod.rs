//! Engine module for ScenarioRunner implementation
//!
//! Provides the runner core and the scenario definition consumed from the
//! fluent declaration surface.

pub mod core;
pub mod definition;

pub use core::ScenarioRunner;
pub use definition::ScenarioDefinition;

pub use crate::event::{InMemoryResultSink, Outcome, ResultSink, StepResult};
