//! Errores específicos del core (simples por ahora).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ScenarioError {
    #[error("step failed: {0}")] StepFailed(String),
    #[error("assertion failed: {0}")] AssertionFailed(String),
    #[error("teardown failed: {0}")] TeardownFailed(String),
    #[error("internal: {0}")] Internal(String),
}
