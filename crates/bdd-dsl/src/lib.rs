//! bdd-dsl: superficie fluida Given/When/Then sobre bdd-core.
pub mod assertions;
pub mod scenario;

pub use assertions::{ensure, ensure_contains, ensure_eq};
pub use scenario::{cleanup, Scenario};

pub use bdd_core::{CleanupHandle, Outcome, ScenarioError, ScenarioRunner, StepCtx};
