use crate::errors::ScenarioError;

use super::teardown::CleanupHandle;

/// Lo acumulado por un cuerpo durante su ejecución: teardowns pendientes y,
/// para arrangements, los outcomes de bifurcación.
pub struct StepYield<W> {
    pub pending: Vec<CleanupHandle<W>>,
    pub outcomes: Option<Vec<CleanupHandle<W>>>,
}

/// Resultado abstracto de ejecutar un step.
pub enum StepRunResult<W> {
    Success { yielded: StepYield<W> },
    Failure { error: ScenarioError, yielded: StepYield<W> },
}

impl<W> StepRunResult<W> {
    /// Combina el desenlace del cuerpo con lo acumulado en su `StepCtx`.
    /// La pila pendiente se conserva aun en fallo: esos teardowns se
    /// registraron durante el cuerpo y deben liberarse igual.
    pub fn from_body(body: Result<(), ScenarioError>, yielded: StepYield<W>) -> Self {
        match body {
            Ok(()) => Self::Success { yielded },
            Err(error) => Self::Failure { error, yielded },
        }
    }
}
