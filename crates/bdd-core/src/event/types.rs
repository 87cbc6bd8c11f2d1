//! Tipos de registro de resultado y estructura `StepResult`.
//!
//! Rol en el escenario:
//! - Cada ejecución del `ScenarioRunner` emite un registro por step ejecutado
//!   (y uno por teardown liberado, como step sintético) a un `ResultSink`
//!   append-only.
//! - El orden de emisión ES el orden de ejecución: el sink nunca reordena.
//! - `Outcome` define el contrato observable y estable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScenarioError;

/// Desenlace de un step ejecutado (o sintético de teardown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// El cuerpo terminó sin error (o el teardown se liberó sin error).
    Passed,
    /// El cuerpo (o el teardown) devolvió un error. El detalle viaja aparte.
    Failed,
    /// Assertion marcada como omitida: el cuerpo nunca se ejecutó.
    Skipped,
}

/// Registro aún sin numerar, tal como lo produce el runner. El sink le asigna
/// `seq` y `ts` al anexarlo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Índice del contexto que ejecutó el step (0 = contexto raíz; los
    /// hermanos bifurcados se numeran desde 1 en orden de creación).
    pub context: usize,
    pub step_name: String,
    pub outcome: Outcome,
    /// Detalle de fallo, presente sólo cuando `outcome == Failed`.
    pub error: Option<ScenarioError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub seq: u64, // asignado por ResultSink in-memory (orden append)
    pub scenario_id: Uuid,
    pub context: usize,
    pub step_name: String,
    pub outcome: Outcome,
    pub error: Option<ScenarioError>,
    pub ts: DateTime<Utc>, // metadato (no participa en ningún contrato de orden)
}

/// Conteo agregado de desenlaces para un escenario.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}
