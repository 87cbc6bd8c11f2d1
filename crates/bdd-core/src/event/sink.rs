use std::collections::HashMap;
use chrono::Utc;
use uuid::Uuid;

use super::{ResultRecord, StepResult};

/// Sumidero de resultados append-only.
pub trait ResultSink {
    /// Anexa un registro y devuelve el resultado completo (con seq y ts).
    fn report(&mut self, scenario_id: Uuid, record: ResultRecord) -> StepResult;
    /// Lista resultados de un escenario (orden ascendente por seq).
    fn list(&self, scenario_id: Uuid) -> Vec<StepResult>;
}

pub struct InMemoryResultSink { pub inner: HashMap<Uuid, Vec<StepResult>> }

impl Default for InMemoryResultSink { fn default() -> Self { Self { inner: HashMap::new() } } }

impl ResultSink for InMemoryResultSink {
    fn report(&mut self, scenario_id: Uuid, record: ResultRecord) -> StepResult {
        let vec = self.inner.entry(scenario_id).or_insert_with(Vec::new);
        let seq = vec.len() as u64;
        let res = StepResult { seq,
                               scenario_id,
                               context: record.context,
                               step_name: record.step_name,
                               outcome: record.outcome,
                               error: record.error,
                               ts: Utc::now() };
        vec.push(res.clone());
        res
    }
    fn list(&self, scenario_id: Uuid) -> Vec<StepResult> { self.inner.get(&scenario_id).cloned().unwrap_or_default() }
}
