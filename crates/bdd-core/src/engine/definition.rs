use crate::step::StepDeclaration;

/// Definición inmutable de un escenario: la lista ordenada de steps tal como
/// la entregó la superficie de declaración. Los contextos la recorren por
/// índice; nunca se copia un step.
pub struct ScenarioDefinition<W> {
    pub name: String,
    pub steps: Vec<StepDeclaration<W>>,
}

impl<W> ScenarioDefinition<W> {
    pub fn new(name: impl Into<String>, steps: Vec<StepDeclaration<W>>) -> Self {
        Self { name: name.into(), steps }
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
