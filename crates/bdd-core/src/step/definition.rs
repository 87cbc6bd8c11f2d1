use crate::errors::ScenarioError;

use super::step_ctx::StepCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind { Arrangement, Action, Assertion, SkippedAssertion }

/// Cuerpo opaco de un step. Recibe el contexto de ejecución y devuelve el
/// desenlace; los teardowns y outcomes quedan registrados en el `StepCtx`.
pub type StepFn<W> = Box<dyn Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError>>;

/// Declaración de un step dentro de un escenario.
///
/// Pertenece a exactamente una `ScenarioDefinition`; los contextos la
/// referencian por índice, nunca por copia con identidad propia.
pub struct StepDeclaration<W> {
    name: String,
    kind: StepKind,
    isolated: bool,
    body: StepFn<W>,
}

impl<W> StepDeclaration<W> {
    pub fn new(name: impl Into<String>,
               kind: StepKind,
               body: impl Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError> + 'static)
               -> Self
    {
        Self { name: name.into(),
               kind,
               isolated: false,
               body: Box::new(body) }
    }

    /// Assertion aislada: corre contra un snapshot del estado y su fallo no
    /// afecta al contexto dueño.
    pub fn isolated(name: impl Into<String>,
                    body: impl Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError> + 'static)
                    -> Self
    {
        Self { name: name.into(),
               kind: StepKind::Assertion,
               isolated: true,
               body: Box::new(body) }
    }

    /// Assertion omitida deliberadamente: el cuerpo se conserva pero el runner
    /// jamás lo invoca.
    pub fn skipped(name: impl Into<String>,
                   body: impl Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError> + 'static)
                   -> Self
    {
        Self { name: name.into(),
               kind: StepKind::SkippedAssertion,
               isolated: false,
               body: Box::new(body) }
    }

    /// Nombre descriptivo (puramente informativo).
    pub fn name(&self) -> &str { &self.name }

    pub fn kind(&self) -> StepKind { self.kind }

    pub fn is_isolated(&self) -> bool { self.isolated }

    /// Invoca el cuerpo. El runner decide contra qué `StepCtx` (estado real o
    /// snapshot aislado).
    pub fn run(&self, ctx: &mut StepCtx<'_, W>) -> Result<(), ScenarioError> {
        (self.body)(ctx)
    }
}
