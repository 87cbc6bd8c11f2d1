//! Superficie fluida de declaración.
//!
//! Este módulo traduce la autoría humana (mensaje + callable) a las
//! `StepDeclaration` que consume el `ScenarioRunner`. Las cuatro formas de
//! arrangement (sin limpieza, handle único, colección de handles, limpieza
//! explícita separada) se normalizan AQUÍ, en declaración, a "cero o más
//! entradas de teardown registradas contra este step": el runner nunca vuelve
//! a inspeccionar la forma original.
//!
//! Notas de diseño
//! - Cada método consume `self` y devuelve el builder extendido, igual que el
//!   builder del runner.
//! - Los cuerpos de `then*` reciben `&W`: una assertion no necesita mutar el
//!   estado compartido, y el tipo lo hace explícito.

use uuid::Uuid;

use bdd_core::{CleanupHandle, ResultSink, ScenarioDefinition, ScenarioError, ScenarioRunner, StepCtx,
               StepDeclaration, StepKind};

/// Builder fluido de un escenario Given/When/Then.
pub struct Scenario<W> {
    name: String,
    steps: Vec<StepDeclaration<W>>,
}

impl<W: 'static> Scenario<W> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               steps: Vec::new() }
    }

    fn push(mut self, step: StepDeclaration<W>) -> Self {
        self.steps.push(step);
        self
    }

    /// Arrangement sin limpieza propia. Los teardowns, si hacen falta, pueden
    /// sumarse luego con las variantes `given_*`.
    pub fn given<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut W) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Arrangement, move |ctx| body(ctx.world)))
    }

    /// Arrangement que devuelve UN handle de limpieza (forma "recurso único").
    pub fn given_using<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut W) -> Result<CleanupHandle<W>, ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Arrangement, move |ctx| {
            let handle = body(ctx.world)?;
            ctx.defer_handle(handle);
            Ok(())
        }))
    }

    /// Arrangement que devuelve una colección de handles: un outcome por
    /// handle. Con más de uno, el runner bifurca un contexto por outcome.
    pub fn given_each<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut W) -> Result<Vec<CleanupHandle<W>>, ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Arrangement, move |ctx| {
            let outcomes = body(ctx.world)?;
            ctx.fork(outcomes);
            Ok(())
        }))
    }

    /// Arrangement con acción de limpieza explícita y separada. La limpieza
    /// se registra antes de correr el cuerpo: si el cuerpo falla a mitad de
    /// camino, el recurso igual se libera.
    pub fn given_teardown<F, T>(self, message: &str, body: F, cleanup: T) -> Self
        where F: Fn(&mut W) -> Result<(), ScenarioError> + 'static,
              T: Fn(&mut W) -> Result<(), ScenarioError> + 'static
    {
        let handle = CleanupHandle::new(cleanup);
        self.push(StepDeclaration::new(message, StepKind::Arrangement, move |ctx| {
            ctx.defer_handle(handle.clone());
            body(ctx.world)
        }))
    }

    /// Variante de registro directo: el cuerpo recibe el `StepCtx` y puede
    /// registrar limpieza con `defer` tantas veces como necesite (o declarar
    /// outcomes con `fork`). Equivale a las formas `given_*`: todo se
    /// normaliza a la misma pila de teardowns del step.
    pub fn given_with<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Arrangement, body))
    }

    /// Action sobre el estado compartido.
    pub fn when<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut W) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Action, move |ctx| body(ctx.world)))
    }

    /// Action con limpieza explícita, misma semántica que `given_teardown`.
    pub fn when_teardown<F, T>(self, message: &str, body: F, cleanup: T) -> Self
        where F: Fn(&mut W) -> Result<(), ScenarioError> + 'static,
              T: Fn(&mut W) -> Result<(), ScenarioError> + 'static
    {
        let handle = CleanupHandle::new(cleanup);
        self.push(StepDeclaration::new(message, StepKind::Action, move |ctx| {
            ctx.defer_handle(handle.clone());
            body(ctx.world)
        }))
    }

    /// Registro directo para actions, simétrico a `given_with`.
    pub fn when_with<F>(self, message: &str, body: F) -> Self
        where F: Fn(&mut StepCtx<'_, W>) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Action, body))
    }

    /// Assertion sobre el estado compartido vivo.
    pub fn then<F>(self, message: &str, body: F) -> Self
        where F: Fn(&W) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::new(message, StepKind::Assertion, move |ctx| body(&*ctx.world)))
    }

    /// Assertion aislada: corre contra un snapshot y su fallo no suprime la
    /// ejecución de los steps hermanos ni de los teardowns.
    pub fn then_isolated<F>(self, message: &str, body: F) -> Self
        where F: Fn(&W) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::isolated(message, move |ctx| body(&*ctx.world)))
    }

    /// Assertion deliberadamente omitida: queda Skipped sin ejecutar el
    /// cuerpo.
    pub fn then_skip<F>(self, message: &str, body: F) -> Self
        where F: Fn(&W) -> Result<(), ScenarioError> + 'static
    {
        self.push(StepDeclaration::skipped(message, move |ctx| body(&*ctx.world)))
    }

    /// Congela la declaración en la definición que consume el runner.
    pub fn build(self) -> ScenarioDefinition<W> {
        ScenarioDefinition::new(self.name, self.steps)
    }
}

impl<W: Clone + 'static> Scenario<W> {
    /// Construye la definición y la corre sobre el runner dado.
    pub fn run_into<S: ResultSink>(self, runner: &mut ScenarioRunner<S>, world: W) -> Uuid {
        let definition = self.build();
        runner.run_scenario(&definition, world)
    }
}

/// Envuelve una acción de limpieza en un handle listo para `given_using` /
/// `given_each`.
pub fn cleanup<W>(action: impl Fn(&mut W) -> Result<(), ScenarioError> + 'static) -> CleanupHandle<W> {
    CleanupHandle::new(action)
}
