//! Implementación central del ScenarioRunner.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::context::Context;
use crate::errors::ScenarioError;
use crate::event::{Outcome, ResultRecord, ResultSink, RunSummary, StepResult};
use crate::step::{CleanupHandle, StepCtx, StepDeclaration, StepKind, StepRunResult, TeardownStack};

use super::definition::ScenarioDefinition;

/// Motor de ejecución de escenarios.
///
/// Responsable de orquestar contextos, ejecutar steps en orden de
/// declaración, bifurcar ante arrangements multi-outcome, contener fallos por
/// rama y garantizar que todo teardown registrado por un step ejecutado se
/// libere exactamente una vez (por contexto dueño), aun bajo fallo.
pub struct ScenarioRunner<S>
    where S: ResultSink
{
    sink: S,
    default_scenario_id: Option<Uuid>,
}

impl ScenarioRunner<crate::event::InMemoryResultSink> {
    /// Crea un runner con el sink en memoria.
    #[inline]
    pub fn new() -> Self {
        Self::with_sink(crate::event::InMemoryResultSink::default())
    }
}

impl Default for ScenarioRunner<crate::event::InMemoryResultSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ScenarioRunner<S>
    where S: ResultSink
{
    /// Crea un runner sobre el sink proporcionado.
    pub fn with_sink(sink: S) -> Self {
        Self { sink,
               default_scenario_id: None }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume el runner y devuelve el sink (útil cuando el canal de reporte
    /// externo quiere quedarse con los registros).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Ejecuta el escenario completo y retorna el ID asignado.
    ///
    /// Ningún fallo de step o teardown aborta la corrida: todo desenlace
    /// queda contenido en su contexto y reportado al sink.
    pub fn run_scenario<W: Clone>(&mut self, definition: &ScenarioDefinition<W>, world: W) -> Uuid {
        let scenario_id = Uuid::new_v4();
        self.run_scenario_with_id(scenario_id, definition, world);
        scenario_id
    }

    /// Variante con ID explícito (re-corridas, correlación externa).
    pub fn run_scenario_with_id<W: Clone>(&mut self,
                                          scenario_id: Uuid,
                                          definition: &ScenarioDefinition<W>,
                                          world: W)
    {
        self.default_scenario_id = Some(scenario_id);

        let mut queue: VecDeque<Context<W>> = VecDeque::new();
        queue.push_back(Context::root(world));
        let mut next_fork: usize = 1;

        while let Some(mut ctx) = queue.pop_front() {
            let replaced = self.advance(scenario_id, definition, &mut ctx, &mut next_fork, &mut queue);
            if replaced {
                // El contexto fue reemplazado por sus hermanos: su historia ya
                // viaja copiada en cada uno y no debe liberarse aquí.
                continue;
            }
            self.release_context(scenario_id, &mut ctx);
        }
    }

    /// Ejecuta steps sobre una rama hasta agotarla, fallar o bifurcar.
    /// Devuelve `true` si el contexto fue reemplazado por hermanos.
    fn advance<W: Clone>(&mut self,
                         scenario_id: Uuid,
                         definition: &ScenarioDefinition<W>,
                         ctx: &mut Context<W>,
                         next_fork: &mut usize,
                         queue: &mut VecDeque<Context<W>>)
                         -> bool
    {
        while !ctx.halted && ctx.cursor < definition.len() {
            let step = &definition.steps[ctx.cursor];
            ctx.cursor += 1;

            if step.kind() == StepKind::SkippedAssertion {
                // El cuerpo jamás se invoca; no afecta teardowns.
                self.emit(scenario_id, ctx.index, step.name(), Outcome::Skipped, None);
                continue;
            }

            if step.is_isolated() {
                self.run_isolated(scenario_id, ctx.index, &ctx.world, step);
                continue;
            }

            let mut step_ctx = StepCtx::new(&mut ctx.world);
            let body = step.run(&mut step_ctx);
            let run = StepRunResult::from_body(body, step_ctx.into_yield());

            match run {
                StepRunResult::Failure { error, yielded } => {
                    self.emit(scenario_id, ctx.index, step.name(), Outcome::Failed, Some(error));
                    // La pila del step se conserva aunque el cuerpo haya
                    // fallado: se registró durante su ejecución.
                    let stack = Self::stack_of(step.name(), yielded.pending);
                    if !stack.is_empty() {
                        ctx.history.push(stack);
                    }
                    ctx.halted = true;
                }
                StepRunResult::Success { yielded } => {
                    self.emit(scenario_id, ctx.index, step.name(), Outcome::Passed, None);
                    let mut stack = Self::stack_of(step.name(), yielded.pending);

                    match yielded.outcomes {
                        None => {
                            if !stack.is_empty() {
                                ctx.history.push(stack);
                            }
                        }
                        Some(outcomes) => match outcomes.len() {
                            // Cero sucesores: la rama termina tras este step y
                            // libera lo acumulado.
                            0 => {
                                if !stack.is_empty() {
                                    ctx.history.push(stack);
                                }
                                ctx.halted = true;
                            }
                            // Caso común: un outcome implícito, misma rama.
                            1 => {
                                for handle in outcomes {
                                    stack.register(handle);
                                }
                                ctx.history.push(stack);
                            }
                            // Bifurcación: un hermano por outcome, cada uno
                            // con copia del mundo y de la historia más la
                            // entrada del outcome propio.
                            _ => {
                                for handle in outcomes {
                                    let mut sibling_stack = stack.clone();
                                    sibling_stack.register(handle);
                                    let sibling = ctx.fork_sibling(*next_fork, sibling_stack);
                                    *next_fork += 1;
                                    queue.push_back(sibling);
                                }
                                return true;
                            }
                        },
                    }
                }
            }
        }
        false
    }

    /// Corre una assertion aislada contra un snapshot del estado. Su fallo se
    /// registra y jamás detiene al contexto dueño; los teardowns que registre
    /// se liberan de inmediato contra el snapshot, en orden inverso.
    fn run_isolated<W: Clone>(&mut self,
                              scenario_id: Uuid,
                              context: usize,
                              world: &W,
                              step: &StepDeclaration<W>)
    {
        let mut snapshot = world.clone();
        let mut step_ctx = StepCtx::new(&mut snapshot);
        let body = step.run(&mut step_ctx);
        let yielded = step_ctx.into_yield();

        match body {
            Ok(()) => self.emit(scenario_id, context, step.name(), Outcome::Passed, None),
            Err(error) => self.emit(scenario_id, context, step.name(), Outcome::Failed, Some(error)),
        }

        let stack = Self::stack_of(step.name(), yielded.pending);
        if !stack.is_empty() {
            self.release_stack(scenario_id, context, &stack, &mut snapshot);
        }
    }

    /// Libera toda la historia de una rama terminada (o detenida por fallo):
    /// pila más nueva primero, y dentro de cada pila inverso al registro.
    fn release_context<W>(&mut self, scenario_id: Uuid, ctx: &mut Context<W>) {
        let stacks = std::mem::take(&mut ctx.history);
        let context = ctx.index;
        for stack in stacks.iter().rev() {
            self.release_stack(scenario_id, context, stack, &mut ctx.world);
        }
    }

    fn release_stack<W>(&mut self,
                        scenario_id: Uuid,
                        context: usize,
                        stack: &TeardownStack<W>,
                        world: &mut W)
    {
        let sink = &mut self.sink;
        stack.release_all(world, |step_name, res| {
                 let (outcome, error) = match res {
                     Ok(()) => (Outcome::Passed, None),
                     Err(e) => (Outcome::Failed, Some(e)),
                 };
                 sink.report(scenario_id,
                             ResultRecord { context,
                                            step_name,
                                            outcome,
                                            error });
             });
    }

    fn stack_of<W>(step_name: &str, pending: Vec<CleanupHandle<W>>) -> TeardownStack<W> {
        let mut stack = TeardownStack::new(step_name);
        for handle in pending {
            stack.register(handle);
        }
        stack
    }

    fn emit(&mut self,
            scenario_id: Uuid,
            context: usize,
            step_name: &str,
            outcome: Outcome,
            error: Option<ScenarioError>)
    {
        let _ = self.sink.report(scenario_id,
                                 ResultRecord { context,
                                                step_name: step_name.to_string(),
                                                outcome,
                                                error });
    }

    /// ID del último escenario corrido, si hay alguno.
    pub fn default_scenario_id(&self) -> Option<Uuid> {
        self.default_scenario_id
    }

    /// Resultados de un escenario en orden de ejecución.
    pub fn results(&self, scenario_id: Uuid) -> Vec<StepResult> {
        self.sink.list(scenario_id)
    }

    /// Resultados del último escenario corrido.
    pub fn last_results(&self) -> Option<Vec<StepResult>> {
        self.default_scenario_id.map(|id| self.sink.list(id))
    }

    /// Variante compacta de desenlaces para un escenario (debug/tests).
    pub fn outcome_variants(&self, scenario_id: Uuid) -> Vec<&'static str> {
        self.results(scenario_id)
            .iter()
            .map(|r| match r.outcome {
                Outcome::Passed => "P",
                Outcome::Failed => "X",
                Outcome::Skipped => "S",
            })
            .collect()
    }

    /// Conteo agregado de desenlaces de un escenario.
    pub fn summary(&self, scenario_id: Uuid) -> RunSummary {
        let mut summary = RunSummary::default();
        for r in self.results(scenario_id) {
            match r.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}
