//! Contexto entregado al cuerpo de un step mientras corre.

use crate::errors::ScenarioError;

use super::run_result::StepYield;
use super::teardown::CleanupHandle;

/// Lo que un cuerpo puede hacer además de mutar el estado: registrar limpieza
/// (`defer`) y declarar outcomes de bifurcación (`fork`).
///
/// Las formas de arrangement de la superficie fluida (sin limpieza, handle
/// único, colección de handles, limpieza explícita separada) se normalizan en
/// declaración a llamadas sobre este contexto, así el runner nunca vuelve a
/// inspeccionar la forma original.
pub struct StepCtx<'w, W> {
    /// Estado compartido del contexto dueño (o un snapshot, si el step es
    /// aislado; el cuerpo no distingue).
    pub world: &'w mut W,
    pending: Vec<CleanupHandle<W>>,
    outcomes: Option<Vec<CleanupHandle<W>>>,
}

impl<'w, W> StepCtx<'w, W> {
    pub fn new(world: &'w mut W) -> Self {
        Self { world,
               pending: Vec::new(),
               outcomes: None }
    }

    /// Registra una acción de limpieza en la pila pendiente de este step.
    /// Se liberará en orden inverso al registro.
    pub fn defer(&mut self, action: impl Fn(&mut W) -> Result<(), ScenarioError> + 'static) {
        self.pending.push(CleanupHandle::new(action));
    }

    /// Variante que recibe un handle ya construido.
    pub fn defer_handle(&mut self, handle: CleanupHandle<W>) {
        self.pending.push(handle);
    }

    /// Declara los outcomes de un arrangement: un handle de limpieza por
    /// outcome. Con N > 1 el runner reemplaza el contexto por N hermanos
    /// independientes; con N = 1 el contexto continúa; con N = 0 el contexto
    /// termina tras este step (cero sucesores).
    pub fn fork(&mut self, outcomes: Vec<CleanupHandle<W>>) {
        self.outcomes = Some(outcomes);
    }

    /// Consume el contexto y entrega lo acumulado durante el cuerpo.
    pub(crate) fn into_yield(self) -> StepYield<W> {
        StepYield { pending: self.pending,
                    outcomes: self.outcomes }
    }
}
