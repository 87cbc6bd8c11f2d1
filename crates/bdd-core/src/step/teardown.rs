//! Limpieza por step: handles clonables y pila de liberación inversa.

use std::rc::Rc;

use crate::constants::TEARDOWN_MARKER;
use crate::errors::ScenarioError;

/// Acción de limpieza registrada por un step.
///
/// Se comparte mediante `Rc` para que los contextos bifurcados a partir del
/// mismo step posean cada uno una copia liberable de la misma entrada; cada
/// contexto la libera exactamente una vez.
pub struct CleanupHandle<W>(Rc<dyn Fn(&mut W) -> Result<(), ScenarioError>>);

impl<W> Clone for CleanupHandle<W> {
    fn clone(&self) -> Self { Self(Rc::clone(&self.0)) }
}

impl<W> CleanupHandle<W> {
    pub fn new(action: impl Fn(&mut W) -> Result<(), ScenarioError> + 'static) -> Self {
        Self(Rc::new(action))
    }

    pub fn release(&self, world: &mut W) -> Result<(), ScenarioError> {
        (self.0)(world)
    }
}

/// Pila de teardowns de UN step: entradas en orden de registro, liberación en
/// orden estrictamente inverso.
pub struct TeardownStack<W> {
    step_name: String,
    entries: Vec<CleanupHandle<W>>,
}

impl<W> Clone for TeardownStack<W> {
    fn clone(&self) -> Self {
        Self { step_name: self.step_name.clone(),
               entries: self.entries.clone() }
    }
}

impl<W> TeardownStack<W> {
    pub fn new(step_name: impl Into<String>) -> Self {
        Self { step_name: step_name.into(),
               entries: Vec::new() }
    }

    /// Anexa una entrada a la lista pendiente del step.
    pub fn register(&mut self, handle: CleanupHandle<W>) {
        self.entries.push(handle);
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn step_name(&self) -> &str { &self.step_name }

    /// Libera todas las entradas en orden inverso al registro. Cada fallo se
    /// captura y se entrega al callback junto con el nombre sintético; nunca
    /// se propaga, de modo que una entrada que falla no impide liberar las
    /// anteriores (en orden de registro).
    pub fn release_all(&self,
                       world: &mut W,
                       mut report: impl FnMut(String, Result<(), ScenarioError>))
    {
        let disambiguate = self.entries.len() > 1;
        for (i, handle) in self.entries.iter().rev().enumerate() {
            let name = if disambiguate {
                format!("{} ({} {})", self.step_name, TEARDOWN_MARKER, i + 1)
            } else {
                format!("{} ({})", self.step_name, TEARDOWN_MARKER)
            };
            report(name, handle.release(world));
        }
    }
}
