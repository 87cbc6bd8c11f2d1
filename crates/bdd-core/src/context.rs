//! Contexto de ejecución: una rama de un escenario.
//!
//! Un `Context` es un cursor sobre la lista inmutable de steps de la
//! definición (estilo arena: los steps viven una sola vez en la definición y
//! aquí sólo se indexan) más la historia de teardowns acumulada en esa rama.
//! La bifurcación produce hermanos que no comparten NINGÚN estado mutable a
//! partir del punto de fork: cada uno lleva su propia copia del mundo y de la
//! historia.

use crate::step::TeardownStack;

pub struct Context<W> {
    /// Ordinal para atribución de resultados: 0 = raíz, los hermanos
    /// bifurcados se numeran desde 1 en orden de creación.
    pub index: usize,
    /// Próximo step a ejecutar dentro de la definición.
    pub cursor: usize,
    /// Copia propia del estado compartido de la rama.
    pub world: W,
    /// Pilas de teardown acumuladas, la más antigua primero. La liberación
    /// recorre de la más nueva a la más antigua.
    pub history: Vec<TeardownStack<W>>,
    /// Un fallo no aislado detiene la ejecución de steps en esta rama (los
    /// teardowns se liberan igual).
    pub halted: bool,
}

impl<W> Context<W> {
    pub fn root(world: W) -> Self {
        Self { index: 0,
               cursor: 0,
               world,
               history: Vec::new(),
               halted: false }
    }
}

impl<W: Clone> Context<W> {
    /// Crea un hermano independiente en el punto de fork: hereda el cursor,
    /// una copia del mundo posterior al cuerpo del arrangement y una copia de
    /// la historia a la que se suma la pila de ese step con la entrada del
    /// outcome propio del hermano.
    pub fn fork_sibling(&self, index: usize, step_stack: TeardownStack<W>) -> Self {
        let mut history = self.history.clone();
        history.push(step_stack);
        Self { index,
               cursor: self.cursor,
               world: self.world.clone(),
               history,
               halted: false }
    }
}
