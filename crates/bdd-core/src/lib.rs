//! bdd-core: Motor de ejecución de escenarios Given/When/Then (S1)
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod event;
pub mod step;

pub use context::Context;
pub use engine::{ScenarioDefinition, ScenarioRunner};
pub use errors::ScenarioError;
pub use event::{InMemoryResultSink, Outcome, ResultRecord, ResultSink, RunSummary, StepResult};
pub use step::{CleanupHandle, StepCtx, StepDeclaration, StepFn, StepKind, StepRunResult, StepYield, TeardownStack};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    // Mundo de prueba. Clonar comparte `log` y `shared` (observabilidad entre
    // ramas, sólo para tests) y copia `value` en profundidad: las mutaciones
    // de `value` posteriores al fork son privadas de cada rama.
    #[derive(Clone, Default)]
    struct World {
        log: Log,
        shared: Rc<RefCell<i64>>,
        value: i64,
    }

    fn note(log: &Log, entry: &str) {
        log.borrow_mut().push(entry.to_string());
    }

    fn noter(name: &'static str) -> CleanupHandle<World> {
        CleanupHandle::new(move |w: &mut World| {
            note(&w.log, name);
            Ok(())
        })
    }

    #[test]
    fn bifurcation_runs_downstream_per_outcome_and_contains_failures() {
        // Arrangement con dos outcomes: un teardown común (defer) más el
        // handle propio de cada outcome.
        let given = StepDeclaration::<World>::new("given two outcomes", StepKind::Arrangement, |ctx| {
            note(&ctx.world.log, "given");
            ctx.defer(|w| {
                   note(&w.log, "common-cleanup");
                   Ok(())
               });
            ctx.fork(vec![noter("cleanup-1"), noter("cleanup-2")]);
            Ok(())
        });

        // Falla sólo en la primera rama que lo ejecute (contador compartido).
        let when = StepDeclaration::<World>::new("when acting", StepKind::Action, |ctx| {
            note(&ctx.world.log, "act");
            let attempt = {
                let mut shared = ctx.world.shared.borrow_mut();
                *shared += 1;
                *shared
            };
            if attempt == 1 {
                return Err(ScenarioError::StepFailed("primera rama falla".into()));
            }
            ctx.world.value += 1;
            Ok(())
        });

        let then = StepDeclaration::<World>::new("then the value is one", StepKind::Assertion, |ctx| {
            note(&ctx.world.log, "checked");
            if ctx.world.value == 1 {
                Ok(())
            } else {
                Err(ScenarioError::AssertionFailed(format!("value = {}", ctx.world.value)))
            }
        });

        let definition = ScenarioDefinition::new("two outcome sweep", vec![given, when, then]);
        let world = World::default();
        let log = world.log.clone();

        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, world);

        // Rama 1 falla en `when` y aun así libera su outcome y el común; la
        // rama 2 corre completa y no ve el fallo ni el estado de la rama 1.
        assert_eq!(*log.borrow(),
                   vec!["given", "act", "cleanup-1", "common-cleanup", "act", "checked", "cleanup-2",
                        "common-cleanup"]);

        let results = runner.results(scenario_id);

        // El arrangement se ejecutó una sola vez, en el contexto raíz.
        assert_eq!(results[0].step_name, "given two outcomes");
        assert_eq!(results[0].context, 0);

        // Atribución por rama sin corrupción de orden.
        let ctx1: Vec<_> = results.iter().filter(|r| r.context == 1).collect();
        let ctx2: Vec<_> = results.iter().filter(|r| r.context == 2).collect();
        assert_eq!(ctx1.len(), 3); // when fallido + 2 teardowns
        assert_eq!(ctx2.len(), 4); // when + then + 2 teardowns
        assert!(ctx1.iter().any(|r| r.outcome == Outcome::Failed));
        assert!(ctx2.iter().all(|r| r.outcome == Outcome::Passed));

        // Cada pila del arrangement tiene dos entradas: nombres desambiguados.
        assert!(results.iter().any(|r| r.step_name == "given two outcomes (Teardown 1)"));
        assert!(results.iter().any(|r| r.step_name == "given two outcomes (Teardown 2)"));
    }

    #[test]
    fn isolated_assertion_cannot_affect_owner_context() {
        let given = StepDeclaration::<World>::new("given a value", StepKind::Arrangement, |ctx| {
            note(&ctx.world.log, "given");
            ctx.world.value = 5;
            ctx.defer(|w| {
                   note(&w.log, "given-cleanup");
                   Ok(())
               });
            Ok(())
        });

        // Corre contra un snapshot: muta, registra limpieza y falla. Nada de
        // eso debe tocar al contexto dueño.
        let isolated = StepDeclaration::<World>::isolated("then in isolation", |ctx| {
            note(&ctx.world.log, "isolated");
            ctx.world.value = 999;
            ctx.defer(|w| {
                   note(&w.log, "iso-cleanup");
                   Ok(())
               });
            Err(ScenarioError::AssertionFailed("siempre falla".into()))
        });

        let after = StepDeclaration::<World>::new("then the value is intact", StepKind::Assertion, |ctx| {
            note(&ctx.world.log, "after");
            if ctx.world.value == 5 {
                Ok(())
            } else {
                Err(ScenarioError::AssertionFailed(format!("value = {}", ctx.world.value)))
            }
        });

        let definition = ScenarioDefinition::new("isolation", vec![given, isolated, after]);
        let world = World::default();
        let log = world.log.clone();

        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, world);

        // El teardown aislado se libera de inmediato contra el snapshot; los
        // steps posteriores y la limpieza del contexto corren igual.
        assert_eq!(*log.borrow(), vec!["given", "isolated", "iso-cleanup", "after", "given-cleanup"]);
        assert_eq!(runner.outcome_variants(scenario_id), vec!["P", "X", "P", "P", "P"]);

        let results = runner.results(scenario_id);
        assert_eq!(results[2].step_name, "then in isolation (Teardown)");
        assert_eq!(results[4].step_name, "given a value (Teardown)");
    }

    #[test]
    fn skipped_assertion_never_runs_its_body() {
        let given = StepDeclaration::<World>::new("given something", StepKind::Arrangement, |ctx| {
            ctx.defer(|w| {
                   note(&w.log, "cleanup");
                   Ok(())
               });
            Ok(())
        });
        let skipped = StepDeclaration::<World>::skipped("then (pending)", |ctx| {
            note(&ctx.world.log, "must not appear");
            Err(ScenarioError::AssertionFailed("no debería ejecutarse".into()))
        });
        let then = StepDeclaration::<World>::new("then still runs", StepKind::Assertion, |_ctx| Ok(()));

        let definition = ScenarioDefinition::new("skip", vec![given, skipped, then]);
        let world = World::default();
        let log = world.log.clone();

        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, world);

        assert_eq!(runner.outcome_variants(scenario_id), vec!["P", "S", "P", "P"]);
        assert_eq!(*log.borrow(), vec!["cleanup"]);
        let summary = runner.summary(scenario_id);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn zero_outcomes_finish_the_context_after_cleanup() {
        let given = StepDeclaration::<World>::new("given no outcomes", StepKind::Arrangement, |ctx| {
            note(&ctx.world.log, "given");
            ctx.defer(|w| {
                   note(&w.log, "cleanup");
                   Ok(())
               });
            ctx.fork(vec![]);
            Ok(())
        });
        let never = StepDeclaration::<World>::new("when never reached", StepKind::Action, |ctx| {
            note(&ctx.world.log, "never");
            Ok(())
        });

        let definition = ScenarioDefinition::new("zero outcomes", vec![given, never]);
        let world = World::default();
        let log = world.log.clone();

        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, world);

        // Cero sucesores: ningún step posterior, pero la limpieza corre.
        assert_eq!(*log.borrow(), vec!["given", "cleanup"]);
        assert_eq!(runner.outcome_variants(scenario_id), vec!["P", "P"]);
    }

    #[test]
    fn failing_teardown_does_not_stop_earlier_ones() {
        let given = StepDeclaration::<World>::new("given fragile resources", StepKind::Arrangement, |ctx| {
            ctx.defer(|w| {
                   note(&w.log, "survivor");
                   Ok(())
               });
            ctx.defer(|_w| Err(ScenarioError::TeardownFailed("recurso roto".into())));
            Ok(())
        });

        let definition = ScenarioDefinition::new("teardown failure", vec![given]);
        let world = World::default();
        let log = world.log.clone();

        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, world);

        // El fallo del teardown más nuevo no impide liberar el anterior.
        assert_eq!(*log.borrow(), vec!["survivor"]);
        assert_eq!(runner.outcome_variants(scenario_id), vec!["P", "X", "P"]);

        let results = runner.results(scenario_id);
        assert_eq!(results[1].step_name, "given fragile resources (Teardown 1)");
        assert_eq!(results[1].error,
                   Some(ScenarioError::TeardownFailed("recurso roto".into())));
    }

    #[test]
    fn step_results_are_serializable() {
        let definition =
            ScenarioDefinition::new("serde",
                                    vec![StepDeclaration::<World>::new("given nothing",
                                                                       StepKind::Arrangement,
                                                                       |_ctx| Ok(()))]);
        let mut runner = ScenarioRunner::new();
        let scenario_id = runner.run_scenario(&definition, World::default());

        let results = runner.results(scenario_id);
        let json = serde_json::to_value(&results[0]).expect("serialización");
        assert_eq!(json["step_name"], "given nothing");
        assert_eq!(json["outcome"], "Passed");
        assert_eq!(json["seq"], 0);
    }
}
