//! Demos de validación del motor de escenarios.
//!
//! Cada función arma un escenario (con la superficie fluida o con las
//! declaraciones del core), lo corre y muestra los resultados reportados al
//! sink en el orden exacto de ejecución.

use std::cell::RefCell;
use std::rc::Rc;

use bdd_core::{InMemoryResultSink, ScenarioRunner};
use bdd_dsl::{cleanup, ensure_eq, Scenario, ScenarioError};
use uuid::Uuid;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Clone, Default)]
struct World {
    log: Log,
    count: i64,
}

fn note(log: &Log, entry: &str) {
    log.borrow_mut().push(entry.to_string());
}

fn print_results(runner: &ScenarioRunner<InMemoryResultSink>, scenario_id: Uuid, title: &str) {
    println!("== {} ==", title);
    for r in runner.results(scenario_id) {
        let line = serde_json::json!({
            "seq": r.seq,
            "context": r.context,
            "step": r.step_name,
            "outcome": r.outcome,
        });
        println!("{}", line);
    }
    let summary = runner.summary(scenario_id);
    println!("passed={} failed={} skipped={}", summary.passed, summary.failed, summary.skipped);
    println!();
}

/// Validación 1: liberación inversa de teardowns de un único arrangement.
fn run_reverse_teardown_validation() {
    let world = World::default();
    let log = world.log.clone();

    let mut runner = ScenarioRunner::new();
    let scenario_id = Scenario::<World>::new("reverse teardown order")
        .given_with("a stack of three resources", |ctx| {
            note(&ctx.world.log, "step1");
            for i in 1..=3 {
                ctx.defer(move |w| {
                       note(&w.log, &format!("teardown{}", i));
                       Ok(())
                   });
            }
            Ok(())
        })
        .run_into(&mut runner, world);

    print_results(&runner, scenario_id, "reverse teardown order");
    println!("event order: {:?}", log.borrow());
    println!();
}

/// Validación 2: un fallo detiene los steps de la rama pero no su limpieza.
fn run_failure_containment_validation() {
    let world = World::default();
    let log = world.log.clone();

    let mut runner = ScenarioRunner::new();
    let scenario_id = Scenario::<World>::new("failure still cleans up")
        .given_teardown("an opened resource",
                        |w| {
                            note(&w.log, "step1");
                            Ok(())
                        },
                        |w| {
                            note(&w.log, "teardown1");
                            Ok(())
                        })
        .when_teardown("a second resource",
                       |w| {
                           note(&w.log, "step2");
                           Ok(())
                       },
                       |w| {
                           note(&w.log, "teardown2");
                           Ok(())
                       })
        .when("the action blows up", |w| {
            note(&w.log, "step3");
            Err(ScenarioError::StepFailed("fallo intencional".into()))
        })
        .then("never reached", |_w| Ok(()))
        .run_into(&mut runner, world);

    print_results(&runner, scenario_id, "failure still cleans up");
    println!("event order: {:?}", log.borrow());
    println!();
}

/// Validación 3: bifurcación en dos outcomes con una assertion aislada.
fn run_bifurcation_validation() {
    let world = World::default();
    let log = world.log.clone();

    let mut runner = ScenarioRunner::new();
    let scenario_id = Scenario::<World>::new("two outcome sweep")
        .given_each("one of two fixtures", |w| {
            note(&w.log, "arrange");
            Ok(vec![cleanup(|w: &mut World| {
                        note(&w.log, "drop-a");
                        Ok(())
                    }),
                    cleanup(|w: &mut World| {
                        note(&w.log, "drop-b");
                        Ok(())
                    })])
        })
        .when("the fixture is touched", |w| {
            note(&w.log, "touch");
            w.count += 1;
            Ok(())
        })
        .then_isolated("an isolated look at the copy", |w| ensure_eq(&w.count, &1, "count"))
        .then("each branch owns its count", |w| ensure_eq(&w.count, &1, "count"))
        .run_into(&mut runner, world);

    print_results(&runner, scenario_id, "two outcome sweep");
    println!("event order: {:?}", log.borrow());
    println!();
}

fn main() {
    println!("bddflow engine {}", bdd_core::constants::ENGINE_VERSION);
    println!();
    run_reverse_teardown_validation();
    run_failure_containment_validation();
    run_bifurcation_validation();
}
