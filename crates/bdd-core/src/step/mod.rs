//! Definiciones relacionadas a Steps.
//!
//! En un escenario, un Step es una unidad nombrada que ejecuta un cuerpo
//! opaco contra el estado compartido y registra 0..n entradas de teardown.
//! Este módulo define:
//! - `StepDeclaration`: la declaración neutral consumida por el runner.
//! - `CleanupHandle` y `TeardownStack`: limpieza en orden inverso estricto.
//! - `StepCtx`: lo que ve un cuerpo mientras corre (`world`, `defer`, `fork`).
//! - `StepRunResult` / `StepYield`: lo que queda tras ejecutar un cuerpo.

pub mod definition;
mod run_result;
mod step_ctx;
mod teardown;

pub use definition::{StepDeclaration, StepFn, StepKind};
pub use run_result::{StepRunResult, StepYield};
pub use step_ctx::StepCtx;
pub use teardown::{CleanupHandle, TeardownStack};
