//! Helpers de assertion que devuelven `Result` en vez de entrar en pánico,
//! para que el fallo de un `then` viaje por el canal normal del runner.

use std::fmt::Debug;

use bdd_core::ScenarioError;

pub fn ensure(condition: bool, what: &str) -> Result<(), ScenarioError> {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::AssertionFailed(what.to_string()))
    }
}

pub fn ensure_eq<T: PartialEq + Debug>(actual: &T, expected: &T, what: &str) -> Result<(), ScenarioError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ScenarioError::AssertionFailed(format!("{}: se esperaba {:?}, se obtuvo {:?}",
                                                   what, expected, actual)))
    }
}

pub fn ensure_contains(haystack: &str, needle: &str, what: &str) -> Result<(), ScenarioError> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(ScenarioError::AssertionFailed(format!("{}: {:?} no contiene {:?}", what, haystack, needle)))
    }
}
