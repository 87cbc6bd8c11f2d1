//! Constantes del motor de escenarios.

/// Versión lógica del motor. Informativa: un consumidor externo puede
/// incluirla junto a sus registros para detectar cambios de contrato.
pub const ENGINE_VERSION: &str = "S1.0";

/// Marcador usado para nombrar los steps sintéticos de limpieza derivados de
/// un step de usuario ("nombre (Teardown)" / "nombre (Teardown N)").
pub const TEARDOWN_MARKER: &str = "Teardown";
