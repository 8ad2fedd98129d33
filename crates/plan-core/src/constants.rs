//! Constantes del motor core.
//!
//! Valores estáticos que participan en la trazabilidad del run. El
//! `ENGINE_VERSION` se registra en el evento `RunInitialized` como
//! procedencia; no entra al cálculo de fingerprints, que dependen solo
//! del request y del nombre del paso.

/// Versión lógica del motor de planificación. Se registra en cada
/// `RunInitialized` para poder auditar con qué motor se produjo un run.
pub const ENGINE_VERSION: &str = "P1.0";

/// Límite de caracteres del preview de output que viaja en el log de
/// auditoría. Outputs más largos se truncan con el sufijo `...(truncated)`.
pub const OUTPUT_PREVIEW_LIMIT: usize = 260;
