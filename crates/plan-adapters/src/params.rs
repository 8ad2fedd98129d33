//! Parámetros de run compartidos por los steps del plan.
//!
//! Los cuatro campos del request validado viajan como params del run; cada
//! step los decodifica a este mismo tipo para que todos vean la misma forma.

use plan_domain::PlanRequest;

/// Request validado en forma de params de run (JSON plano de cuatro campos).
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RequestParams {
    pub goal: String,
    pub audience: String,
    pub tone: String,
    pub cta: String,
}

impl RequestParams {
    /// Puente desde el request ya validado por el dominio.
    pub fn from_request(req: &PlanRequest) -> Self {
        Self { goal: req.goal().to_string(),
               audience: req.audience().to_string(),
               tone: req.tone().to_string(),
               cta: req.cta().to_string() }
    }
}
