// request.rs
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::ValidationError;
use crate::guardrails;

/// Request crudo tal como llega del exterior (CLI, archivo, test).
///
/// Los campos son públicos y sin garantías: puede venir con espacios
/// sobrantes, tono desconocido o audiencia genérica. Para obtener un
/// request utilizable hay que pasar por [`PlanRequest::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub goal: String,
    pub audience: String,
    pub tone: String,
    pub cta: String,
}

impl ContentRequest {
    pub fn new(goal: impl Into<String>,
               audience: impl Into<String>,
               tone: impl Into<String>,
               cta: impl Into<String>)
               -> Self {
        Self { goal: goal.into(),
               audience: audience.into(),
               tone: tone.into(),
               cta: cta.into() }
    }
}

/// Request validado y normalizado. Inmutable una vez construido.
///
/// Garantías que ofrece:
/// - los cuatro campos son no vacíos tras normalizar espacios;
/// - el tono pertenece al vocabulario reconocido y no se contradice;
/// - la audiencia no es un término genérico tipo "everyone".
///
/// La normalización recorta extremos y colapsa espacios internos, pero
/// conserva las mayúsculas originales: el case-folding ocurre recién al
/// calcular fingerprints, no acá.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    goal: String,
    audience: String,
    tone: String,
    cta: String,
}

impl PlanRequest {
    /// Valida un [`ContentRequest`] y construye la versión confiable.
    ///
    /// Devuelve el primer error encontrado, en orden de campo:
    /// goal, audience, tone, cta.
    pub fn from_raw(raw: &ContentRequest) -> Result<Self, ValidationError> {
        let goal = guardrails::normalize(&raw.goal);
        let audience = guardrails::normalize(&raw.audience);
        let tone = guardrails::normalize(&raw.tone);
        let cta = guardrails::normalize(&raw.cta);

        guardrails::check_goal(&goal)?;
        guardrails::check_audience(&audience)?;
        guardrails::check_tone(&tone)?;
        guardrails::check_cta(&cta)?;

        Ok(Self { goal, audience, tone, cta })
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn cta(&self) -> &str {
        &self.cta
    }

    /// Parámetros del run en forma de JSON plano.
    ///
    /// Es el único puente entre el dominio y el motor: el engine no conoce
    /// `PlanRequest`, solo recibe este `Value` y lo reparte a cada paso.
    pub fn params(&self) -> Value {
        json!({
            "goal": self.goal,
            "audience": self.audience,
            "tone": self.tone,
            "cta": self.cta,
        })
    }
}
