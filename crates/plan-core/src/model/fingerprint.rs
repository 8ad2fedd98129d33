//! Fingerprint de deduplicación por paso.
//!
//! La identidad de un paso es el par (request normalizado, nombre del
//! paso). Dos requests que solo difieren en mayúsculas o en espacios ya
//! colapsados producen el mismo fingerprint; cualquier cambio de contenido
//! en cualquier campo del request invalida los cuatro pasos.

use serde::Serialize;
use serde_json::Value;

use crate::hashing::hash_value;
use crate::step::StepName;

/// Insumos del fingerprint de un step. NO es el fingerprint final (string
/// hash) sino el modelo previo a canonicalizar.
#[derive(Serialize)]
pub struct FingerprintInput<'a> {
    pub request: Value,
    pub step: &'a str,
}

/// Baja a minúsculas todos los strings de un `Value`, recursivamente.
/// Los números, booleanos y claves de objeto quedan intactos.
pub fn fold_case(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Array(items) => Value::Array(items.iter().map(fold_case).collect()),
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.clone(), fold_case(v))).collect()),
        other => other.clone(),
    }
}

/// Calcula el fingerprint determinista de (request, paso).
pub fn step_fingerprint(params: &Value, step: StepName) -> String {
    let fp_json = serde_json::json!({
        "request": fold_case(params),
        "step": step.as_str(),
    });
    hash_value(&fp_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_params() -> Value {
        json!({
            "goal": "Promote new product",
            "audience": "developers",
            "tone": "casual",
            "cta": "Sign up now",
        })
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = step_fingerprint(&sample_params(), StepName::Topics);
        let b = step_fingerprint(&sample_params(), StepName::Topics);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_differs_per_step() {
        let params = sample_params();
        let topics = step_fingerprint(&params, StepName::Topics);
        let posts = step_fingerprint(&params, StepName::Posts);
        assert_ne!(topics, posts);
    }

    #[test]
    fn fingerprint_is_case_insensitive_over_request() {
        let upper = json!({"goal": "Promote NEW Product", "audience": "Developers", "tone": "Casual", "cta": "SIGN UP NOW"});
        let lower = json!({"goal": "promote new product", "audience": "developers", "tone": "casual", "cta": "sign up now"});
        assert_eq!(step_fingerprint(&upper, StepName::Topics),
                   step_fingerprint(&lower, StepName::Topics));
    }

    #[test]
    fn any_field_change_invalidates() {
        let mut changed = sample_params();
        changed["cta"] = json!("Try it free");
        assert_ne!(step_fingerprint(&sample_params(), StepName::Schedule),
                   step_fingerprint(&changed, StepName::Schedule));
    }

    #[test]
    fn fold_case_keeps_structure() {
        let v = json!({"a": ["Mix", 3, true], "b": {"c": "UP"}});
        assert_eq!(fold_case(&v), json!({"a": ["mix", 3, true], "b": {"c": "up"}}));
    }

    #[test]
    fn fingerprint_input_model_matches_the_computed_hash() {
        let input = FingerprintInput { request: fold_case(&sample_params()),
                                       step: StepName::Topics.as_str() };
        let as_value = serde_json::to_value(&input).unwrap();
        assert_eq!(hash_value(&as_value),
                   step_fingerprint(&sample_params(), StepName::Topics));
    }
}
