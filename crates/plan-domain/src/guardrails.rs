// guardrails.rs
//
// Heurísticas de validación del request. Son funciones puras sobre
// strings ya normalizados: sin estado oculto, sin efectos secundarios,
// para poder testearlas de forma aislada.

use once_cell::sync::Lazy;

use crate::errors::{RequestField, ValidationError};

/// Vocabulario de tonos que el sistema sabe interpretar.
static RECOGNIZED_TONES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec!["casual",
         "formal",
         "professional",
         "friendly",
         "urgent",
         "relaxed",
         "playful",
         "serious",
         "direct",
         "practical",
         "supportive",
         "informative",
         "inspirational",
         "bold",
         "witty",
         "empathetic",
         "humorous"]
});

/// Pares de tonos que se contradicen entre sí. Un request que pida ambos
/// a la vez es ambiguo y se rechaza.
static CONFLICTING_TONES: Lazy<Vec<(&'static str, &'static str)>> =
    Lazy::new(|| {
        vec![("urgent", "casual"),
             ("urgent", "relaxed"),
             ("formal", "casual"),
             ("playful", "serious")]
    });

/// Audiencias demasiado genéricas para orientar contenido.
static GENERIC_AUDIENCES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec!["everyone",
         "anyone",
         "people",
         "all",
         "public",
         "general public",
         "the public",
         "users",
         "audience"]
});

/// Recorta extremos y colapsa cualquier secuencia de espacios internos
/// (incluye tabs y saltos de línea) a un espacio simple.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn check_goal(goal: &str) -> Result<(), ValidationError> {
    if goal.is_empty() {
        return Err(ValidationError::new(RequestField::Goal, "goal must not be empty"));
    }
    Ok(())
}

pub fn check_audience(audience: &str) -> Result<(), ValidationError> {
    if audience.is_empty() {
        return Err(ValidationError::new(RequestField::Audience, "audience must not be empty"));
    }
    let lowered = audience.to_lowercase();
    if GENERIC_AUDIENCES.iter().any(|g| *g == lowered) {
        return Err(ValidationError::new(RequestField::Audience,
                                        format!("audience '{audience}' is too generic to target")));
    }
    Ok(())
}

pub fn check_tone(tone: &str) -> Result<(), ValidationError> {
    if tone.is_empty() {
        return Err(ValidationError::new(RequestField::Tone, "tone must not be empty"));
    }
    let tokens = tone_tokens(tone);
    if tokens.is_empty() {
        return Err(ValidationError::new(RequestField::Tone,
                                        format!("tone '{tone}' contains no usable descriptor")));
    }
    for token in &tokens {
        if !RECOGNIZED_TONES.contains(&token.as_str()) {
            return Err(ValidationError::new(RequestField::Tone,
                                            format!("unrecognized tone descriptor '{token}'")));
        }
    }
    for (a, b) in CONFLICTING_TONES.iter() {
        if tokens.iter().any(|t| t == a) && tokens.iter().any(|t| t == b) {
            return Err(ValidationError::new(RequestField::Tone,
                                            format!("tone mixes contradictory descriptors '{a}' and '{b}'")));
        }
    }
    Ok(())
}

pub fn check_cta(cta: &str) -> Result<(), ValidationError> {
    if cta.is_empty() {
        return Err(ValidationError::new(RequestField::Cta, "cta must not be empty"));
    }
    Ok(())
}

/// Separa un tono compuesto ("direct, practical & supportive") en
/// descriptores individuales en minúsculas. El conector "and" se descarta.
fn tone_tokens(tone: &str) -> Vec<String> {
    tone.to_lowercase()
        .split(|c: char| c == ',' || c == '+' || c == '/' || c == '&' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "and")
        .map(str::to_string)
        .collect()
}
