//! Macros utilitarias para reducir boilerplate al definir Artifacts y Steps
//! tipados.
//!
//! Exportadas en la raíz del crate para poder usarlas como:
//!   use plan_core::{typed_artifact, typed_step};

/// Declara un Artifact tipado con derives y ArtifactSpec.
///
/// Formas soportadas:
/// - typed_artifact!(Name { field1: Ty1, field2: Ty2 }); // KIND = PlanJson
///   por defecto
/// - typed_artifact!(Name { field1: Ty1 } kind: $kind_expr );
#[macro_export]
macro_rules! typed_artifact {
    // Con KIND explícito
    ($name:ident { $($fname:ident : $fty:ty),+ $(,)? } kind: $kind:expr) => {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        pub struct $name { $(pub $fname: $fty,)+ pub schema_version: u32 }
        impl $crate::model::ArtifactSpec for $name {
            const KIND: $crate::model::ArtifactKind = $kind;
        }
    };
    // KIND por defecto PlanJson
    ($name:ident { $($fname:ident : $fty:ty),+ $(,)? }) => {
        $crate::typed_artifact!($name { $($fname : $fty),+ } kind: $crate::model::ArtifactKind::PlanJson);
    };
}

/// Declara un step tipado como struct unitario.
///
/// El cuerpo de `run` devuelve `Result<Output, EngineError>`: un `Err` se
/// convierte en `StepRunResultTyped::Failure` y el engine lo registra como
/// `StepFailed` sin panics.
///
/// Formas soportadas:
/// - `source Name { name: ..., output: ..., params: ..., run(self, p) {...} }`
/// - `step Name { name: ..., kind: ..., input: ..., output: ..., params: ...,
///   run(self, inp, p) {...} }`
#[macro_export]
macro_rules! typed_step {
    // ---------------- Source (sin input) ----------------
    (
        source $name:ident {
            name: $step_name:expr,
            output: $out:ty,
            params: $params:ty,
            run($self_ident:ident, $p_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name;
        impl $name { pub fn new() -> Self { Self } }
        impl $crate::step::TypedStep for $name {
            type Params = $params;
            type Input = $out;   // ignorado (Source)
            type Output = $out;
            fn name(&self) -> $crate::step::StepName { $step_name }
            fn kind(&self) -> $crate::step::StepKind { $crate::step::StepKind::Source }
            fn run_typed(&self, _input: Option<Self::Input>, $p_ident: Self::Params) -> $crate::step::StepRunResultTyped<Self::Output> {
                let _step_self = self;
                let res: Result<Self::Output, $crate::errors::EngineError> = { $body };
                match res {
                    Ok(output) => $crate::step::StepRunResultTyped::Success { output },
                    Err(error) => $crate::step::StepRunResultTyped::Failure { error },
                }
            }
        }
    };

    // ---------------- Transform/Sink (con input) ----------------
    (
        step $name:ident {
            name: $step_name:expr,
            kind: $kind:expr,
            input: $inp:ty,
            output: $out:ty,
            params: $params:ty,
            run($self_ident:ident, $inp_ident:ident, $p_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name;
        impl $name { pub fn new() -> Self { Self } }
        impl $crate::step::TypedStep for $name {
            type Params = $params;
            type Input = $inp;
            type Output = $out;
            fn name(&self) -> $crate::step::StepName { $step_name }
            fn kind(&self) -> $crate::step::StepKind { $kind }
            fn run_typed(&self, input: Option<Self::Input>, $p_ident: Self::Params) -> $crate::step::StepRunResultTyped<Self::Output> {
                let _step_self = self;
                let $inp_ident: Self::Input = match input {
                    Some(inp) => inp,
                    None => {
                        return $crate::step::StepRunResultTyped::Failure {
                            error: $crate::errors::EngineError::MissingInput { step: $step_name },
                        }
                    }
                };
                let res: Result<Self::Output, $crate::errors::EngineError> = { $body };
                match res {
                    Ok(output) => $crate::step::StepRunResultTyped::Success { output },
                    Err(error) => $crate::step::StepRunResultTyped::Failure { error },
                }
            }
        }
    };
}
