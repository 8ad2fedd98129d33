//! Builder para `PlanEngine`.
//!
//! Patrón builder seguro en tiempo de compilación: obliga a declarar el
//! primer paso (fuente) y a encadenar pasos cuyos tipos de entrada y salida
//! sean compatibles.
//!
//! Notas de diseño
//! - `EngineBuilderInit` representa el estado inicial: los tres stores
//!   (memoria + auditoría + repositorio) deben estar presentes.
//! - `EngineBuilder<S, M, A, R>` mantiene el último tipo de salida conocido
//!   `S::Output` (mediante `PhantomData`) y la lista de pasos como
//!   `Vec<Box<dyn StepDefinition>>`.
//! - `add_step` impone en sus bounds que la entrada del siguiente paso sea
//!   compatible con la salida del anterior usando `SameAs`.

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::engine::PlanEngine;
use crate::event::AuditStore;
use crate::memory::MemoryStore;
use crate::repo::RunRepository;
use crate::step::{SameAs, StepDefinition, TypedStep};

/// Estado inicial del builder.
///
/// Contiene los stores necesarios para crear un `PlanEngine`. Antes de
/// poder añadir pasos debemos definir el primero (de tipo `Source`).
#[derive(Debug)]
pub struct EngineBuilderInit<M: MemoryStore, A: AuditStore, R: RunRepository> {
    /// Memoria de deduplicación que usará el engine.
    pub memory: M,
    /// Log de auditoría append-only.
    pub audit: A,
    /// Repositorio de replay del estado del run.
    pub repository: R,
}

impl<M: MemoryStore, A: AuditStore, R: RunRepository> EngineBuilderInit<M, A, R> {
    /// Define el primer paso del plan y transiciona al builder completo.
    ///
    /// Requerimos que el primer paso sea de tipo `Source`. Se hace una
    /// aserción en tiempo de ejecución (`debug_assert!`) para ayudar durante
    /// el desarrollo; en builds release la aserción queda desactivada.
    #[inline]
    pub fn first_step<S>(self, step: S) -> EngineBuilder<S, M, A, R>
        where S: TypedStep + Debug + 'static
    {
        debug_assert!(matches!(step.kind(), crate::step::StepKind::Source),
                      "el primer paso debe ser de tipo Source",);

        EngineBuilder { memory: self.memory,
                        audit: self.audit,
                        repository: self.repository,
                        steps: vec![Box::new(step)],
                        _out: PhantomData::<S::Output> }
    }
}

/// Builder principal que acumula pasos y garantiza compatibilidad de tipos.
///
/// El parámetro genérico `S` representa el tipo del último `TypedStep`
/// añadido; su asociado `S::Output` se conserva en `_out` para imponer
/// restricciones en el siguiente `add_step`.
#[derive(Debug)]
pub struct EngineBuilder<S: TypedStep + Debug + 'static, M: MemoryStore, A: AuditStore, R: RunRepository> {
    memory: M,
    audit: A,
    repository: R,
    /// Lista de pasos que conforman la definición del plan.
    steps: Vec<Box<dyn StepDefinition>>,
    /// Marcador de tipo para el output del último paso añadido.
    _out: PhantomData<S::Output>,
}

impl<S: TypedStep + Debug + 'static, M: MemoryStore, A: AuditStore, R: RunRepository> EngineBuilder<S, M, A, R> {
    /// Añade un siguiente paso al plan.
    ///
    /// La comprobación `N::Input: SameAs<S::Output>` asegura que la entrada
    /// del nuevo paso `N` es compatible con la salida del paso anterior `S`.
    ///
    /// Consumimos `self` porque cambiamos el estado del builder y devolvemos
    /// un nuevo `EngineBuilder` parametrizado por el nuevo paso `N`.
    #[inline]
    pub fn add_step<N>(mut self, next: N) -> EngineBuilder<N, M, A, R>
        where N: TypedStep + Debug + 'static,
              N::Input: SameAs<S::Output>
    {
        self.steps.push(Box::new(next));

        EngineBuilder { memory: self.memory,
                        audit: self.audit,
                        repository: self.repository,
                        steps: self.steps,
                        _out: PhantomData }
    }

    /// Construye el `PlanEngine` final usando los stores y la lista de pasos.
    ///
    /// Este método consume el builder. Genera la definición del plan a
    /// partir de `self.steps` y la establece como definición por defecto.
    #[inline]
    pub fn build(self) -> PlanEngine<M, A, R> {
        let mut engine = PlanEngine::new_with_stores(self.memory, self.audit, self.repository);
        let definition = crate::repo::build_plan_definition(self.steps);
        engine.set_default_definition(definition);
        engine
    }
}
