use std::fmt::Debug;
use std::marker::PhantomData;

use super::{StepDefinition, TypedStep};
use crate::repo::{build_plan_definition, PlanDefinition};

/// Marker trait para afirmar en compilación que dos tipos son el mismo.
/// Implementado solo para tipos idénticos (T: SameAs<T> para todo T).
pub trait SameAs<T> {}
impl<T> SameAs<T> for T {}

/// Builder tipado de pipelines: fuerza en compilación que el input del
/// siguiente paso coincida con el output del anterior.
///
/// Uso:
///   let pipe = Pipe::new(GenerateTopicsStep::new()).then(DraftPostsStep::new());
///   let definition: PlanDefinition = pipe.build();
pub struct Pipe<S: TypedStep + Debug + 'static> {
    steps: Vec<Box<dyn StepDefinition>>,
    _out: PhantomData<<S as TypedStep>::Output>,
}

impl<S: TypedStep + Debug + 'static> Pipe<S> {
    pub fn new(step: S) -> Self {
        Self { steps: vec![Box::new(step)],
               _out: PhantomData }
    }

    /// Agrega un paso, exigiendo N::Input == S::Output en compilación.
    pub fn then<N>(mut self, next: N) -> Pipe<N>
        where N: TypedStep + Debug + 'static,
              <N as TypedStep>::Input: SameAs<<S as TypedStep>::Output>
    {
        self.steps.push(Box::new(next));
        Pipe::<N> { steps: self.steps,
                    _out: PhantomData }
    }

    /// Construye la `PlanDefinition` a partir del pipeline tipado. Los
    /// chequeos de `then` garantizan la compatibilidad de adyacencia antes
    /// del boxing; el orden de nombres se valida en runtime al ejecutar.
    pub fn build(self) -> PlanDefinition {
        build_plan_definition(self.steps)
    }
}
