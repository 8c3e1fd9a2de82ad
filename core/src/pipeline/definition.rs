// mesa/core/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its construction.

use crate::flow::step::{Handler, StepDef};
use crate::error::{MesaError, MesaResult};
use std::collections::HashMap;

/// An ordered list of named steps run against a `ContextData<TData>`.
///
/// `Err` is whatever the handlers return. It must absorb `MesaError` so that
/// configuration problems found during a run (a required step without handlers)
/// come back through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<MesaError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<MesaError> + Send + Sync + 'static,
{
  /// Declares the steps as `(name, optional)` pairs, in execution order.
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn steps(&self) -> &[StepDef] {
    &self.steps
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> MesaResult<()> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Ok(())
    } else {
      Err(MesaError::StepNotFound {
        step_name: step_name.to_string(),
      })
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> MesaResult<()> {
    let step = self
      .steps
      .iter_mut()
      .find(|s| s.name == step_name)
      .ok_or_else(|| MesaError::StepNotFound {
        step_name: step_name.to_string(),
      })?;
    step.optional = optional;
    Ok(())
  }
}

impl<TData, Err> std::fmt::Debug for Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<MesaError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("steps", &self.steps)
      .field("on_handlers", &self.on.values().map(Vec::len).sum::<usize>())
      .field("after_handlers", &self.after.values().map(Vec::len).sum::<usize>())
      .finish()
  }
}
