// mesa/core/src/flow/step.rs

use super::ContextData;
use super::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A step handler: takes a clone of the shared context and resolves to a flow signal.
///
/// Handlers lock the context with `.read()` / `.write()` and must drop the guard
/// before awaiting anything.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// A named step. Optional steps without handlers are skipped instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}
