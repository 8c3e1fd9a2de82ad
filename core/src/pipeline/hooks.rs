// mesa/core/src/pipeline/hooks.rs

//! Registration of `on` and `after` handlers.

use crate::flow::context_data::ContextData;
use crate::flow::control::PipelineControl;
use crate::flow::step::Handler;
use crate::error::{MesaError, MesaResult};
use crate::pipeline::definition::Pipeline;
use std::future::Future;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<MesaError> + Send + Sync + 'static,
{
  /// Registers a main handler for `step_name`.
  ///
  /// The handler may fail with any error convertible into the pipeline's `Err`.
  pub fn on<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> MesaResult<()>
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    let handler = wrap(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }

  /// Registers a hook that runs after every `on` handler of `step_name` succeeded.
  pub fn after<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> MesaResult<()>
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    let handler = wrap(handler_fn);
    self.after.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }
}

fn wrap<TData, Err, F, UserErr>(
  handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
) -> Handler<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: Send + 'static,
  F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
  UserErr: Into<Err> + Send + Sync + 'static,
{
  Box::new(move |ctx_data| {
    let user_fut = handler_fn(ctx_data);
    Box::pin(async move { user_fut.await.map_err(Into::into) })
  })
}
