// mesa/app/src/pipelines/mod.rs

//! Step pipelines run by the HTTP handlers.

pub mod contexts;
pub mod place_order_pipeline;
