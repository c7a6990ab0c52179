//! Incremental rasterization of a [`Drawing`](crate::Drawing) into tracing frames.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod pipeline;
pub(crate) mod state;
pub(crate) mod viewport;
