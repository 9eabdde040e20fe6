//! Rasterization of draw lists and multi-frame render orchestration.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod pipeline;
