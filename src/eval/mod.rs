//! Per-frame sampling of the timeline into positioned scene nodes.

pub(crate) mod evaluator;
