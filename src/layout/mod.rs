//! Deterministic pixel geometry for the scene.

pub(crate) mod solver;
