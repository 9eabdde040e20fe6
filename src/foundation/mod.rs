//! Core value types, error taxonomy and small numeric helpers shared by every stage.

pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
