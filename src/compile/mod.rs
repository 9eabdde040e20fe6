//! Lowering of evaluated frames into backend-agnostic draw lists.

pub(crate) mod fingerprint;
pub(crate) mod plan;
