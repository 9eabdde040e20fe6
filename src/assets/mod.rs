//! Font discovery and text shaping.

pub(crate) mod text;
