//! Scene configuration and the scripted timeline built from it.

pub(crate) mod config;
pub(crate) mod timeline;
