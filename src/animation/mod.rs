//! Rate functions and keyframed values driving the timeline.

pub(crate) mod anim;
pub(crate) mod ease;
