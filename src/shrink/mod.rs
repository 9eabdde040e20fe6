//! Linear covariance shrinkage: the pure math behind the animation.

pub(crate) mod estimator;
pub(crate) mod matrix;
