/// Rate functions mapping normalized time to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// `t²`.
    InQuad,
    /// Mirror of `InQuad`.
    OutQuad,
    /// Quadratic in, then out.
    InOutQuad,
    /// `t³`.
    InCubic,
    /// Mirror of `InCubic`.
    OutCubic,
    /// Cubic in, then out.
    InOutCubic,
    /// Sigmoid ease-in-out with inflection 10; the default for reveal and fade beats.
    #[default]
    Smooth,
}

impl Ease {
    /// Map `t`, clamped to `[0, 1]`, to progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Smooth => smooth(t, 10.0),
        }
    }
}

fn smooth(t: f64, inflection: f64) -> f64 {
    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
    let error = sigmoid(-inflection / 2.0);
    ((sigmoid(inflection * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
