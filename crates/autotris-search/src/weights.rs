use autotris_engine::BoardMetrics;
use serde::{Deserialize, Serialize};

/// Weights of the linear placement heuristic.
///
/// ```text
/// score = lines_cleared·lines + holes·holes + height·height + bumpiness·bumpiness
/// ```
///
/// Positive weights reward the metric, negative weights penalize it. Fields
/// missing from a JSON document fall back to [`HeuristicWeights::default`].
///
/// # Example
///
/// ```
/// use autotris_search::HeuristicWeights;
///
/// let weights: HeuristicWeights = serde_json::from_str(r#"{ "holes": -500.0 }"#).unwrap();
/// assert_eq!(weights.holes, -500.0);
/// assert_eq!(weights.lines_cleared, 760.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub lines_cleared: f32,
    pub holes: f32,
    pub height: f32,
    pub bumpiness: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            lines_cleared: 760.0,
            holes: -350.0,
            height: -180.0,
            bumpiness: -180.0,
        }
    }
}

impl HeuristicWeights {
    /// Computes the weighted sum for a placement that cleared `cleared_lines`
    /// lines and left a board with `metrics`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(&self, cleared_lines: usize, metrics: &BoardMetrics) -> f32 {
        self.lines_cleared * cleared_lines as f32
            + self.holes * metrics.holes as f32
            + self.height * metrics.height as f32
            + self.bumpiness * metrics.bumpiness as f32
    }
}
