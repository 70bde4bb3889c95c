use serde::{Deserialize, Serialize};

use crate::ops::{Aggregation, AndOp, Defuzzification, DefuzzificationOp, ImplicationOp};

/// Tuning knobs of the forward inference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// How far an interpolated rule's supports are widened on each side.
    pub interpolation_spread: f64,
    /// Half width of the uniform numbers used when no rule resembles the parent states.
    pub fallback_spread: f64,
    /// Method used by [`FuzzyCausalGraph::assess`](crate::FuzzyCausalGraph::assess).
    pub defuzzification: Defuzzification,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            interpolation_spread: 0.05,
            fallback_spread: 0.1,
            defuzzification: Defuzzification::Centroid,
        }
    }
}

/// Operator selection of the Mamdani systems, `min`/`min`/`max` with center of gravity by default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MamdaniConfig {
    pub and_op: AndOp,
    pub implication: ImplicationOp,
    pub aggregation: Aggregation,
    pub defuzzification: DefuzzificationOp,
}
