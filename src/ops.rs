use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::GraphError;

/// Crisp value returned when a distribution carries no usable weight.
pub const NEUTRAL_SCORE: f64 = 5.;

/// Method for defuzzificating a fuzzy distribution over linguistic states into a crisp score on
/// the 0-10 scale of [`State::scale`](crate::State::scale).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzification {
    /// Scale values weighted by the centroid of each state's fuzzy number
    #[default]
    Centroid,
    /// Mean scale value of the states whose centroid is maximum
    MeanOfMax,
}

impl Defuzzification {
    pub fn call(self, distribution: &Distribution) -> f64 {
        if distribution.is_empty() {
            return NEUTRAL_SCORE;
        }

        let score = match self {
            Self::Centroid => {
                let (weighted_sum, total_weight) = distribution.iter().fold((0., 0.), |(sum, total), (state, value)| {
                    let weight = value.centroid();

                    (sum + state.scale() * weight, total + weight)
                });

                if total_weight > 0. {
                    weighted_sum / total_weight
                } else {
                    NEUTRAL_SCORE
                }
            },
            Self::MeanOfMax => {
                let maximum = distribution
                    .iter()
                    .map(|(_, value)| value.centroid())
                    .fold(f64::NEG_INFINITY, f64::max);
                // Exact comparison: near-equal centroids are not merged.
                let (len, sum) = distribution
                    .iter()
                    .filter(|(_, value)| value.centroid() == maximum)
                    .fold((0usize, 0.), |(len, sum), (state, _)| (len + 1, sum + state.scale()));

                if len == 0 {
                    NEUTRAL_SCORE
                } else {
                    sum / len as f64
                }
            },
        };

        tracing::trace!(method = %self, score, "defuzzificated distribution");

        score
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::MeanOfMax => "mean_of_max",
        }
    }
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Defuzzification {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "centroid" => Ok(Self::Centroid),
            "mean_of_max" => Ok(Self::MeanOfMax),
            _ => Err(GraphError::UnknownMethod(s.to_owned())),
        }
    }
}

/// Collapses `distribution` into a crisp score with `method`.
pub fn defuzzify(distribution: &Distribution, method: Defuzzification) -> f64 {
    method.call(distribution)
}

/// Conjunction of the premise memberships of a Mamdani rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    pub fn call(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Min => f64::min(u, v),
            Self::Prod => u * v,
        }
    }
}

/// How a rule's firing strength shapes its consequent membership function.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani clipping
    #[default]
    Min,
    /// Larsen scaling
    Prod,
}

impl ImplicationOp {
    pub fn call(self, strength: f64, membership: f64) -> f64 {
        match self {
            Self::Min => f64::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for aggregating the implied consequents of every rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Max,
    ProbOr,
}

impl Aggregation {
    pub fn call(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Max => f64::max(u, v),
            Self::ProbOr => u + v - u * v,
        }
    }
}

/// Method for defuzzificating a membership function sampled over a universe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of gravity of the piecewise linear membership function
    #[default]
    Cog,
    /// Mean of the universe points where the membership is maximum
    Mom,
}

impl DefuzzificationOp {
    /// Crisp value of `membership` over the ascending `universe`, `None` when the area is zero.
    pub fn call(self, universe: &[f64], membership: &[f64]) -> Option<f64> {
        debug_assert_eq!(universe.len(), membership.len());

        let crisp = match self {
            Self::Cog => {
                let mut area_sum = 0.;
                let mut moment_sum = 0.;

                for (x, mu) in universe.windows(2).zip(membership.windows(2)) {
                    let base = x[1] - x[0];
                    // Each segment is a rectangle under the lower end plus a triangle up to the higher one
                    let rect_area = f64::min(mu[0], mu[1]) * base;
                    let rect_center = x[0] + base / 2.;
                    let tri_area = (mu[1] - mu[0]).abs() * base / 2.;
                    let tri_center = if mu[1] > mu[0] {
                        x[0] + 2. / 3. * base
                    } else {
                        x[0] + base / 3.
                    };

                    area_sum += rect_area + tri_area;
                    moment_sum += rect_area * rect_center + tri_area * tri_center;
                }

                if area_sum > 0. {
                    Some(moment_sum / area_sum)
                } else {
                    None
                }
            },
            Self::Mom => {
                let maximum = membership.iter().copied().fold(0., f64::max);
                let (len, sum) = universe
                    .iter()
                    .zip(membership)
                    .filter(|&(_, &mu)| maximum > 0. && mu == maximum)
                    .fold((0usize, 0.), |(len, sum), (&x, _)| (len + 1, sum + x));

                if len == 0 {
                    None
                } else {
                    Some(sum / len as f64)
                }
            },
        };

        tracing::trace!(method = ?self, ?crisp, "defuzzificated membership function");

        crisp
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::terms::State;
    use crate::triangular::TriangularFuzzyNumber;

    fn tfn(a: f64, m: f64, b: f64) -> TriangularFuzzyNumber {
        TriangularFuzzyNumber::new(a, m, b).unwrap()
    }

    fn calm_riesgo() -> Distribution {
        [
            (State::Bajo, tfn(0.75, 0.85, 0.92)),
            (State::Medio, tfn(0.05, 0.1, 0.15)),
            (State::Alto, tfn(0., 0.03, 0.06)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_distribution_is_neutral() {
        let empty = Distribution::new();

        assert_eq!(defuzzify(&empty, Defuzzification::Centroid), 5.);
        assert_eq!(defuzzify(&empty, Defuzzification::MeanOfMax), 5.);
    }

    #[test]
    fn test_centroid() {
        let distribution = calm_riesgo();
        let bajo = (0.75 + 0.85 + 0.92) / 3.;
        let medio = (0.05 + 0.1 + 0.15) / 3.;
        let alto = (0. + 0.03 + 0.06) / 3.;
        let expected = (2. * bajo + 5. * medio + 8. * alto) / (bajo + medio + alto);

        assert_relative_eq!(defuzzify(&distribution, Defuzzification::Centroid), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_weight_is_neutral() {
        let distribution: Distribution = [(State::Alto, TriangularFuzzyNumber::point(0.).unwrap())].into_iter().collect();

        assert_eq!(defuzzify(&distribution, Defuzzification::Centroid), 5.);
    }

    #[test]
    fn test_mean_of_max() {
        assert_eq!(defuzzify(&calm_riesgo(), Defuzzification::MeanOfMax), 2.);

        let tied: Distribution = [
            (State::Baja, tfn(0.3, 0.4, 0.5)),
            (State::Alta, tfn(0.3, 0.4, 0.5)),
            (State::Media, tfn(0.1, 0.2, 0.3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(defuzzify(&tied, Defuzzification::MeanOfMax), 5.);
    }

    #[test]
    fn test_center_of_gravity() {
        let universe = [0., 1., 2., 3., 4.];
        let symmetric = [0., 0.5, 1., 0.5, 0.];

        assert_relative_eq!(DefuzzificationOp::Cog.call(&universe, &symmetric).unwrap(), 2., epsilon = 1e-12);

        // A right triangle on [0, 3] has its centroid at 2.
        let ramp = [0., 1. / 3., 2. / 3., 1.];

        assert_relative_eq!(DefuzzificationOp::Cog.call(&universe[..4], &ramp).unwrap(), 2., epsilon = 1e-12);
        assert_eq!(DefuzzificationOp::Cog.call(&universe, &[0.; 5]), None);
    }

    #[test]
    fn test_mean_of_maximum_membership() {
        let universe = [0., 1., 2., 3., 4.];

        assert_eq!(DefuzzificationOp::Mom.call(&universe, &[0., 0.4, 0.4, 0.4, 0.]), Some(2.));
        assert_eq!(DefuzzificationOp::Mom.call(&universe, &[0.; 5]), None);
    }

    #[test]
    fn test_rule_operators() {
        assert_eq!(AndOp::Min.call(0.3, 0.8), 0.3);
        assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
        assert_eq!(ImplicationOp::Min.call(0.6, 0.9), 0.6);
        assert_eq!(ImplicationOp::Prod.call(0.5, 0.5), 0.25);
        assert_eq!(Aggregation::Max.call(0.2, 0.7), 0.7);
        assert_eq!(Aggregation::ProbOr.call(0.5, 0.5), 0.75);
    }

    #[test]
    fn test_method_names() {
        assert_eq!("centroid".parse(), Ok(Defuzzification::Centroid));
        assert_eq!("mean_of_max".parse(), Ok(Defuzzification::MeanOfMax));
        assert_eq!(
            "bisector".parse::<Defuzzification>(),
            Err(GraphError::UnknownMethod("bisector".to_owned()))
        );
        assert_eq!(Defuzzification::default(), Defuzzification::Centroid);
    }
}
