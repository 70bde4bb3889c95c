use std::fmt;

use serde::Serialize;

use crate::distribution::Distribution;
use crate::variable::Variable;

/// Coarse classification of a defuzzificated risk score on the 0-10 scale.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Bajo,
    Medio,
    Alto,
}

impl RiskLevel {
    /// `<= 3` is low, `<= 6` is medium, anything above is high.
    pub fn from_score(score: f64) -> Self {
        if score <= 3. {
            RiskLevel::Bajo
        } else if score <= 6. {
            RiskLevel::Medio
        } else {
            RiskLevel::Alto
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            RiskLevel::Bajo => "routine monitoring",
            RiskLevel::Medio => "alert and preparation",
            RiskLevel::Alto => "evacuation recommended",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Bajo => "bajo",
            RiskLevel::Medio => "medio",
            RiskLevel::Alto => "alto",
        })
    }
}

/// Outcome of [`FuzzyCausalGraph::assess`](crate::FuzzyCausalGraph::assess).
#[derive(Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    pub distribution: Distribution,
    pub score: f64,
    pub level: RiskLevel,
}

/// Crisp scores of the three Mamdani systems, see
/// [`MamdaniPipeline::evaluate`](crate::MamdaniPipeline::evaluate).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MamdaniAssessment {
    pub amenaza: f64,
    pub vulnerabilidad: f64,
    pub riesgo: f64,
    pub level: RiskLevel,
}

/// Risk scores of a one variable sweep, see
/// [`FuzzyCausalGraph::sensitivity`](crate::FuzzyCausalGraph::sensitivity).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sensitivity {
    pub variable: Variable,
    /// `(value, score)` pairs in sweep order
    pub scores: Vec<(f64, f64)>,
    /// Population variance of the scores
    pub variance: f64,
    pub range: f64,
}

impl Sensitivity {
    pub(crate) fn new(variable: Variable, scores: Vec<(f64, f64)>) -> Self {
        let (variance, range) = if scores.is_empty() {
            (0., 0.)
        } else {
            let n = scores.len() as f64;
            let mean = scores.iter().map(|&(_, score)| score).sum::<f64>() / n;
            let variance = scores.iter().map(|&(_, score)| (score - mean).powi(2)).sum::<f64>() / n;
            let (min, max) = scores
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(_, score)| {
                    (min.min(score), max.max(score))
                });

            (variance, max - min)
        };

        Self {
            variable,
            scores,
            variance,
            range,
        }
    }
}

#[test]
fn test_risk_levels() {
    assert_eq!(RiskLevel::from_score(0.), RiskLevel::Bajo);
    assert_eq!(RiskLevel::from_score(3.), RiskLevel::Bajo);
    assert_eq!(RiskLevel::from_score(3.01), RiskLevel::Medio);
    assert_eq!(RiskLevel::from_score(6.), RiskLevel::Medio);
    assert_eq!(RiskLevel::from_score(7.4), RiskLevel::Alto);
    assert_eq!(RiskLevel::Alto.recommended_action(), "evacuation recommended");
}

#[test]
fn test_sensitivity_statistics() {
    let sensitivity = Sensitivity::new(Variable::Gases, vec![(0., 2.), (1., 4.), (2., 6.)]);

    assert_eq!(sensitivity.range, 4.);
    approx::assert_relative_eq!(sensitivity.variance, 8. / 3.);
}
