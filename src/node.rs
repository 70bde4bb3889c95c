use crate::config::InferenceConfig;
use crate::distribution::Distribution;
use crate::rules::Cpd;
use crate::terms::State;
use crate::triangular::TriangularFuzzyNumber;
use crate::variable::Variable;

/// A variable of the causal graph together with its fuzzy tables.
#[derive(Clone, Debug, PartialEq)]
pub struct CausalNode {
    pub(crate) variable: Variable,
    pub(crate) states: Vec<State>,
    pub(crate) prior: Distribution,
    pub(crate) cpd: Cpd,
}

/// How a node's conditional distribution was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Exact,
    /// Borrowed from the most similar rule, sharing this many parent states
    Interpolated(usize),
    Uniform,
}

impl CausalNode {
    pub(crate) fn new(variable: Variable) -> Self {
        Self {
            variable,
            states: Vec::new(),
            prior: Distribution::new(),
            cpd: Cpd::new(),
        }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn parents(&self) -> &'static [Variable] {
        self.variable.parents()
    }

    /// The a priori distribution; empty when none was declared.
    pub fn prior(&self) -> &Distribution {
        &self.prior
    }

    pub fn cpd(&self) -> &Cpd {
        &self.cpd
    }

    /// Output distribution for a parent-state combination.
    ///
    /// An exact rule is used as is. Otherwise the most similar rule is borrowed with its supports
    /// widened, and when no rule shares any parent state a uniform distribution is returned.
    pub fn conditional(&self, parents: &[State], config: &InferenceConfig) -> (Distribution, Resolution) {
        if let Some(distribution) = self.cpd.get(parents) {
            return (distribution.clone(), Resolution::Exact);
        }

        self.interpolate(parents, config)
    }

    pub fn interpolate(&self, parents: &[State], config: &InferenceConfig) -> (Distribution, Resolution) {
        match self.cpd.most_similar(parents) {
            Some((rule, similarity)) => (
                rule.distribution.widened(config.interpolation_spread),
                Resolution::Interpolated(similarity),
            ),
            None => (self.uniform(config.fallback_spread), Resolution::Uniform),
        }
    }

    /// Every state gets the same wide number centered on `1 / n`.
    pub fn uniform(&self, spread: f64) -> Distribution {
        if self.states.is_empty() {
            return Distribution::new();
        }

        let share = 1. / self.states.len() as f64;

        TriangularFuzzyNumber::point(share)
            .map(|center| {
                let value = center.widen(spread);

                self.states.iter().map(|&state| (state, value)).collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tfn(a: f64, m: f64, b: f64) -> TriangularFuzzyNumber {
        TriangularFuzzyNumber::new(a, m, b).unwrap()
    }

    fn riesgo() -> CausalNode {
        let mut node = CausalNode::new(Variable::Riesgo);

        node.states = vec![State::Bajo, State::Medio, State::Alto];
        node.cpd.add(
            vec![State::Alta, State::Alta],
            [
                (State::Bajo, tfn(0., 0.02, 0.05)),
                (State::Medio, tfn(0.1, 0.15, 0.2)),
                (State::Alto, tfn(0.75, 0.85, 0.95)),
            ]
            .into_iter()
            .collect(),
        );
        node.cpd.add(
            vec![State::Baja, State::Baja],
            [
                (State::Bajo, tfn(0.75, 0.85, 0.92)),
                (State::Medio, tfn(0.05, 0.1, 0.15)),
                (State::Alto, tfn(0., 0.03, 0.06)),
            ]
            .into_iter()
            .collect(),
        );
        node
    }

    #[test]
    fn test_exact_match() {
        let node = riesgo();
        let (distribution, resolution) = node.conditional(&[State::Alta, State::Alta], &InferenceConfig::default());

        assert_eq!(resolution, Resolution::Exact);
        assert_eq!(distribution.get(State::Alto), Some(&tfn(0.75, 0.85, 0.95)));
    }

    #[test]
    fn test_interpolation_prefers_shared_state_and_widens() {
        let node = riesgo();
        // Shares `baja` with the second rule and nothing with the first.
        let (distribution, resolution) = node.conditional(&[State::Media, State::Baja], &InferenceConfig::default());

        assert_eq!(resolution, Resolution::Interpolated(1));

        let bajo = distribution.get(State::Bajo).unwrap();
        let medio = distribution.get(State::Medio).unwrap();
        let alto = distribution.get(State::Alto).unwrap();

        assert_relative_eq!(bajo.a(), 0.70, epsilon = 1e-12);
        assert_eq!(bajo.m(), 0.85);
        assert_relative_eq!(bajo.b(), 0.97, epsilon = 1e-12);
        assert_eq!(medio.m(), 0.1);
        assert_relative_eq!(medio.a(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(medio.b(), 0.2, epsilon = 1e-12);
        // Clamped at zero.
        assert_eq!(alto.a(), 0.);
        assert_eq!(alto.m(), 0.03);
    }

    #[test]
    fn test_interpolation_spread_is_configurable() {
        let node = riesgo();
        let config = InferenceConfig {
            interpolation_spread: 0.1,
            ..InferenceConfig::default()
        };
        let (distribution, _) = node.interpolate(&[State::Alta, State::Media], &config);
        let alto = distribution.get(State::Alto).unwrap();

        assert_relative_eq!(alto.a(), 0.65, epsilon = 1e-12);
        assert_eq!(alto.b(), 1.);
    }

    #[test]
    fn test_uniform_fallback() {
        let node = riesgo();
        let (distribution, resolution) = node.conditional(&[State::Media, State::Media], &InferenceConfig::default());

        assert_eq!(resolution, Resolution::Uniform);
        assert_eq!(distribution.len(), 3);

        for (_, value) in distribution.iter() {
            assert_relative_eq!(value.m(), 1. / 3., epsilon = 1e-12);
            assert_relative_eq!(value.a(), 1. / 3. - 0.1, epsilon = 1e-12);
            assert_relative_eq!(value.b(), 1. / 3. + 0.1, epsilon = 1e-12);
        }

        let mut empty = CausalNode::new(Variable::Amenaza);
        empty.states = vec![State::Baja, State::Media, State::Alta];

        let (fallback, resolution) = empty.conditional(&[State::Baja; 4], &InferenceConfig::default());

        assert_eq!(resolution, Resolution::Uniform);
        assert_eq!(fallback.best_state(&empty.states), Some(State::Baja));
    }
}
