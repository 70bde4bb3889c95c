use std::fmt;

use fixed_map::Map as FixedMap;

use crate::error::FuzzyNumberResult;
use crate::ops::Defuzzification;
use crate::terms::State;
use crate::triangular::TriangularFuzzyNumber;

/// A fuzzy distribution over linguistic states: each state carries a fuzzy degree of support.
///
/// These are heuristic fuzzy weights, not a calibrated probability distribution; nothing forces
/// them to sum to one.
#[derive(Clone)]
pub struct Distribution(pub(crate) FixedMap<State, TriangularFuzzyNumber>);

impl Distribution {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, state: State, value: TriangularFuzzyNumber) -> Option<TriangularFuzzyNumber> {
        self.0.insert(state, value)
    }

    pub fn get(&self, state: State) -> Option<&TriangularFuzzyNumber> {
        self.0.get(state)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (State, &TriangularFuzzyNumber)> + '_ {
        self.0.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.iter().map(|(state, _)| state)
    }

    /// The state with the greatest centroid among `order`, ties going to the earliest in `order`.
    ///
    /// States of `order` missing from the distribution are skipped.
    pub fn best_state(&self, order: &[State]) -> Option<State> {
        let mut best: Option<(State, f64)> = None;

        for &state in order {
            let Some(value) = self.get(state) else {
                continue;
            };
            let centroid = value.centroid();

            if best.map_or(true, |(_, max)| centroid > max) {
                best = Some((state, centroid));
            }
        }

        best.map(|(state, _)| state)
    }

    /// Every number's support widened by `spread`, clamped to `[0, 1]`.
    pub fn widened(&self, spread: f64) -> Self {
        self.iter().map(|(state, value)| (state, value.widen(spread))).collect()
    }

    /// Rescales each number by its share of the summed centroids.
    ///
    /// Returned unchanged when the centroids sum to zero. Fails when a share is not finite.
    pub fn normalized(&self) -> FuzzyNumberResult<Self> {
        let total: f64 = self.iter().map(|(_, value)| value.centroid()).sum();

        if total == 0. {
            return Ok(self.clone());
        }

        self.iter()
            .map(|(state, value)| value.scale(value.centroid() / total).map(|scaled| (state, scaled)))
            .collect()
    }

    /// Shorthand for [`Defuzzification::call`].
    pub fn defuzzify(&self, method: Defuzzification) -> f64 {
        method.call(self)
    }
}

impl FromIterator<(State, TriangularFuzzyNumber)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (State, TriangularFuzzyNumber)>>(iter: I) -> Self {
        let mut distribution = Distribution::new();

        for (state, value) in iter {
            distribution.insert(state, value);
        }

        distribution
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, (state, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{state}: {value}")?;
        }

        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tfn(a: f64, m: f64, b: f64) -> TriangularFuzzyNumber {
        TriangularFuzzyNumber::new(a, m, b).unwrap()
    }

    fn riesgo() -> Distribution {
        [
            (State::Bajo, tfn(0.05, 0.1, 0.15)),
            (State::Medio, tfn(0.35, 0.45, 0.55)),
            (State::Alto, tfn(0.4, 0.5, 0.6)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_best_state() {
        let distribution = riesgo();

        assert_eq!(
            distribution.best_state(&[State::Bajo, State::Medio, State::Alto]),
            Some(State::Alto)
        );
        assert_eq!(distribution.best_state(&[State::Bajo, State::Medio]), Some(State::Medio));
        assert_eq!(distribution.best_state(&[]), None);
    }

    #[test]
    fn test_best_state_ties_follow_declared_order() {
        let distribution: Distribution = [
            (State::Baja, tfn(0.3, 0.4, 0.5)),
            (State::Media, tfn(0.3, 0.4, 0.5)),
            (State::Alta, tfn(0.2, 0.3, 0.4)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            distribution.best_state(&[State::Media, State::Baja, State::Alta]),
            Some(State::Media)
        );
        assert_eq!(
            distribution.best_state(&[State::Baja, State::Media, State::Alta]),
            Some(State::Baja)
        );
    }

    #[test]
    fn test_normalized() {
        let normalized = riesgo().normalized().unwrap();
        let total = 0.1 + 0.45 + 0.5;
        let alto = normalized.get(State::Alto).unwrap();

        assert_relative_eq!(alto.m(), 0.5 * 0.5 / total, epsilon = 1e-12);
        assert_eq!(normalized.len(), 3);
        assert!(Distribution::new().normalized().unwrap().is_empty());
    }

    #[test]
    fn test_iteration_and_display() {
        let distribution = riesgo();
        let states: Vec<_> = distribution.states().collect();

        assert_eq!(states, vec![State::Bajo, State::Medio, State::Alto]);
        assert_eq!(
            distribution.to_string(),
            "{bajo: (0.050, 0.100, 0.150), medio: (0.350, 0.450, 0.550), alto: (0.400, 0.500, 0.600)}"
        );
    }
}
