use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use fixed_map::Key;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::linspace::Linspace;
use crate::terms::State;

/// The nodes of the volcanic risk network.
///
/// The topology is fixed: see [`Variable::parents`].
#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Seismic events per day, `[0, 20]`
    Sismicidad,
    /// SO₂ emission in ppm, `[0, 5000]`
    Gases,
    /// Ground deformation in mm, `[0, 50]`
    Deformacion,
    /// Historical activity index, `[0, 10]`
    Historia,
    /// People per km², `[0, 30000]`
    Densidad,
    /// Community preparedness, `[0, 5]`
    Preparacion,
    /// Distance to the crater in km, `[0, 20]`
    Proximidad,
    /// Evacuation plan coverage, `[0, 10]`
    Evacuacion,
    Amenaza,
    Vulnerabilidad,
    Riesgo,
}

impl Variable {
    /// All variables in topological order.
    pub const ALL: [Variable; 11] = [
        Variable::Sismicidad,
        Variable::Gases,
        Variable::Deformacion,
        Variable::Historia,
        Variable::Densidad,
        Variable::Preparacion,
        Variable::Proximidad,
        Variable::Evacuacion,
        Variable::Amenaza,
        Variable::Vulnerabilidad,
        Variable::Riesgo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::Sismicidad => "sismicidad",
            Variable::Gases => "gases",
            Variable::Deformacion => "deformacion",
            Variable::Historia => "historia",
            Variable::Densidad => "densidad",
            Variable::Preparacion => "preparacion",
            Variable::Proximidad => "proximidad",
            Variable::Evacuacion => "evacuacion",
            Variable::Amenaza => "amenaza",
            Variable::Vulnerabilidad => "vulnerabilidad",
            Variable::Riesgo => "riesgo",
        }
    }

    /// Parent variables, in the order used to key conditional tables.
    pub fn parents(self) -> &'static [Variable] {
        match self {
            Variable::Amenaza => &[
                Variable::Sismicidad,
                Variable::Gases,
                Variable::Deformacion,
                Variable::Historia,
            ],
            Variable::Vulnerabilidad => &[
                Variable::Densidad,
                Variable::Preparacion,
                Variable::Proximidad,
                Variable::Evacuacion,
            ],
            Variable::Riesgo => &[Variable::Amenaza, Variable::Vulnerabilidad],
            _ => &[],
        }
    }

    pub fn is_root(self) -> bool {
        self.parents().is_empty()
    }

    /// Variables that list `self` as a parent.
    pub fn children(self) -> impl Iterator<Item = Variable> {
        Variable::ALL
            .into_iter()
            .filter(move |child| child.parents().contains(&self))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .iter()
            .copied()
            .find(|variable| variable.name() == s)
            .ok_or_else(|| GraphError::UnknownVariable(s.to_owned()))
    }
}

/// A named linguistic state with a triangular membership function over `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinguisticState {
    pub(crate) state: State,
    pub(crate) low: f64,
    pub(crate) high: f64,
    pub(crate) peak: f64,
}

impl LinguisticState {
    /// The peak sits at the midpoint of the interval.
    pub fn new(state: State, low: f64, high: f64) -> Self {
        Self::with_peak(state, low, high, (low + high) / 2.)
    }

    pub fn with_peak(state: State, low: f64, high: f64, peak: f64) -> Self {
        Self { state, low, high, peak }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.low..=self.high
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Membership degree of a crisp value, in `[0, 1]`.
    pub fn membership(&self, value: f64) -> f64 {
        if value < self.low || value > self.high {
            return 0.;
        }

        let membership = if value <= self.peak {
            if self.peak != self.low {
                (value - self.low) / (self.peak - self.low)
            } else {
                1.
            }
        } else if self.high != self.peak {
            (self.high - value) / (self.high - self.peak)
        } else {
            1.
        };

        membership.clamp(0., 1.)
    }

    fn validate(&self, variable: Variable) -> GraphResult<()> {
        let invalid = |reason| GraphError::InvalidPartition {
            variable,
            state: self.state,
            reason,
        };

        if !(self.low.is_finite() && self.high.is_finite() && self.peak.is_finite()) {
            return Err(invalid("bounds must be finite"));
        }

        if self.low >= self.high {
            return Err(invalid("low bound must be below the high bound"));
        }

        if self.peak < self.low || self.peak > self.high {
            return Err(invalid("peak must lie inside the interval"));
        }

        Ok(())
    }
}

/// Linguistic partition of a variable's numeric domain.
///
/// States are kept in declaration order, which breaks ties during fuzzification. They may overlap
/// and need not cover the domain contiguously.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyVariable {
    pub(crate) variable: Variable,
    pub(crate) states: Vec<LinguisticState>,
    pub(crate) min_u: f64,
    pub(crate) max_u: f64,
    pub(crate) step: f64,
}

impl FuzzyVariable {
    /// If the step value is not provided, it defaults to 0.1
    pub fn new(variable: Variable, universe_range: RangeInclusive<f64>, step: Option<f64>) -> Self {
        Self {
            variable,
            states: Vec::new(),
            min_u: *universe_range.start(),
            max_u: *universe_range.end(),
            step: step.unwrap_or(0.1),
        }
    }

    pub fn state(mut self, state: State, low: f64, high: f64) -> Self {
        self.states.push(LinguisticState::new(state, low, high));
        self
    }

    pub fn push(&mut self, state: LinguisticState) {
        self.states.push(state);
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn states(&self) -> &[LinguisticState] {
        &self.states
    }

    pub fn domain(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    /// Sample points of the domain. Only used to document and display the range.
    pub fn universe(&self) -> Linspace {
        Linspace::with_step(self.min_u, self.max_u, self.step)
    }

    /// Membership of `value` in `state`, including the domain edge rule.
    ///
    /// A value sitting exactly on the domain minimum or maximum belongs fully to the state whose
    /// interval ends there.
    pub fn membership(&self, state: &LinguisticState, value: f64) -> f64 {
        let on_max_edge = value == state.high && state.high == self.max_u;
        let on_min_edge = value == state.low && state.low == self.min_u;

        if on_max_edge || on_min_edge {
            1.
        } else {
            state.membership(value)
        }
    }

    /// Best matching linguistic state for a crisp reading.
    ///
    /// Highest membership wins, ties go to the first declared state. Returns `None` only when the
    /// partition declares no states.
    pub fn fuzzify(&self, value: f64) -> Option<State> {
        let mut best: Option<(State, f64)> = None;

        for linguistic in &self.states {
            let membership = self.membership(linguistic, value);

            tracing::trace!(
                variable = %self.variable,
                state = %linguistic.state,
                membership,
                "evaluated membership"
            );

            if best.map_or(true, |(_, max)| membership > max) {
                best = Some((linguistic.state, membership));
            }
        }

        best.map(|(state, _)| state)
    }

    pub(crate) fn validate(&self) -> GraphResult<()> {
        self.states
            .iter()
            .try_for_each(|state| state.validate(self.variable))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sismicidad() -> FuzzyVariable {
        FuzzyVariable::new(Variable::Sismicidad, 0. ..=20., Some(1.))
            .state(State::Baja, 0., 4.)
            .state(State::Media, 3., 10.)
            .state(State::Alta, 8., 20.)
    }

    #[test]
    fn test_variable_names() {
        for variable in Variable::ALL {
            assert_eq!(variable.name().parse::<Variable>(), Ok(variable));
        }

        assert!("magma".parse::<Variable>().is_err());
    }

    #[test]
    fn test_topology() {
        let roots: Vec<_> = Variable::ALL.into_iter().filter(|v| v.is_root()).collect();

        assert_eq!(roots.len(), 8);
        assert_eq!(
            Variable::Sismicidad.children().collect::<Vec<_>>(),
            vec![Variable::Amenaza]
        );
        assert_eq!(
            Variable::Vulnerabilidad.children().collect::<Vec<_>>(),
            vec![Variable::Riesgo]
        );
        assert_eq!(Variable::Riesgo.children().count(), 0);
    }

    #[test]
    fn test_linguistic_membership() {
        let media = LinguisticState::new(State::Media, 3., 10.);

        assert_eq!(media.peak(), 6.5);
        assert_eq!(media.membership(6.5), 1.);
        assert_eq!(media.membership(3.), 0.);
        assert_eq!(media.membership(11.), 0.);
        assert_relative_eq!(media.membership(8.), 2. / 3.5, epsilon = 1e-12);

        let shoulder = LinguisticState::with_peak(State::Baja, 0., 4., 0.);

        assert_eq!(shoulder.membership(0.), 1.);
        assert_relative_eq!(shoulder.membership(1.), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_fuzzify() {
        let variable = sismicidad();

        assert_eq!(variable.fuzzify(2.), Some(State::Baja));
        assert_eq!(variable.fuzzify(7.), Some(State::Media));
        assert_eq!(variable.fuzzify(18.), Some(State::Alta));
    }

    #[test]
    fn test_fuzzify_domain_edges() {
        let variable = sismicidad();

        // Both edges have zero triangular membership but belong to the edge states.
        assert_eq!(variable.fuzzify(0.), Some(State::Baja));
        assert_eq!(variable.fuzzify(20.), Some(State::Alta));
    }

    #[test]
    fn test_fuzzify_is_total_over_domain() {
        let variable = sismicidad();
        let declared = [State::Baja, State::Media, State::Alta];

        for value in variable.universe() {
            let state = variable.fuzzify(value).unwrap();

            assert!(declared.contains(&state));
        }
    }

    #[test]
    fn test_fuzzify_ties_prefer_first_declared() {
        let variable = FuzzyVariable::new(Variable::Gases, 0. ..=10., None)
            .state(State::Normal, 0., 10.)
            .state(State::Elevada, 0., 10.);

        assert_eq!(variable.fuzzify(3.), Some(State::Normal));
        // Outside every interval all memberships are zero; the first state still wins.
        assert_eq!(variable.fuzzify(42.), Some(State::Normal));
    }

    #[test]
    fn test_universe() {
        let variable = sismicidad();
        let universe: Vec<_> = variable.universe().collect();

        assert_eq!(universe.len(), 21);
        assert_eq!(universe.first(), Some(&0.));
        assert_eq!(universe.last(), Some(&20.));
    }

    #[test]
    fn test_validate_partition() {
        let inverted = FuzzyVariable::new(Variable::Historia, 0. ..=10., Some(1.)).state(State::Alta, 10., 6.);

        assert!(matches!(
            inverted.validate(),
            Err(GraphError::InvalidPartition {
                variable: Variable::Historia,
                state: State::Alta,
                ..
            })
        ));
        assert!(sismicidad().validate().is_ok());
    }
}
