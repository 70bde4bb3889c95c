//! Mamdani evaluation of `amenaza`, `vulnerabilidad` and `riesgo`.
//!
//! Each system fuzzifies its crisp inputs against triangular partitions, fires every rule with the
//! configured AND operator, shapes the consequents with the implication operator, aggregates them
//! over the output universe and defuzzifies the result. The pipeline chains the two intermediate
//! systems into the `riesgo` system.

use crate::config::MamdaniConfig;
use crate::error::{GraphError, GraphResult, InferenceError, InferenceResult};
use crate::evidence::Evidence;
use crate::inference::validate;
use crate::ops::{AndOp, ImplicationOp};
use crate::risk::{MamdaniAssessment, RiskLevel};
use crate::tables::{MamdaniTable, TrimfTable, MAMDANI_AMENAZA, MAMDANI_RIESGO, MAMDANI_VULNERABILIDAD};
use crate::terms::State;
use crate::variable::{FuzzyVariable, LinguisticState};

/// `IF input_1 is premise[0] AND ... THEN output is consequence`
#[derive(Clone, Debug, PartialEq)]
pub struct MamdaniRule {
    pub(crate) premise: Vec<State>,
    pub(crate) consequence: State,
}

impl MamdaniRule {
    /// Premise states in the order the system declares its inputs.
    pub fn premise(&self) -> &[State] {
        &self.premise
    }

    pub fn consequence(&self) -> State {
        self.consequence
    }
}

/// A single Mamdani rule base with its input and output partitions.
#[derive(Clone, Debug, PartialEq)]
pub struct MamdaniSystem {
    inputs: Vec<FuzzyVariable>,
    output: FuzzyVariable,
    rules: Vec<MamdaniRule>,
}

impl MamdaniSystem {
    pub fn new(output: FuzzyVariable) -> Self {
        Self {
            inputs: Vec::new(),
            output,
            rules: Vec::new(),
        }
    }

    pub fn input(mut self, partition: FuzzyVariable) -> Self {
        self.inputs.push(partition);
        self
    }

    pub fn rule(mut self, premise: &[State], consequence: State) -> Self {
        self.rules.push(MamdaniRule {
            premise: premise.to_vec(),
            consequence,
        });
        self
    }

    pub fn inputs(&self) -> &[FuzzyVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &FuzzyVariable {
        &self.output
    }

    pub fn rules(&self) -> &[MamdaniRule] {
        &self.rules
    }

    /// Checks every partition and that each rule names declared states of its inputs and output.
    pub fn validate(&self) -> GraphResult<()> {
        let node = self.output.variable;

        self.output.validate()?;

        for input in &self.inputs {
            input.validate()?;
        }

        for rule in &self.rules {
            if rule.premise.len() != self.inputs.len() {
                return Err(GraphError::ArityMismatch {
                    node,
                    expected: self.inputs.len(),
                    found: rule.premise.len(),
                });
            }

            for (input, &state) in self.inputs.iter().zip(&rule.premise) {
                if linguistic(input, state).is_none() {
                    return Err(GraphError::InvalidParentState {
                        node,
                        parent: input.variable,
                        state,
                    });
                }
            }

            if linguistic(&self.output, rule.consequence).is_none() {
                return Err(GraphError::InvalidState {
                    node,
                    state: rule.consequence,
                });
            }
        }

        Ok(())
    }

    /// Firing strength of each rule, in declaration order.
    ///
    /// Readings outside an input's domain are clamped to it.
    pub fn firing_strengths(&self, evidence: &Evidence, and_op: AndOp) -> InferenceResult<Vec<f64>> {
        validate(evidence)?;

        let readings = self
            .inputs
            .iter()
            .map(|input| {
                evidence
                    .get(input.variable.name())
                    .map(|value| value.max(input.min_u).min(input.max_u))
                    .ok_or(InferenceError::MissingReading(input.variable))
            })
            .collect::<InferenceResult<Vec<f64>>>()?;

        let strengths = self
            .rules
            .iter()
            .map(|rule| {
                self.inputs
                    .iter()
                    .zip(&readings)
                    .zip(&rule.premise)
                    .fold(1., |strength, ((input, &value), &state)| {
                        let membership = linguistic(input, state).map_or(0., |l| l.membership(value));

                        and_op.call(strength, membership)
                    })
            })
            .collect::<Vec<f64>>();

        tracing::trace!(output = %self.output.variable, ?strengths, "fired rules");

        Ok(strengths)
    }

    /// Aggregated output membership function as `(universe, membership)`.
    ///
    /// The universe holds the output's sample points plus the points where clipped consequents
    /// bend, so the piecewise linear shape is exact.
    pub fn aggregate(&self, evidence: &Evidence, config: &MamdaniConfig) -> InferenceResult<(Vec<f64>, Vec<f64>)> {
        let strengths = self.firing_strengths(evidence, config.and_op)?;
        let consequents = self
            .rules
            .iter()
            .zip(&strengths)
            .filter_map(|(rule, &strength)| linguistic(&self.output, rule.consequence).map(|l| (l, strength)))
            .collect::<Vec<(&LinguisticState, f64)>>();

        let mut universe = self.output.universe().collect::<Vec<f64>>();

        if config.implication == ImplicationOp::Min {
            for &(l, strength) in &consequents {
                if strength <= 0. || strength >= 1. {
                    continue;
                }

                if l.peak > l.low {
                    universe.push(l.low + strength * (l.peak - l.low));
                }

                if l.high > l.peak {
                    universe.push(l.high - strength * (l.high - l.peak));
                }
            }
        }

        universe.retain(|x| (self.output.min_u..=self.output.max_u).contains(x));
        universe.sort_by(f64::total_cmp);
        universe.dedup();

        let membership = universe
            .iter()
            .map(|&x| {
                consequents.iter().fold(0., |acc, &(l, strength)| {
                    config
                        .aggregation
                        .call(acc, config.implication.call(strength, l.membership(x)))
                })
            })
            .collect();

        Ok((universe, membership))
    }

    /// Crisp output of the system.
    pub fn evaluate(&self, evidence: &Evidence, config: &MamdaniConfig) -> InferenceResult<f64> {
        let (universe, membership) = self.aggregate(evidence, config)?;
        let crisp = config
            .defuzzification
            .call(&universe, &membership)
            .ok_or(InferenceError::NoRuleFired(self.output.variable))?;

        tracing::debug!(output = %self.output.variable, crisp, "evaluated mamdani system");

        Ok(crisp)
    }

    fn from_table(table: &MamdaniTable) -> Self {
        let system = table
            .inputs
            .iter()
            .fold(Self::new(trimf_partition(&table.output)), |system, input| {
                system.input(trimf_partition(input))
            });

        table
            .rules
            .iter()
            .fold(system, |system, &(premise, consequence)| system.rule(premise, consequence))
    }
}

/// `amenaza` and `vulnerabilidad` systems feeding the `riesgo` system.
#[derive(Clone, Debug, PartialEq)]
pub struct MamdaniPipeline {
    amenaza: MamdaniSystem,
    vulnerabilidad: MamdaniSystem,
    riesgo: MamdaniSystem,
    config: MamdaniConfig,
}

/// Builds the canonical volcanic Mamdani pipeline.
pub fn construct_mamdani() -> MamdaniPipeline {
    MamdaniPipeline::volcanic().expect("embedded mamdani tables to be valid")
}

impl MamdaniPipeline {
    /// The `riesgo` system reads the crisp outputs of the other two by variable name.
    pub fn new(amenaza: MamdaniSystem, vulnerabilidad: MamdaniSystem, riesgo: MamdaniSystem) -> GraphResult<Self> {
        amenaza.validate()?;
        vulnerabilidad.validate()?;
        riesgo.validate()?;

        Ok(Self {
            amenaza,
            vulnerabilidad,
            riesgo,
            config: MamdaniConfig::default(),
        })
    }

    pub fn volcanic() -> GraphResult<Self> {
        Self::new(
            MamdaniSystem::from_table(&MAMDANI_AMENAZA),
            MamdaniSystem::from_table(&MAMDANI_VULNERABILIDAD),
            MamdaniSystem::from_table(&MAMDANI_RIESGO),
        )
    }

    pub fn with_config(mut self, config: MamdaniConfig) -> Self {
        self.config = config;
        self
    }

    pub fn amenaza(&self) -> &MamdaniSystem {
        &self.amenaza
    }

    pub fn vulnerabilidad(&self) -> &MamdaniSystem {
        &self.vulnerabilidad
    }

    pub fn riesgo(&self) -> &MamdaniSystem {
        &self.riesgo
    }

    pub fn config(&self) -> &MamdaniConfig {
        &self.config
    }

    pub fn evaluate(&self, evidence: &Evidence) -> InferenceResult<MamdaniAssessment> {
        let amenaza = self.amenaza.evaluate(evidence, &self.config)?;
        let vulnerabilidad = self.vulnerabilidad.evaluate(evidence, &self.config)?;
        let scores = Evidence::new()
            .with(self.amenaza.output.variable, amenaza)
            .with(self.vulnerabilidad.output.variable, vulnerabilidad);
        let riesgo = self.riesgo.evaluate(&scores, &self.config)?;

        Ok(MamdaniAssessment {
            amenaza,
            vulnerabilidad,
            riesgo,
            level: RiskLevel::from_score(riesgo),
        })
    }
}

fn linguistic(partition: &FuzzyVariable, state: State) -> Option<&LinguisticState> {
    partition.states.iter().find(|l| l.state == state)
}

fn trimf_partition(table: &TrimfTable) -> FuzzyVariable {
    let (min, max) = table.domain;
    let mut partition = FuzzyVariable::new(table.variable, min..=max, Some(table.step));

    for &(state, (low, peak, high)) in table.states {
        partition.push(LinguisticState::with_peak(state, low, high, peak));
    }

    partition
}
