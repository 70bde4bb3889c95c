use fixed_map::Map as FixedMap;

use crate::distribution::Distribution;
use crate::error::{InferenceError, InferenceResult};
use crate::evidence::Evidence;
use crate::graph::FuzzyCausalGraph;
use crate::risk::{RiskAssessment, RiskLevel, Sensitivity};
use crate::terms::State;
use crate::variable::Variable;

impl FuzzyCausalGraph {
    /// Linguistic state of a crisp reading.
    ///
    /// Unknown variable names and variables without a partition resolve to `medio`.
    pub fn fuzzify(&self, variable: &str, value: f64) -> State {
        variable
            .parse::<Variable>()
            .ok()
            .and_then(|variable| self.partitions.get(variable))
            .and_then(|partition| partition.fuzzify(value))
            .unwrap_or(State::Medio)
    }

    /// Fuzzy distribution of `target` given crisp evidence.
    pub fn infer(&self, evidence: &Evidence, target: &str) -> InferenceResult<Distribution> {
        let target = target
            .parse::<Variable>()
            .map_err(|_| InferenceError::UnknownTarget(target.to_owned()))?;

        self.infer_variable(evidence, target)
    }

    pub fn infer_variable(&self, evidence: &Evidence, target: Variable) -> InferenceResult<Distribution> {
        validate(evidence)?;

        let mut resolved = FixedMap::new();

        for (name, value) in evidence.iter() {
            let Ok(variable) = name.parse::<Variable>() else {
                continue;
            };

            if let Some(state) = self.partitions.get(variable).and_then(|p| p.fuzzify(value)) {
                tracing::debug!(%variable, value, %state, "fuzzified evidence");
                resolved.insert(variable, state);
            }
        }

        let mut propagated = FixedMap::new();

        // `Variable::ALL` is topologically ordered, so parents resolve before their children
        for variable in Variable::ALL.into_iter().filter(|v| !v.is_root()) {
            let Some(node) = self.nodes.get(variable) else {
                continue;
            };
            let Some(parents) = node
                .parents()
                .iter()
                .map(|&parent| resolved.get(parent).copied())
                .collect::<Option<Vec<State>>>()
            else {
                tracing::debug!(%variable, "insufficient evidence to propagate");
                continue;
            };

            let (distribution, resolution) = node.conditional(&parents, &self.config);

            if let Some(state) = distribution.best_state(&node.states) {
                resolved.insert(variable, state);
            }

            tracing::debug!(%variable, ?resolution, %distribution, "propagated");
            propagated.insert(variable, distribution);
        }

        if let Some(distribution) = propagated.get(target) {
            return Ok(distribution.clone());
        }

        Ok(self
            .nodes
            .get(target)
            .map(|node| node.prior.clone())
            .unwrap_or_default())
    }

    /// Infers `riesgo`, defuzzifies it with the configured method and classifies the score.
    pub fn assess(&self, evidence: &Evidence) -> InferenceResult<RiskAssessment> {
        let distribution = self.infer_variable(evidence, Variable::Riesgo)?;
        let score = distribution.defuzzify(self.config.defuzzification);

        Ok(RiskAssessment {
            level: RiskLevel::from_score(score),
            distribution,
            score,
        })
    }

    /// Risk score as a single variable sweeps over `values`, every other reading held at `base`.
    pub fn sensitivity(&self, base: &Evidence, variable: Variable, values: &[f64]) -> InferenceResult<Sensitivity> {
        let mut scores = Vec::with_capacity(values.len());

        for &value in values {
            let evidence = base.clone().with(variable, value);

            scores.push((value, self.assess(&evidence)?.score));
        }

        Ok(Sensitivity::new(variable, scores))
    }
}

pub(crate) fn validate(evidence: &Evidence) -> InferenceResult<()> {
    if evidence.is_empty() {
        return Err(InferenceError::EmptyEvidence);
    }

    match evidence.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(InferenceError::NonNumeric {
            variable: name.to_owned(),
            value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use crate::graph::construct_graph;
    use crate::ops::{Defuzzification, NEUTRAL_SCORE};

    use super::*;

    fn critical() -> Evidence {
        [
            ("sismicidad", 18.),
            ("gases", 4500.),
            ("deformacion", 40.),
            ("historia", 9.),
            ("densidad", 25000.),
            ("preparacion", 1.),
            ("proximidad", 3.),
            ("evacuacion", 2.),
        ]
        .into_iter()
        .collect()
    }

    fn calm() -> Evidence {
        [
            ("sismicidad", 2.),
            ("gases", 500.),
            ("deformacion", 1.),
            ("historia", 1.),
            ("densidad", 5000.),
            ("preparacion", 4.),
            ("proximidad", 15.),
            ("evacuacion", 8.),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_critical_scenario() {
        let graph = construct_graph();
        let evidence = critical();
        let expected = [
            ("sismicidad", State::Alta),
            ("gases", State::Elevada),
            ("deformacion", State::Significativa),
            ("historia", State::Alta),
            ("densidad", State::Alta),
            ("preparacion", State::MuyBajo),
            ("proximidad", State::Cercana),
            ("evacuacion", State::Inexistente),
        ];

        for (name, state) in expected {
            assert_eq!(graph.fuzzify(name, evidence.get(name).unwrap()), state, "{name}");
        }

        let riesgo = graph.infer(&evidence, "riesgo").unwrap();
        let centroid = |state| riesgo.get(state).unwrap().centroid();

        assert!(centroid(State::Alto) > centroid(State::Bajo));
        assert!(centroid(State::Alto) > centroid(State::Medio));
        assert!(riesgo.defuzzify(Defuzzification::Centroid) > 6.5);

        let assessment = graph.assess(&evidence).unwrap();

        assert_eq!(assessment.distribution, riesgo);
        assert_eq!(assessment.level, RiskLevel::Alto);
    }

    #[test]
    fn test_calm_scenario() {
        let graph = construct_graph();
        let assessment = graph.assess(&calm()).unwrap();

        assert!(assessment.score < 3.5, "{}", assessment.score);
        assert_eq!(assessment.level, RiskLevel::Bajo);
    }

    #[test]
    fn test_infer_is_deterministic() {
        let graph = Arc::new(construct_graph());
        let expected = graph.infer(&critical(), "riesgo").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&graph);

                thread::spawn(move || graph.infer(&critical(), "riesgo").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_infer_rejects_invalid_input() {
        let graph = construct_graph();

        assert_eq!(
            graph.infer(&Evidence::new(), "riesgo"),
            Err(InferenceError::EmptyEvidence)
        );
        assert_eq!(
            graph.infer(&critical(), "magma"),
            Err(InferenceError::UnknownTarget("magma".to_owned()))
        );

        let mut evidence = critical();
        evidence.add("gases", f64::NAN);

        match graph.infer(&evidence, "riesgo") {
            Err(InferenceError::NonNumeric { variable, value }) => {
                assert_eq!(variable, "gases");
                assert!(value.is_nan());
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_insufficient_evidence_returns_prior() {
        let graph = construct_graph();
        let evidence = Evidence::new().with(Variable::Sismicidad, 18.);

        assert_eq!(
            graph.infer(&evidence, "riesgo").unwrap(),
            graph.node(Variable::Riesgo).unwrap().prior().clone()
        );
        // Roots are never propagated
        assert_eq!(
            graph.infer(&evidence, "sismicidad").unwrap(),
            graph.node(Variable::Sismicidad).unwrap().prior().clone()
        );
    }

    #[test]
    fn test_intermediate_target() {
        let graph = construct_graph();
        let amenaza = graph.node(Variable::Amenaza).unwrap();
        let distribution = graph.infer(&critical(), "amenaza").unwrap();

        assert_eq!(distribution.best_state(amenaza.states()), Some(State::Alta));
        assert_ne!(&distribution, amenaza.prior());
    }

    #[test]
    fn test_unrelated_evidence_is_ignored() {
        let graph = construct_graph();
        let mut evidence = critical();

        evidence.add("temperatura", 900.);

        assert_eq!(
            graph.infer(&evidence, "riesgo").unwrap(),
            graph.infer(&critical(), "riesgo").unwrap()
        );
    }

    #[test]
    fn test_fuzzify_without_partition() {
        let graph = construct_graph();

        assert_eq!(graph.fuzzify("magma", 3.), State::Medio);
        assert_eq!(graph.fuzzify("riesgo", 9.), State::Medio);
        assert_eq!(graph.fuzzify("sismicidad", 2.), State::Baja);
    }

    #[test]
    fn test_empty_graph_yields_neutral_score() {
        let graph = FuzzyCausalGraph::builder().build().unwrap();
        let assessment = graph.assess(&critical()).unwrap();

        assert!(assessment.distribution.is_empty());
        assert_eq!(assessment.score, NEUTRAL_SCORE);
        assert_eq!(assessment.level, RiskLevel::Medio);
    }

    #[test]
    fn test_sensitivity() {
        let graph = construct_graph();
        let values = [0., 5., 10., 18.];
        let sensitivity = graph.sensitivity(&critical(), Variable::Sismicidad, &values).unwrap();

        assert_eq!(sensitivity.variable, Variable::Sismicidad);
        assert_eq!(sensitivity.scores.len(), values.len());

        for &(value, score) in &sensitivity.scores {
            let evidence = critical().with(Variable::Sismicidad, value);

            assert_eq!(score, graph.assess(&evidence).unwrap().score);
        }

        let flat = graph.sensitivity(&critical(), Variable::Gases, &[4500., 4500.]).unwrap();

        assert_eq!(flat.variance, 0.);
        assert_eq!(flat.range, 0.);
        assert!(graph.sensitivity(&Evidence::new(), Variable::Gases, &[]).unwrap().scores.is_empty());
    }
}
