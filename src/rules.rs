use crate::distribution::Distribution;
use crate::terms::State;

/// Conditional distribution table of a node: parent-state combination → output distribution.
///
/// Coverage of the parent cross-product is expected to be sparse. Rules keep their insertion
/// order, which decides ties when searching for the most similar rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cpd(pub(crate) Vec<CpdRule>);

impl Cpd {
    pub fn new() -> Self {
        Cpd(Vec::new())
    }

    /// Adds a rule. A rule with the same parent states is replaced in place.
    pub fn add(&mut self, parents: Vec<State>, distribution: Distribution) {
        match self.0.iter_mut().find(|rule| rule.parents == parents) {
            Some(rule) => rule.distribution = distribution,
            None => self.0.push(CpdRule { parents, distribution }),
        }
    }

    pub fn get(&self, parents: &[State]) -> Option<&Distribution> {
        self.0
            .iter()
            .find(|rule| rule.parents == parents)
            .map(|rule| &rule.distribution)
    }

    /// The first rule sharing the most positions with `parents`, with its similarity.
    ///
    /// Rules sharing no position are never returned.
    pub fn most_similar(&self, parents: &[State]) -> Option<(&CpdRule, usize)> {
        let mut best: Option<(&CpdRule, usize)> = None;

        for rule in &self.0 {
            let similarity = rule.similarity(parents);

            tracing::trace!(rule = ?rule.parents, similarity, "scored rule");

            if similarity > best.map_or(0, |(_, max)| max) {
                best = Some((rule, similarity));
            }
        }

        best
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CpdRule> {
        self.0.iter()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CpdRule {
    pub(crate) parents: Vec<State>,
    pub(crate) distribution: Distribution,
}

impl CpdRule {
    pub fn parents(&self) -> &[State] {
        &self.parents
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Number of positions where `parents` carries the same state as this rule.
    pub fn similarity(&self, parents: &[State]) -> usize {
        self.parents
            .iter()
            .zip(parents)
            .filter(|(stored, candidate)| stored == candidate)
            .count()
    }
}
