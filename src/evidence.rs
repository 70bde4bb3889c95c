use std::collections::BTreeMap;

use crate::variable::Variable;

/// Crisp readings keyed by variable name.
///
/// Names that are not variables of the network, or variables without a linguistic partition, are
/// accepted and ignored by inference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evidence(pub(crate) BTreeMap<String, f64>);

impl Evidence {
    pub fn new() -> Self {
        Evidence(BTreeMap::new())
    }

    /// Records a reading, replacing any previous value for `name`.
    pub fn add(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn with(mut self, variable: Variable, value: f64) -> Self {
        self.add(variable.name(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut evidence = Evidence::new();

        for (name, value) in iter {
            evidence.add(name, value);
        }

        evidence
    }
}
