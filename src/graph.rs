use fixed_map::Map as FixedMap;
use serde::Serialize;

use crate::config::InferenceConfig;
use crate::distribution::Distribution;
use crate::error::{GraphError, GraphResult};
use crate::node::CausalNode;
use crate::tables::{Row, NODES, PARTITIONS};
use crate::terms::State;
use crate::triangular::TriangularFuzzyNumber;
use crate::variable::{FuzzyVariable, LinguisticState, Variable};

/// The volcanic risk network: eleven nodes over a fixed three layer topology.
///
/// Built once through [`GraphBuilder`] and immutable afterwards, so it can be shared between
/// threads for concurrent inference.
#[derive(Clone, Debug)]
pub struct FuzzyCausalGraph {
    pub(crate) nodes: FixedMap<Variable, CausalNode>,
    pub(crate) partitions: FixedMap<Variable, FuzzyVariable>,
    pub(crate) config: InferenceConfig,
}

/// Aggregate view of a graph's structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkInfo {
    pub total_nodes: usize,
    pub root_nodes: Vec<Variable>,
    pub intermediate_nodes: Vec<Variable>,
    pub leaf_nodes: Vec<Variable>,
    pub total_cpd_rules: usize,
}

/// Builds the canonical volcanic risk network.
pub fn construct_graph() -> FuzzyCausalGraph {
    GraphBuilder::volcanic()
        .and_then(GraphBuilder::build)
        .expect("embedded volcanic tables to be valid")
}

impl FuzzyCausalGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn node(&self, variable: Variable) -> Option<&CausalNode> {
        self.nodes.get(variable)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CausalNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// The linguistic partition used to fuzzify readings of `variable`, if it has one.
    pub fn partition(&self, variable: Variable) -> Option<&FuzzyVariable> {
        self.partitions.get(variable)
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Human readable structural problems. Empty for a complete network.
    pub fn diagnose(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for node in self.nodes() {
            let name = node.variable;

            if node.states.is_empty() {
                issues.push(format!("node '{name}' has no states defined"));
            }

            if !name.is_root() && node.cpd.is_empty() {
                issues.push(format!("node '{name}' has parents but no CPD defined"));
            }

            if name.is_root() && node.prior.is_empty() {
                issues.push(format!("root node '{name}' has no prior distribution"));
            }
        }

        for variable in Variable::ALL {
            if self.partitions.get(variable).is_none() {
                issues.push(format!("variable '{variable}' has no fuzzy system defined"));
            }
        }

        issues
    }

    pub fn describe(&self) -> NetworkInfo {
        let mut info = NetworkInfo {
            total_nodes: self.nodes.len(),
            root_nodes: Vec::new(),
            intermediate_nodes: Vec::new(),
            leaf_nodes: Vec::new(),
            total_cpd_rules: 0,
        };

        for node in self.nodes() {
            let variable = node.variable;

            if variable.is_root() {
                info.root_nodes.push(variable);
            } else if variable.children().next().is_some() {
                info.intermediate_nodes.push(variable);
            } else {
                info.leaf_nodes.push(variable);
            }

            info.total_cpd_rules += node.cpd.len();
        }

        info
    }
}

/// One-time, single threaded construction phase of a [`FuzzyCausalGraph`].
///
/// Tables are collected as given and validated in [`GraphBuilder::build`].
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    nodes: FixedMap<Variable, CausalNode>,
    partitions: FixedMap<Variable, FuzzyVariable>,
    config: InferenceConfig,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Every node of the topology, with no states, priors, rules or partitions.
    pub fn new() -> Self {
        let mut nodes = FixedMap::new();

        for variable in Variable::ALL {
            nodes.insert(variable, CausalNode::new(variable));
        }

        Self {
            nodes,
            partitions: FixedMap::new(),
            config: InferenceConfig::default(),
        }
    }

    /// A builder preloaded with the canonical volcanic tables.
    pub fn volcanic() -> GraphResult<Self> {
        let mut builder = Self::new();

        for table in NODES {
            builder = builder
                .states(table.variable, table.states)
                .prior(table.variable, triples(table.prior)?);

            for &(parents, row) in table.rules {
                builder = builder.rule(table.variable, parents, triples(row)?);
            }
        }

        for table in PARTITIONS {
            let (min, max) = table.domain;
            let mut partition = FuzzyVariable::new(table.variable, min..=max, Some(table.step));

            for &(state, low, high) in table.states {
                partition.push(LinguisticState::new(state, low, high));
            }

            builder = builder.partition(partition);
        }

        Ok(builder)
    }

    pub fn states(self, variable: Variable, states: &[State]) -> Self {
        self.update(variable, |node| node.states = states.to_vec())
    }

    pub fn prior(self, variable: Variable, prior: Distribution) -> Self {
        self.update(variable, |node| node.prior = prior)
    }

    /// Adds a conditional rule keyed by parent states in [`Variable::parents`] order.
    pub fn rule(self, variable: Variable, parents: &[State], distribution: Distribution) -> Self {
        self.update(variable, |node| node.cpd.add(parents.to_vec(), distribution))
    }

    pub fn partition(mut self, partition: FuzzyVariable) -> Self {
        self.partitions.insert(partition.variable, partition);
        self
    }

    pub fn config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    // Every variable gets a node in `new`, so the lookup cannot miss.
    fn update(mut self, variable: Variable, f: impl FnOnce(&mut CausalNode)) -> Self {
        if let Some(node) = self.nodes.get_mut(variable) {
            f(node);
        }

        self
    }

    /// Validates the collected tables and freezes them into a graph.
    pub fn build(self) -> GraphResult<FuzzyCausalGraph> {
        for (_, node) in self.nodes.iter() {
            validate_distribution(node, &node.prior)?;

            for rule in node.cpd.iter() {
                let parents = node.parents();

                if rule.parents.len() != parents.len() {
                    return Err(GraphError::ArityMismatch {
                        node: node.variable,
                        expected: parents.len(),
                        found: rule.parents.len(),
                    });
                }

                for (&parent, &state) in parents.iter().zip(&rule.parents) {
                    let declared = self
                        .nodes
                        .get(parent)
                        .map_or(false, |parent_node| parent_node.states.contains(&state));

                    if !declared {
                        return Err(GraphError::InvalidParentState {
                            node: node.variable,
                            parent,
                            state,
                        });
                    }
                }

                validate_distribution(node, &rule.distribution)?;
            }
        }

        for (variable, partition) in self.partitions.iter() {
            partition.validate()?;

            let declared = self
                .nodes
                .get(variable)
                .map_or(&[][..], |node| node.states.as_slice());

            if let Some(stray) = partition.states.iter().find(|s| !declared.contains(&s.state)) {
                return Err(GraphError::InvalidState {
                    node: variable,
                    state: stray.state,
                });
            }
        }

        tracing::debug!(
            rules = self.nodes.iter().map(|(_, node)| node.cpd.len()).sum::<usize>(),
            partitions = self.partitions.len(),
            "built fuzzy causal graph"
        );

        Ok(FuzzyCausalGraph {
            nodes: self.nodes,
            partitions: self.partitions,
            config: self.config,
        })
    }
}

fn validate_distribution(node: &CausalNode, distribution: &Distribution) -> GraphResult<()> {
    for (state, value) in distribution.iter() {
        if !node.states.contains(&state) {
            return Err(GraphError::InvalidState {
                node: node.variable,
                state,
            });
        }

        if value.a() < 0. || value.b() > 1. {
            return Err(GraphError::OutOfUnitInterval {
                node: node.variable,
                state,
            });
        }
    }

    Ok(())
}

fn triples(row: Row) -> GraphResult<Distribution> {
    row.iter()
        .map(|&(state, (a, m, b))| Ok((state, TriangularFuzzyNumber::new(a, m, b)?)))
        .collect()
}
