//! Error types for fuzzy arithmetic, network construction and inference.
//!
//! Degenerate but expected conditions (an empty distribution, a zero defuzzification weight, a
//! parent combination missing from a conditional table) are not errors and never show up here.

use thiserror::Error;

use crate::terms::State;
use crate::variable::Variable;

/// Errors raised by [`TriangularFuzzyNumber`](crate::TriangularFuzzyNumber) construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyNumberError {
    #[error("fuzzy number ({a}, {m}, {b}) must be finite and satisfy a <= m <= b")]
    Unordered { a: f64, m: f64, b: f64 },

    #[error("division between fuzzy numbers is not implemented")]
    FuzzyDivision,

    #[error("division of a fuzzy number by zero")]
    DivisionByZero,

    #[error("scalar operand must be finite, got {0}")]
    NonFinite(f64),
}

/// Errors raised while validating a network in [`GraphBuilder::build`](crate::GraphBuilder::build).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("unknown linguistic state `{0}`")]
    UnknownState(String),

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("unknown defuzzification method `{0}`")]
    UnknownMethod(String),

    #[error("rule for `{node}` has {found} parent states but the node has {expected} parents")]
    ArityMismatch {
        node: Variable,
        expected: usize,
        found: usize,
    },

    #[error("rule for `{node}` uses state `{state}` which is not declared by parent `{parent}`")]
    InvalidParentState {
        node: Variable,
        parent: Variable,
        state: State,
    },

    #[error("state `{state}` is not declared by `{node}`")]
    InvalidState { node: Variable, state: State },

    #[error("fuzzy number for `{node}` state `{state}` lies outside [0, 1]")]
    OutOfUnitInterval { node: Variable, state: State },

    #[error("partition of `{variable}` state `{state}`: {reason}")]
    InvalidPartition {
        variable: Variable,
        state: State,
        reason: &'static str,
    },

    #[error(transparent)]
    FuzzyNumber(#[from] FuzzyNumberError),
}

/// Errors raised by [`FuzzyCausalGraph::infer`](crate::FuzzyCausalGraph::infer) and the Mamdani
/// systems.
///
/// A failed inference produces no result at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("evidence must contain at least one reading")]
    EmptyEvidence,

    #[error("target variable `{0}` does not exist in the network")]
    UnknownTarget(String),

    #[error("value for `{variable}` must be numeric, got {value}")]
    NonNumeric { variable: String, value: f64 },

    #[error("no reading for `{0}`")]
    MissingReading(Variable),

    #[error("no rule of the `{0}` system fired, its crisp output is undefined")]
    NoRuleFired(Variable),
}

pub type FuzzyNumberResult<T> = Result<T, FuzzyNumberError>;
pub type GraphResult<T> = Result<T, GraphError>;
pub type InferenceResult<T> = Result<T, InferenceError>;
