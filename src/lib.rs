//! Volcanic risk estimation with a fuzzy causal network.
//!
//! Eight crisp readings are fuzzified into linguistic states and propagated through a fixed three
//! layer graph (inputs, `amenaza`/`vulnerabilidad`, `riesgo`) whose priors and conditional tables
//! hold triangular fuzzy numbers. The resulting distribution is defuzzified into a 0-10 score.
//! [`construct_mamdani`] evaluates the same readings through classic Mamdani rule bases instead.
//!
//! ```
//! use volcanic_fuzzy_risk::{construct_graph, Evidence, RiskLevel, Variable};
//!
//! let graph = construct_graph();
//! let evidence = Evidence::new()
//!     .with(Variable::Sismicidad, 18.)
//!     .with(Variable::Gases, 4500.)
//!     .with(Variable::Deformacion, 40.)
//!     .with(Variable::Historia, 9.)
//!     .with(Variable::Densidad, 25000.)
//!     .with(Variable::Preparacion, 1.)
//!     .with(Variable::Proximidad, 3.)
//!     .with(Variable::Evacuacion, 2.);
//!
//! let assessment = graph.assess(&evidence)?;
//!
//! assert_eq!(assessment.level, RiskLevel::Alto);
//! # Ok::<(), volcanic_fuzzy_risk::InferenceError>(())
//! ```

mod config;
mod distribution;
mod error;
mod evidence;
mod graph;
mod inference;
mod linspace;
mod mamdani;
mod node;
mod ops;
mod risk;
mod rules;
mod tables;
mod terms;
mod triangular;
mod variable;

pub use config::{InferenceConfig, MamdaniConfig};
pub use distribution::Distribution;
pub use error::{FuzzyNumberError, FuzzyNumberResult, GraphError, GraphResult, InferenceError, InferenceResult};
pub use evidence::Evidence;
pub use graph::{construct_graph, FuzzyCausalGraph, GraphBuilder, NetworkInfo};
pub use linspace::Linspace;
pub use mamdani::{construct_mamdani, MamdaniPipeline, MamdaniRule, MamdaniSystem};
pub use node::{CausalNode, Resolution};
pub use ops::{defuzzify, Aggregation, AndOp, Defuzzification, DefuzzificationOp, ImplicationOp, NEUTRAL_SCORE};
pub use risk::{MamdaniAssessment, RiskAssessment, RiskLevel, Sensitivity};
pub use rules::{Cpd, CpdRule};
pub use terms::State;
pub use triangular::{Operand, TriangularFuzzyNumber};
pub use variable::{FuzzyVariable, LinguisticState, Variable};
